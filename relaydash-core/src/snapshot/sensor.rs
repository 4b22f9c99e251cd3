//! Sensor samples

use alloc::string::String;

use relaydash_protocol::lenient;

/// One telemetry reading
///
/// Samples live for a single message: every message replaces the whole set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorSample {
    /// Sensor name shown as the cell label
    pub tag: String,
    /// Value and unit, e.g. `"42.5 %"`
    pub display_value: String,
    /// Sort key; not unique
    pub order: i32,
    /// Sensor category, e.g. `"Load"`
    pub category: String,
    /// Hardware component, e.g. `"CPU"`
    pub component_name: String,
}

impl SensorSample {
    /// Integer reading used for bars and gauges
    ///
    /// The leading integer of the display value; unparsable text reads as 0.
    /// Not clamped to any range.
    pub fn value(&self) -> i32 {
        lenient::parse_i32(&self.display_value)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorSample {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{}={} (#{})",
            self.tag.as_str(),
            self.display_value.as_str(),
            self.order
        );
    }
}
