//! Snapshot parser
//!
//! Turns one framed message into a [`ConfigSnapshot`] and the list of sensor
//! samples, in document order. Only the fields the dashboard consumes are
//! looked at:
//!
//! ```text
//! {
//!   "metadata": { "CustomMetadata": { "Layout": "CPUDash", "CPUGridRows": 2, ... } },
//!   "sensors": {
//!     "<tag>": [ { "Unit": "%", "Value": "42", "SensorOrder": 1,
//!                  "Category": "Load", "ComponentName": "CPU" } ]
//!   }
//! }
//! ```
//!
//! Reading stops at the end of the first JSON document; bytes after it are
//! ignored.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

use relaydash_protocol::lenient;

use super::sensor::SensorSample;
use crate::config::{ConfigSnapshot, GridDims, LayoutMode, LogLevel, Rgb};

// Configuration keys under metadata.CustomMetadata
const KEY_CUSTOM: &str = "CustomMetadata";
const KEY_DEBUG_LEVEL: &str = "DebugLevel";
const KEY_LAYOUT: &str = "Layout";
const KEY_TEXT_COLOR: &str = "TextColor";
const KEY_PRIMARY_LABEL_FONT: &str = "CPUGridLabelFontSize";
const KEY_PRIMARY_VALUE_FONT: &str = "CPUGridValueFontSize";
const KEY_SECONDARY_LABEL_FONT: &str = "OtherGridLabelFontSize";
const KEY_SECONDARY_VALUE_FONT: &str = "OtherGridValueFontSize";
const KEY_PRIMARY_PADDING: &str = "CPUGridCellPadding";
const KEY_SECONDARY_PADDING: &str = "OtherGridCellPadding";
const KEY_PRIMARY_ROWS: &str = "CPUGridRows";
const KEY_PRIMARY_COLS: &str = "CPUGridCols";
const KEY_SECONDARY_ROWS: &str = "OtherGridRows";
const KEY_SECONDARY_COLS: &str = "OtherGridCols";

// Sensor reading keys
const KEY_UNIT: &str = "Unit";
const KEY_VALUE: &str = "Value";
const KEY_ORDER: &str = "SensorOrder";
const KEY_CATEGORY: &str = "Category";
const KEY_COMPONENT: &str = "ComponentName";

/// Snapshot parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// The message is not a readable JSON document
    MalformedMessage {
        /// 1-based line of the failure, 0 at end of input
        line: usize,
        /// 1-based column of the failure
        column: usize,
    },
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::MalformedMessage {
            line: e.line(),
            column: e.column(),
        }
    }
}

/// Configuration and samples parsed from one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Rendering configuration
    pub config: ConfigSnapshot,
    /// Samples in document order
    pub samples: Vec<SensorSample>,
    /// Sensor entries dropped for missing or unusable fields
    pub skipped: usize,
}

/// Parse one message
pub fn parse_snapshot(payload: &[u8]) -> Result<Snapshot, ParseError> {
    let mut de = serde_json::Deserializer::from_slice(payload);
    let envelope = Envelope::deserialize(&mut de)?;

    let config = parse_config(envelope.metadata.get(KEY_CUSTOM));

    let mut samples = Vec::with_capacity(envelope.sensors.0.len());
    let mut skipped = 0;
    for (tag, entry) in envelope.sensors.0 {
        match parse_sample(tag, &entry) {
            Some(sample) => samples.push(sample),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("{} sensor entries skipped", skipped);
    }

    Ok(Snapshot {
        config,
        samples,
        skipped,
    })
}

/// Top-level message shape
#[derive(Deserialize, Default)]
#[serde(default)]
struct Envelope {
    metadata: Value,
    sensors: SensorTable,
}

/// Sensor map that keeps document order
///
/// Anything other than an object reads as an empty table, so the message's
/// configuration still applies.
#[derive(Default)]
struct SensorTable(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for SensorTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SensorTableVisitor)
    }
}

struct SensorTableVisitor;

impl<'de> Visitor<'de> for SensorTableVisitor {
    type Value = SensorTable;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of sensor tags to readings")
    }

    fn visit_unit<E: de::Error>(self) -> Result<SensorTable, E> {
        Ok(SensorTable::default())
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<SensorTable, E> {
        Ok(SensorTable::default())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<SensorTable, E> {
        Ok(SensorTable::default())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<SensorTable, E> {
        Ok(SensorTable::default())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<SensorTable, E> {
        Ok(SensorTable::default())
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<SensorTable, E> {
        Ok(SensorTable::default())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<SensorTable, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(SensorTable::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SensorTable, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((tag, readings)) = map.next_entry::<String, Value>()? {
            entries.push((tag, readings));
        }
        Ok(SensorTable(entries))
    }
}

fn parse_config(custom: Option<&Value>) -> ConfigSnapshot {
    let mut config = ConfigSnapshot::default();
    let Some(custom) = custom else {
        return config;
    };

    let int = |key: &str| custom.get(key).map(json_int);

    config.debug_level = int(KEY_DEBUG_LEVEL).map(LogLevel::from_level);
    config.layout = custom
        .get(KEY_LAYOUT)
        .and_then(|v| LayoutMode::from_wire(&json_text(v)));

    let primary = &mut config.primary;
    if let Some(size) = int(KEY_PRIMARY_LABEL_FONT) {
        primary.fonts.label = saturate(size);
    }
    if let Some(size) = int(KEY_PRIMARY_VALUE_FONT) {
        primary.fonts.value = saturate(size);
    }
    if let Some(padding) = int(KEY_PRIMARY_PADDING) {
        primary.padding = saturate(padding);
    }
    primary.grid = GridDims::new(
        int(KEY_PRIMARY_ROWS).unwrap_or(primary.grid.rows() as i64),
        int(KEY_PRIMARY_COLS).unwrap_or(primary.grid.cols() as i64),
    );

    let secondary = &mut config.secondary;
    if let Some(size) = int(KEY_SECONDARY_LABEL_FONT) {
        secondary.fonts.label = saturate(size);
    }
    if let Some(size) = int(KEY_SECONDARY_VALUE_FONT) {
        secondary.fonts.value = saturate(size);
    }
    if let Some(padding) = int(KEY_SECONDARY_PADDING) {
        secondary.padding = saturate(padding);
    }
    secondary.grid = GridDims::new(
        int(KEY_SECONDARY_ROWS).unwrap_or(secondary.grid.rows() as i64),
        int(KEY_SECONDARY_COLS).unwrap_or(secondary.grid.cols() as i64),
    );

    if let Some(color) = custom.get(KEY_TEXT_COLOR) {
        let text = json_text(color);
        let hex = text.strip_prefix('#').unwrap_or(&text);
        config.text_color = Rgb::from_hex(lenient::parse_hex(hex));
    }

    config
}

/// Build a sample from the first reading of a sensor entry
fn parse_sample(tag: String, entry: &Value) -> Option<SensorSample> {
    let reading = entry.as_array()?.first()?;

    let unit = scalar_text(reading.get(KEY_UNIT)?)?;
    let value = scalar_text(reading.get(KEY_VALUE)?)?;
    let order = match reading.get(KEY_ORDER)? {
        n @ Value::Number(_) => saturate(json_int(n)),
        Value::String(s) => lenient::parse_i32(s),
        _ => return None,
    };
    let category = scalar_text(reading.get(KEY_CATEGORY)?)?;
    let component_name = scalar_text(reading.get(KEY_COMPONENT)?)?;

    Some(SensorSample {
        tag,
        display_value: format!("{} {}", value, unit),
        order,
        category,
        component_name,
    })
}

/// Integer view of a JSON value: floats truncate, non-numbers read as 0
fn json_int(value: &Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_u64().map(|_| i64::MAX))
        .or_else(|| value.as_f64().map(|f| f as i64))
        .unwrap_or(0)
}

/// Text view of a JSON value, as used for names and colors
fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Text of a string, number or boolean; `None` for anything else
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
