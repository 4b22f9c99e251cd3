//! Transport identity

/// Byte source a chunk arrived from
///
/// Each source gets its own decoder; partial frames from different sources
/// must never share accumulation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Source {
    /// HTTP POST body chunks from the network link
    Network,
    /// Bytes read from the serial console
    Serial,
}

impl Source {
    /// All sources, in a fixed order
    pub const ALL: [Source; 2] = [Source::Network, Source::Serial];

    /// Short name for diagnostics
    pub fn name(self) -> &'static str {
        match self {
            Source::Network => "network",
            Source::Serial => "serial",
        }
    }
}
