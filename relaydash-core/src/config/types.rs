//! Rendering configuration carried by each telemetry message
//!
//! Every field of [`ConfigSnapshot`] is optional on the wire. A message that
//! omits a field gets the baseline default for that field, never the value a
//! previous message supplied.

/// Default label and value font size (points)
pub const DEFAULT_FONT_SIZE: i32 = 18;

/// Default cell padding (pixels)
pub const DEFAULT_CELL_PADDING: i32 = 0;

/// Default primary grid rows
pub const DEFAULT_PRIMARY_ROWS: u16 = 3;

/// Default primary grid columns
pub const DEFAULT_PRIMARY_COLS: u16 = 4;

/// Default secondary grid rows
pub const DEFAULT_SECONDARY_ROWS: u16 = 3;

/// Default secondary grid columns
pub const DEFAULT_SECONDARY_COLS: u16 = 3;

/// Dashboard layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutMode {
    /// Every sensor in one label/value grid
    DataGrid,
    /// Primary sensors as bars and a grid, secondary sensors as a grid
    PrimaryDashboard,
    /// Primary sensors as bars and a grid, secondary sensors as radial gauges
    PrimaryDials,
}

impl LayoutMode {
    /// Parse the layout name used on the wire
    ///
    /// Returns `None` for names no layout answers to.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "DataGrid" => Some(LayoutMode::DataGrid),
            "CPUDash" => Some(LayoutMode::PrimaryDashboard),
            "CPUDials" => Some(LayoutMode::PrimaryDials),
            _ => None,
        }
    }

    /// Layout name used on the wire
    pub fn wire_name(self) -> &'static str {
        match self {
            LayoutMode::DataGrid => "DataGrid",
            LayoutMode::PrimaryDashboard => "CPUDash",
            LayoutMode::PrimaryDials => "CPUDials",
        }
    }

    /// Whether the layout splits sensors into primary and secondary groups
    pub fn is_split(self) -> bool {
        matches!(self, LayoutMode::PrimaryDashboard | LayoutMode::PrimaryDials)
    }
}

/// Runtime log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogLevel {
    None,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    /// Map the numeric `DebugLevel` field
    ///
    /// Values below 1 silence logging, values above 4 behave as `Debug`.
    pub fn from_level(level: i64) -> Self {
        match level {
            i64::MIN..=0 => LogLevel::None,
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }

    /// Whether a message at `level` should be emitted
    pub fn allows(self, level: LogLevel) -> bool {
        level != LogLevel::None && level <= self
    }
}

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb(u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFF_FFFF);
    pub const BLACK: Rgb = Rgb(0x00_0000);

    /// Build from a `0xRRGGBB` value; bits above 24 are dropped
    pub const fn from_hex(value: u32) -> Self {
        Rgb(value & 0xFF_FFFF)
    }

    /// The `0xRRGGBB` value
    pub const fn hex(self) -> u32 {
        self.0
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

/// Grid dimensions
///
/// Neither dimension is ever zero: a declared zero (or negative) count is
/// raised to 1, so cell sizes can always be divided out. Large counts are
/// kept as declared, so two different counts never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GridDims {
    rows: u64,
    cols: u64,
}

impl GridDims {
    /// Create grid dimensions, raising each count to at least 1
    pub fn new(rows: i64, cols: i64) -> Self {
        Self {
            rows: clamp_count(rows),
            cols: clamp_count(cols),
        }
    }

    pub const fn rows(self) -> u64 {
        self.rows
    }

    pub const fn cols(self) -> u64 {
        self.cols
    }

    /// Number of cells the grid shows without overflow
    pub const fn capacity(self) -> u64 {
        self.rows.saturating_mul(self.cols)
    }
}

fn clamp_count(count: i64) -> u64 {
    count.max(1).unsigned_abs()
}

/// Label and value font sizes of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FontSizes {
    pub label: i32,
    pub value: i32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            label: DEFAULT_FONT_SIZE,
            value: DEFAULT_FONT_SIZE,
        }
    }
}

/// Structural settings of one screen region
///
/// Five of the ten numeric layout fields. Any difference between two
/// consecutive messages forces a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegionConfig {
    /// Label and value font sizes
    pub fonts: FontSizes,
    /// Padding inside each cell
    pub padding: i32,
    /// Row and column counts
    pub grid: GridDims,
}

impl RegionConfig {
    /// Baseline for the primary (left) region
    pub fn primary() -> Self {
        Self {
            fonts: FontSizes::default(),
            padding: DEFAULT_CELL_PADDING,
            grid: GridDims::new(DEFAULT_PRIMARY_ROWS as i64, DEFAULT_PRIMARY_COLS as i64),
        }
    }

    /// Baseline for the secondary (right, or full-screen) region
    pub fn secondary() -> Self {
        Self {
            fonts: FontSizes::default(),
            padding: DEFAULT_CELL_PADDING,
            grid: GridDims::new(DEFAULT_SECONDARY_ROWS as i64, DEFAULT_SECONDARY_COLS as i64),
        }
    }
}

/// Rendering configuration extracted from one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigSnapshot {
    /// Requested layout, `None` when absent or unrecognized
    pub layout: Option<LayoutMode>,
    /// Requested log verbosity
    pub debug_level: Option<LogLevel>,
    /// Primary region (CPU load sensors)
    pub primary: RegionConfig,
    /// Secondary region (every other sensor, or all of them in DataGrid)
    pub secondary: RegionConfig,
    /// Label and value text color
    pub text_color: Rgb,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self {
            layout: None,
            debug_level: None,
            primary: RegionConfig::primary(),
            secondary: RegionConfig::secondary(),
            text_color: Rgb::WHITE,
        }
    }
}

impl ConfigSnapshot {
    /// Whether the ten numeric layout fields match
    ///
    /// Layout, log level and text color are not compared.
    pub fn same_structure(&self, other: &ConfigSnapshot) -> bool {
        self.primary == other.primary && self.secondary == other.secondary
    }

    /// Region settings used by a bucket
    pub fn region(&self, primary: bool) -> &RegionConfig {
        if primary {
            &self.primary
        } else {
            &self.secondary
        }
    }
}
