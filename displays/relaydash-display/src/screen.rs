//! Retained widget tree
//!
//! A [`Screen`] holds what the display currently shows: either a splash
//! text, or the regions of one layout with their cells, gauges and bar
//! chart. Texts are kept in fixed-capacity strings and truncated on a
//! character boundary.

use alloc::vec::Vec;

use heapless::String;
use relaydash_core::config::{LayoutMode, Rgb};
use relaydash_core::layout::{BucketId, CellKind, Placement};
use relaydash_core::traits::CellStyle;

use crate::font::Font;

/// Maximum characters of a cell label
pub const LABEL_LEN: usize = 32;

/// Maximum characters of a cell value
pub const VALUE_LEN: usize = 24;

/// Maximum characters of the splash text
pub const SPLASH_LEN: usize = 32;

/// Value range of radial gauges and bars
pub const GAUGE_MIN: i32 = 0;
pub const GAUGE_MAX: i32 = 100;

/// Gauge arc start angle (degrees, clockwise from 3 o'clock)
pub const GAUGE_ROTATION: u16 = 135;

/// Gauge arc sweep (degrees)
pub const GAUGE_SWEEP: u16 = 270;

/// Copy `text` into a fixed-capacity string, dropping whole characters that
/// do not fit
pub fn truncate<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Cell bounds inside a region, in percent of the region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    pub x_pct: u32,
    pub y_pct: u32,
    pub width_pct: u32,
    pub height_pct: u32,
}

impl Bounds {
    fn of(placement: &Placement<'_>) -> Self {
        Self {
            x_pct: placement.x_pct,
            y_pct: placement.y_pct,
            width_pct: placement.width_pct,
            height_pct: placement.height_pct,
        }
    }
}

/// Label/value cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub label: String<LABEL_LEN>,
    pub value: String<VALUE_LEN>,
    pub row: usize,
    pub col: usize,
    pub bounds: Bounds,
    pub label_font: Font,
    pub value_font: Font,
    pub padding: i32,
    pub color: Rgb,
}

impl Cell {
    pub(crate) fn new(placement: &Placement<'_>, style: &CellStyle) -> Self {
        let mut cell = Self {
            label: String::new(),
            value: String::new(),
            row: placement.row,
            col: placement.col,
            bounds: Bounds::of(placement),
            label_font: Font::default(),
            value_font: Font::default(),
            padding: style.padding,
            color: style.color,
        };
        cell.refresh(placement, style);
        cell
    }

    /// Replace text, fonts and color; position stays
    pub(crate) fn refresh(&mut self, placement: &Placement<'_>, style: &CellStyle) {
        self.label = truncate(&placement.sample.tag);
        self.value = truncate(&placement.sample.display_value);
        self.label_font = Font::for_size(style.label_font);
        self.value_font = Font::for_size(style.value_font);
        self.color = style.color;
    }
}

/// Radial gauge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gauge {
    pub label: String<LABEL_LEN>,
    /// Value within `GAUGE_MIN..=GAUGE_MAX`
    pub value: i32,
    pub row: usize,
    pub col: usize,
    pub bounds: Bounds,
    pub label_font: Font,
    pub color: Rgb,
}

impl Gauge {
    pub(crate) fn new(placement: &Placement<'_>, style: &CellStyle) -> Self {
        let mut gauge = Self {
            label: String::new(),
            value: GAUGE_MIN,
            row: placement.row,
            col: placement.col,
            bounds: Bounds::of(placement),
            label_font: Font::default(),
            color: style.color,
        };
        gauge.refresh(placement, style);
        gauge
    }

    pub(crate) fn refresh(&mut self, placement: &Placement<'_>, style: &CellStyle) {
        self.label = truncate(&placement.sample.tag);
        self.label_font = Font::for_size(style.label_font);
        self.color = style.color;
        if let Some(value) = placement.gauge {
            self.set_value(value);
        }
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(GAUGE_MIN, GAUGE_MAX);
    }
}

/// One region of a layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub bucket: BucketId,
    pub kind: CellKind,
    pub rows: u64,
    pub cols: u64,
    pub cells: Vec<Cell>,
    pub gauges: Vec<Gauge>,
}

impl Region {
    pub(crate) fn new(bucket: BucketId, kind: CellKind, rows: u64, cols: u64) -> Self {
        Self {
            bucket,
            kind,
            rows,
            cols,
            cells: Vec::new(),
            gauges: Vec::new(),
        }
    }

    /// Number of widgets in the region
    pub fn len(&self) -> usize {
        match self.kind {
            CellKind::LabelValue => self.cells.len(),
            CellKind::RadialGauge => self.gauges.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What the display shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    splash: Option<String<SPLASH_LEN>>,
    layout: Option<LayoutMode>,
    regions: Vec<Region>,
    bars: Option<Vec<i32>>,
    dirty: bool,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every widget and show only `text`
    pub fn show_splash(&mut self, text: &str) {
        *self = Self {
            splash: Some(truncate(text)),
            dirty: true,
            ..Self::default()
        };
    }

    /// Drop every widget and start an empty layout
    pub(crate) fn reset_layout(&mut self, mode: LayoutMode, with_bars: bool) {
        *self = Self {
            layout: Some(mode),
            bars: with_bars.then(Vec::new),
            dirty: true,
            ..Self::default()
        };
    }

    pub(crate) fn add_region(&mut self, region: Region) {
        self.regions.push(region);
        self.dirty = true;
    }

    pub fn splash(&self) -> Option<&str> {
        self.splash.as_ref().map(|s| s.as_str())
    }

    pub fn layout(&self) -> Option<LayoutMode> {
        self.layout
    }

    pub fn region(&self, bucket: BucketId) -> Option<&Region> {
        self.regions.iter().find(|r| r.bucket == bucket)
    }

    pub(crate) fn region_mut(&mut self, bucket: BucketId) -> Option<&mut Region> {
        self.dirty = true;
        self.regions.iter_mut().find(|r| r.bucket == bucket)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Bar chart values, `None` when the layout has no chart
    pub fn bars(&self) -> Option<&[i32]> {
        self.bars.as_deref()
    }

    pub(crate) fn bars_mut(&mut self) -> Option<&mut Vec<i32>> {
        self.dirty = true;
        self.bars.as_mut()
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        match (self.splash(), self.layout) {
            (Some(text), _) => defmt::write!(f, "Screen[splash {}]", text),
            (None, Some(mode)) => {
                defmt::write!(f, "Screen[{}", mode.wire_name());
                for region in &self.regions {
                    defmt::write!(f, ", {}: {}", region.bucket, region.len());
                }
                defmt::write!(f, "]");
            }
            (None, None) => defmt::write!(f, "Screen[]"),
        }
    }
}
