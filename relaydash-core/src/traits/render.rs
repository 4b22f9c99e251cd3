//! Render target trait
//!
//! The dashboard never draws. It hands declarative instructions to a
//! [`RenderTarget`], which owns the widget tree and the graphics toolkit.

use crate::config::{ConfigSnapshot, LayoutMode, RegionConfig, Rgb};
use crate::layout::{BucketId, CellKind, GridTemplate, Placement};

/// Index of a radial gauge in the secondary region
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GaugeId(pub usize);

/// How a bucket update treats the existing cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CellPass {
    /// Replace every cell of the region
    Populate,
    /// Refresh text, fonts and color of cells that already exist
    Refresh,
}

/// Fonts, padding and color of a region's cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CellStyle {
    pub label_font: i32,
    pub value_font: i32,
    pub padding: i32,
    pub color: Rgb,
}

impl CellStyle {
    pub fn new(region: &RegionConfig, color: Rgb) -> Self {
        Self {
            label_font: region.fonts.label,
            value_font: region.fonts.value,
            padding: region.padding,
            color,
        }
    }
}

/// Instructions for one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketUpdate<'a> {
    pub bucket: BucketId,
    pub pass: CellPass,
    pub kind: CellKind,
    pub template: GridTemplate,
    /// Cells in bucket order
    pub placements: &'a [Placement<'a>],
    pub style: CellStyle,
}

/// Trait for the display side of the dashboard
///
/// Every method reports failure through `Self::Error`; the dashboard stops
/// the current pass at the first error.
pub trait RenderTarget {
    type Error;

    /// Show a splash text on an otherwise empty screen
    fn show_splash(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Tear down the current widget tree and build the one for `mode`
    fn rebuild_layout(
        &mut self,
        mode: LayoutMode,
        config: &ConfigSnapshot,
    ) -> Result<(), Self::Error>;

    /// Populate or refresh the cells of one region
    fn update_bucket(&mut self, update: &BucketUpdate<'_>) -> Result<(), Self::Error>;

    /// Set the value of one radial gauge
    fn set_gauge_value(&mut self, id: GaugeId, value: i32) -> Result<(), Self::Error>;

    /// Replace the values shown by the bar chart
    fn set_bar_series(&mut self, values: &[i32]) -> Result<(), Self::Error>;
}
