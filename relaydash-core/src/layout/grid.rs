//! Grid partitioning
//!
//! Item `i` of a bucket lands in row `i / cols`, column `i % cols`. Cells are
//! a uniform `100 / cols` by `100 / rows` percent of the region no matter how
//! many items there are. Items past `rows * cols` are still placed (below the
//! last row); the region scrolls or clips them.

use alloc::vec;
use alloc::vec::Vec;

use crate::config::GridDims;
use crate::snapshot::SensorSample;

/// What a cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CellKind {
    /// Label above a value
    LabelValue,
    /// Arc gauge with a label
    RadialGauge,
}

/// Track layout of a region grid
///
/// One equal-fraction track per row and per column, built fresh for every
/// pass. At most [`MAX_TEMPLATE_TRACKS`] tracks are laid out per axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTemplate {
    /// Fraction weight of each column
    pub columns: Vec<u16>,
    /// Fraction weight of each row
    pub rows: Vec<u16>,
}

/// Track count limit of a [`GridTemplate`] axis
pub const MAX_TEMPLATE_TRACKS: usize = u16::MAX as usize;

impl GridTemplate {
    pub fn new(dims: GridDims) -> Self {
        Self {
            columns: vec![1; template_tracks(dims.cols())],
            rows: vec![1; template_tracks(dims.rows())],
        }
    }
}

fn template_tracks(count: u64) -> usize {
    track_count(count).min(MAX_TEMPLATE_TRACKS)
}

fn track_count(count: u64) -> usize {
    usize::try_from(count).unwrap_or(usize::MAX)
}

/// Position of one item in a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<'a> {
    /// Index in the bucket
    pub index: usize,
    pub row: usize,
    pub col: usize,
    /// Left edge, percent of region width
    pub x_pct: u32,
    /// Top edge, percent of region height; above 100 for overflow rows
    pub y_pct: u32,
    pub width_pct: u32,
    pub height_pct: u32,
    pub sample: &'a SensorSample,
    /// Raw gauge value for [`CellKind::RadialGauge`] cells, not clamped
    pub gauge: Option<i32>,
}

/// Place `samples` on a `dims` grid
pub fn partition(samples: &[SensorSample], dims: GridDims, kind: CellKind) -> Partition<'_> {
    Partition {
        samples,
        dims,
        kind,
        next: 0,
    }
}

/// Iterator over the placements of a bucket
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    samples: &'a [SensorSample],
    dims: GridDims,
    kind: CellKind,
    next: usize,
}

impl<'a> Iterator for Partition<'a> {
    type Item = Placement<'a>;

    fn next(&mut self) -> Option<Placement<'a>> {
        let sample = self.samples.get(self.next)?;
        let index = self.next;
        self.next += 1;

        let cols = track_count(self.dims.cols());
        let rows = track_count(self.dims.rows());
        let row = index / cols;
        let col = index % cols;

        Some(Placement {
            index,
            row,
            col,
            x_pct: percent_offset(col, cols),
            y_pct: percent_offset(row, rows),
            width_pct: percent_offset(1, cols),
            height_pct: percent_offset(1, rows),
            sample,
            gauge: match self.kind {
                CellKind::RadialGauge => Some(sample.value()),
                CellKind::LabelValue => None,
            },
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.samples.len() - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Partition<'_> {}

fn percent_offset(track: usize, tracks: usize) -> u32 {
    let pct = track.saturating_mul(100) / tracks;
    u32::try_from(pct).unwrap_or(u32::MAX)
}
