//! Display-side traits
//!
//! These traits define the interface between the dashboard logic and the
//! widget toolkit that draws it.

pub mod render;

pub use render::{BucketUpdate, CellPass, CellStyle, GaugeId, RenderTarget};
