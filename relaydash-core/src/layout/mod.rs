//! Layout planning
//!
//! - Sensor classification into buckets
//! - Grid partitioning of a bucket
//! - The planner deciding between rebuild and update

pub mod classify;
pub mod grid;
pub mod planner;

pub use classify::{classify, BucketId, Buckets};
pub use grid::{partition, CellKind, GridTemplate, Partition, Placement, MAX_TEMPLATE_TRACKS};
pub use planner::{LayoutPlanner, LayoutState, Plan};
