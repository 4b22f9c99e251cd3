//! Configuration types
//!
//! Rendering configuration is not stored anywhere: each telemetry message
//! carries a complete snapshot, and the layout planner compares it against
//! the last one it applied.

pub mod types;

pub use types::*;
