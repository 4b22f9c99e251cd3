//! Telemetry snapshots
//!
//! A snapshot is everything one framed message says: the rendering
//! configuration and the current sensor readings.

pub mod parser;
pub mod sensor;

pub use parser::{parse_snapshot, ParseError, Snapshot};
pub use sensor::SensorSample;
