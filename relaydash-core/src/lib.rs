//! Board-agnostic dashboard logic for the RelayDash firmware
//!
//! This crate contains everything between a framed telemetry message and the
//! display instructions it produces:
//!
//! - Snapshot parsing (configuration and sensor samples)
//! - Sensor classification into display buckets
//! - Layout planning: rebuild or update, sorted buckets
//! - Grid partitioning of a bucket
//! - The render target trait implemented by the display side
//! - Ingest from several transports into one shared dashboard

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod config;
pub mod dashboard;
pub mod ingest;
pub mod layout;
pub mod snapshot;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use dashboard::{Dashboard, DashboardError, MessageReport, SPLASH_TEXT};
pub use ingest::{FeedStats, SharedDashboard, SourceFeed};
pub use layout::Plan;
pub use snapshot::{parse_snapshot, ParseError, SensorSample, Snapshot};
pub use traits::RenderTarget;
