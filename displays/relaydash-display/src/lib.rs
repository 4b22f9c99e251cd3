//! Display side of the RelayDash firmware
//!
//! This crate provides:
//! - [`DisplayList`], a [`RenderTarget`](relaydash_core::RenderTarget) that
//!   keeps the dashboard widget tree in memory
//! - [`Screen`] and its widgets (label/value cells, radial gauges, bar chart)
//! - The font table mapping requested sizes to available faces
//!
//! # Architecture
//!
//! The dashboard core decides what to draw and hands declarative
//! instructions to the render target. The display driver only walks the
//! retained [`Screen`] when it is dirty, so the widget toolkit never sees
//! telemetry or layout logic.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod backend;
pub mod font;
pub mod screen;

// Re-export key types
pub use backend::{DisplayError, DisplayList};
pub use font::Font;
pub use screen::{Cell, Gauge, Region, Screen};
