//! Telemetry framing protocol
//!
//! This crate reconstructs complete application messages from the chunked byte
//! streams delivered by the network and serial transports.
//!
//! # Envelope
//!
//! Every message is a JSON document preceded by its length:
//! ```text
//! ┌──────────────────────┬──────────────────────────┐
//! │ LENGTH               │ PAYLOAD                  │
//! │ 8 ASCII digits       │ LENGTH bytes of JSON     │
//! └──────────────────────┴──────────────────────────┘
//! ```
//!
//! A chunk whose first byte is `{` (an unprefixed document) is not framed; it
//! is dropped and the decoder waits for the next prefixed message.
//!
//! The decoder performs no JSON interpretation. Completed messages are pushed
//! to a single handler supplied by the caller.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod frame;
pub mod lenient;
pub mod source;

pub use frame::{
    DecoderConfig, FrameDecoder, FrameError, Message, Phase, DEFAULT_MAX_PAYLOAD_LEN,
    LENGTH_PREFIX_LEN,
};
pub use source::Source;
