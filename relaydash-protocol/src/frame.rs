//! Message framing for the telemetry stream.
//!
//! Frame format:
//! - LENGTH (8 bytes): ASCII decimal payload length, zero padded
//! - PAYLOAD (LENGTH bytes): one JSON document
//!
//! Transports hand over arbitrary chunks: a single byte at a time on the serial
//! link, larger body fragments on the network link. The decoder carries partial
//! state between calls, so the chunk boundaries never change what is framed.
//!
//! A payload ends at exactly the declared length. Bytes after it in the same
//! chunk start the next message, so back-to-back messages in one read are
//! framed one after the other.

use alloc::vec::Vec;

use crate::lenient;

/// Length of the ASCII decimal length prefix
pub const LENGTH_PREFIX_LEN: usize = 8;

/// Default upper bound on a declared payload length
pub const DEFAULT_MAX_PAYLOAD_LEN: usize = 32 * 1024;

/// First byte of an unprefixed JSON document
const UNPREFIXED_START: u8 = b'{';

/// Errors reported while framing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Declared length exceeds [`DecoderConfig::max_payload_len`]
    ///
    /// The declared number of bytes is skipped before framing resumes.
    PayloadTooLarge {
        /// Length announced by the prefix
        declared: usize,
    },
}

/// Decoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderConfig {
    /// Largest declared payload accepted for assembly
    pub max_payload_len: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
        }
    }
}

/// A completed application message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    payload: Vec<u8>,
    declared_len: usize,
}

impl Message {
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Length announced by the prefix
    pub fn declared_len(&self) -> usize {
        self.declared_len
    }

    /// Payload as UTF-8 text, if it is valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.payload).ok()
    }

    /// Consume the message, returning the payload buffer
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

/// Decoder phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Waiting for the first byte of a message
    AwaitingFirstByte,
    /// Collecting the 8-byte length prefix
    ReadingLengthPrefix,
    /// Collecting payload bytes
    ReadingPayload,
    /// Skipping the payload of a rejected message
    Discarding,
}

/// Stream decoder for length-prefixed messages
///
/// One decoder per byte source. Completed messages are pushed to the handler
/// passed to [`FrameDecoder::feed`]; a single call may complete zero, one or
/// several messages.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    config: DecoderConfig,
    phase: Phase,
    prefix: heapless::Vec<u8, LENGTH_PREFIX_LEN>,
    declared_len: usize,
    consumed: usize,
    payload: Vec<u8>,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    /// Create a decoder with the default configuration
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    /// Create a decoder with an explicit configuration
    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            config,
            phase: Phase::AwaitingFirstByte,
            prefix: heapless::Vec::new(),
            declared_len: 0,
            consumed: 0,
            payload: Vec::new(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Payload bytes accumulated for the message in progress
    pub fn pending(&self) -> usize {
        self.payload.len()
    }

    /// Drop any partial message and wait for a new one
    pub fn reset(&mut self) {
        self.phase = Phase::AwaitingFirstByte;
        self.prefix.clear();
        self.declared_len = 0;
        self.consumed = 0;
        self.payload = Vec::new();
    }

    /// Feed a chunk of bytes
    ///
    /// Every message completed by this chunk is handed to `on_message`, in
    /// stream order. All bytes of the chunk are consumed even when a message is
    /// rejected; the first rejection is returned after the chunk is processed.
    pub fn feed<F>(&mut self, chunk: &[u8], mut on_message: F) -> Result<(), FrameError>
    where
        F: FnMut(Message),
    {
        if chunk.is_empty() {
            warn!("Ignoring empty chunk");
            return Ok(());
        }

        let mut result = Ok(());
        let mut rest = chunk;

        while !rest.is_empty() {
            match self.phase {
                Phase::AwaitingFirstByte => {
                    let first = rest[0];
                    if first == UNPREFIXED_START {
                        info!("Unprefixed message, dropping {} bytes", rest.len());
                        self.reset();
                        break;
                    }
                    if first.is_ascii_digit() {
                        self.phase = Phase::ReadingLengthPrefix;
                    } else {
                        // Resync: skip bytes that cannot start a prefix
                        trace!("Skipping stray byte {=u8:#x}", first);
                        rest = &rest[1..];
                    }
                }
                Phase::ReadingLengthPrefix => {
                    let take = (LENGTH_PREFIX_LEN - self.prefix.len()).min(rest.len());
                    // Cannot fail: `take` never exceeds the remaining capacity
                    let _ = self.prefix.extend_from_slice(&rest[..take]);
                    rest = &rest[take..];

                    if self.prefix.is_full() {
                        if let Err(e) = self.begin_payload() {
                            if result.is_ok() {
                                result = Err(e);
                            }
                        }
                    }
                }
                Phase::ReadingPayload => {
                    let take = (self.declared_len - self.payload.len()).min(rest.len());
                    self.payload.extend_from_slice(&rest[..take]);
                    rest = &rest[take..];
                }
                Phase::Discarding => {
                    let take = (self.declared_len - self.consumed).min(rest.len());
                    self.consumed += take;
                    rest = &rest[take..];
                    if self.consumed >= self.declared_len {
                        debug!("Skipped {} bytes of rejected message", self.consumed);
                        self.reset();
                    }
                }
            }

            if self.phase == Phase::ReadingPayload && self.payload.len() >= self.declared_len {
                on_message(self.take_message());
            }
        }

        result
    }

    /// Interpret the completed prefix and enter the payload phase
    fn begin_payload(&mut self) -> Result<(), FrameError> {
        let declared = usize::try_from(lenient::parse_decimal(&self.prefix)).unwrap_or(0);
        self.prefix.clear();
        self.declared_len = declared;
        self.consumed = 0;

        if declared > self.config.max_payload_len {
            warn!(
                "Declared length {} exceeds limit {}",
                declared,
                self.config.max_payload_len
            );
            self.phase = Phase::Discarding;
            return Err(FrameError::PayloadTooLarge { declared });
        }

        debug!("Length prefix: {} bytes", declared);
        self.payload = Vec::with_capacity(declared);
        self.phase = Phase::ReadingPayload;
        Ok(())
    }

    /// Hand out the assembled message and return to the idle phase
    fn take_message(&mut self) -> Message {
        let message = Message {
            payload: core::mem::take(&mut self.payload),
            declared_len: self.declared_len,
        };
        self.reset();
        message
    }
}
