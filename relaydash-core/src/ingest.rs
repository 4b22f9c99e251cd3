//! Transport ingest
//!
//! Network and serial bytes arrive independently. Each source gets its own
//! [`SourceFeed`] with its own frame decoder, so partial frames of one
//! source never mix with the other. Completed messages from every feed are
//! applied through one [`SharedDashboard`], one at a time, under a blocking
//! mutex.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_io_async::Read;
use relaydash_protocol::{DecoderConfig, FrameDecoder, Source};

use crate::dashboard::{Dashboard, DashboardError, MessageReport};
use crate::traits::RenderTarget;

/// Dashboard shared by every transport
pub struct SharedDashboard<M: RawMutex, T> {
    inner: Mutex<M, RefCell<Dashboard<T>>>,
}

impl<M: RawMutex, T: RenderTarget> SharedDashboard<M, T> {
    pub const fn new(dashboard: Dashboard<T>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(dashboard)),
        }
    }

    /// Apply one complete message
    pub fn deliver(
        &self,
        source: Source,
        payload: &[u8],
    ) -> Result<MessageReport, DashboardError<T::Error>> {
        debug!("{} message, {} bytes", source.name(), payload.len());
        self.with(|dashboard| dashboard.handle_message(payload))
    }

    /// Run `f` with exclusive access to the dashboard
    pub fn with<R>(&self, f: impl FnOnce(&mut Dashboard<T>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

/// Counters of one feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeedStats {
    /// Bytes read from the transport
    pub bytes: usize,
    /// Messages framed
    pub messages: usize,
    /// Messages rendered without error
    pub applied: usize,
    /// Messages dropped by the snapshot parser
    pub parse_errors: usize,
    /// Messages the render target refused
    pub render_errors: usize,
    /// Frames rejected by the decoder
    pub frame_errors: usize,
    /// Sensor entries dropped for missing fields, rendered or not
    pub skipped_entries: usize,
}

/// Byte feed of one transport
pub struct SourceFeed<'d, M: RawMutex, T> {
    source: Source,
    decoder: FrameDecoder,
    dashboard: &'d SharedDashboard<M, T>,
    stats: FeedStats,
}

impl<'d, M: RawMutex, T: RenderTarget> SourceFeed<'d, M, T> {
    pub fn new(source: Source, dashboard: &'d SharedDashboard<M, T>) -> Self {
        Self::with_config(source, dashboard, DecoderConfig::default())
    }

    pub fn with_config(
        source: Source,
        dashboard: &'d SharedDashboard<M, T>,
        config: DecoderConfig,
    ) -> Self {
        Self {
            source,
            decoder: FrameDecoder::with_config(config),
            dashboard,
            stats: FeedStats::default(),
        }
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn stats(&self) -> FeedStats {
        self.stats
    }

    pub fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }

    /// Feed one chunk of transport bytes
    ///
    /// Every message completed by the chunk is applied before this returns.
    /// Failures are logged and counted; none of them stops the feed.
    pub fn feed(&mut self, chunk: &[u8]) {
        let Self {
            source,
            decoder,
            dashboard,
            stats,
        } = self;
        let source = *source;

        stats.bytes += chunk.len();
        let framed = decoder.feed(chunk, |message| {
            stats.messages += 1;
            match dashboard.deliver(source, message.payload()) {
                Ok(report) => {
                    stats.applied += 1;
                    stats.skipped_entries += report.skipped;
                }
                Err(DashboardError::Parse(_)) => stats.parse_errors += 1,
                Err(DashboardError::Render { skipped, .. }) => {
                    warn!(
                        "{}: render target refused message ({} entries skipped)",
                        source.name(),
                        skipped
                    );
                    stats.render_errors += 1;
                    stats.skipped_entries += skipped;
                }
            }
        });

        if let Err(e) = framed {
            warn!("{}: {}", source.name(), e);
            stats.frame_errors += 1;
        }
    }

    /// Pump `reader` until end of stream
    ///
    /// Returns the feed counters once a read yields no bytes. Read errors are
    /// returned as is; the partially framed message stays in the decoder.
    pub async fn run<R: Read>(
        &mut self,
        reader: &mut R,
        buf: &mut [u8],
    ) -> Result<FeedStats, R::Error> {
        info!("{} feed started", self.source.name());
        loop {
            let n = reader.read(buf).await?;
            if n == 0 {
                info!("{} feed closed", self.source.name());
                return Ok(self.stats);
            }
            self.feed(&buf[..n]);
        }
    }
}
