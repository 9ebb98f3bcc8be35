//! Configuration of the pcap readers and sources.

use crate::errors::*;

/// Default number of rows per [`PacketBatch`](crate::PacketBatch).
pub const DEFAULT_BATCH_SIZE: usize = 2048;


/// What to do when the stream ends in the middle of a packet.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum TruncationPolicy {
    /// A partial packet header or payload ends the stream as if it was a clean end of file.
    ///
    /// Captures cut off by an interrupted capture tool are read up to the last complete packet.
    #[default]
    Lenient,
    /// A partial packet header or payload is reported as an error.
    Strict,
}

impl TruncationPolicy {
    pub fn is_strict(self) -> bool {
        self == TruncationPolicy::Strict
    }
}


/// Configuration of a [`PcapReader`](crate::pcap::PcapReader) or [`PcapSource`](crate::PcapSource).
///
/// # Examples
///
/// ```rust
/// use pcap_scan::{ReaderConfig, TruncationPolicy};
///
/// let config = ReaderConfig::default()
///     .with_batch_size(512)
///     .with_truncation(TruncationPolicy::Strict);
///
/// assert_eq!(config.batch_size, 512);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ReaderConfig {
    /// Maximum number of rows in a batch
    pub batch_size: usize,
    /// Handling of a stream truncated in the middle of a packet
    pub truncation: TruncationPolicy,
}

impl ReaderConfig {
    /// Set the maximum number of rows per batch.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the truncation policy.
    pub fn with_truncation(mut self, truncation: TruncationPolicy) -> Self {
        self.truncation = truncation;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> PcapResult<()> {
        if self.batch_size == 0 {
            return Err(PcapError::InvalidBatchSize);
        }

        Ok(())
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            batch_size: DEFAULT_BATCH_SIZE,
            truncation: TruncationPolicy::Lenient,
        }
    }
}
