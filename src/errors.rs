use std::path::PathBuf;

use thiserror::Error;

/// Result type for Pcap decoding operations.
pub type PcapResult<T> = Result<T, PcapError>;

/* ----- enum PcapError ----- */

/// Errors that can occur while opening or decoding a pcap stream.
#[derive(Debug, Error)]
pub enum PcapError {
    /// No input path was given.
    #[error("No input given: a path or '-' for standard input is required")]
    MissingInput,
    /// The input could not be opened.
    #[error("Failed to open pcap input {}", path.display())]
    OpenFailed {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The stream ended before a whole global header could be read.
    #[error("Truncated pcap header: need 24B, got {got}B")]
    TruncatedHeader {
        /// Number of header bytes actually available
        got: usize,
    },
    /// The magic number of the global header is not one of the four pcap magics.
    #[error("Unsupported magic number: {0:#010X}")]
    UnsupportedMagic(u32),
    /// The packet buffer could not be grown to hold a packet.
    #[error("Failed to allocate a {requested}B packet buffer")]
    AllocationFailed {
        /// Requested buffer size
        requested: usize,
    },
    /// An I/O error occurred while reading the stream.
    #[error("I/O error while reading the stream")]
    ReadFailed(#[source] std::io::Error),
    /// The stream ended inside a packet header. Only reported in strict mode.
    #[error("Truncated packet header: need 16B, got {got}B")]
    TruncatedRecordHeader {
        /// Number of packet header bytes actually available
        got: usize,
    },
    /// The stream ended inside a packet payload. Only reported in strict mode.
    #[error("Truncated packet data: need {expected}B, got {got}B")]
    TruncatedPayload {
        /// Captured length announced by the packet header
        expected: u32,
        /// Number of payload bytes actually available
        got: usize,
    },
    /// A batch size of zero was configured.
    #[error("Batch size must be greater than 0")]
    InvalidBatchSize,
}

impl PcapError {
    /// True if the error is a mid-stream truncation.
    pub fn is_truncation(&self) -> bool {
        matches!(self, PcapError::TruncatedRecordHeader { .. } | PcapError::TruncatedPayload { .. })
    }
}
