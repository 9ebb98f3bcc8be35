//! Table-like source pulling fixed-size batches of packets out of a capture.

use std::io::Read;

use tracing::{debug, error};

use crate::batch::{Column, PacketBatch, SCHEMA};
use crate::config::{ReaderConfig, DEFAULT_BATCH_SIZE};
use crate::errors::*;
use crate::input::Input;
use crate::pcap::{DecodingContext, PcapHeader, PcapReader};


/// Reads a capture as a sequence of [`PacketBatch`]es of at most `batch_size` rows.
///
/// The global header is negotiated when the source is opened, so a source that opened successfully
/// always has a valid header. Each call to [`next_batch`](Self::next_batch) decodes packets until the
/// batch is full or the capture ends; an empty batch signals the end.
///
/// If decoding fails after some rows of a batch were decoded, those rows are returned and the error is
/// returned by the following call. Afterwards only empty batches are returned.
///
/// The source also implements `Iterator`, yielding the non-empty batches.
///
/// # Examples
///
/// ```rust,no_run
/// use pcap_scan::{Input, PcapSource, ReaderConfig};
///
/// let input = Input::parse(Some("test.pcap")).unwrap();
/// let source = PcapSource::open(input, ReaderConfig::default().with_batch_size(100)).unwrap();
///
/// for batch in source {
///     let batch = batch.unwrap();
///     println!("{} packets", batch.len());
/// }
/// ```
#[derive(Debug)]
pub struct PcapSource<R: Read = Box<dyn Read + Send>> {
    reader: PcapReader<R>,
    config: ReaderConfig,
    pending_error: Option<PcapError>,
    rows_read: u64,
}

impl PcapSource {
    /// Opens `input` and negotiates its global header.
    ///
    /// # Errors
    /// Fails before producing any row if the configuration is invalid, the input can't be opened,
    /// the global header is truncated or its magic number is unknown.
    pub fn open(input: Input, config: ReaderConfig) -> PcapResult<PcapSource> {
        let stream = input.open()?;

        Self::from_reader(stream, config).inspect_err(|e| error!(%input, "Failed to open pcap source: {e}"))
    }
}

impl<R: Read> PcapSource<R> {
    /// Creates a source over an already opened byte stream.
    pub fn from_reader(reader: R, config: ReaderConfig) -> PcapResult<PcapSource<R>> {
        config.validate()?;
        let reader = PcapReader::with_config(reader, &config)?;

        Ok(PcapSource {
            reader,
            config,
            pending_error: None,
            rows_read: 0,
        })
    }

    /// Columns of the batches produced by this source.
    pub fn schema(&self) -> &'static [Column] {
        &SCHEMA
    }

    /// Decodes the next batch of packets.
    pub fn next_batch(&mut self) -> PcapResult<PacketBatch> {
        if let Some(e) = self.pending_error.take() {
            return Err(e);
        }

        let mut batch = PacketBatch::with_capacity(self.config.batch_size.min(DEFAULT_BATCH_SIZE));

        while batch.len() < self.config.batch_size {
            match self.reader.next_packet() {
                Ok(Some(packet)) => batch.push(&packet),
                Ok(None) => break,
                Err(e) => {
                    error!(rows = self.rows_read + batch.len() as u64, "Stopping pcap decoding: {e}");

                    if batch.is_empty() {
                        return Err(e);
                    }
                    self.pending_error = Some(e);
                    break;
                },
            }
        }

        self.rows_read += batch.len() as u64;
        if batch.is_empty() {
            debug!(rows = self.rows_read, "End of pcap stream");
        }

        Ok(batch)
    }

    /// Returns the global header of the capture
    pub fn header(&self) -> PcapHeader {
        self.reader.header()
    }

    /// Returns the decoding context negotiated from the global header
    pub fn context(&self) -> DecodingContext {
        self.reader.context()
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Number of rows returned so far.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }
}

impl<R: Read> Iterator for PcapSource<R> {
    type Item = PcapResult<PacketBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_batch() {
            Ok(batch) if batch.is_empty() => None,
            res => Some(res),
        }
    }
}
