use std::io::Read;

use byteorder_slice::byteorder::{BigEndian, LittleEndian};
use tracing::warn;

use super::{DecodingContext, PacketHeader, PcapHeader, PcapPacket};
use crate::config::{ReaderConfig, TruncationPolicy};
use crate::errors::*;
use crate::read_buffer::ReadBuffer;
use crate::Endianness;


/// Reads a pcap from a reader.
///
/// The global header is read and validated on creation, then [`next_packet`](Self::next_packet) returns one
/// packet at a time. The returned packets borrow the reader's internal buffer.
///
/// A stream that ends inside a packet is treated as a clean end of stream unless the reader is configured
/// with [`TruncationPolicy::Strict`]. Once the end of the stream or an error is reached, the reader only
/// returns `Ok(None)`.
///
/// # Examples
///
/// ```rust,no_run
/// use std::fs::File;
///
/// use pcap_scan::pcap::PcapReader;
///
/// let file_in = File::open("test.pcap").expect("Error opening file");
/// let mut pcap_reader = PcapReader::new(file_in).unwrap();
///
/// // Read test.pcap
/// while let Some(pkt) = pcap_reader.next_packet().unwrap() {
///     //Do something
/// }
/// ```
#[derive(Debug)]
pub struct PcapReader<R: Read> {
    header: PcapHeader,
    context: DecodingContext,
    truncation: TruncationPolicy,
    reader: ReadBuffer<R>,
    finished: bool,
}

impl<R: Read> PcapReader<R> {
    /// Create a new PcapReader from an existing reader.
    /// This function reads the global pcap header of the file to verify its integrity.
    ///
    /// # Errors
    /// Return an error if the stream does not start with a whole pcap global header,
    /// if its magic number is unknown or if the packet buffer can't be allocated.
    pub fn new(reader: R) -> PcapResult<PcapReader<R>> {
        Self::with_config(reader, &ReaderConfig::default())
    }

    /// Create a new PcapReader with the truncation policy of `config`.
    pub fn with_config(mut reader: R, config: &ReaderConfig) -> PcapResult<PcapReader<R>> {
        let (header, context) = DecodingContext::negotiate(&mut reader)?;
        let reader = ReadBuffer::with_capacity(reader, context.initial_buffer_hint() as usize)?;

        Ok(PcapReader {
            header,
            context,
            truncation: config.truncation,
            reader,
            finished: false,
        })
    }

    /// Returns the next [`PcapPacket`], or `None` at the end of the stream.
    pub fn next_packet(&mut self) -> PcapResult<Option<PcapPacket<'_>>> {
        if self.finished {
            return Ok(None);
        }

        let header = match self.read_packet() {
            Ok(Some(header)) => header,
            Ok(None) => {
                self.finished = true;
                return Ok(None);
            },
            Err(e) => {
                self.finished = true;
                return Err(e);
            },
        };

        let timestamp_ns = header.timestamp_ns(self.context.ts_resolution);
        Ok(Some(PcapPacket::new(timestamp_ns, header.orig_len, self.reader.data())))
    }

    /// Reads the next packet header and its data into the buffer.
    fn read_packet(&mut self) -> PcapResult<Option<PacketHeader>> {
        let mut raw = [0_u8; PacketHeader::SIZE];

        let nb_read = self.reader.read_full(&mut raw).map_err(PcapError::ReadFailed)?;
        if nb_read == 0 {
            return Ok(None);
        }
        if nb_read < PacketHeader::SIZE {
            return self.truncated(PcapError::TruncatedRecordHeader { got: nb_read });
        }

        let header = match self.context.endianness {
            Endianness::Big => PacketHeader::from_bytes::<BigEndian>(&raw),
            Endianness::Little => PacketHeader::from_bytes::<LittleEndian>(&raw),
        };

        let len = header.incl_len as usize;
        self.reader.reserve_exact(len)?;

        let nb_read = self.reader.fill(len).map_err(PcapError::ReadFailed)?;
        if nb_read < len {
            return self.truncated(PcapError::TruncatedPayload { expected: header.incl_len, got: nb_read });
        }

        Ok(Some(header))
    }

    fn truncated(&self, err: PcapError) -> PcapResult<Option<PacketHeader>> {
        match self.truncation {
            TruncationPolicy::Strict => Err(err),
            TruncationPolicy::Lenient => {
                warn!("Pcap stream truncated, ending it: {err}");
                Ok(None)
            },
        }
    }

    /// Returns the global header of the pcap
    pub fn header(&self) -> PcapHeader {
        self.header
    }

    /// Returns the decoding context negotiated from the global header
    pub fn context(&self) -> DecodingContext {
        self.context
    }

    /// Current capacity of the packet buffer
    pub fn buffer_capacity(&self) -> usize {
        self.reader.capacity()
    }

    /// True once the end of the stream or an error was reached.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consumes the `PcapReader`, returning the wrapped reader.
    pub fn into_reader(self) -> R {
        self.reader.into_inner()
    }
}
