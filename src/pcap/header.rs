use std::io::Read;

use byteorder_slice::byteorder::{BigEndian, ByteOrder, LittleEndian};
use tracing::debug;

use crate::errors::*;
use crate::read_buffer::read_full;
use crate::{Endianness, TsResolution};


/// Magic number of a microsecond resolution pcap, as read in big endian from a big endian file.
pub const MAGIC_MICRO: u32 = 0xa1b2c3d4;
/// Magic number of a nanosecond resolution pcap, as read in big endian from a big endian file.
pub const MAGIC_NANO: u32 = 0xa1b23c4d;

/// Returns the byte order and timestamp resolution announced by a magic number.
///
/// The magic is the first four bytes of the file interpreted in big endian.
pub fn classify_magic(magic_number: u32) -> Option<(Endianness, TsResolution)> {
    const MAGIC_MICRO_SWAPPED: u32 = MAGIC_MICRO.swap_bytes();
    const MAGIC_NANO_SWAPPED: u32 = MAGIC_NANO.swap_bytes();

    match magic_number {
        MAGIC_MICRO => Some((Endianness::Big, TsResolution::MicroSecond)),
        MAGIC_MICRO_SWAPPED => Some((Endianness::Little, TsResolution::MicroSecond)),
        MAGIC_NANO => Some((Endianness::Big, TsResolution::NanoSecond)),
        MAGIC_NANO_SWAPPED => Some((Endianness::Little, TsResolution::NanoSecond)),
        _ => None,
    }
}


/// Pcap Global Header
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PcapHeader {
    /// Magic number, as read in big endian
    pub magic_number: u32,

    /// Major version number
    pub version_major: u16,

    /// Minor version number
    pub version_minor: u16,

    /// GMT to local timezone correction, should always be 0
    pub ts_correction: i32,

    /// Timestamp accuracy, should always be 0
    pub ts_accuracy: u32,

    /// Max length of captured packet, typically 65535
    pub snaplen: u32,

    /// DataLink type (first layer in the packet), passed through unmodified
    pub datalink: u32,
}

impl PcapHeader {
    /// Size of the global header on disk
    pub const SIZE: usize = 24;

    /// Reads a `PcapHeader` from a reader, consuming exactly 24 bytes on success.
    ///
    /// Returns an error if fewer than 24 bytes are available,
    /// if the magic number is not a pcap one or if there is a reading error.
    pub fn from_reader<R: Read>(reader: &mut R) -> PcapResult<PcapHeader> {
        let mut raw = [0_u8; Self::SIZE];

        let nb_read = read_full(reader, &mut raw).map_err(PcapError::ReadFailed)?;
        if nb_read < Self::SIZE {
            return Err(PcapError::TruncatedHeader { got: nb_read });
        }

        Self::from_bytes(&raw)
    }

    /// Parses a `PcapHeader` from its 24 bytes.
    pub fn from_bytes(raw: &[u8; Self::SIZE]) -> PcapResult<PcapHeader> {
        let magic_number = BigEndian::read_u32(&raw[0..4]);

        return match classify_magic(magic_number) {
            Some((Endianness::Big, _)) => Ok(init_pcap_header::<BigEndian>(raw, magic_number)),
            Some((Endianness::Little, _)) => Ok(init_pcap_header::<LittleEndian>(raw, magic_number)),
            None => Err(PcapError::UnsupportedMagic(magic_number)),
        };

        // Inner function used for the initialisation of the `PcapHeader`
        fn init_pcap_header<B: ByteOrder>(raw: &[u8; PcapHeader::SIZE], magic_number: u32) -> PcapHeader {
            PcapHeader {
                magic_number,
                version_major: B::read_u16(&raw[4..6]),
                version_minor: B::read_u16(&raw[6..8]),
                ts_correction: B::read_i32(&raw[8..12]),
                ts_accuracy: B::read_u32(&raw[12..16]),
                snaplen: B::read_u32(&raw[16..20]),
                datalink: B::read_u32(&raw[20..24]),
            }
        }
    }

    /// Return the endianness of the pcap
    ///
    /// # Panics
    ///
    /// Panics if the magic number is invalid
    pub fn endianness(&self) -> Endianness {
        match classify_magic(self.magic_number) {
            Some((endianness, _)) => endianness,
            None => unreachable!("Wrong magic number, can't get the header's endianness"),
        }
    }

    /// Return the timestamp resolution of the pcap
    ///
    /// # Panics
    ///
    /// Panics if the magic number is invalid
    pub fn ts_resolution(&self) -> TsResolution {
        match classify_magic(self.magic_number) {
            Some((_, ts_resolution)) => ts_resolution,
            None => unreachable!("Wrong magic number, can't get the header's timestamp resolution"),
        }
    }
}


/// Everything needed to decode the packets following a global header.
///
/// Derived once from the [`PcapHeader`] and immutable for the rest of the stream.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DecodingContext {
    /// Byte order of every multi-byte field of the file
    pub endianness: Endianness,
    /// Unit of the fractional part of the packet timestamps
    pub ts_resolution: TsResolution,
    /// Declared max captured length, only used as the initial size of the packet buffer
    pub snaplen: u32,
}

impl DecodingContext {
    /// Reads the global header from `reader` and derives the decoding context from it.
    pub fn negotiate<R: Read>(reader: &mut R) -> PcapResult<(PcapHeader, DecodingContext)> {
        let header = PcapHeader::from_reader(reader)?;
        let context = DecodingContext::try_from(&header)?;

        debug!(
            magic = %format!("{:#010x}", header.magic_number),
            endianness = ?context.endianness,
            ts_resolution = ?context.ts_resolution,
            snaplen = context.snaplen,
            datalink = header.datalink,
            "Negotiated pcap header"
        );

        Ok((header, context))
    }

    /// True if the file byte order differs from the one of the current processor.
    pub fn needs_byte_swap(&self) -> bool {
        self.endianness != Endianness::native()
    }

    /// Initial size of the packet buffer.
    pub fn initial_buffer_hint(&self) -> u32 {
        self.snaplen
    }
}

impl TryFrom<&PcapHeader> for DecodingContext {
    type Error = PcapError;

    fn try_from(header: &PcapHeader) -> Result<Self, Self::Error> {
        let (endianness, ts_resolution) =
            classify_magic(header.magic_number).ok_or(PcapError::UnsupportedMagic(header.magic_number))?;

        Ok(DecodingContext { endianness, ts_resolution, snaplen: header.snaplen })
    }
}
