use std::borrow::Cow;
use std::time::Duration;

use byteorder_slice::byteorder::ByteOrder;
use derive_into_owned::IntoOwned;

use crate::TsResolution;


/// Pcap packet with its timestamp, lengths and data.
///
/// The payload can be owned or borrowed. Packets returned by a [`PcapReader`](super::PcapReader)
/// borrow its internal buffer: call `into_owned()` to keep one past the next read.
#[derive(Clone, Debug, Eq, PartialEq, IntoOwned)]
pub struct PcapPacket<'a> {
    /// Timestamp in nanoseconds since EPOCH
    pub timestamp_ns: u64,
    /// Original length of the packet when captured on the wire
    pub orig_len: u32,
    /// Number of bytes of the packet saved in the file
    pub capture_len: u32,
    /// Payload, owned or borrowed, of the packet
    pub data: Cow<'a, [u8]>,
}

impl<'a> PcapPacket<'a> {
    /// Create a new borrowed `PcapPacket` with the given parameters.
    ///
    /// `capture_len` is the length of `data`.
    pub fn new(timestamp_ns: u64, orig_len: u32, data: &'a [u8]) -> PcapPacket<'a> {
        PcapPacket {
            timestamp_ns,
            orig_len,
            capture_len: data.len() as u32,
            data: Cow::Borrowed(data),
        }
    }

    /// Create a new owned `PcapPacket` with the given parameters.
    pub fn new_owned(timestamp_ns: u64, orig_len: u32, data: Vec<u8>) -> PcapPacket<'static> {
        PcapPacket {
            timestamp_ns,
            orig_len,
            capture_len: data.len() as u32,
            data: Cow::Owned(data),
        }
    }

    /// Timestamp of the packet as a duration since EPOCH.
    pub fn timestamp(&self) -> Duration {
        Duration::from_nanos(self.timestamp_ns)
    }
}


/// Pcap packet header, as stored in the file.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub struct PacketHeader {
    /// Timestamp in seconds
    pub ts_sec: u32,
    /// Fractional part of the timestamp, in micro or nanoseconds depending on the file
    pub ts_frac: u32,
    /// Number of octets of the packet saved in file
    pub incl_len: u32,
    /// Original length of the packet on the wire
    pub orig_len: u32,
}

impl PacketHeader {
    /// Size of a packet header on disk
    pub const SIZE: usize = 16;

    /// Parses a `PacketHeader` from its 16 bytes in the byte order `B`.
    pub fn from_bytes<B: ByteOrder>(raw: &[u8; Self::SIZE]) -> PacketHeader {
        PacketHeader {
            ts_sec: B::read_u32(&raw[0..4]),
            ts_frac: B::read_u32(&raw[4..8]),
            incl_len: B::read_u32(&raw[8..12]),
            orig_len: B::read_u32(&raw[12..16]),
        }
    }

    /// Timestamp in nanoseconds since EPOCH.
    ///
    /// The fractional field is not validated, a value above one second carries into the seconds.
    pub fn timestamp_ns(&self, ts_resolution: TsResolution) -> u64 {
        u64::from(self.ts_sec) * 1_000_000_000 + u64::from(self.ts_frac) * ts_resolution.nanos_per_unit()
    }
}
