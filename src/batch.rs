//! Columnar batches of decoded packets.

use std::ops::Range;

use crate::pcap::PcapPacket;


/// Type of a batch column.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColumnType {
    UInt64,
    UInt32,
    Blob,
}

/// Name and type of a batch column.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
}

/// Columns of every [`PacketBatch`], in order.
pub const SCHEMA: [Column; 4] = [
    Column { name: "timestamp_ns", ty: ColumnType::UInt64 },
    Column { name: "original_len", ty: ColumnType::UInt32 },
    Column { name: "capture_len", ty: ColumnType::UInt32 },
    Column { name: "data", ty: ColumnType::Blob },
];


/// Variable length byte values stored back to back.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BlobColumn {
    offsets: Vec<usize>,
    data: Vec<u8>,
}

impl BlobColumn {
    pub fn with_capacity(rows: usize) -> Self {
        let mut offsets = Vec::with_capacity(rows + 1);
        offsets.push(0);

        BlobColumn { offsets, data: Vec::new() }
    }

    /// Appends a copy of `value`.
    pub fn push(&mut self, value: &[u8]) {
        self.data.extend_from_slice(value);
        self.offsets.push(self.data.len());
    }

    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value of row `index`.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.range(index).map(|range| &self.data[range])
    }

    /// Iterates over the values in row order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.offsets.windows(2).map(move |w| &self.data[w[0]..w[1]])
    }

    /// Total number of bytes stored.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    fn range(&self, index: usize) -> Option<Range<usize>> {
        let start = *self.offsets.get(index)?;
        let end = *self.offsets.get(index + 1)?;
        Some(start..end)
    }
}

impl Default for BlobColumn {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}


/// A batch of packets laid out as four parallel columns, see [`SCHEMA`].
///
/// An empty batch returned by a [`PcapSource`](crate::PcapSource) signals the end of the capture.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PacketBatch {
    pub timestamp_ns: Vec<u64>,
    pub original_len: Vec<u32>,
    pub capture_len: Vec<u32>,
    pub data: BlobColumn,
}

impl PacketBatch {
    pub fn with_capacity(rows: usize) -> Self {
        PacketBatch {
            timestamp_ns: Vec::with_capacity(rows),
            original_len: Vec::with_capacity(rows),
            capture_len: Vec::with_capacity(rows),
            data: BlobColumn::with_capacity(rows),
        }
    }

    /// Appends a row, copying the packet data.
    pub fn push(&mut self, packet: &PcapPacket<'_>) {
        self.timestamp_ns.push(packet.timestamp_ns);
        self.original_len.push(packet.orig_len);
        self.capture_len.push(packet.capture_len);
        self.data.push(&packet.data);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.timestamp_ns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns row `index` as a packet borrowing the batch.
    pub fn row(&self, index: usize) -> Option<PcapPacket<'_>> {
        let data = self.data.get(index)?;

        Some(PcapPacket {
            timestamp_ns: self.timestamp_ns[index],
            orig_len: self.original_len[index],
            capture_len: self.capture_len[index],
            data: data.into(),
        })
    }

    /// Iterates over the rows as packets borrowing the batch.
    pub fn rows(&self) -> impl Iterator<Item = PcapPacket<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }
}
