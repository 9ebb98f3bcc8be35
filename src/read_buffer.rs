use std::io::{ErrorKind, Read};

use tracing::trace;

use crate::errors::*;


/// Reads until `buf` is full or the reader reaches its end.
///
/// Returns the number of bytes read, which is less than `buf.len()` only at the end of the stream.
pub(crate) fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut nb_read = 0;

    while nb_read < buf.len() {
        match reader.read(&mut buf[nb_read..]) {
            Ok(0) => break,
            Ok(n) => nb_read += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {},
            Err(e) => return Err(e),
        }
    }

    Ok(nb_read)
}


/// Wraps a reader together with the reusable packet data buffer.
///
/// The buffer only grows, by replacing it with an allocation of exactly the requested size.
#[derive(Debug)]
pub(crate) struct ReadBuffer<R: Read> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: Read> ReadBuffer<R> {
    pub fn with_capacity(reader: R, capacity: usize) -> PcapResult<Self> {
        Ok(Self {
            reader,
            buffer: try_alloc(capacity)?,
        })
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Ensures the buffer can hold `len` bytes without reallocating during the read.
    pub fn reserve_exact(&mut self, len: usize) -> PcapResult<()> {
        if len <= self.buffer.capacity() {
            return Ok(());
        }

        let fresh = try_alloc(len)?;
        trace!(old = self.buffer.capacity(), new = len, "Growing packet buffer");
        self.buffer = fresh;

        Ok(())
    }

    /// Reads into `buf` from the underlying reader, see [`read_full`].
    pub fn read_full(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        read_full(&mut self.reader, buf)
    }

    /// Replaces the buffer content with the next `len` bytes of the reader.
    ///
    /// Returns the number of bytes read, less than `len` if the reader ended first.
    pub fn fill(&mut self, len: usize) -> std::io::Result<usize> {
        self.buffer.clear();
        (&mut self.reader).take(len as u64).read_to_end(&mut self.buffer)
    }

    /// Bytes read by the last [`fill`](Self::fill).
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

fn try_alloc(capacity: usize) -> PcapResult<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(capacity)
        .map_err(|_| PcapError::AllocationFailed { requested: capacity })?;

    Ok(buffer)
}
