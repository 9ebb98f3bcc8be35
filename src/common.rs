/// Byte order in which the multi-byte fields of a capture are stored.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Endianness {
    /// Big endian
    Big,
    /// Little endian
    Little,
}

impl Endianness {
    /// Byte order of the current processor.
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            Endianness::Big
        }
        else {
            Endianness::Little
        }
    }

    /// True if big endian
    pub fn is_big(self) -> bool {
        matches!(self, Endianness::Big)
    }

    /// True if little endian
    pub fn is_little(self) -> bool {
        matches!(self, Endianness::Little)
    }
}

/// Resolution of the fractional part of the packet timestamps.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TsResolution {
    /// Microsecond resolution
    MicroSecond,
    /// Nanosecond resolution
    NanoSecond,
}

impl TsResolution {
    /// Number of nanoseconds in one unit of this resolution.
    pub fn nanos_per_unit(self) -> u64 {
        match self {
            TsResolution::MicroSecond => 1_000,
            TsResolution::NanoSecond => 1,
        }
    }
}
