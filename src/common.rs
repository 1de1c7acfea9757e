//! Types shared by every layer of the parser.

/// Link-layer type value of Ethernet in the global header.
pub const LINKTYPE_ETHERNET: u32 = 1;

/// Byte order of the pcap wrapper fields (global header and packet headers).
///
/// Resolved once from the magic number and applied to every multi-byte field of the pcap
/// wrapper. Protocol headers inside the packets are always in network byte order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Endianness {
    /// The fields are stored in the order the magic number was written (`a1 b2 c3 d4`),
    /// i.e. big-endian.
    Native,
    /// The fields are stored byte-swapped (`d4 c3 b2 a1`), i.e. little-endian.
    Swapped,
}

impl Endianness {
    /// True if the fields have to be swapped to be read.
    pub fn is_swapped(self) -> bool {
        self == Endianness::Swapped
    }
}

/// Timestamp resolution of the pcap, carried by the magic number.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TsResolution {
    /// `ts_frac` holds microseconds
    MicroSecond,
    /// `ts_frac` holds nanoseconds
    NanoSecond,
}

impl TsResolution {
    /// Unit suffix used when rendering a timestamp fraction.
    pub fn unit(self) -> &'static str {
        match self {
            TsResolution::MicroSecond => "us",
            TsResolution::NanoSecond => "ns",
        }
    }
}

/// Options of a decoding run.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DecodeOptions {
    /// Emit the field dump of every decoded entity as a `debug` tracing event.
    pub verbose: bool,
}

impl DecodeOptions {
    /// Options with the field dumps enabled.
    pub fn verbose() -> Self {
        DecodeOptions { verbose: true }
    }
}
