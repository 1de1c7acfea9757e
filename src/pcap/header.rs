use byteorder_slice::{BigEndian, ByteOrder};

use crate::bytes::{hex_dump, put_u16, put_u32, read_i32, read_u16, read_u32};
use crate::describe::Describe;
use crate::errors::*;
use crate::{Endianness, TsResolution, LINKTYPE_ETHERNET};

/// Length of the global header.
pub const PCAP_HEADER_LEN: usize = 24;

//   0               1               2               3
//  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//  |                          Magic Number                         |
//  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//  |         Major Version         |         Minor Version         |
//  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//  |                           This Zone                           |
//  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//  |                            Sigfigs                            |
//  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//  |                            SnapLen                            |
//  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//  |                           Link Type                           |
//  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// Pcap Global Header
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PcapHeader {
    /// Magic number, as read in file order (`0xa1b2c3d4`, `0xd4c3b2a1`, `0xa1b23c4d` or `0x4d3cb2a1`)
    pub magic_number: u32,

    /// Major version number
    pub version_major: u16,

    /// Minor version number
    pub version_minor: u16,

    /// GMT to local timezone correction, should always be 0
    pub this_zone: i32,

    /// Timestamp accuracy, should always be 0
    pub sig_figs: u32,

    /// Max length of captured packet, typically 65535
    pub snaplen: u32,

    /// Link-layer type of the packets, 1 for Ethernet
    pub network: u32,

    /// Byte order of the wrapper fields, derived from the magic number
    pub endianness: Endianness,

    /// Timestamp resolution, derived from the magic number
    pub ts_resolution: TsResolution,
}

impl PcapHeader {
    /// Creates a new `PcapHeader` from a slice of bytes.
    ///
    /// Returns the remainder after the 24 header bytes and the parsed header.
    ///
    /// # Errors
    /// - [`ErrorKind::Format`] if the slice is shorter than 24 bytes
    /// - [`ErrorKind::Format`] if the magic number is not one of the four pcap magic numbers
    pub fn from_slice(slice: &[u8]) -> PcapResult<(&[u8], PcapHeader)> {
        if slice.len() < PCAP_HEADER_LEN {
            return Err(PcapError::incomplete("PcapHeader", PCAP_HEADER_LEN, slice));
        }

        // The magic number is compared in file order, before any byte order is known
        let magic_number = BigEndian::read_u32(&slice[0..4]);
        let (endianness, ts_resolution) = match magic_number {
            0xa1b2c3d4 => (Endianness::Native, TsResolution::MicroSecond),
            0xd4c3b2a1 => (Endianness::Swapped, TsResolution::MicroSecond),
            0xa1b23c4d => (Endianness::Native, TsResolution::NanoSecond),
            0x4d3cb2a1 => (Endianness::Swapped, TsResolution::NanoSecond),
            _ => {
                return Err(PcapError::format(
                    "PcapHeader.magic_number",
                    format!("magic number not recognized ({magic_number:#010x}), is this a pcap file?"),
                    &slice[0..4],
                ))
            },
        };

        let header = PcapHeader {
            magic_number,
            version_major: read_u16(&slice[4..6], endianness),
            version_minor: read_u16(&slice[6..8], endianness),
            this_zone: read_i32(&slice[8..12], endianness),
            sig_figs: read_u32(&slice[12..16], endianness),
            snaplen: read_u32(&slice[16..20], endianness),
            network: read_u32(&slice[20..24], endianness),
            endianness,
            ts_resolution,
        };

        Ok((&slice[PCAP_HEADER_LEN..], header))
    }

    /// Serializes the header back into its 24 bytes, in the byte order of the source file.
    pub fn raw_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PCAP_HEADER_LEN);

        // The magic number is always read in file order so it's always written in file order too
        out.extend_from_slice(&self.magic_number.to_be_bytes());
        put_u16(&mut out, self.version_major, self.endianness);
        put_u16(&mut out, self.version_minor, self.endianness);
        put_u32(&mut out, self.this_zone as u32, self.endianness);
        put_u32(&mut out, self.sig_figs, self.endianness);
        put_u32(&mut out, self.snaplen, self.endianness);
        put_u32(&mut out, self.network, self.endianness);

        out
    }

    /// True if the link type announces Ethernet frames.
    pub fn is_ethernet(&self) -> bool {
        self.network == LINKTYPE_ETHERNET
    }
}

impl Describe for PcapHeader {
    fn name(&self) -> &'static str {
        "PcapHeader"
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("bytes", hex_dump(&self.raw_bytes())),
            ("magic_number", format!("{:08x} ({:?}, {:?})", self.magic_number, self.endianness, self.ts_resolution)),
            ("version_major", self.version_major.to_string()),
            ("version_minor", self.version_minor.to_string()),
            ("this_zone", self.this_zone.to_string()),
            ("sig_figs", self.sig_figs.to_string()),
            ("snaplen", self.snaplen.to_string()),
            ("network", self.network.to_string()),
        ]
    }
}
