use crate::bytes::{hex_dump, put_u32, read_u32};
use crate::describe::Describe;
use crate::errors::*;
use crate::pcap::PcapHeader;
use crate::{Endianness, TsResolution};

/// Length of a packet header.
pub const PACKET_HEADER_LEN: usize = 16;

/// Pcap packet header
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PacketHeader {
    /// Timestamp in seconds
    pub ts_sec: u32,
    /// Fraction of the timestamp, in microseconds or nanoseconds depending on the magic number
    pub ts_frac: u32,
    /// Number of octets of the packet saved in file
    pub incl_len: u32,
    /// Original length of the packet on the wire
    pub orig_len: u32,
    /// Byte order inherited from the global header
    pub endianness: Endianness,
    /// Timestamp resolution inherited from the global header
    pub ts_resolution: TsResolution,
}

impl PacketHeader {
    /// Creates a new `PacketHeader` from a slice, using the byte order and snaplen of `pcap_header`.
    ///
    /// # Errors
    /// - [`ErrorKind::Format`] if the slice is shorter than 16 bytes
    /// - [`ErrorKind::Consistency`] if `incl_len > orig_len` or `incl_len > snaplen`
    pub fn from_slice<'a>(slice: &'a [u8], pcap_header: &PcapHeader) -> PcapResult<(&'a [u8], PacketHeader)> {
        if slice.len() < PACKET_HEADER_LEN {
            return Err(PcapError::incomplete("PacketHeader", PACKET_HEADER_LEN, slice));
        }

        let endianness = pcap_header.endianness;
        let raw = &slice[..PACKET_HEADER_LEN];

        let header = PacketHeader {
            ts_sec: read_u32(&raw[0..4], endianness),
            ts_frac: read_u32(&raw[4..8], endianness),
            incl_len: read_u32(&raw[8..12], endianness),
            orig_len: read_u32(&raw[12..16], endianness),
            endianness,
            ts_resolution: pcap_header.ts_resolution,
        };

        if header.incl_len > header.orig_len {
            return Err(PcapError::consistency(
                "PacketHeader.incl_len",
                format!("incl_len > orig_len: {} > {}", header.incl_len, header.orig_len),
                raw,
            ));
        }

        if header.incl_len > pcap_header.snaplen {
            return Err(PcapError::consistency(
                "PacketHeader.incl_len",
                format!("incl_len > snaplen: {} > {}", header.incl_len, pcap_header.snaplen),
                raw,
            ));
        }

        Ok((&slice[PACKET_HEADER_LEN..], header))
    }

    /// Serializes the header back into its 16 bytes.
    pub fn raw_bytes(&self) -> [u8; PACKET_HEADER_LEN] {
        let mut out = Vec::with_capacity(PACKET_HEADER_LEN);
        put_u32(&mut out, self.ts_sec, self.endianness);
        put_u32(&mut out, self.ts_frac, self.endianness);
        put_u32(&mut out, self.incl_len, self.endianness);
        put_u32(&mut out, self.orig_len, self.endianness);

        let mut raw = [0_u8; PACKET_HEADER_LEN];
        raw.copy_from_slice(&out);
        raw
    }

    /// Header of the decapsulated packet: same timestamp, both lengths set to `new_len`.
    pub fn decapsulate(&self, new_len: u32) -> PacketHeader {
        PacketHeader {
            incl_len: new_len,
            orig_len: new_len,
            ..*self
        }
    }
}

impl Describe for PacketHeader {
    fn name(&self) -> &'static str {
        "PacketHeader"
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("bytes", hex_dump(&self.raw_bytes())),
            ("ts_sec", self.ts_sec.to_string()),
            ("ts_frac", format!("{} {}", self.ts_frac, self.ts_resolution.unit())),
            ("incl_len", self.incl_len.to_string()),
            ("orig_len", self.orig_len.to_string()),
        ]
    }
}
