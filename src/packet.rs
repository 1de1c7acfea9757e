//! This module contains the `Packet` struct, a pcap record decoded down to its ICMP payload,
//! and the `DecapsulatedPacket` built from it.

use std::borrow::Cow;
use std::fmt;

use derive_into_owned::IntoOwned;

use crate::bytes::hex_dump;
use crate::describe::Describe;
use crate::errors::*;
use crate::frames::{EthernetFrame, InternetFrame, ProtocolFrame, ETHERNET_HEADER_LEN};
use crate::pcap::{PacketHeader, PcapHeader, PACKET_HEADER_LEN};
use crate::Endianness;

/// Pcap packet decoded through its Ethernet, IPv4 and ICMP layers.
///
/// The payload and the original bytes can be owned or borrowed.
#[derive(Clone, Debug, IntoOwned, Eq, PartialEq)]
pub struct Packet<'a> {
    /// Pcap packet header
    pub header: PacketHeader,
    /// Ethernet header
    pub ethernet: EthernetFrame,
    /// IPv4 header
    pub internet: InternetFrame,
    /// ICMP header and payload
    pub protocol: ProtocolFrame<'a>,
    /// The bytes the packet was decoded from, packet header included
    pub raw: Cow<'a, [u8]>,
}

impl<'a> Packet<'a> {
    /// Decodes one packet from the start of `slice`.
    ///
    /// Returns the remainder after the packet and the packet. Error offsets are relative to
    /// the start of `slice`.
    ///
    /// # Errors
    /// - [`ErrorKind::Format`] if the slice is shorter than a header or than `incl_len`
    /// - [`ErrorKind::UnsupportedVariant`] if the packet isn't ICMP over IPv4 over Ethernet
    /// - [`ErrorKind::Consistency`] if the lengths announced by the headers disagree
    pub fn from_slice(slice: &'a [u8], pcap_header: &PcapHeader) -> PcapResult<(&'a [u8], Packet<'a>)> {
        let (body, header) = PacketHeader::from_slice(slice, pcap_header)?;

        let incl_len = header.incl_len as usize;
        if body.len() < incl_len {
            return Err(PcapError::format(
                "Packet",
                format!("truncated file: packet body needs {incl_len}B, {}B left", body.len()),
                body,
            )
            .at_offset(PACKET_HEADER_LEN));
        }
        let body = &body[..incl_len];

        let mut offset = PACKET_HEADER_LEN;
        let (rem, ethernet) = EthernetFrame::from_slice(body).map_err(|e| e.at_offset(offset))?;

        offset += ETHERNET_HEADER_LEN;
        let (rem, internet) = InternetFrame::from_slice(rem).map_err(|e| e.at_offset(offset))?;

        offset += internet.header_len();
        let (_, protocol) = ProtocolFrame::from_slice(rem, &internet).map_err(|e| e.at_offset(offset))?;

        let len = ETHERNET_HEADER_LEN + internet.total_len as usize;
        if len != incl_len {
            return Err(PcapError::consistency(
                "Packet",
                format!("{}B of link-layer trailer after the IPv4 datagram", incl_len - len),
                &body[len..],
            )
            .at_offset(PACKET_HEADER_LEN + len));
        }

        let consumed = PACKET_HEADER_LEN + len;
        let packet = Packet {
            header,
            ethernet,
            internet,
            protocol,
            raw: Cow::Borrowed(&slice[..consumed]),
        };

        Ok((&slice[consumed..], packet))
    }

    /// Length of the frames: Ethernet header plus the IPv4 `total_len`.
    pub fn length(&self) -> usize {
        ETHERNET_HEADER_LEN + self.internet.total_len as usize
    }

    /// Number of bytes the packet occupies in the capture, packet header included.
    pub fn total_length(&self) -> usize {
        PACKET_HEADER_LEN + self.length()
    }

    /// Length of the decapsulated packet: Ethernet header plus ICMP payload.
    pub fn decap_length(&self) -> usize {
        ETHERNET_HEADER_LEN + self.protocol.payload_len()
    }

    /// Drops the IPv4 and ICMP headers.
    ///
    /// The Ethernet header is kept as is, its EtherType still announces IPv4. Checksums are not
    /// recomputed.
    pub fn decapsulate(&self) -> DecapsulatedPacket<'_> {
        // incl_len <= snaplen: a u32 holds the length
        let new_len = self.decap_length() as u32;

        DecapsulatedPacket {
            header: self.header.decapsulate(new_len),
            ethernet: self.ethernet.raw_bytes(),
            payload: &self.protocol.payload,
        }
    }
}

impl Describe for Packet<'_> {
    fn name(&self) -> &'static str {
        "Packet"
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("bytes", hex_dump(&self.raw)),
            ("length", self.length().to_string()),
            ("total_length", self.total_length().to_string()),
            ("decap_length", self.decap_length().to_string()),
        ]
    }
}

impl fmt::Display for Packet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header.describe())?;
        writeln!(f, "{}", self.ethernet.describe())?;
        writeln!(f, "{}", self.internet.describe())?;
        write!(f, "{}", self.protocol.describe())
    }
}

/// Packet with its IPv4 and ICMP headers removed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecapsulatedPacket<'a> {
    /// Original header with `incl_len` and `orig_len` set to the new length
    pub header: PacketHeader,
    /// Original Ethernet header
    pub ethernet: [u8; ETHERNET_HEADER_LEN],
    /// ICMP payload
    pub payload: &'a [u8],
}

impl DecapsulatedPacket<'_> {
    /// Bytes of the new packet header, in the byte order of the source capture.
    pub fn header_bytes(&self) -> [u8; PACKET_HEADER_LEN] {
        self.header.raw_bytes()
    }

    /// Ethernet header followed by the ICMP payload.
    pub fn body(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(self.ethernet.len() + self.payload.len());
        body.extend_from_slice(&self.ethernet);
        body.extend_from_slice(self.payload);
        body
    }

    /// Byte order used by [`DecapsulatedPacket::header_bytes`].
    pub fn endianness(&self) -> Endianness {
        self.header.endianness
    }

    /// Appends the packet header and the body to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header_bytes());
        out.extend_from_slice(&self.ethernet);
        out.extend_from_slice(self.payload);
    }
}
