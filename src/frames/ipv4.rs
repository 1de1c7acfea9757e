use std::net::Ipv4Addr;

use byteorder_slice::{BigEndian, ByteOrder};

use crate::bytes::hex_dump;
use crate::describe::Describe;
use crate::errors::*;

/// Length of an IPv4 header without options.
pub const IPV4_HEADER_LEN: usize = 20;

/// Version/IHL byte of an IPv4 header without options.
pub const IPV4_VERSION_IHL: u8 = 0x45;

//   0                   1                   2                   3
//   0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//  |Version|  IHL  |    DS Field   |          Total Length         |
//  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//  |         Identification        |Flags|     Fragment Offset     |
//  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//  |  Time to Live |    Protocol   |         Header Checksum       |
//  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//  |                       Source Address                          |
//  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//  |                    Destination Address                        |
//  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// IPv4 header, 20 bytes, no options.
///
/// Multi-byte fields are always in network byte order, whatever the byte order of the pcap.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct InternetFrame {
    /// Version and header length, always `0x45`
    pub version_ihl: u8,
    /// Differentiated services (DSCP + ECN)
    pub diff_serv: u8,
    /// Length of the datagram, header included
    pub total_len: u16,
    /// Identification
    pub ident: u16,
    /// Flags and fragment offset, kept opaque
    pub flags_fragment: [u8; 2],
    /// Time to live
    pub ttl: u8,
    /// Protocol of the payload
    pub protocol: u8,
    /// Header checksum, not verified
    pub checksum: u16,
    /// Source address
    pub src_ip: [u8; 4],
    /// Destination address
    pub dst_ip: [u8; 4],
}

impl InternetFrame {
    /// Parses the IPv4 header at the start of `slice`.
    ///
    /// `slice` must hold the rest of the captured packet: `total_len` is checked against it.
    ///
    /// # Errors
    /// - [`ErrorKind::Format`] if the slice is shorter than 20 bytes
    /// - [`ErrorKind::UnsupportedVariant`] if the first byte isn't `0x45` (IPv6, IPv4 with options)
    /// - [`ErrorKind::Consistency`] if `total_len < 20` or `total_len > slice.len()`
    pub fn from_slice(slice: &[u8]) -> PcapResult<(&[u8], InternetFrame)> {
        if slice.len() < IPV4_HEADER_LEN {
            return Err(PcapError::incomplete("InternetFrame", IPV4_HEADER_LEN, slice));
        }

        let raw = &slice[..IPV4_HEADER_LEN];

        if raw[0] != IPV4_VERSION_IHL {
            return Err(PcapError::unsupported(
                "InternetFrame.version_ihl",
                format!("IPv4 20-byte headers only ({IPV4_VERSION_IHL:#04x}), got {:#04x}", raw[0]),
                &raw[0..1],
            ));
        }

        let mut frame = InternetFrame {
            version_ihl: raw[0],
            diff_serv: raw[1],
            total_len: BigEndian::read_u16(&raw[2..4]),
            ident: BigEndian::read_u16(&raw[4..6]),
            flags_fragment: [raw[6], raw[7]],
            ttl: raw[8],
            protocol: raw[9],
            checksum: BigEndian::read_u16(&raw[10..12]),
            src_ip: [0; 4],
            dst_ip: [0; 4],
        };
        frame.src_ip.copy_from_slice(&raw[12..16]);
        frame.dst_ip.copy_from_slice(&raw[16..20]);

        let total_len = frame.total_len as usize;
        if total_len < IPV4_HEADER_LEN {
            return Err(PcapError::consistency(
                "InternetFrame.total_len",
                format!("total_len < header length: {total_len} < {IPV4_HEADER_LEN}"),
                &raw[2..4],
            ));
        }

        if total_len > slice.len() {
            return Err(PcapError::consistency(
                "InternetFrame.total_len",
                format!("total_len exceeds the captured bytes: {total_len} > {}", slice.len()),
                &raw[2..4],
            ));
        }

        Ok((&slice[IPV4_HEADER_LEN..], frame))
    }

    /// IP version, high nibble of the first byte.
    pub fn version(&self) -> u8 {
        self.version_ihl >> 4
    }

    /// Header length in bytes.
    pub fn header_len(&self) -> usize {
        (self.version_ihl & 0x0f) as usize * 4
    }

    /// Source address.
    pub fn source(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.src_ip)
    }

    /// Destination address.
    pub fn destination(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.dst_ip)
    }

    /// The 20 bytes of the header.
    pub fn raw_bytes(&self) -> [u8; IPV4_HEADER_LEN] {
        let mut raw = [0_u8; IPV4_HEADER_LEN];
        raw[0] = self.version_ihl;
        raw[1] = self.diff_serv;
        BigEndian::write_u16(&mut raw[2..4], self.total_len);
        BigEndian::write_u16(&mut raw[4..6], self.ident);
        raw[6..8].copy_from_slice(&self.flags_fragment);
        raw[8] = self.ttl;
        raw[9] = self.protocol;
        BigEndian::write_u16(&mut raw[10..12], self.checksum);
        raw[12..16].copy_from_slice(&self.src_ip);
        raw[16..20].copy_from_slice(&self.dst_ip);
        raw
    }
}

impl Describe for InternetFrame {
    fn name(&self) -> &'static str {
        "InternetFrame"
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("bytes", hex_dump(&self.raw_bytes())),
            ("version_ihl", format!("{:02x}", self.version_ihl)),
            ("diff_serv", format!("{:02x}", self.diff_serv)),
            ("total_len", self.total_len.to_string()),
            ("ident", format!("{:04x}", self.ident)),
            ("flags_fragment", hex::encode(self.flags_fragment)),
            ("ttl", self.ttl.to_string()),
            ("protocol", self.protocol.to_string()),
            ("checksum", format!("{:04x}", self.checksum)),
            ("src_ip", self.source().to_string()),
            ("dst_ip", self.destination().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Echo request 192.168.1.10 -> 8.8.8.8, 8 bytes of ICMP header and 4 bytes of payload
    const HEADER: &str = "45000020abcd40004001f00dc0a8010a08080808";

    fn datagram(header: &str, rest: usize) -> Vec<u8> {
        let mut data = hex::decode(header).unwrap();
        data.extend(std::iter::repeat(0xaa).take(rest));
        data
    }

    #[test]
    fn parse() {
        let data = datagram(HEADER, 12);
        let (rem, frame) = InternetFrame::from_slice(&data).unwrap();

        assert_eq!(rem.len(), 12);
        assert_eq!(frame.version(), 4);
        assert_eq!(frame.header_len(), 20);
        assert_eq!(frame.total_len, 32);
        assert_eq!(frame.ident, 0xabcd);
        assert_eq!(frame.flags_fragment, [0x40, 0x00]);
        assert_eq!(frame.ttl, 64);
        assert_eq!(frame.protocol, 1);
        assert_eq!(frame.checksum, 0xf00d);
        assert_eq!(frame.source(), Ipv4Addr::new(192, 168, 1, 10));
        assert_eq!(frame.destination(), Ipv4Addr::new(8, 8, 8, 8));
        assert_eq!(&frame.raw_bytes()[..], &data[..20]);
    }

    #[test]
    fn reject_ipv6_and_options() {
        for first in ["60", "46", "4f", "44"] {
            let header = format!("{first}{}", &HEADER[2..]);
            let data = datagram(&header, 12);

            let err = InternetFrame::from_slice(&data).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedVariant, "first byte {first}");
            assert_eq!(err.bytes, first);
        }
    }

    #[test]
    fn total_len_too_small() {
        let data = datagram("45000013abcd40004001f00dc0a8010a08080808", 0);

        let err = InternetFrame::from_slice(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Consistency);
    }

    #[test]
    fn total_len_exceeds_capture() {
        let data = datagram(HEADER, 11);

        let err = InternetFrame::from_slice(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Consistency);
        assert_eq!(err.field, "InternetFrame.total_len");
    }

    #[test]
    fn too_short() {
        let data = hex::decode(HEADER).unwrap();

        let err = InternetFrame::from_slice(&data[..19]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}
