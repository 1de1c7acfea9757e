use std::borrow::Cow;

use derive_into_owned::IntoOwned;

use crate::bytes::hex_dump;
use crate::describe::Describe;
use crate::errors::*;
use crate::frames::{InternetFrame, IPV4_HEADER_LEN};

/// Length of an ICMP header.
pub const ICMP_HEADER_LEN: usize = 8;

/// Transport protocol carried by an IPv4 datagram.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IpProtocol {
    /// 1
    Icmp,
    /// 6, not decoded
    Tcp,
    /// 17, not decoded
    Udp,
    /// Any other protocol number
    Other(u8),
}

impl From<u8> for IpProtocol {
    fn from(value: u8) -> Self {
        match value {
            1 => IpProtocol::Icmp,
            6 => IpProtocol::Tcp,
            17 => IpProtocol::Udp,
            n => IpProtocol::Other(n),
        }
    }
}

impl From<IpProtocol> for u8 {
    fn from(value: IpProtocol) -> Self {
        match value {
            IpProtocol::Icmp => 1,
            IpProtocol::Tcp => 6,
            IpProtocol::Udp => 17,
            IpProtocol::Other(n) => n,
        }
    }
}

/// Transport frame following the IPv4 header. Only ICMP is decoded.
///
/// The payload can be owned or borrowed.
#[derive(Clone, Debug, IntoOwned, Eq, PartialEq)]
pub struct ProtocolFrame<'a> {
    /// ICMP header (type, code, checksum, rest of header)
    pub header: [u8; ICMP_HEADER_LEN],
    /// ICMP payload
    pub payload: Cow<'a, [u8]>,
}

impl<'a> ProtocolFrame<'a> {
    /// Parses the transport frame of `internet` from `slice`, the bytes following the IPv4 header.
    ///
    /// The payload length is derived from `internet.total_len`, not from the slice length.
    ///
    /// # Errors
    /// - [`ErrorKind::UnsupportedVariant`] if the protocol isn't ICMP
    /// - [`ErrorKind::Consistency`] if `total_len < 28` or if the slice is shorter than the
    ///   `total_len - 20` bytes announced by the IPv4 header
    pub fn from_slice(slice: &'a [u8], internet: &InternetFrame) -> PcapResult<(&'a [u8], ProtocolFrame<'a>)> {
        match IpProtocol::from(internet.protocol) {
            IpProtocol::Icmp => {},
            IpProtocol::Tcp => return Err(not_implemented("TCP", internet.protocol)),
            IpProtocol::Udp => return Err(not_implemented("UDP", internet.protocol)),
            IpProtocol::Other(_) => return Err(not_implemented("protocol", internet.protocol)),
        }

        let total_len = internet.total_len as usize;
        let frame_len = total_len.checked_sub(IPV4_HEADER_LEN + ICMP_HEADER_LEN).ok_or_else(|| {
            PcapError::consistency(
                "ProtocolFrame.payload",
                format!("total_len too small for an ICMP datagram: {total_len} < {}", IPV4_HEADER_LEN + ICMP_HEADER_LEN),
                &internet.total_len.to_be_bytes(),
            )
        })? + ICMP_HEADER_LEN;

        if slice.len() < frame_len {
            return Err(PcapError::consistency(
                "ProtocolFrame.payload",
                format!("ICMP frame needs {frame_len}B per total_len, got {}B", slice.len()),
                slice,
            ));
        }

        let mut header = [0_u8; ICMP_HEADER_LEN];
        header.copy_from_slice(&slice[..ICMP_HEADER_LEN]);

        let frame = ProtocolFrame {
            header,
            payload: Cow::Borrowed(&slice[ICMP_HEADER_LEN..frame_len]),
        };

        Ok((&slice[frame_len..], frame))
    }

    /// Create a new owned `ProtocolFrame` from an ICMP header and payload.
    pub fn new_owned(header: [u8; ICMP_HEADER_LEN], payload: Vec<u8>) -> ProtocolFrame<'static> {
        ProtocolFrame {
            header,
            payload: Cow::Owned(payload),
        }
    }

    /// ICMP type.
    pub fn icmp_type(&self) -> u8 {
        self.header[0]
    }

    /// ICMP code.
    pub fn icmp_code(&self) -> u8 {
        self.header[1]
    }

    /// Length of the header.
    pub fn header_len(&self) -> usize {
        self.header.len()
    }

    /// Length of the payload.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Header and payload length.
    pub fn total_len(&self) -> usize {
        self.header_len() + self.payload_len()
    }

    /// Header followed by the payload.
    pub fn raw_bytes(&self) -> Vec<u8> {
        let mut raw = Vec::with_capacity(self.total_len());
        raw.extend_from_slice(&self.header);
        raw.extend_from_slice(&self.payload);
        raw
    }
}

fn not_implemented(name: &str, protocol: u8) -> PcapError {
    PcapError::unsupported(
        "InternetFrame.protocol",
        format!("{name} ({protocol}) is not implemented, only ICMP is"),
        &[protocol],
    )
}

impl Describe for ProtocolFrame<'_> {
    fn name(&self) -> &'static str {
        "ProtocolFrame"
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("bytes", hex_dump(&self.raw_bytes())),
            ("header", hex::encode(self.header)),
            ("payload", hex_dump(&self.payload)),
        ]
    }
}
