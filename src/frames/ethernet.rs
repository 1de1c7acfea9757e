use crate::bytes::hex_dump;
use crate::describe::Describe;
use crate::errors::*;

/// Length of an Ethernet II header.
pub const ETHERNET_HEADER_LEN: usize = 14;

/// EtherType of IPv4.
pub const ETHERTYPE_IPV4: u16 = 0x0800;

/// Ethernet II header.
///
/// Fields are kept as opaque byte sequences, the type is compared literally with `08 00`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct EthernetFrame {
    /// Destination MAC address
    pub dst_mac: [u8; 6],
    /// Source MAC address
    pub src_mac: [u8; 6],
    /// EtherType, network byte order
    pub ether_type: [u8; 2],
}

impl EthernetFrame {
    /// Parses the 14 bytes Ethernet header at the start of `slice`.
    ///
    /// # Errors
    /// - [`ErrorKind::Format`] if the slice is shorter than 14 bytes
    /// - [`ErrorKind::UnsupportedVariant`] if the EtherType isn't IPv4
    pub fn from_slice(slice: &[u8]) -> PcapResult<(&[u8], EthernetFrame)> {
        if slice.len() < ETHERNET_HEADER_LEN {
            return Err(PcapError::incomplete("EthernetFrame", ETHERNET_HEADER_LEN, slice));
        }

        let mut frame = EthernetFrame {
            dst_mac: [0; 6],
            src_mac: [0; 6],
            ether_type: [0; 2],
        };
        frame.dst_mac.copy_from_slice(&slice[0..6]);
        frame.src_mac.copy_from_slice(&slice[6..12]);
        frame.ether_type.copy_from_slice(&slice[12..14]);

        if frame.ether_type_value() != ETHERTYPE_IPV4 {
            return Err(PcapError::unsupported(
                "EthernetFrame.ether_type",
                format!("IPv4 packets only (type = {ETHERTYPE_IPV4:#06x}), got {:#06x}", frame.ether_type_value()),
                &slice[..ETHERNET_HEADER_LEN],
            ));
        }

        Ok((&slice[ETHERNET_HEADER_LEN..], frame))
    }

    /// EtherType as an integer.
    pub fn ether_type_value(&self) -> u16 {
        u16::from_be_bytes(self.ether_type)
    }

    /// The 14 bytes of the header.
    pub fn raw_bytes(&self) -> [u8; ETHERNET_HEADER_LEN] {
        let mut raw = [0_u8; ETHERNET_HEADER_LEN];
        raw[0..6].copy_from_slice(&self.dst_mac);
        raw[6..12].copy_from_slice(&self.src_mac);
        raw[12..14].copy_from_slice(&self.ether_type);
        raw
    }
}

/// Renders a MAC address as `aa:bb:cc:dd:ee:ff`.
pub fn format_mac(mac: &[u8; 6]) -> String {
    mac.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(":")
}

impl Describe for EthernetFrame {
    fn name(&self) -> &'static str {
        "EthernetFrame"
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("bytes", hex_dump(&self.raw_bytes())),
            ("dst_mac", format_mac(&self.dst_mac)),
            ("src_mac", format_mac(&self.src_mac)),
            ("ether_type", hex::encode(self.ether_type)),
        ]
    }
}
