//! Parsers of the frames nested in a packet: Ethernet, IPv4 and ICMP.

mod ethernet;
mod ipv4;
mod protocol;

pub use ethernet::*;
pub use ipv4::*;
pub use protocol::*;
