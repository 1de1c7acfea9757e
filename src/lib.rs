//! Decodes legacy Pcap captures of ICMP over IPv4 over Ethernet traffic, and rewrites them with
//! the IPv4 and ICMP headers removed from every packet.
//!
//! Each record is decoded through its pcap header, Ethernet header, IPv4 header (20 bytes, no
//! options) and ICMP header. The decapsulated capture keeps the global header and, for every
//! packet, the original timestamp, the Ethernet header and the ICMP payload.
//!
//! Anything else (another link type, IPv6, IPv4 options, TCP, UDP...) is rejected, as is any
//! length inconsistency: the whole capture fails at the first bad packet.
//!
//! # Examples
//!
//! ```no_run
//! use pcap_decap::{CaptureFile, Describe};
//!
//! let data = std::fs::read("ping.pcap").expect("Error reading file");
//! let capture = CaptureFile::from_slice(&data).unwrap();
//!
//! for packet in &capture.packets {
//!     println!("{}", packet.describe());
//! }
//!
//! std::fs::write("decap_ping.pcap", capture.decapsulate()).expect("Error writing file");
//! ```

pub mod bytes;
mod common;
pub mod describe;
pub mod errors;
pub mod frames;
mod packet;
pub mod pcap;

pub use common::*;
pub use describe::{Describe, FieldDump};
pub use errors::{ErrorKind, PcapError, PcapResult};
pub use packet::{DecapsulatedPacket, Packet};
pub use pcap::{decap_output_path, decapsulate, CaptureFile, PcapHeader, PcapParser};
