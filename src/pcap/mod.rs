//! Contains the Pcap headers, the packet parser and the capture decoder

mod capture;
mod header;
mod packet_header;
mod parser;

pub use capture::*;
pub use header::*;
pub use packet_header::*;
pub use parser::*;
