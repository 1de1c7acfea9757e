use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::*;
use crate::packet::Packet;
use crate::pcap::{PcapHeader, PcapParser};
use crate::DecodeOptions;

/// Prefix of the file written by the command line tool, next to its input.
pub const DEFAULT_OUTPUT_PREFIX: &str = "decap_";

/// A whole capture: the global header and every packet, in capture order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CaptureFile<'a> {
    /// Global header
    pub header: PcapHeader,
    /// Decoded packets
    pub packets: Vec<Packet<'a>>,
}

impl<'a> CaptureFile<'a> {
    /// Decodes a whole capture held in memory.
    pub fn from_slice(slice: &'a [u8]) -> PcapResult<CaptureFile<'a>> {
        Self::from_slice_with(slice, DecodeOptions::default())
    }

    /// Decodes a whole capture held in memory with the given options.
    ///
    /// Decoding stops when the input is exhausted. A remainder too short for the next packet
    /// is an error, not the end of the capture.
    pub fn from_slice_with(slice: &'a [u8], options: DecodeOptions) -> PcapResult<CaptureFile<'a>> {
        let (mut src, mut parser) = PcapParser::with_options(slice, options)?;

        let mut packets = Vec::new();
        while !src.is_empty() {
            let (rem, packet) = parser.next_packet(src)?;
            packets.push(packet);
            src = rem;
        }

        debug!(packets = packets.len(), bytes = slice.len(), "decoded capture");

        Ok(CaptureFile {
            header: parser.header(),
            packets,
        })
    }

    /// Builds the decapsulated capture: the same global header followed by every packet
    /// stripped of its IPv4 and ICMP headers.
    pub fn decapsulate(&self) -> Vec<u8> {
        let mut out = self.header.raw_bytes();
        for packet in &self.packets {
            packet.decapsulate().write_to(&mut out);
        }

        debug!(packets = self.packets.len(), bytes = out.len(), "decapsulated capture");

        out
    }

    // The into_owned method is implemented manually,
    // since derive_into_owned can't handle a Vec of borrowing packets.
    /// Detaches the capture from the input buffer.
    pub fn into_owned(self) -> CaptureFile<'static> {
        CaptureFile {
            header: self.header,
            packets: self.packets.into_iter().map(Packet::into_owned).collect(),
        }
    }
}

/// Decodes `slice` and returns the decapsulated capture.
pub fn decapsulate(slice: &[u8], options: DecodeOptions) -> PcapResult<Vec<u8>> {
    Ok(CaptureFile::from_slice_with(slice, options)?.decapsulate())
}

/// Path of the decapsulated capture of `input`: same directory, file name prefixed with
/// [`DEFAULT_OUTPUT_PREFIX`].
///
/// Returns `None` if `input` has no file name.
pub fn decap_output_path(input: &Path) -> Option<PathBuf> {
    let file_name = input.file_name()?;

    let mut name = DEFAULT_OUTPUT_PREFIX.to_owned();
    name.push_str(&file_name.to_string_lossy());

    Some(input.with_file_name(name))
}
