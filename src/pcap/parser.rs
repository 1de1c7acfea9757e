use tracing::{debug, trace, warn};

use crate::describe::Describe;
use crate::errors::*;
use crate::packet::Packet;
use crate::pcap::{PcapHeader, PCAP_HEADER_LEN};
use crate::DecodeOptions;

/// Decodes a Pcap from a slice of bytes, one packet at a time.
///
/// Creating the parser reads the global header; every later call to
/// [`next_packet`](PcapParser::next_packet) decodes one packet with the byte order and snaplen
/// of that header. Errors are fatal: once a packet fails the position of the next one is unknown.
///
/// # Examples
///
/// ```no_run
/// use pcap_decap::pcap::PcapParser;
///
/// let pcap = std::fs::read("capture.pcap").unwrap();
///
/// // Creates a new parser and parse the pcap header
/// let (mut src, mut pcap_parser) = PcapParser::new(&pcap[..]).unwrap();
///
/// while !src.is_empty() {
///     let (rem, packet) = pcap_parser.next_packet(src).unwrap();
///     println!("{}", packet);
///
///     // Don't forget to update src
///     src = rem;
/// }
/// ```
#[derive(Debug)]
pub struct PcapParser {
    header: PcapHeader,
    options: DecodeOptions,
    offset: usize,
    packets: usize,
}

impl PcapParser {
    /// Creates a new `PcapParser` with the default options.
    /// Returns the remainder and the parser.
    pub fn new(slice: &[u8]) -> PcapResult<(&[u8], PcapParser)> {
        Self::with_options(slice, DecodeOptions::default())
    }

    /// Creates a new `PcapParser`.
    /// Returns the remainder and the parser.
    pub fn with_options(slice: &[u8], options: DecodeOptions) -> PcapResult<(&[u8], PcapParser)> {
        let (slice, header) = PcapHeader::from_slice(slice)?;

        debug!(
            endianness = ?header.endianness,
            ts_resolution = ?header.ts_resolution,
            snaplen = header.snaplen,
            network = header.network,
            "parsed pcap header"
        );
        if options.verbose {
            debug!("{}", header.describe());
        }
        if !header.is_ethernet() {
            warn!(network = header.network, "link type is not Ethernet, packets will most likely be rejected");
        }

        let parser = PcapParser {
            header,
            options,
            offset: PCAP_HEADER_LEN,
            packets: 0,
        };

        Ok((slice, parser))
    }

    /// Returns the next packet and the remainder.
    ///
    /// `slice` must start where the previous call left off. Errors are reported at their offset
    /// in the whole capture and wrap the error of the failing layer.
    pub fn next_packet<'a>(&mut self, slice: &'a [u8]) -> PcapResult<(&'a [u8], Packet<'a>)> {
        let (rem, packet) = Packet::from_slice(slice, &self.header).map_err(|err| {
            let err = err.at_offset(self.offset);
            PcapError::new(err.kind, "Packet", format!("failed to decode packet #{}", self.packets), &[])
                .at_offset(self.offset)
                .with_cause(err)
        })?;

        trace!(index = self.packets, offset = self.offset, len = packet.total_length(), "decoded packet");
        if self.options.verbose {
            debug!("packet #{} at offset {}\n{}", self.packets, self.offset, packet);
        }

        self.offset += packet.total_length();
        self.packets += 1;

        Ok((rem, packet))
    }

    /// Returns the global header of the pcap.
    pub fn header(&self) -> PcapHeader {
        self.header
    }

    /// Offset of the next packet in the capture.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of packets decoded so far.
    pub fn packets(&self) -> usize {
        self.packets
    }
}
