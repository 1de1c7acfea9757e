use std::path::Path;

use glob::glob;
use pcap_decap::bytes::read_uint;
use pcap_decap::frames::ETHERNET_HEADER_LEN;
use pcap_decap::pcap::{PACKET_HEADER_LEN, PCAP_HEADER_LEN};
use pcap_decap::{decapsulate, CaptureFile, DecodeOptions, ErrorKind, PcapParser, TsResolution};

fn fixtures(dir: &str) -> Vec<std::path::PathBuf> {
    let entries: Vec<_> = glob(&format!("tests/pcap/{dir}/*.pcap"))
        .expect("Failed to read glob pattern")
        .map(|entry| entry.unwrap())
        .collect();
    assert!(!entries.is_empty(), "no fixture in tests/pcap/{dir}");
    entries
}

#[test]
fn parser() {
    for entry in fixtures("valid") {
        let data = std::fs::read(&entry).unwrap();

        let (mut src, mut parser) = PcapParser::new(&data).unwrap();

        //Global header len
        let mut data_len = PCAP_HEADER_LEN;
        while !src.is_empty() {
            let (rem, packet) = parser.next_packet(src).unwrap_or_else(|e| panic!("Error on file {entry:?}: {e}"));
            data_len += packet.total_length();
            src = rem;
        }

        assert_eq!(data_len, data.len(), "file: {entry:?}");
        assert_eq!(parser.packets(), 4, "file: {entry:?}");
    }
}

#[test]
fn header_matches_file_name() {
    for entry in fixtures("valid") {
        let data = std::fs::read(&entry).unwrap();
        let capture = CaptureFile::from_slice(&data).unwrap();
        let name = entry.file_stem().unwrap().to_str().unwrap();

        let ts_resolution = if name.ends_with("nano") { TsResolution::NanoSecond } else { TsResolution::MicroSecond };

        assert_eq!(capture.header.endianness.is_swapped(), name.starts_with("swapped"), "file: {entry:?}");
        assert_eq!(capture.header.ts_resolution, ts_resolution, "file: {entry:?}");
        assert_eq!(capture.header.raw_bytes(), &data[..PCAP_HEADER_LEN], "file: {entry:?}");
        assert!(capture.header.is_ethernet());

        for packet in &capture.packets {
            assert_eq!(&packet.raw[..PACKET_HEADER_LEN], &packet.header.raw_bytes()[..]);
            assert_eq!(packet.internet.protocol, 1);
            assert_eq!(packet.protocol.payload_len(), packet.internet.total_len as usize - 28);
        }
    }
}

#[test]
fn decapsulated_layout() {
    for entry in fixtures("valid") {
        let data = std::fs::read(&entry).unwrap();
        let capture = CaptureFile::from_slice(&data).unwrap();
        let endianness = capture.header.endianness;

        let out = capture.decapsulate();
        assert_eq!(&out[..PCAP_HEADER_LEN], &data[..PCAP_HEADER_LEN], "file: {entry:?}");

        let mut src = &out[PCAP_HEADER_LEN..];
        for packet in &capture.packets {
            let payload = &packet.protocol.payload[..];
            let new_len = ETHERNET_HEADER_LEN + payload.len();

            // Timestamps are copied verbatim
            assert_eq!(&src[..8], &packet.raw[..8], "file: {entry:?}");
            assert_eq!(read_uint(&src[8..12], endianness) as usize, new_len);
            assert_eq!(read_uint(&src[12..16], endianness) as usize, new_len);

            let body = &src[PACKET_HEADER_LEN..PACKET_HEADER_LEN + new_len];
            assert_eq!(&body[..ETHERNET_HEADER_LEN], &packet.ethernet.raw_bytes()[..]);
            assert_eq!(&body[ETHERNET_HEADER_LEN..], payload);

            src = &src[PACKET_HEADER_LEN + new_len..];
        }
        assert!(src.is_empty(), "file: {entry:?}");
    }
}

#[test]
fn byte_order_doesnt_change_the_payloads() {
    let native = std::fs::read("tests/pcap/valid/native_micro.pcap").unwrap();
    let swapped = std::fs::read("tests/pcap/valid/swapped_micro.pcap").unwrap();

    let native = CaptureFile::from_slice(&native).unwrap();
    let swapped = CaptureFile::from_slice(&swapped).unwrap();

    for (a, b) in native.packets.iter().zip(&swapped.packets) {
        assert_eq!(a.header.ts_sec, b.header.ts_sec);
        assert_eq!(a.header.incl_len, b.header.incl_len);
        assert_eq!(a.ethernet, b.ethernet);
        assert_eq!(a.internet, b.internet);
        assert_eq!(a.protocol, b.protocol);
    }
}

#[test]
fn invalid_captures() {
    for entry in fixtures("invalid") {
        let data = std::fs::read(&entry).unwrap();
        let expected = expected_kind(&entry);

        let err = decapsulate(&data, DecodeOptions::default())
            .map(|_| ())
            .expect_err(&format!("{entry:?} should be rejected"));
        assert_eq!(err.kind(), expected, "file: {entry:?}, error: {err}");
        assert!(err.offset < data.len().max(1), "file: {entry:?}, error: {err}");
    }
}

fn expected_kind(path: &Path) -> ErrorKind {
    let name = path.file_stem().unwrap().to_str().unwrap();
    match name.split('_').next() {
        Some("format") => ErrorKind::Format,
        Some("unsupported") => ErrorKind::UnsupportedVariant,
        Some("consistency") => ErrorKind::Consistency,
        _ => panic!("unexpected fixture name: {name}"),
    }
}
