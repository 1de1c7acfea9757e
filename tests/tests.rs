#![allow(clippy::unreadable_literal)]

use pcap_decap::{decapsulate, CaptureFile, DecodeOptions, ErrorKind, PcapParser};

mod pcap;

/// Capture with a single echo request of 28 bytes IPv4 total length and no ICMP payload.
const ONE_PACKET: &str = concat!(
    // Global header: native order, microsecond resolution, snaplen 65535, Ethernet
    "a1b2c3d4", "0002", "0004", "00000000", "00000000", "0000ffff", "00000001",
    // Packet header: incl_len = orig_len = 42
    "5c2aad80", "0001e240", "0000002a", "0000002a",
    // Ethernet
    "525400123502", "00163e4b7a1c", "0800",
    // IPv4: total_len = 28, protocol = ICMP
    "4500", "001c", "1c46", "4000", "40", "01", "b1e6", "0a000205", "08080808",
    // ICMP
    "0800f7ff12340001",
);

#[test]
fn single_packet_end_to_end() {
    let data = hex::decode(ONE_PACKET).unwrap();

    let capture = CaptureFile::from_slice(&data).unwrap();
    assert_eq!(capture.packets.len(), 1);

    let packet = &capture.packets[0];
    assert_eq!(packet.header.incl_len, 42);
    assert_eq!(packet.ethernet.raw_bytes()[..], data[40..54]);
    assert_eq!(packet.protocol.header, [0x08, 0x00, 0xf7, 0xff, 0x12, 0x34, 0x00, 0x01]);
    assert!(packet.protocol.payload.is_empty());

    let decap = packet.decapsulate();
    assert_eq!(decap.header.incl_len, 14);
    assert_eq!(decap.header.orig_len, 14);
    assert_eq!(decap.body(), &data[40..54]);

    let out = capture.decapsulate();
    let expected = hex::decode(concat!(
        "a1b2c3d4", "0002", "0004", "00000000", "00000000", "0000ffff", "00000001",
        "5c2aad80", "0001e240", "0000000e", "0000000e",
        "525400123502", "00163e4b7a1c", "0800",
    ))
    .unwrap();
    assert_eq!(out, expected);
}

#[test]
fn zeroed_magic_number() {
    let mut data = hex::decode(ONE_PACKET).unwrap();
    data[0..4].copy_from_slice(&[0, 0, 0, 0]);

    let err = CaptureFile::from_slice(&data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(err.field, "PcapHeader.magic_number");
    assert_eq!(err.offset, 0);
}

#[test]
fn parser_stops_on_first_error() {
    let mut data = hex::decode(ONE_PACKET).unwrap();
    let packet = data[24..].to_vec();
    data.extend_from_slice(&packet);
    // Protocol of the second packet: UDP
    data[82 + 16 + 14 + 9] = 17;

    let (src, mut parser) = PcapParser::new(&data).unwrap();
    let (src, _) = parser.next_packet(src).unwrap();

    let err = parser.next_packet(src).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedVariant);
    assert_eq!(err.offset, 82);
    assert_eq!(err.root_cause().offset, 82 + 16 + 14 + 20);
    assert_eq!(parser.packets(), 1);
}

#[test]
fn decapsulating_twice_fails_cleanly() {
    let data = hex::decode(ONE_PACKET).unwrap();
    let once = decapsulate(&data, DecodeOptions::default()).unwrap();

    // The Ethernet header still announces IPv4 but no IPv4 header follows
    let err = decapsulate(&once, DecodeOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(err.root_cause().field, "InternetFrame");
}

#[test]
fn verbose_decoding_gives_the_same_result() {
    let data = hex::decode(ONE_PACKET).unwrap();

    let quiet = CaptureFile::from_slice(&data).unwrap();
    let verbose = CaptureFile::from_slice_with(&data, DecodeOptions::verbose()).unwrap();
    assert_eq!(quiet, verbose);
}

#[test]
fn owned_capture_outlives_its_input() {
    let capture = {
        let data = hex::decode(ONE_PACKET).unwrap();
        CaptureFile::from_slice(&data).unwrap().into_owned()
    };

    assert_eq!(capture.packets.len(), 1);
    assert_eq!(capture.packets[0].raw.len(), 58);
}
