#![no_main]
use libfuzzer_sys::fuzz_target;
use pcap_decap::{decapsulate, DecodeOptions};

fuzz_target!(|data: &[u8]| {
    if let Ok(out) = decapsulate(data, DecodeOptions::default()) {
        // A decapsulated capture still has a valid global header
        assert!(pcap_decap::PcapHeader::from_slice(&out).is_ok());
    }
});
