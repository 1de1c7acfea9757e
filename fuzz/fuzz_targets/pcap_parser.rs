#![no_main]
use libfuzzer_sys::fuzz_target;
use pcap_decap::PcapParser;

fuzz_target!(|data: &[u8]| {
    if let Ok((mut src, mut parser)) = PcapParser::new(data) {
        while !src.is_empty() {
            match parser.next_packet(src) {
                Ok((rem, packet)) => {
                    let _ = packet.decapsulate();
                    src = rem;
                },
                Err(_) => break,
            }
        }
    }
});
