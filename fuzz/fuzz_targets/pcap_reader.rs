#![no_main]
use libfuzzer_sys::fuzz_target;
use pcap_scan::pcap::PcapReader;
use pcap_scan::{ReaderConfig, TruncationPolicy};

fuzz_target!(|data: &[u8]| {
    if let Ok(mut pcap_reader) = PcapReader::new(data) {
        while let Ok(Some(_)) = pcap_reader.next_packet() {}
    }

    let strict = ReaderConfig::default().with_truncation(TruncationPolicy::Strict);
    if let Ok(mut pcap_reader) = PcapReader::with_config(data, &strict) {
        while let Ok(Some(_)) = pcap_reader.next_packet() {}
    }
});
