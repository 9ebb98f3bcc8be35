#![no_main]
use libfuzzer_sys::fuzz_target;
use pcap_scan::{PcapSource, ReaderConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = PcapSource::from_reader(data, ReaderConfig::default().with_batch_size(3)) {
        for batch in source {
            if batch.is_err() {
                break;
            }
        }
    }
});
