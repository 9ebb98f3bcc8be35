use pcap_scan::pcap::{DecodingContext, PcapReader};
use pcap_scan::{Endianness, PcapError, ReaderConfig, TruncationPolicy, TsResolution};

use crate::common::{decode_all, CaptureBuilder, Record};

const ALL_FORMATS: [(Endianness, TsResolution); 4] = [
    (Endianness::Big, TsResolution::MicroSecond),
    (Endianness::Little, TsResolution::MicroSecond),
    (Endianness::Big, TsResolution::NanoSecond),
    (Endianness::Little, TsResolution::NanoSecond),
];

fn sample_records() -> Vec<Record> {
    vec![
        Record::new(1_600_000_000, 1, b"first").with_orig_len(1500),
        Record::new(1_600_000_000, 999_999, &[0_u8; 0]),
        Record::new(1_600_000_001, 42, &(0..=255).collect::<Vec<u8>>()),
        Record::new(0, 0, b"\xde\xad\xbe\xef"),
    ]
}

#[test]
fn negotiates_every_magic() {
    for (endianness, ts_resolution) in ALL_FORMATS {
        let data = CaptureBuilder::new(endianness, ts_resolution).snaplen(1234).build();
        let (_, context) = DecodingContext::negotiate(&mut &data[..]).unwrap();

        assert_eq!(context.endianness, endianness);
        assert_eq!(context.ts_resolution, ts_resolution);
        assert_eq!(context.initial_buffer_hint(), 1234);
        assert_eq!(context.needs_byte_swap(), endianness != Endianness::native());
    }
}

#[test]
fn rejects_other_magics() {
    for magic in [0x00000000_u32, 0xa1b2c3d5, 0x0a0d0d0a, 0xd4c3b2a0, 0xffffffff] {
        let mut data = CaptureBuilder::new(Endianness::Big, TsResolution::MicroSecond).build();
        data[0..4].copy_from_slice(&magic.to_be_bytes());

        match PcapReader::new(&data[..]) {
            Err(PcapError::UnsupportedMagic(got)) => assert_eq!(got, magic),
            other => panic!("Expected UnsupportedMagic for {magic:#x}, got {:?}", other.map(|_| ())),
        }
    }
}

#[test]
fn truncated_global_header() {
    let data = CaptureBuilder::new(Endianness::Little, TsResolution::MicroSecond).build();

    for len in 0..24 {
        match PcapReader::new(&data[..len]) {
            Err(PcapError::TruncatedHeader { got }) => assert_eq!(got, len),
            other => panic!("Expected TruncatedHeader for {len}B, got {:?}", other.map(|_| ())),
        }
    }
}

#[test]
fn round_trip_in_every_format() {
    for (endianness, ts_resolution) in ALL_FORMATS {
        let mut builder = CaptureBuilder::new(endianness, ts_resolution);
        for record in sample_records() {
            builder = builder.record(record);
        }

        let rows = decode_all(&builder.build());
        assert_eq!(rows.len(), 4);

        for (row, record) in rows.iter().zip(sample_records()) {
            let expected_ts = u64::from(record.ts_sec) * 1_000_000_000
                + u64::from(record.ts_frac) * ts_resolution.nanos_per_unit();

            assert_eq!(row.0, expected_ts);
            assert_eq!(row.1, record.orig_len);
            assert_eq!(row.2, record.data.len() as u32);
            assert_eq!(row.3, record.data);
        }
    }
}

#[test]
fn swapped_and_native_decode_identically() {
    for ts_resolution in [TsResolution::MicroSecond, TsResolution::NanoSecond] {
        let mut big = CaptureBuilder::new(Endianness::Big, ts_resolution);
        for record in sample_records() {
            big = big.record(record);
        }
        let little = CaptureBuilder { endianness: Endianness::Little, ..big.clone() };

        let big = big.build();
        let little = little.build();
        assert_ne!(big, little);

        assert_eq!(decode_all(&big), decode_all(&little));
    }
}

#[test]
fn timestamp_canonicalization() {
    let micro = CaptureBuilder::new(Endianness::Little, TsResolution::MicroSecond)
        .packet(1, 500_000, b"")
        .build();
    assert_eq!(decode_all(&micro)[0].0, 1_500_000_000);

    let nano = CaptureBuilder::new(Endianness::Big, TsResolution::NanoSecond)
        .packet(1, 500, b"")
        .build();
    assert_eq!(decode_all(&nano)[0].0, 1_000_000_500);
}

#[test]
fn buffer_growth_keeps_payloads_intact() {
    let small_a = vec![0x11_u8; 10];
    let small_b = vec![0x22_u8; 10];
    let large: Vec<u8> = (0..1000).map(|i| (i % 251) as u8).collect();

    let data = CaptureBuilder::new(Endianness::Little, TsResolution::MicroSecond)
        .snaplen(10)
        .packet(1, 0, &small_a)
        .packet(2, 0, &small_b)
        .packet(3, 0, &large)
        .packet(4, 0, &small_a)
        .build();

    let mut reader = PcapReader::new(&data[..]).unwrap();
    let initial = reader.buffer_capacity();
    assert!(initial >= 10);

    assert_eq!(&reader.next_packet().unwrap().unwrap().data[..], &small_a[..]);
    assert_eq!(&reader.next_packet().unwrap().unwrap().data[..], &small_b[..]);
    assert_eq!(reader.buffer_capacity(), initial);

    assert_eq!(&reader.next_packet().unwrap().unwrap().data[..], &large[..]);
    let grown = reader.buffer_capacity();
    assert!(grown >= 1000);

    assert_eq!(&reader.next_packet().unwrap().unwrap().data[..], &small_a[..]);
    assert_eq!(reader.buffer_capacity(), grown);
    assert!(reader.next_packet().unwrap().is_none());
}

#[test]
fn zero_snaplen_still_decodes() {
    let payload = [0x5a_u8; 300];
    let data = CaptureBuilder::new(Endianness::Big, TsResolution::MicroSecond)
        .snaplen(0)
        .packet(0, 0, &payload)
        .build();

    let rows = decode_all(&data);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].3, payload.to_vec());
}

#[test]
fn zero_length_capture_is_a_packet() {
    let data = CaptureBuilder::new(Endianness::Little, TsResolution::NanoSecond)
        .record(Record::new(5, 0, b"").with_orig_len(64))
        .packet(6, 0, b"after")
        .build();

    let rows = decode_all(&data);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], (5_000_000_000, 64, 0, vec![]));
    assert_eq!(rows[1].3, b"after".to_vec());
}

#[test]
fn header_only_capture_is_empty() {
    let data = CaptureBuilder::new(Endianness::Little, TsResolution::MicroSecond).build();
    assert!(decode_all(&data).is_empty());
}

#[test]
fn truncated_packet_header_ends_stream() {
    let data = CaptureBuilder::new(Endianness::Little, TsResolution::MicroSecond)
        .packet(1, 0, b"one")
        .packet(2, 0, b"two")
        .packet(3, 0, b"three")
        .build();
    let two_packets = 24 + 2 * 16 + 6;

    for partial in 1..16 {
        let rows = decode_all(&data[..two_packets + partial]);
        assert_eq!(rows.len(), 2, "Partial header of {partial}B");
        assert_eq!(rows[1].3, b"two".to_vec());
    }
}

#[test]
fn truncated_payload_ends_stream() {
    let data = CaptureBuilder::new(Endianness::Big, TsResolution::NanoSecond)
        .packet(1, 0, b"one")
        .packet(2, 0, b"payload")
        .build();

    for cut in 1..=7 {
        let rows = decode_all(&data[..data.len() - cut]);
        assert_eq!(rows.len(), 1, "Payload cut by {cut}B");
        assert_eq!(rows[0].3, b"one".to_vec());
    }
}

#[test]
fn strict_mode_reports_truncation() {
    let data = CaptureBuilder::new(Endianness::Little, TsResolution::MicroSecond)
        .packet(1, 0, b"one")
        .packet(2, 0, b"payload")
        .build();
    let config = ReaderConfig::default().with_truncation(TruncationPolicy::Strict);

    let mut reader = PcapReader::with_config(&data[..data.len() - 3], &config).unwrap();
    assert!(reader.next_packet().unwrap().is_some());
    let err = reader.next_packet().unwrap_err();
    assert!(err.is_truncation());
    assert!(matches!(err, PcapError::TruncatedPayload { expected: 7, got: 4 }));

    let mut reader = PcapReader::with_config(&data[..24 + 16 + 3 + 9], &config).unwrap();
    assert!(reader.next_packet().unwrap().is_some());
    assert!(matches!(reader.next_packet(), Err(PcapError::TruncatedRecordHeader { got: 9 })));

    // A capture ending on a packet boundary is not truncated
    let mut reader = PcapReader::with_config(&data[..], &config).unwrap();
    while reader.next_packet().unwrap().is_some() {}
}
