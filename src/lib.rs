//! Streaming decoder for the classic Pcap capture format.
//!
//! Provides a [`PcapReader`](pcap::PcapReader) which negotiates the global header of a capture and then
//! yields one packet at a time, and a [`PcapSource`] which groups those packets into columnar
//! [`PacketBatch`]es.
//!
//! # Examples
//!
//! ```no_run
//! use std::fs::File;
//! use pcap_scan::pcap::PcapReader;
//!
//! let file_in = File::open("test.pcap").expect("Error opening file");
//! let mut pcap_reader = PcapReader::new(file_in).unwrap();
//!
//! // Read test.pcap
//! while let Some(pkt) = pcap_reader.next_packet().unwrap() {
//!     println!("{} {}B", pkt.timestamp_ns, pkt.capture_len);
//! }
//! ```
//!
//! Reading a capture as batches, from a file or from standard input with `-`:
//!
//! ```no_run
//! use pcap_scan::{Input, PcapSource, ReaderConfig};
//!
//! let input = Input::parse(Some("-")).unwrap();
//! let mut source = PcapSource::open(input, ReaderConfig::default()).unwrap();
//!
//! loop {
//!     let batch = source.next_batch().unwrap();
//!     if batch.is_empty() {
//!         break;
//!     }
//!     // Do something with the columns
//! }
//! ```

#![allow(clippy::unreadable_literal)]

pub(crate) mod common;
mod read_buffer;
pub mod batch;
pub mod config;
pub mod errors;
pub mod input;
pub mod pcap;
pub mod source;

pub use batch::{BlobColumn, Column, ColumnType, PacketBatch, SCHEMA};
pub use common::{Endianness, TsResolution};
pub use config::{ReaderConfig, TruncationPolicy};
pub use errors::{PcapError, PcapResult};
pub use input::Input;
pub use source::PcapSource;
