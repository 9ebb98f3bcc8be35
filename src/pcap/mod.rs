//! Contains the Pcap header negotiation and the packet reader

mod header;
mod packet;
mod reader;

pub use header::*;
pub use packet::*;
pub use reader::*;
