use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pcap_scan::config::DEFAULT_BATCH_SIZE;
use pcap_scan::{Input, PacketBatch, PcapSource, ReaderConfig, TruncationPolicy};

#[derive(Parser, Debug)]
#[command(name = "pcap-scan")]
#[command(version)]
#[command(
    about = "Decode a pcap capture and print one line per packet.",
    long_about = None,
    after_help = "Examples:\n  pcap-scan capture.pcap\n  pcap-scan --count capture.pcap\n  tcpdump -w - | pcap-scan --no-data -"
)]
struct Cli {
    /// Path to a .pcap file, or '-' for standard input
    input: Option<String>,

    /// Number of packets decoded per batch
    #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Fail on a capture truncated in the middle of a packet instead of stopping there
    #[arg(long)]
    strict: bool,

    /// Only print the number of packets
    #[arg(long, conflicts_with_all = ["header", "no_data"])]
    count: bool,

    /// Print the capture header before the packets
    #[arg(long)]
    header: bool,

    /// Omit the packet data column
    #[arg(long)]
    no_data: bool,

    /// Increase logging verbosity (-v, -vv, -vvv), overridden by RUST_LOG
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        },
    }
}

fn run(cli: &Cli) -> Result<()> {
    let input = Input::parse(cli.input.as_deref())?;

    let truncation = if cli.strict { TruncationPolicy::Strict } else { TruncationPolicy::Lenient };
    let config = ReaderConfig::default()
        .with_batch_size(cli.batch_size)
        .with_truncation(truncation);

    let mut source = PcapSource::open(input.clone(), config).with_context(|| format!("Cannot scan {input}"))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.header {
        let header = source.header();
        let context = source.context();
        writeln!(
            out,
            "# magic={:#010x} version={}.{} snaplen={} linktype={} endianness={:?} resolution={:?}",
            header.magic_number,
            header.version_major,
            header.version_minor,
            header.snaplen,
            header.datalink,
            context.endianness,
            context.ts_resolution,
        )?;
    }

    loop {
        let batch = source.next_batch().with_context(|| format!("Failed to decode {input}"))?;
        if batch.is_empty() {
            break;
        }

        if !cli.count {
            write_batch(&mut out, &batch, !cli.no_data)?;
        }
    }

    if cli.count {
        writeln!(out, "{}", source.rows_read())?;
    }

    out.flush()?;
    Ok(())
}

fn write_batch<W: Write>(out: &mut W, batch: &PacketBatch, with_data: bool) -> io::Result<()> {
    for packet in batch.rows() {
        write!(out, "{}\t{}\t{}", packet.timestamp_ns, packet.orig_len, packet.capture_len)?;
        if with_data {
            write!(out, "\t{}", hex::encode(&packet.data))?;
        }
        writeln!(out)?;
    }

    Ok(())
}
