//! pcap-decap command line entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pcap_decap::{decap_output_path, CaptureFile, DecodeOptions};

/// Strip the IPv4 and ICMP headers from every packet of a pcap capture.
#[derive(Parser, Debug)]
#[command(name = "pcap-decap")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pcap file to decapsulate
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output file (defaults to `decap_<FILE>` next to the input)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_FILE")]
    output: Option<PathBuf>,

    /// Print the fields of every decoded packet
    #[arg(long = "describe")]
    describe: bool,

    /// Enable verbose output, twice to also log the field dumps
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(std::io::stderr)
        .init();

    let output = match args.output {
        Some(output) => output,
        None => decap_output_path(&args.file)
            .with_context(|| format!("No file name in input path: {}", args.file.display()))?,
    };

    let data = std::fs::read(&args.file).with_context(|| format!("Failed to read PCAP file: {}", args.file.display()))?;

    let options = DecodeOptions { verbose: args.verbose >= 2 };
    let capture = CaptureFile::from_slice_with(&data, options)
        .with_context(|| format!("Failed to decode PCAP file: {}", args.file.display()))?;

    if args.describe {
        for (i, packet) in capture.packets.iter().enumerate() {
            println!("Packet #{i}\n{packet}\n");
        }
    }

    let decap = capture.decapsulate();
    std::fs::write(&output, &decap).with_context(|| format!("Failed to write PCAP file: {}", output.display()))?;

    info!(
        packets = capture.packets.len(),
        input = %args.file.display(),
        output = %output.display(),
        bytes = decap.len(),
        "wrote decapsulated capture"
    );

    Ok(())
}
