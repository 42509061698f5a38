use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use qrhub::decode_file;

#[derive(Parser)]
#[command(name = "qrhub-decode")]
#[command(author, version, about = "Print every QR code payload found in an image", long_about = None)]
struct Cli {
    /// Input image file
    input: PathBuf,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if !args.input.is_file() {
        anyhow::bail!("Input path is not a file: {}", args.input.display());
    }

    let payloads = decode_file(&args.input)?;

    if payloads.is_empty() {
        anyhow::bail!("No code found in {}", args.input.display());
    }

    println!("Found {} code(s)", payloads.len());
    for (i, payload) in payloads.iter().enumerate() {
        println!("  {}: {}", i + 1, payload);
    }

    Ok(())
}
