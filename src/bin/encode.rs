use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use qrhub::{render_to_file, CodeKind};

#[derive(Parser)]
#[command(name = "qrhub-encode")]
#[command(author, version, about = "Render text as a QR code or Code128 barcode image", long_about = None)]
struct Cli {
    /// Text to encode
    text: String,

    /// Symbology: qr or barcode
    #[arg(short, long, default_value = "qr")]
    kind: CodeKind,

    /// Output PNG path (defaults to qr.png or barcode.png)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(args.kind.file_name()));

    println!("Encoding {} bytes as {}", args.text.len(), args.kind);

    render_to_file(args.kind, &args.text, &output)?;

    println!("Output file: {}", output.display());

    Ok(())
}
