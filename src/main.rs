use base32_codec::{Engine, decode, encode};
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "base32-codec")]
#[command(about = "Encode and decode data as RFC 4648 base32", long_about = None)]
struct Cli {
    /// File to encode/decode (if not provided, reads from stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Decode instead of encode
    #[arg(short, long)]
    decode: bool,

    /// Run through the linear-memory engine instead of the table-driven
    /// codec (the output is identical)
    #[arg(short, long)]
    engine: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Read input data
    let input_data = if let Some(file_path) = cli.file {
        fs::read(&file_path)?
    } else {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        buffer
    };

    if cli.decode {
        let input_str =
            String::from_utf8(input_data).map_err(|_| "Input must be valid UTF-8 for decoding")?;
        let trimmed = input_str.trim();
        let decoded = if cli.engine {
            Engine::new().decode(trimmed)?
        } else {
            decode(trimmed)?
        };
        io::stdout().write_all(&decoded)?;
    } else {
        let encoded = if cli.engine {
            Engine::new().encode(&input_data)?
        } else {
            encode(&input_data)
        };
        println!("{}", encoded);
    }

    Ok(())
}
