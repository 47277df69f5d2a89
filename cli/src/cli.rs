//! Argument parsing and usage text.

use anyhow::{anyhow, bail, Context, Result};
use plaception_sdk::PixelCommand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub pixels: Vec<PixelCommand>,
    pub json: bool,
    pub help: bool,
}

/// Placements submitted when none are given on the command line.
pub fn default_pixels() -> Vec<PixelCommand> {
    vec![
        PixelCommand::new(0, 1, 0xffffff),
        PixelCommand::new(1, 0, 0xffaabb),
        PixelCommand::new(1, 1, 0x10ab4d),
        PixelCommand::new(0, 0, 0xd9ec33),
    ]
}

pub fn print_help(binary_name: &str) {
    println!("Place pixels on the Plaception canvas and print it.");
    println!();
    println!("USAGE:");
    println!("  {} [OPTIONS] [X,Y,COLOR ...]", binary_name);
    println!();
    println!("OPTIONS:");
    println!("  --json        Print the canvas as JSON");
    println!("  -h, --help    Show this message");
    println!();
    println!("COLOR is decimal or 0x-prefixed hex. Without placements the four");
    println!("demo pixels are placed.");
    println!();
    println!("ENVIRONMENT:");
    println!("  RPC_URL       Cluster endpoint (default http://127.0.0.1:8899)");
    println!("  KEYPAIR       Payer keypair (default ~/.config/solana/id.json)");
    println!("  PROGRAM_PATH  Program build directory (default dist/program)");
    println!("  RUST_LOG      Log filter (default info)");
}

pub fn parse_args(args: &[String]) -> Result<Args> {
    let mut pixels = Vec::new();
    let mut json = false;
    let mut help = false;

    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => help = true,
            flag if flag.starts_with('-') => bail!("Unknown option: {}", flag),
            pixel => pixels.push(parse_pixel(pixel)?),
        }
    }

    if pixels.is_empty() {
        pixels = default_pixels();
    }

    Ok(Args { pixels, json, help })
}

/// Parse `x,y,color`.
pub fn parse_pixel(s: &str) -> Result<PixelCommand> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, color] = parts.as_slice() else {
        bail!("Expected X,Y,COLOR, got '{}'", s);
    };

    let x: u8 = x.parse().with_context(|| format!("Invalid x in '{}'", s))?;
    let y: u8 = y.parse().with_context(|| format!("Invalid y in '{}'", s))?;
    let color = parse_color(color).with_context(|| format!("Invalid color in '{}'", s))?;

    Ok(PixelCommand::new(x, y, color))
}

fn parse_color(s: &str) -> Result<u32> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| anyhow!("{}: {}", s, e))
}
