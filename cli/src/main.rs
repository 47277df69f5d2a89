mod cli;
mod config;

use anyhow::{Context, Result};
use config::Config;
use log::info;
use plaception_sdk::{rpc_connection, Session};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    let binary_name = argv.first().map(String::as_str).unwrap_or("plaception");
    let args = cli::parse_args(argv.get(1..).unwrap_or_default())?;
    if args.help {
        cli::print_help(binary_name);
        return Ok(());
    }

    let config = Config::from_env();
    info!("Plaception client starting against {}", config.rpc_url);

    let session = Session::establish(rpc_connection(config.rpc_url.clone()))
        .await
        .with_context(|| format!("Failed to connect to {}", config.rpc_url))?
        .establish_payer(None, &config.keypair_path)
        .await
        .context("Failed to fund payer")?
        .check_program(&config.program)
        .await
        .context("Failed to check program")?;

    for pixel in &args.pixels {
        let signature = session.place(*pixel).await.with_context(|| {
            format!(
                "Failed to place pixel ({}, {}) = {:#x}",
                pixel.x, pixel.y, pixel.color
            )
        })?;
        info!("Placed ({}, {}): {}", pixel.x, pixel.y, signature);
    }

    let canvas = session.get_canvas().await.context("Failed to read canvas")?;
    if args.json {
        let report = serde_json::json!({
            "account": session.canvas_address().to_string(),
            "created": session.provisioning().was_created(),
            "canvas": canvas,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} has canvas:", session.canvas_address());
        println!("{:?}", canvas.cells);
    }

    info!("Success");
    Ok(())
}
