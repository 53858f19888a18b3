//! newgoods CLI
//!
//! Scrapes the configured listing page and downloads product images. Exits 0
//! when the download gate passed (individual image failures are tolerated),
//! 1 when the gate failed or the page could not be fetched.

use clap::Parser;
use newgoods::{run_rendered, run_static, DownloadOutcome, ScraperConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "newgoods", version, about = "Download a retailer's upcoming product images")]
struct Cli {
    /// Listing page URL
    #[arg(long)]
    url: Option<String>,

    /// Directory to write images into
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Minimum product count required before downloading
    #[arg(long)]
    min: Option<usize>,

    /// Drive a headless browser instead of a plain HTTP fetch (needed when
    /// the page builds its product list client-side)
    #[arg(long)]
    rendered: bool,

    /// Run the browser with a visible window (implies --rendered)
    #[arg(long)]
    headed: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = ScraperConfig::default().headless(!cli.headed);
    if let Some(url) = cli.url {
        config = config.url(url);
    }
    if let Some(dir) = cli.dir {
        config = config.download_dir(dir);
    }
    if let Some(min) = cli.min {
        config = config.min_products(min);
    }

    let result = if cli.rendered || cli.headed {
        run_rendered(&config)
    } else {
        run_static(&config)
    };

    match result {
        Ok(DownloadOutcome::Completed { succeeded, failed }) => {
            log::info!(
                "done: {} downloaded, {} failed, saved to '{}'",
                succeeded,
                failed,
                config.download_dir.display()
            );
            ExitCode::SUCCESS
        }
        Ok(DownloadOutcome::Skipped { reason }) => {
            log::info!("skipped: {}", reason);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("scrape failed: {:?}", anyhow::Error::new(e));
            ExitCode::FAILURE
        }
    }
}
