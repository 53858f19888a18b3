//! Run orchestration: provider → extractor → gate → downloader.

use crate::config::ScraperConfig;
use crate::download::{DownloadOutcome, Downloader};
use crate::error::Result;
use crate::extract::ProductExtractor;
use crate::page::{RenderedPageSource, StaticPageSource};

/// Scrape via a plain HTTP fetch of the listing page.
///
/// Fast and dependency-free, but blind to content injected client-side.
pub fn run_static(config: &ScraperConfig) -> Result<DownloadOutcome> {
    let source = StaticPageSource::new(config)?;
    let page = source.fetch(&config.url)?;

    let records = ProductExtractor::for_static(config).extract(&page);

    Downloader::new(config, None)?.process(&records)
}

/// Scrape via a headless browser, seeing the page as a user would.
///
/// The browser process lives exactly as long as `page`; it is torn down when
/// this function returns, whether extraction and downloading succeeded or
/// not.
pub fn run_rendered(config: &ScraperConfig) -> Result<DownloadOutcome> {
    let source = RenderedPageSource::new(config);
    let page = source.fetch(&config.url)?;

    let records = ProductExtractor::for_rendered(config).extract(&page);

    // Image requests carry the listing page as referer on this path
    Downloader::new(config, Some(config.url.clone()))?.process(&records)
}
