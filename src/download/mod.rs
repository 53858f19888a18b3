//! Gate & downloader
//!
//! Applies the minimum-count gate to an extraction result, then fetches and
//! persists each image. One image failing never aborts the loop; the outcome
//! carries a success/failure tally instead.

use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::extract::ProductRecord;
use crate::page::static_page::navigation_headers;
use reqwest::blocking::Client;
use reqwest::header::REFERER;
use std::fs;
use std::path::PathBuf;

/// Characters that are illegal or troublesome in file paths.
const ILLEGAL_PATH_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Outcome of a gate-and-download pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The gate failed; storage was never touched.
    Skipped { reason: String },

    /// The gate passed and every record was attempted.
    Completed { succeeded: usize, failed: usize },
}

impl DownloadOutcome {
    /// Whether the gate passed. Individual image failures do not turn a
    /// completed run into a failed one.
    pub fn gate_passed(&self) -> bool {
        matches!(self, DownloadOutcome::Completed { .. })
    }
}

/// Fetches raw image bytes. The HTTP implementation lives behind this seam so
/// tests can run the download loop without a network.
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// `ImageFetcher` backed by a persistent HTTP connection pool.
pub struct HttpImageFetcher {
    client: Client,
    referer: Option<String>,
}

impl HttpImageFetcher {
    /// Build a fetcher from `config`. `referer` is sent on every image
    /// request when set; the rendered path points it at the listing page.
    pub fn new(config: &ScraperConfig, referer: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(navigation_headers())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ScrapeError::Download(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, referer })
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let mut request = self.client.get(url);
        if let Some(referer) = &self.referer {
            request = request.header(REFERER, referer);
        }

        let response = request
            .send()
            .map_err(|e| ScrapeError::Download(format!("GET {} failed: {}", url, e)))?
            .error_for_status()
            .map_err(|e| ScrapeError::Download(format!("GET {} returned error status: {}", url, e)))?;

        let bytes = response
            .bytes()
            .map_err(|e| ScrapeError::Download(format!("failed to read body of {}: {}", url, e)))?;

        Ok(bytes.to_vec())
    }
}

/// Gate & download loop over an extraction result.
pub struct Downloader<F: ImageFetcher> {
    fetcher: F,
    dir: PathBuf,
    min_products: usize,
    max_name_len: usize,
}

impl Downloader<HttpImageFetcher> {
    /// Downloader with the real HTTP fetcher.
    pub fn new(config: &ScraperConfig, referer: Option<String>) -> Result<Self> {
        Ok(Self::with_fetcher(
            HttpImageFetcher::new(config, referer)?,
            config,
        ))
    }
}

impl<F: ImageFetcher> Downloader<F> {
    /// Downloader with a caller-supplied fetcher.
    pub fn with_fetcher(fetcher: F, config: &ScraperConfig) -> Self {
        Self {
            fetcher,
            dir: config.download_dir.clone(),
            min_products: config.min_products,
            max_name_len: config.max_name_len,
        }
    }

    /// Apply the gate, then download every record.
    ///
    /// Below the gate, nothing is written and the skip is reported as an
    /// outcome, not an error: a short list usually means the selectors
    /// degraded to noise, and a handful of low-confidence downloads is worth
    /// less than a clean signal that the page changed.
    pub fn process(&self, records: &[ProductRecord]) -> Result<DownloadOutcome> {
        log::info!("extracted {} products", records.len());

        if records.len() < self.min_products {
            let reason = format!(
                "found {} products, need at least {}",
                records.len(),
                self.min_products
            );
            log::info!("skipping downloads: {}", reason);
            return Ok(DownloadOutcome::Skipped { reason });
        }

        fs::create_dir_all(&self.dir)?;

        log::info!("downloading {} images...", records.len());

        let mut succeeded = 0;
        let mut failed = 0;
        for record in records {
            match self.download_one(record) {
                Ok(filename) => {
                    log::info!("  downloaded: {}", filename);
                    succeeded += 1;
                }
                Err(e) => {
                    log::warn!("  failed ({}): {}", record.name, e);
                    failed += 1;
                }
            }
        }

        Ok(DownloadOutcome::Completed { succeeded, failed })
    }

    fn download_one(&self, record: &ProductRecord) -> Result<String> {
        let bytes = self.fetcher.fetch(&record.image_url)?;
        let filename = self.filename_for(record);
        fs::write(self.dir.join(&filename), &bytes)?;
        Ok(filename)
    }

    /// Filename for a record: zero-padded index, sanitized truncated name,
    /// extension from the URL. Deterministic and collision-free thanks to the
    /// index prefix, and the padding keeps directory listings in download
    /// order.
    pub fn filename_for(&self, record: &ProductRecord) -> String {
        let stem: String = sanitize_name(&record.name)
            .chars()
            .take(self.max_name_len)
            .collect();
        format!(
            "{:02}_{}{}",
            record.index,
            stem,
            extension_of(&record.image_url)
        )
    }
}

/// Replace characters illegal in file paths with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if ILLEGAL_PATH_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Extension from the URL's path, ignoring the query string, case preserved
/// as found. Defaults to `.jpg` when the last path segment has none.
fn extension_of(url: &str) -> &str {
    let path = url.split('?').next().unwrap_or(url);
    let segment = path.rsplit('/').next().unwrap_or(path);

    match segment.rfind('.') {
        Some(pos) if pos > 0 && pos + 1 < segment.len() => &segment[pos..],
        _ => ".jpg",
    }
}
