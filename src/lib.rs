//! # newgoods
//!
//! Scrapes a retailer's "next week's new products" listing page, extracts
//! product images through a cascade of heuristics, and conditionally
//! downloads them to local storage.
//!
//! ## Pipeline
//!
//! ```text
//! page source (static HTTP or rendered DOM)
//!     -> product extractor (selector cascade, attribute chain, noise filters)
//!     -> gate (minimum product count)
//!     -> downloader (per-image fetch + persist, failures isolated)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use newgoods::{run_static, ScraperConfig};
//!
//! # fn main() -> newgoods::Result<()> {
//! let config = ScraperConfig::default();
//! let outcome = run_static(&config)?;
//! println!("gate passed: {}", outcome.gate_passed());
//! # Ok(())
//! # }
//! ```
//!
//! The rendered variant drives a headless Chrome instance instead of a plain
//! GET, which makes client-side injected content visible at the cost of a
//! local Chrome/Chromium dependency:
//!
//! ```rust,no_run
//! # use newgoods::{run_rendered, ScraperConfig};
//! # fn main() -> newgoods::Result<()> {
//! let outcome = run_rendered(&ScraperConfig::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`config`]: run configuration with builder-style overrides
//! - [`page`]: page source providers (static HTML and rendered DOM)
//! - [`extract`]: the product extraction pipeline
//! - [`download`]: the gate and image download loop
//! - [`error`]: error types and result alias

pub mod config;
pub mod download;
pub mod error;
pub mod extract;
pub mod page;
pub mod run;

pub use config::ScraperConfig;
pub use download::{DownloadOutcome, Downloader, HttpImageFetcher, ImageFetcher};
pub use error::{Result, ScrapeError};
pub use extract::{ProductExtractor, ProductRecord};
pub use page::{
    Candidate, PageHandle, RenderedPage, RenderedPageSource, StaticPage, StaticPageSource,
};
pub use run::{run_rendered, run_static};
