use std::time::Duration;
use thiserror::Error;

/// Errors produced while fetching, extracting, or downloading.
///
/// Fetch-stage failures (`Fetch`, `Launch`, `RenderTimeout`) abort the run.
/// `Element` and `Download` are contained within their loop iteration and
/// never escalate past the component that raised them.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The listing page could not be retrieved (network, HTTP status, body).
    #[error("failed to fetch page: {0}")]
    Fetch(String),

    /// The headless browser could not be started or driven.
    #[error("browser launch failed: {0}")]
    Launch(String),

    /// The rendered page never reported `document.readyState === 'complete'`.
    #[error("page did not become ready within {0:?}")]
    RenderTimeout(Duration),

    /// A single candidate element could not be inspected.
    #[error("element error: {0}")]
    Element(String),

    /// A single image could not be fetched.
    #[error("image download failed: {0}")]
    Download(String),

    /// Filesystem failure while persisting an image.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scraping operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;
