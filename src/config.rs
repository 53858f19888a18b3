use std::path::PathBuf;
use std::time::Duration;

/// Desktop Chrome user agent presented on every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Listing page scraped by default: next week's new products.
pub const DEFAULT_URL: &str = "https://www.family.co.jp/goods/newgoods/nextweek.html";

/// Configuration for a single scrape run.
///
/// All knobs that were ambient constants in earlier iterations live here so
/// tests can swap in fixture URLs and temp directories instead of hitting the
/// live site.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Listing page URL.
    pub url: String,

    /// Directory that downloaded images are written into (created on demand).
    pub download_dir: PathBuf,

    /// Minimum number of extracted products required before any download
    /// happens. A short list usually means the page structure changed and the
    /// selectors degraded to noise.
    pub min_products: usize,

    /// User agent sent on page and image requests.
    pub user_agent: String,

    /// Per-request ceiling for the page fetch and each image fetch.
    pub request_timeout: Duration,

    /// Fixed delay after navigation before polling readiness (rendered variant).
    pub settle_delay: Duration,

    /// Upper bound on the `document.readyState` poll (rendered variant).
    pub ready_timeout: Duration,

    /// Run the browser without a visible window.
    pub headless: bool,

    /// Longest sanitized name stem allowed in a download filename.
    pub max_name_len: usize,

    /// Selector cascade for the static (plain HTTP) variant, most specific
    /// first.
    pub static_selectors: Vec<String>,

    /// Selector cascade for the rendered (headless browser) variant, most
    /// specific first, ending in a bare `img` catch-all.
    pub rendered_selectors: Vec<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            download_dir: PathBuf::from("famima_images"),
            min_products: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(30),
            settle_delay: Duration::from_secs(3),
            ready_timeout: Duration::from_secs(10),
            headless: true,
            max_name_len: 100,
            // The two cascades diverged in the wild and are kept as-is; see
            // DESIGN.md before trying to unify them.
            static_selectors: vec![
                "ul.ly-mod-list4 li img".to_string(),
                "ul.product-list li img".to_string(),
                "div.product-item img".to_string(),
                "li.item img".to_string(),
            ],
            rendered_selectors: vec![
                "ul.ly-mod-list4 li img".to_string(),
                "ul.product-list li img".to_string(),
                "div.product-item img".to_string(),
                "li.item img".to_string(),
                ".newgoods img".to_string(),
                "article img".to_string(),
                "div.goods img".to_string(),
                "img".to_string(),
            ],
        }
    }
}

impl ScraperConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the listing page URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Builder method: set the download directory.
    pub fn download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Builder method: set the minimum-product gate.
    pub fn min_products(mut self, min: usize) -> Self {
        self.min_products = min;
        self
    }

    /// Builder method: set headless mode.
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Builder method: set the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScraperConfig::default();

        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.min_products, 5);
        assert!(config.headless);
        assert_eq!(config.max_name_len, 100);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_methods() {
        let config = ScraperConfig::new()
            .url("https://example.com/list.html")
            .download_dir("/tmp/images")
            .min_products(3)
            .headless(false);

        assert_eq!(config.url, "https://example.com/list.html");
        assert_eq!(config.download_dir, PathBuf::from("/tmp/images"));
        assert_eq!(config.min_products, 3);
        assert!(!config.headless);
    }

    #[test]
    fn test_rendered_cascade_ends_in_catch_all() {
        let config = ScraperConfig::default();
        assert_eq!(config.rendered_selectors.last().map(String::as_str), Some("img"));
        // The static cascade deliberately has no catch-all.
        assert_ne!(config.static_selectors.last().map(String::as_str), Some("img"));
    }
}
