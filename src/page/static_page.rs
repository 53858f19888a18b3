use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::page::{Candidate, PageHandle};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL};
use scraper::{Html, Selector};

/// Static page source: one HTTP GET, parsed into an HTML tree.
///
/// No JavaScript runs, so content injected client-side is invisible to this
/// variant. The request carries a realistic browser header set to reduce the
/// chance of a bot-blocking response.
pub struct StaticPageSource {
    client: Client,
}

/// Navigation headers sent alongside the user agent. Shared with the image
/// download path, which reuses the same browser-identifying set.
pub(crate) fn navigation_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("ja,en-US;q=0.9,en;q=0.8"),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert(
        "Upgrade-Insecure-Requests",
        HeaderValue::from_static("1"),
    );
    headers.insert("Sec-Fetch-Dest", HeaderValue::from_static("document"));
    headers.insert("Sec-Fetch-Mode", HeaderValue::from_static("navigate"));
    headers.insert("Sec-Fetch-Site", HeaderValue::from_static("none"));
    headers
}

impl StaticPageSource {
    /// Build a source with a persistent HTTP client configured from `config`.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(navigation_headers())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ScrapeError::Fetch(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch a URL and parse the response body into a queryable page.
    pub fn fetch(&self, url: &str) -> Result<StaticPage> {
        log::info!("fetching page: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScrapeError::Fetch(format!("GET {} failed: {}", url, e)))?
            .error_for_status()
            .map_err(|e| ScrapeError::Fetch(format!("GET {} returned error status: {}", url, e)))?;

        let body = response
            .text()
            .map_err(|e| ScrapeError::Fetch(format!("failed to read body of {}: {}", url, e)))?;

        Ok(StaticPage::from_html(&body, url))
    }
}

/// A parsed static page.
pub struct StaticPage {
    document: Html,
    url: String,
}

impl StaticPage {
    /// Parse raw HTML into a page. Also the test entry point: fixtures go
    /// through here instead of the network.
    pub fn from_html(html: &str, url: impl Into<String>) -> Self {
        Self {
            document: Html::parse_document(html),
            url: url.into(),
        }
    }
}

impl PageHandle for StaticPage {
    fn base_url(&self) -> &str {
        &self.url
    }

    fn query(&self, selector: &str) -> Result<Vec<Candidate>> {
        let parsed = Selector::parse(selector)
            .map_err(|e| ScrapeError::Element(format!("invalid selector '{}': {:?}", selector, e)))?;

        Ok(self
            .document
            .select(&parsed)
            .map(|element| Candidate::from_attrs(element.value().attrs()))
            .collect())
    }
}
