use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::page::{Candidate, PageHandle};
use headless_chrome::{Browser, Tab};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Rendered page source: drives a headless Chrome instance so client-side
/// injected content is visible to the extractor.
pub struct RenderedPageSource {
    user_agent: String,
    headless: bool,
    settle_delay: Duration,
    ready_timeout: Duration,
}

impl RenderedPageSource {
    /// Build a source from `config`. The browser itself is launched per
    /// fetch, not here, so a failed launch surfaces on `fetch`.
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            headless: config.headless,
            settle_delay: config.settle_delay,
            ready_timeout: config.ready_timeout,
        }
    }

    /// Launch a browser, navigate to `url`, and wait for the document to
    /// report ready.
    ///
    /// The returned [`RenderedPage`] owns the browser; dropping it tears the
    /// Chrome process down on every exit path, including when extraction or
    /// downloading fails partway.
    pub fn fetch(&self, url: &str) -> Result<RenderedPage> {
        log::info!("launching browser");

        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Prevent detection by anti-bot services
        launch_opts
            .ignore_default_args
            .push(OsStr::new("--enable-automation"));
        launch_opts
            .args
            .push(OsStr::new("--disable-blink-features=AutomationControlled"));

        launch_opts.headless = self.headless;
        launch_opts.window_size = Some((1920, 1080));

        let browser =
            Browser::new(launch_opts).map_err(|e| ScrapeError::Launch(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::Launch(format!("failed to create tab: {}", e)))?;

        tab.set_user_agent(&self.user_agent, Some("ja,en-US;q=0.9,en;q=0.8"), None)
            .map_err(|e| ScrapeError::Launch(format!("failed to set user agent: {}", e)))?;

        log::info!("fetching page: {}", url);

        tab.navigate_to(url)
            .map_err(|e| ScrapeError::Fetch(format!("failed to navigate to {}: {}", url, e)))?;
        tab.wait_until_navigated()
            .map_err(|e| ScrapeError::Fetch(format!("navigation to {} timed out: {}", url, e)))?;

        // Let late-loading content settle before polling readiness
        std::thread::sleep(self.settle_delay);
        self.wait_for_ready(&tab)?;

        Ok(RenderedPage {
            tab,
            url: url.to_string(),
            _browser: browser,
        })
    }

    /// Poll `document.readyState` until the page reports complete or the
    /// readiness timeout expires.
    fn wait_for_ready(&self, tab: &Arc<Tab>) -> Result<()> {
        let deadline = Instant::now() + self.ready_timeout;

        loop {
            let ready = tab
                .evaluate("document.readyState === 'complete'", false)
                .ok()
                .and_then(|remote| remote.value)
                .and_then(|value| value.as_bool())
                .unwrap_or(false);

            if ready {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ScrapeError::RenderTimeout(self.ready_timeout));
            }

            std::thread::sleep(Duration::from_millis(250));
        }
    }
}

/// A live rendered page. Owns the browser process for its lifetime.
pub struct RenderedPage {
    tab: Arc<Tab>,
    url: String,

    /// Keeps the Chrome process alive while the page is queried; killed when
    /// the page is dropped.
    _browser: Browser,
}

impl PageHandle for RenderedPage {
    fn base_url(&self) -> &str {
        &self.url
    }

    fn query(&self, selector: &str) -> Result<Vec<Candidate>> {
        let elements = self
            .tab
            .find_elements(selector)
            .map_err(|e| ScrapeError::Element(format!("query '{}' failed: {}", selector, e)))?;

        let mut candidates = Vec::with_capacity(elements.len());
        for element in &elements {
            // A single uninspectable element is dropped, not fatal
            match element.get_attributes() {
                Ok(attrs) => {
                    let mut candidate = Candidate::new();
                    for pair in attrs.unwrap_or_default().chunks(2) {
                        if let [name, value] = pair {
                            candidate.set_attr(name, value);
                        }
                    }
                    candidates.push(candidate);
                }
                Err(e) => {
                    log::debug!("skipping element in '{}': {}", selector, e);
                }
            }
        }

        Ok(candidates)
    }
}
