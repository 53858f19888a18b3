//! Page source providers
//!
//! A page source turns a URL into a queryable page handle. Two variants
//! exist:
//! - [`StaticPageSource`]: single HTTP GET, parsed HTML tree, no JavaScript.
//! - [`RenderedPageSource`]: headless Chrome, live DOM after scripts ran.
//!
//! The extractor only depends on [`PageHandle`], so tests can substitute an
//! in-memory fake.

pub mod rendered;
pub mod static_page;

pub use rendered::{RenderedPage, RenderedPageSource};
pub use static_page::{StaticPage, StaticPageSource};

use crate::error::Result;
use std::collections::HashMap;

/// A queryable page, valid for one extraction pass.
pub trait PageHandle {
    /// URL the page was loaded from; relative image references are resolved
    /// against it.
    fn base_url(&self) -> &str;

    /// All elements matching a CSS selector, in document order.
    fn query(&self, selector: &str) -> Result<Vec<Candidate>>;
}

/// Attribute snapshot of one candidate element.
///
/// Captured eagerly during [`PageHandle::query`] so the extractor never holds
/// borrows into the underlying HTML tree or browser tab.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    attributes: HashMap<String, String>,
}

impl Candidate {
    /// Create an empty candidate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a candidate from attribute name/value pairs.
    pub fn from_attrs<I, K, V>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            attributes: attrs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Add a single attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }
}
