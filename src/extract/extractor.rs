use crate::config::ScraperConfig;
use crate::extract::ProductRecord;
use crate::page::{Candidate, PageHandle};
use url::Url;

/// Image-source attributes, tried in priority order. Lazy-loading setups
/// stash the real URL in one of the `data-` variants.
const SOURCE_ATTRIBUTES: [&str; 4] = ["src", "data-src", "data-original", "data-lazy-src"];

/// Declared width or height below this is treated as decoration.
const MIN_IMAGE_DIMENSION: u32 = 50;

/// Extracts product records from a page via a selector cascade.
///
/// The cascade is an ordered list of CSS selectors, most specific first. The
/// first selector yielding a non-empty candidate set wins and later selectors
/// are never consulted: a specific match is trusted over a generic one even
/// if the generic one would match more elements.
pub struct ProductExtractor {
    selectors: Vec<String>,
    filter_noise: bool,
}

impl ProductExtractor {
    /// Create an extractor with an explicit cascade.
    pub fn new(selectors: Vec<String>, filter_noise: bool) -> Self {
        Self {
            selectors,
            filter_noise,
        }
    }

    /// Extractor for the static variant. No noise filtering: a plain HTML
    /// parse rarely carries the width/height attributes the filter keys on.
    pub fn for_static(config: &ScraperConfig) -> Self {
        Self::new(config.static_selectors.clone(), false)
    }

    /// Extractor for the rendered variant, with noise filtering enabled. The
    /// rendered cascade ends in a bare `img` catch-all, so filtering out
    /// icons, logos, and tiny images is what keeps the result usable.
    pub fn for_rendered(config: &ScraperConfig) -> Self {
        Self::new(config.rendered_selectors.clone(), true)
    }

    /// Run the full pipeline: cascade, attribute chain, filters,
    /// normalization.
    ///
    /// Per-element problems (no usable source attribute, unresolvable URL)
    /// drop that element only. Indices are renumbered after filtering, so a
    /// result of N records always carries exactly 1..=N.
    pub fn extract<P: PageHandle>(&self, page: &P) -> Vec<ProductRecord> {
        let candidates = self.select_candidates(page);
        let base = Url::parse(page.base_url()).ok();

        let mut records = Vec::new();
        for (position, candidate) in candidates.iter().enumerate() {
            let position = position + 1;

            let Some(raw_url) = image_source(candidate) else {
                continue;
            };

            if self.filter_noise && is_noise(candidate, raw_url) {
                continue;
            }

            let Some(image_url) = resolve(base.as_ref(), raw_url) else {
                log::debug!("dropping unresolvable image URL: {}", raw_url);
                continue;
            };

            let name = match candidate.attr("alt") {
                Some(alt) if !alt.is_empty() => alt.to_string(),
                _ => format!("product_{}", position),
            };

            let index = records.len() + 1;
            log::info!("  {}. {}: {}", index, name, image_url);
            records.push(ProductRecord::new(name, image_url, index));
        }

        records
    }

    /// Walk the cascade and return the first non-empty candidate set. A
    /// selector that errors (unsupported syntax, dead tab) is skipped, not
    /// fatal.
    fn select_candidates<P: PageHandle>(&self, page: &P) -> Vec<Candidate> {
        for selector in &self.selectors {
            match page.query(selector) {
                Ok(candidates) if !candidates.is_empty() => {
                    log::info!(
                        "selector '{}' matched {} elements",
                        selector,
                        candidates.len()
                    );
                    return candidates;
                }
                Ok(_) => {}
                Err(e) => {
                    log::debug!("selector '{}' failed: {}", selector, e);
                }
            }
        }

        log::warn!("no selector in the cascade matched any elements");
        Vec::new()
    }
}

/// First non-empty source attribute, in chain order.
fn image_source(candidate: &Candidate) -> Option<&str> {
    SOURCE_ATTRIBUTES
        .iter()
        .find_map(|attr| candidate.attr(attr).filter(|value| !value.is_empty()))
}

/// Decorative/navigation noise: data-URIs, icon/logo URLs, and images whose
/// declared size is tiny. A missing or unparseable size keeps the element.
fn is_noise(candidate: &Candidate, url: &str) -> bool {
    if url.starts_with("data:") {
        return true;
    }

    let lowered = url.to_lowercase();
    if lowered.contains("icon") || lowered.contains("logo") {
        return true;
    }

    if let (Some(width), Some(height)) = (candidate.attr("width"), candidate.attr("height")) {
        if !width.is_empty() && !height.is_empty() {
            if let (Ok(width), Ok(height)) = (width.parse::<u32>(), height.parse::<u32>()) {
                if width < MIN_IMAGE_DIMENSION || height < MIN_IMAGE_DIMENSION {
                    return true;
                }
            }
        }
    }

    false
}

/// Resolve a possibly-relative URL against the page URL.
fn resolve(base: Option<&Url>, raw: &str) -> Option<String> {
    if let Ok(absolute) = Url::parse(raw) {
        return Some(String::from(absolute));
    }
    base?.join(raw).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::collections::HashMap;

    /// In-memory page: selector -> candidate list.
    struct FakePage {
        url: String,
        matches: HashMap<String, Vec<Candidate>>,
    }

    impl FakePage {
        fn new(url: &str) -> Self {
            Self {
                url: url.to_string(),
                matches: HashMap::new(),
            }
        }

        fn with(mut self, selector: &str, candidates: Vec<Candidate>) -> Self {
            self.matches.insert(selector.to_string(), candidates);
            self
        }
    }

    impl PageHandle for FakePage {
        fn base_url(&self) -> &str {
            &self.url
        }

        fn query(&self, selector: &str) -> Result<Vec<Candidate>> {
            Ok(self.matches.get(selector).cloned().unwrap_or_default())
        }
    }

    fn img(src: &str, alt: &str) -> Candidate {
        Candidate::from_attrs([("src", src), ("alt", alt)])
    }

    fn extractor(selectors: &[&str], filter_noise: bool) -> ProductExtractor {
        ProductExtractor::new(selectors.iter().map(|s| s.to_string()).collect(), filter_noise)
    }

    #[test]
    fn test_first_matching_selector_wins() {
        let page = FakePage::new("https://example.com/list.html")
            .with("ul.product-list li img", vec![img("/a.jpg", "A")])
            .with("img", vec![img("/a.jpg", "A"), img("/nav.jpg", "Nav")]);

        let records = extractor(&["ul.product-list li img", "img"], false).extract(&page);

        // The generic selector's extra element must not leak into the result
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "A");
    }

    #[test]
    fn test_cascade_falls_through_empty_selectors() {
        let page = FakePage::new("https://example.com/list.html")
            .with("img", vec![img("/a.jpg", "A")]);

        let records =
            extractor(&["ul.product-list li img", "div.goods img", "img"], false).extract(&page);

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_no_selector_matches() {
        let page = FakePage::new("https://example.com/list.html");
        let records = extractor(&["img"], false).extract(&page);

        assert!(records.is_empty());
    }

    #[test]
    fn test_src_beats_data_src() {
        let candidate = Candidate::from_attrs([
            ("src", "/eager.jpg"),
            ("data-src", "/lazy.jpg"),
            ("alt", "A"),
        ]);
        let page =
            FakePage::new("https://example.com/list.html").with("img", vec![candidate]);

        let records = extractor(&["img"], false).extract(&page);
        assert_eq!(records[0].image_url, "https://example.com/eager.jpg");
    }

    #[test]
    fn test_attribute_chain_reaches_lazy_src() {
        let candidate = Candidate::from_attrs([("data-lazy-src", "/lazy.jpg"), ("alt", "A")]);
        let page =
            FakePage::new("https://example.com/list.html").with("img", vec![candidate]);

        let records = extractor(&["img"], false).extract(&page);
        assert_eq!(records[0].image_url, "https://example.com/lazy.jpg");
    }

    #[test]
    fn test_empty_src_falls_through_to_data_src() {
        let candidate =
            Candidate::from_attrs([("src", ""), ("data-src", "/lazy.jpg"), ("alt", "A")]);
        let page =
            FakePage::new("https://example.com/list.html").with("img", vec![candidate]);

        let records = extractor(&["img"], false).extract(&page);
        assert_eq!(records[0].image_url, "https://example.com/lazy.jpg");
    }

    #[test]
    fn test_element_without_source_dropped_silently() {
        let page = FakePage::new("https://example.com/list.html").with(
            "img",
            vec![Candidate::from_attrs([("alt", "no source")]), img("/a.jpg", "A")],
        );

        let records = extractor(&["img"], false).extract(&page);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "A");
        assert_eq!(records[0].index, 1);
    }

    #[test]
    fn test_indices_renumbered_after_filtering() {
        let page = FakePage::new("https://example.com/list.html").with(
            "img",
            vec![
                img("/a.jpg", "A"),
                img("/site-logo.png", "Logo"),
                img("data:image/gif;base64,R0lGOD", "Spacer"),
                img("/b.jpg", "B"),
                img("/c.jpg", "C"),
            ],
        );

        let records = extractor(&["img"], true).extract(&page);

        let indices: Vec<usize> = records.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(records[1].name, "B");
        assert_eq!(records[2].name, "C");
    }

    #[test]
    fn test_noise_filter_drops_icon_and_logo_urls() {
        let page = FakePage::new("https://example.com/list.html").with(
            "img",
            vec![
                img("/assets/favICON.png", "fav"),
                img("/header/LOGO.svg", "brand"),
                img("/goods/item.jpg", "Item"),
            ],
        );

        let records = extractor(&["img"], true).extract(&page);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Item");
    }

    #[test]
    fn test_noise_filter_skipped_for_static_variant() {
        let page = FakePage::new("https://example.com/list.html")
            .with("img", vec![img("/header/logo.png", "brand")]);

        let records = extractor(&["img"], false).extract(&page);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_small_declared_size_dropped() {
        let mut tiny = img("/tracking.gif", "t");
        tiny.set_attr("width", "1");
        tiny.set_attr("height", "1");

        let mut big = img("/item.jpg", "Item");
        big.set_attr("width", "300");
        big.set_attr("height", "300");

        let page =
            FakePage::new("https://example.com/list.html").with("img", vec![tiny, big]);

        let records = extractor(&["img"], true).extract(&page);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Item");
    }

    #[test]
    fn test_unparseable_size_keeps_element() {
        let mut candidate = img("/item.jpg", "Item");
        candidate.set_attr("width", "100%");
        candidate.set_attr("height", "auto");

        let page =
            FakePage::new("https://example.com/list.html").with("img", vec![candidate]);

        let records = extractor(&["img"], true).extract(&page);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_missing_height_keeps_element() {
        let mut candidate = img("/item.jpg", "Item");
        candidate.set_attr("width", "10");

        let page =
            FakePage::new("https://example.com/list.html").with("img", vec![candidate]);

        let records = extractor(&["img"], true).extract(&page);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_relative_urls_resolved_against_page() {
        let page = FakePage::new("https://example.com/goods/list.html").with(
            "img",
            vec![
                img("item.jpg", "Sibling"),
                img("/img/root.jpg", "Rooted"),
                img("https://cdn.example.net/abs.jpg", "Absolute"),
            ],
        );

        let records = extractor(&["img"], false).extract(&page);

        assert_eq!(records[0].image_url, "https://example.com/goods/item.jpg");
        assert_eq!(records[1].image_url, "https://example.com/img/root.jpg");
        assert_eq!(records[2].image_url, "https://cdn.example.net/abs.jpg");
    }

    #[test]
    fn test_placeholder_name_uses_dom_position() {
        let page = FakePage::new("https://example.com/list.html").with(
            "img",
            vec![
                Candidate::from_attrs([("src", "/logo.png")]),
                Candidate::from_attrs([("src", "/b.jpg")]),
            ],
        );

        let records = extractor(&["img"], true).extract(&page);

        // The logo is filtered, so the survivor gets index 1 but keeps its
        // original position in the placeholder name.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].index, 1);
        assert_eq!(records[0].name, "product_2");
    }
}
