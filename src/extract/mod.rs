//! Product extraction
//!
//! Turns a queryable page into an ordered list of product records by running
//! a selector cascade, an image-source attribute chain, optional noise
//! filters, and URL/name normalization.

pub mod extractor;
pub mod product;

pub use extractor::ProductExtractor;
pub use product::ProductRecord;
