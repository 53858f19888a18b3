use serde::{Deserialize, Serialize};

/// One extracted product. Immutable once created; the downloader only reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRecord {
    /// Product name, taken from the image `alt` text or a generated
    /// `product_<n>` placeholder.
    pub name: String,

    /// Absolute image URL, resolved against the listing page URL.
    pub image_url: String,

    /// 1-based position among surviving records. Dense: an extraction of N
    /// records carries exactly the indices 1..=N.
    pub index: usize,
}

impl ProductRecord {
    /// Create a new record.
    pub fn new(name: impl Into<String>, image_url: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            image_url: image_url.into(),
            index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = ProductRecord::new("Melon Pan", "https://example.com/a.jpg", 1);

        assert_eq!(record.name, "Melon Pan");
        assert_eq!(record.image_url, "https://example.com/a.jpg");
        assert_eq!(record.index, 1);
    }

    #[test]
    fn test_serialization_round_trip() {
        let record = ProductRecord::new("Onigiri", "https://example.com/b.png", 2);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ProductRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
