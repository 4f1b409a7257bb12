// 🔍 Search criteria - explicit query structure
//
// Raw key/value pairs from the shell enter through `from_pairs`, which is
// the validation boundary: unsupported keys are dropped, value types are
// checked, and a query that filters down to nothing is rejected.

use serde_json::Value;

use crate::book::Book;
use crate::error::CatalogError;

/// The closed set of recognized filter keys.
pub const ALLOWED_KEYS: [&str; 3] = ["title", "author", "year"];

/// Conjunction of exact-equality filters over book fields.
///
/// An empty criteria set matches nothing (the catalog returns an empty
/// result rather than everything).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none()
    }

    /// Build criteria from raw key/value pairs.
    ///
    /// Keys outside [`ALLOWED_KEYS`] are silently dropped. Fails with
    /// [`CatalogError::InvalidQuery`] when a recognized value has the wrong
    /// type, or when dropping leaves nothing of a non-empty request.
    pub fn from_pairs(pairs: &[(String, Value)]) -> Result<Self, CatalogError> {
        let mut criteria = SearchCriteria::new();
        let mut recognized = 0usize;

        for (key, value) in pairs {
            match key.as_str() {
                "title" => {
                    criteria.title = Some(expect_text("title", value)?);
                    recognized += 1;
                }
                "author" => {
                    criteria.author = Some(expect_text("author", value)?);
                    recognized += 1;
                }
                "year" => {
                    criteria.year = Some(expect_year(value)?);
                    recognized += 1;
                }
                other => {
                    tracing::debug!(key = other, "dropping unsupported search key");
                }
            }
        }

        if recognized == 0 && !pairs.is_empty() {
            return Err(CatalogError::InvalidQuery(format!(
                "allowed search keys: {}",
                ALLOWED_KEYS.join(", ")
            )));
        }

        Ok(criteria)
    }

    /// True when every supplied criterion equals the book's field exactly.
    pub(crate) fn matches(&self, book: &Book) -> bool {
        self.title.as_deref().is_none_or(|t| book.title() == t)
            && self.author.as_deref().is_none_or(|a| book.author() == a)
            && self.year.is_none_or(|y| book.year() == y)
    }
}

fn expect_text(key: &str, value: &Value) -> Result<String, CatalogError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CatalogError::InvalidQuery(format!("{key} must be a string")))
}

fn expect_year(value: &Value) -> Result<i32, CatalogError> {
    value
        .as_i64()
        .and_then(|y| i32::try_from(y).ok())
        .ok_or_else(|| CatalogError::InvalidQuery("year must be an integer".to_string()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pair(key: &str, value: Value) -> (String, Value) {
        (key.to_string(), value)
    }

    #[test]
    fn test_builder() {
        let criteria = SearchCriteria::new().author("G. Orwell").year(1949);

        assert_eq!(criteria.author.as_deref(), Some("G. Orwell"));
        assert_eq!(criteria.year, Some(1949));
        assert!(criteria.title.is_none());
        assert!(!criteria.is_empty());
        assert!(SearchCriteria::new().is_empty());
    }

    #[test]
    fn test_from_pairs_recognized_keys() {
        let pairs = vec![
            pair("title", json!("1984")),
            pair("year", json!(1949)),
        ];
        let criteria = SearchCriteria::from_pairs(&pairs).unwrap();

        assert_eq!(criteria.title.as_deref(), Some("1984"));
        assert_eq!(criteria.year, Some(1949));
        assert!(criteria.author.is_none());
    }

    #[test]
    fn test_from_pairs_drops_unknown_keys() {
        let pairs = vec![
            pair("author", json!("G. Orwell")),
            pair("publisher", json!("Secker & Warburg")),
        ];
        let criteria = SearchCriteria::from_pairs(&pairs).unwrap();

        assert_eq!(criteria.author.as_deref(), Some("G. Orwell"));
        assert!(criteria.title.is_none());
        assert!(criteria.year.is_none());
    }

    #[test]
    fn test_from_pairs_all_unknown_fails() {
        let pairs = vec![pair("publisher", json!("Secker & Warburg"))];
        let result = SearchCriteria::from_pairs(&pairs);

        match result {
            Err(CatalogError::InvalidQuery(message)) => {
                // The failure names the allowed keys
                assert!(message.contains("title"));
                assert!(message.contains("author"));
                assert!(message.contains("year"));
            }
            other => panic!("expected InvalidQuery, got {other:?}"),
        }
    }

    #[test]
    fn test_from_pairs_empty_is_ok() {
        let criteria = SearchCriteria::from_pairs(&[]).unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_from_pairs_mistyped_values() {
        let result = SearchCriteria::from_pairs(&[pair("year", json!("1949"))]);
        assert!(matches!(result, Err(CatalogError::InvalidQuery(_))));

        let result = SearchCriteria::from_pairs(&[pair("title", json!(1984))]);
        assert!(matches!(result, Err(CatalogError::InvalidQuery(_))));

        let result = SearchCriteria::from_pairs(&[pair("year", json!(1949.5))]);
        assert!(matches!(result, Err(CatalogError::InvalidQuery(_))));
    }

    #[test]
    fn test_from_pairs_year_out_of_range() {
        let result = SearchCriteria::from_pairs(&[pair("year", json!(i64::MAX))]);
        assert!(matches!(result, Err(CatalogError::InvalidQuery(_))));
    }

    #[test]
    fn test_matches_is_exact_conjunction() {
        let book = Book::new("1984".to_string(), "G. Orwell".to_string(), 1949).unwrap();

        assert!(SearchCriteria::new().title("1984").matches(&book));
        assert!(SearchCriteria::new()
            .author("G. Orwell")
            .year(1949)
            .matches(&book));

        // No substring or case-insensitive matching
        assert!(!SearchCriteria::new().title("198").matches(&book));
        assert!(!SearchCriteria::new().author("g. orwell").matches(&book));

        // One mismatched criterion fails the whole conjunction
        assert!(!SearchCriteria::new()
            .author("G. Orwell")
            .year(1950)
            .matches(&book));
    }
}
