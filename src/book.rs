// 📖 Book Entity - Stable identity + value fields
//
// "Title/author/year are VALUES, the book UUID is IDENTITY (never changes)"
//
// Identity is assigned at construction and is the sole equality and lookup
// key: two books with identical fields are still distinct entities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

// ============================================================================
// AVAILABILITY
// ============================================================================

/// Two-valued circulation state of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "Available")]
    Available,

    #[serde(rename = "Checked-out")]
    CheckedOut,
}

impl Availability {
    /// Canonical label, also the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::CheckedOut => "Checked-out",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = CatalogError;

    /// Case-insensitive match against the allowed labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(Availability::Available),
            "checked-out" => Ok(Availability::CheckedOut),
            _ => Err(CatalogError::InvalidStatus(s.to_string())),
        }
    }
}

// ============================================================================
// EXTERNAL FORM
// ============================================================================

/// Serializable form of a book: the persistence-file record shape.
///
/// Unlike [`Book`], equality here covers every field, which makes it the type
/// to use when tests compare books by content rather than identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub status: Availability,
}

// ============================================================================
// BOOK ENTITY
// ============================================================================

/// One catalog entry.
///
/// Fields are private: identity is immutable for the book's lifetime, and
/// availability changes only through [`Catalog::update_status`].
///
/// [`Catalog::update_status`]: crate::catalog::Catalog::update_status
#[derive(Debug, Clone)]
pub struct Book {
    /// Stable identity (UUID) - NEVER changes
    id: String,
    title: String,
    author: String,
    year: i32,
    status: Availability,
}

impl Book {
    /// Create a new book with a fresh UUID and `Available` status.
    ///
    /// Fields are stored verbatim; callers handle their own whitespace.
    /// Fails with [`CatalogError::Validation`] on an empty title, an empty
    /// author, or a zero year (there is no year 0 in the numbering that
    /// publication years use; negative years are legal).
    pub fn new(title: String, author: String, year: i32) -> Result<Self, CatalogError> {
        Self::validate_fields(&title, &author, year)?;

        Ok(Book {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            author,
            year,
            status: Availability::Available,
        })
    }

    /// Rebuild a book from its external form, preserving the original
    /// identity and status.
    ///
    /// This is the one path where identity is caller-supplied; it exists for
    /// the persistence round-trip and still applies full field validation.
    pub fn from_record(record: BookRecord) -> Result<Self, CatalogError> {
        Self::validate_fields(&record.title, &record.author, record.year)?;

        if record.id.is_empty() {
            return Err(CatalogError::Validation(
                "id must be non-empty".to_string(),
            ));
        }

        Ok(Book {
            id: record.id,
            title: record.title,
            author: record.author,
            year: record.year,
            status: record.status,
        })
    }

    fn validate_fields(title: &str, author: &str, year: i32) -> Result<(), CatalogError> {
        if title.is_empty() {
            return Err(CatalogError::Validation(
                "title must be non-empty".to_string(),
            ));
        }
        if author.is_empty() {
            return Err(CatalogError::Validation(
                "author must be non-empty".to_string(),
            ));
        }
        if year == 0 {
            return Err(CatalogError::Validation(
                "year must be a non-zero integer".to_string(),
            ));
        }
        Ok(())
    }

    /// External form with keys `id, title, author, year, status`.
    pub fn to_record(&self) -> BookRecord {
        BookRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year,
            status: self.status,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn status(&self) -> Availability {
        self.status
    }

    // Only the catalog's status-update operation mutates availability.
    pub(crate) fn set_status(&mut self, status: Availability) {
        self.status = status;
    }
}

/// Books compare by identity only; field values are irrelevant.
impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Book {}

impl std::hash::Hash for Book {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Author: {}, Year: {}, Status: {}",
            self.id, self.title, self.author, self.year, self.status
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn orwell() -> Book {
        Book::new("1984".to_string(), "G. Orwell".to_string(), 1949).unwrap()
    }

    #[test]
    fn test_book_creation() {
        let book = orwell();

        assert!(!book.id().is_empty());
        assert_eq!(book.title(), "1984");
        assert_eq!(book.author(), "G. Orwell");
        assert_eq!(book.year(), 1949);
        assert_eq!(book.status(), Availability::Available);
    }

    #[test]
    fn test_empty_title_rejected() {
        let result = Book::new(String::new(), "G. Orwell".to_string(), 1949);
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_empty_author_rejected() {
        let result = Book::new("1984".to_string(), String::new(), 1949);
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_zero_year_rejected() {
        let result = Book::new("1984".to_string(), "G. Orwell".to_string(), 0);
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_negative_year_allowed() {
        // BCE publication years stay legal, only 0 is out.
        let book = Book::new("Odyssey".to_string(), "Homer".to_string(), -700).unwrap();
        assert_eq!(book.year(), -700);
    }

    #[test]
    fn test_fields_stored_verbatim() {
        let book = Book::new("  1984 ".to_string(), " G. Orwell".to_string(), 1949).unwrap();
        assert_eq!(book.title(), "  1984 ");
        assert_eq!(book.author(), " G. Orwell");
    }

    #[test]
    fn test_equality_is_identity_only() {
        let a = orwell();
        let b = orwell();

        // Identical fields, distinct identities
        assert_ne!(a, b);

        // A clone shares identity, so it stays equal even after its
        // values diverge
        let mut c = a.clone();
        assert_eq!(a, c);
        c.set_status(Availability::CheckedOut);
        assert_eq!(a, c);
    }

    #[test]
    fn test_display_format() {
        let book = orwell();
        let line = book.to_string();

        assert!(line.starts_with(&format!("ID: {}", book.id())));
        assert!(line.contains("Title: 1984"));
        assert!(line.contains("Author: G. Orwell"));
        assert!(line.contains("Year: 1949"));
        assert!(line.ends_with("Status: Available"));
    }

    #[test]
    fn test_status_parsing_case_insensitive() {
        assert_eq!(
            "available".parse::<Availability>().unwrap(),
            Availability::Available
        );
        assert_eq!(
            "CHECKED-OUT".parse::<Availability>().unwrap(),
            Availability::CheckedOut
        );
        assert_eq!(
            "Checked-Out".parse::<Availability>().unwrap(),
            Availability::CheckedOut
        );

        let result = "lost".parse::<Availability>();
        assert!(matches!(result, Err(CatalogError::InvalidStatus(_))));
    }

    #[test]
    fn test_record_round_trip_preserves_identity_and_status() {
        let mut book = orwell();
        book.set_status(Availability::CheckedOut);

        let record = book.to_record();
        assert_eq!(record.id, book.id());
        assert_eq!(record.status, Availability::CheckedOut);

        let rebuilt = Book::from_record(record).unwrap();
        assert_eq!(rebuilt, book);
        assert_eq!(rebuilt.id(), book.id());
        assert_eq!(rebuilt.status(), Availability::CheckedOut);
    }

    #[test]
    fn test_record_with_bad_fields_rejected() {
        let record = BookRecord {
            id: "some-id".to_string(),
            title: String::new(),
            author: "G. Orwell".to_string(),
            year: 1949,
            status: Availability::Available,
        };
        assert!(matches!(
            Book::from_record(record),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_status_serialized_as_canonical_label() {
        let json = serde_json::to_string(&Availability::CheckedOut).unwrap();
        assert_eq!(json, "\"Checked-out\"");

        let parsed: Availability = serde_json::from_str("\"Available\"").unwrap();
        assert_eq!(parsed, Availability::Available);
    }
}
