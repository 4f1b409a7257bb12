// 📚 Catalog - the in-memory book collection
//
// A map keyed by book identity is the single source of truth for "does this
// book exist". Insertion order is not significant; the shell sorts rows for
// display. Mutation happens through add/remove/update_status only, and
// persistence is explicit: nothing auto-saves.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::book::{Book, BookRecord};
use crate::error::CatalogError;
use crate::search::SearchCriteria;

/// In-memory mapping from book identity to [`Book`], with JSON-file
/// import/export.
///
/// Single-threaded by design: callers that need concurrent access must
/// serialize it themselves.
#[derive(Debug, Default)]
pub struct Catalog {
    books: HashMap<String, Book>,
    backing_path: Option<PathBuf>,
}

impl Catalog {
    /// Empty catalog with no backing file.
    pub fn new() -> Self {
        Catalog {
            books: HashMap::new(),
            backing_path: None,
        }
    }

    /// Catalog backed by a JSON file, eagerly loaded.
    ///
    /// A missing or empty file is not an error: the catalog starts empty and
    /// the path is kept for later [`save`](Catalog::save) calls.
    pub fn with_file(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let mut catalog = Catalog {
            books: HashMap::new(),
            backing_path: Some(path.clone()),
        };
        catalog.import_from_file(&path)?;
        Ok(catalog)
    }

    pub fn backing_path(&self) -> Option<&Path> {
        self.backing_path.as_deref()
    }

    /// Construct a book and insert it under its fresh identity.
    ///
    /// Validation failures propagate unchanged. There is no de-duplication:
    /// adding the "same" title/author/year twice yields two entries.
    pub fn add(&mut self, title: String, author: String, year: i32) -> Result<&Book, CatalogError> {
        let book = Book::new(title, author, year)?;
        let id = book.id().to_string();
        let total = self.books.len() + 1;

        // Identity is a fresh UUID, so the slot is always vacant
        let book = self.books.entry(id).or_insert(book);
        info!(id = %book.id(), title = %book.title(), total, "added book");
        Ok(&*book)
    }

    /// Delete the book with the given identity, returning it.
    pub fn remove(&mut self, id: &str) -> Result<Book, CatalogError> {
        match self.books.remove(id) {
            Some(book) => {
                info!(id, "removed book");
                Ok(book)
            }
            None => Err(CatalogError::NotFound(id.to_string())),
        }
    }

    /// Pure lookup by identity; absent books are not an error.
    pub fn find_by_id(&self, id: &str) -> Option<&Book> {
        self.books.get(id)
    }

    /// All books matching every supplied criterion exactly.
    ///
    /// An empty catalog and an empty criteria set both give an empty result
    /// without raising; so does a query that simply matches nothing.
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<&Book> {
        if self.books.is_empty() {
            warn!("search on an empty catalog");
            return Vec::new();
        }
        if criteria.is_empty() {
            warn!("search with no criteria");
            return Vec::new();
        }

        let matches: Vec<&Book> = self
            .books
            .values()
            .filter(|book| criteria.matches(book))
            .collect();

        if matches.is_empty() {
            warn!(?criteria, "no books matched");
        } else {
            info!(count = matches.len(), "search matched");
        }
        matches
    }

    /// Set a book's availability from a textual label.
    ///
    /// The label is matched case-insensitively against
    /// {"available", "checked-out"}; the label check runs before the id
    /// lookup, so a bad label on a missing id reports
    /// [`CatalogError::InvalidStatus`].
    pub fn update_status(&mut self, id: &str, new_status: &str) -> Result<(), CatalogError> {
        let status = new_status.parse()?;

        let book = self
            .books
            .get_mut(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        book.set_status(status);

        info!(id, status = %status, "updated book status");
        Ok(())
    }

    /// Listing accessor for display renderers.
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    /// Write every book's external form to `path` as pretty-printed UTF-8
    /// JSON, overwriting any existing file.
    pub fn export_to_file(&self, path: &Path) -> Result<(), CatalogError> {
        let records: Vec<BookRecord> = self.books.values().map(Book::to_record).collect();

        let payload =
            serde_json::to_string_pretty(&records).map_err(|e| CatalogError::Persistence {
                message: format!("failed to serialize catalog: {e}"),
                source: None,
            })?;
        fs::write(path, payload).map_err(|e| CatalogError::io("write", path, e))?;

        info!(path = %path.display(), count = records.len(), "catalog exported");
        Ok(())
    }

    /// Merge the records in `path` into the catalog, keyed by the identities
    /// stored in the file.
    ///
    /// Lenient policy: a missing or empty file leaves the catalog unchanged
    /// with a warning. Content that is not a JSON array of well-formed
    /// records fails with [`CatalogError::Format`]; other I/O failures with
    /// [`CatalogError::Persistence`].
    pub fn import_from_file(&mut self, path: &Path) -> Result<(), CatalogError> {
        let payload = match fs::read_to_string(path) {
            Ok(payload) => payload,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "catalog file does not exist, nothing to import");
                return Ok(());
            }
            Err(e) => return Err(CatalogError::io("read", path, e)),
        };

        if payload.trim().is_empty() {
            warn!(path = %path.display(), "catalog file is empty, nothing to import");
            return Ok(());
        }

        let records: Vec<BookRecord> = serde_json::from_str(&payload)
            .map_err(|e| CatalogError::format(path, e.to_string()))?;

        let count = records.len();
        for record in records {
            // Identity and status come from the file, not a fresh UUID
            let book =
                Book::from_record(record).map_err(|e| CatalogError::format(path, e.to_string()))?;
            self.books.insert(book.id().to_string(), book);
        }

        info!(path = %path.display(), count, "catalog imported");
        Ok(())
    }

    /// Export to the configured backing file.
    pub fn save(&self) -> Result<(), CatalogError> {
        let path = self.require_backing_path()?.to_path_buf();
        self.export_to_file(&path)
    }

    /// Re-import the configured backing file.
    pub fn load(&mut self) -> Result<(), CatalogError> {
        let path = self.require_backing_path()?.to_path_buf();
        self.import_from_file(&path)
    }

    fn require_backing_path(&self) -> Result<&Path, CatalogError> {
        self.backing_path
            .as_deref()
            .ok_or_else(|| CatalogError::Persistence {
                message: "no backing file configured for this catalog".to_string(),
                source: None,
            })
    }
}

// ============================================================================
// TESTS
// ============================================================================
