// Book Catalog - Core Library
// Exposes the catalog core for the interactive shell and tests

pub mod book;
pub mod catalog;
pub mod error;
pub mod search;

// Re-export commonly used types
pub use book::{Availability, Book, BookRecord};
pub use catalog::Catalog;
pub use error::CatalogError;
pub use search::{SearchCriteria, ALLOWED_KEYS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
