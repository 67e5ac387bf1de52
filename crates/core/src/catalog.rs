//! Series and book catalog.
//!
//! The catalog is reference data: it is loaded once at process start from a
//! TOML table, validated, and shared read-only (`Arc<Catalog>`) for the rest
//! of the process lifetime.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Catalog shipped with the crate, used when no catalog file is configured.
const BUILTIN_CATALOG: &str = include_str!("../catalog/builtin.toml");

// ---------------------------------------------------------------------------
// Ordinal
// ---------------------------------------------------------------------------

/// A book's position within its series.
///
/// Fractional values place novellas between main books (e.g. `5.5` sits
/// between books 5 and 6). Always finite and non-negative, so the ordering
/// is total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Ordinal(f64);

impl Ordinal {
    pub fn new(value: f64) -> Result<Self, CoreError> {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::InvalidArgument(format!(
                "Book ordinal must be a finite, non-negative number, got {value}"
            )));
        }
        // Collapse -0.0 so equality and hashing agree.
        Ok(Self(if value == 0.0 { 0.0 } else { value }))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Ordinal {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ordinal> for f64 {
    fn from(ordinal: Ordinal) -> Self {
        ordinal.0
    }
}

impl FromStr for Ordinal {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.trim().parse().map_err(|_| {
            CoreError::InvalidArgument(format!("Invalid book ordinal '{s}'"))
        })?;
        Self::new(value)
    }
}

impl PartialEq for Ordinal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ordinal {}

impl PartialOrd for Ordinal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ordinal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Ordinal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Books and series
// ---------------------------------------------------------------------------

/// A single book in a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub ordinal: Ordinal,
    pub title: String,
    /// Always at least 1 for catalog-loaded books.
    pub chapter_count: u32,
}

/// A named series with its books sorted by ordinal.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    books: Vec<Book>,
}

impl Series {
    /// Books in ascending ordinal order. Never empty.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// The lowest-ordinal book; where every reader starts.
    pub fn first_book(&self) -> &Book {
        // Validation guarantees at least one book per series.
        &self.books[0]
    }

    pub fn book(&self, ordinal: Ordinal) -> Option<&Book> {
        self.books
            .binary_search_by(|b| b.ordinal.cmp(&ordinal))
            .ok()
            .map(|idx| &self.books[idx])
    }

    /// Like [`Series::book`], but an unknown ordinal is an `InvalidArgument`.
    pub fn require_book(&self, ordinal: Ordinal) -> Result<&Book, CoreError> {
        self.book(ordinal).ok_or_else(|| {
            CoreError::InvalidArgument(format!(
                "Book {ordinal} does not exist in series '{}'",
                self.name
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Errors raised while loading a catalog. Only ever seen at startup.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    series: Vec<SeriesEntry>,
}

#[derive(Debug, Deserialize)]
struct SeriesEntry {
    name: String,
    #[serde(default)]
    books: Vec<BookEntry>,
}

#[derive(Debug, Deserialize)]
struct BookEntry {
    ordinal: f64,
    title: String,
    chapters: u32,
}

/// The validated, read-only series catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    series: Vec<Series>,
}

impl Catalog {
    /// The catalog embedded in this crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Read and validate a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Self::validate(file)
    }

    fn validate(file: CatalogFile) -> Result<Self, CatalogError> {
        if file.series.is_empty() {
            return Err(CatalogError::Invalid(
                "Catalog must declare at least one series".to_string(),
            ));
        }

        let mut series = Vec::with_capacity(file.series.len());
        for entry in file.series {
            let name = entry.name.trim().to_string();
            if name.is_empty() {
                return Err(CatalogError::Invalid("Series name must not be empty".to_string()));
            }
            if series.iter().any(|s: &Series| s.name == name) {
                return Err(CatalogError::Invalid(format!("Duplicate series '{name}'")));
            }
            if entry.books.is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "Series '{name}' must contain at least one book"
                )));
            }

            let mut books = Vec::with_capacity(entry.books.len());
            for book in entry.books {
                let ordinal = Ordinal::new(book.ordinal).map_err(|e| {
                    CatalogError::Invalid(format!("Series '{name}': {e}"))
                })?;
                let title = book.title.trim().to_string();
                if title.is_empty() {
                    return Err(CatalogError::Invalid(format!(
                        "Series '{name}': book {ordinal} has an empty title"
                    )));
                }
                if book.chapters < 1 {
                    return Err(CatalogError::Invalid(format!(
                        "Series '{name}': book {ordinal} must have at least one chapter"
                    )));
                }
                books.push(Book {
                    ordinal,
                    title,
                    chapter_count: book.chapters,
                });
            }

            books.sort_by_key(|b| b.ordinal);
            if let Some(pair) = books.windows(2).find(|w| w[0].ordinal == w[1].ordinal) {
                return Err(CatalogError::Invalid(format!(
                    "Series '{name}': duplicate book ordinal {}",
                    pair[0].ordinal
                )));
            }

            series.push(Series { name, books });
        }

        Ok(Self { series })
    }

    /// All series in declaration order.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn find_series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Like [`Catalog::find_series`], but an unknown name is an `InvalidArgument`.
    pub fn require_series(&self, name: &str) -> Result<&Series, CoreError> {
        self.find_series(name)
            .ok_or_else(|| CoreError::InvalidArgument(format!("Unknown series '{name}'")))
    }

    /// Look up a book, treating any unknown series or ordinal as absent.
    pub fn find_book(&self, series: &str, ordinal: Ordinal) -> Option<&Book> {
        self.find_series(series).and_then(|s| s.book(ordinal))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
