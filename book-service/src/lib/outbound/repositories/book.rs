use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::book::models::Book;
use crate::domain::book::ports::BookRepository;

/// Failure to read the book dataset.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Failed to open book data: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed book data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: price {value:?} is not a number")]
    InvalidPrice { row: usize, value: String },
}

/// Raw CSV row as written by the scraper.
#[derive(Debug, Deserialize)]
struct BookRow {
    title: String,
    price: String,
    rating: u8,
    availability: u32,
    category: String,
    image_url: String,
}

/// Book records held in memory for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct InMemoryBookRepository {
    books: Arc<[Book]>,
}

impl InMemoryBookRepository {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: books.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Load the dataset from a CSV file.
    ///
    /// A missing file yields an empty repository so the server can still
    /// start and report the data as unavailable.
    ///
    /// # Errors
    /// * `Io` - The file exists but cannot be read
    /// * `Csv` - A row does not match the expected columns
    /// * `InvalidPrice` - A price has no numeric value
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(
                    path = %path.display(),
                    "Book data file not found; data and ML endpoints will be unavailable"
                );
                return Ok(Self::empty());
            }
            Err(e) => return Err(e.into()),
        };

        let repository = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            books = repository.books.len(),
            "Book data loaded"
        );

        Ok(repository)
    }

    /// Parse CSV records, numbering them from zero and deriving numeric prices.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogLoadError> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let books = csv_reader
            .deserialize::<BookRow>()
            .enumerate()
            .map(|(index, row)| -> Result<Book, CatalogLoadError> {
                let row = row?;
                let price_numeric =
                    Book::parse_price(&row.price).ok_or_else(|| CatalogLoadError::InvalidPrice {
                        row: index,
                        value: row.price.clone(),
                    })?;

                Ok(Book {
                    id: index as u32,
                    title: row.title,
                    price: row.price,
                    rating: row.rating,
                    availability: row.availability,
                    category: row.category,
                    image_url: row.image_url,
                    price_numeric,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(books))
    }
}

impl BookRepository for InMemoryBookRepository {
    fn list_all(&self) -> Arc<[Book]> {
        Arc::clone(&self.books)
    }
}
