use std::sync::Arc;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookFeatures;
use crate::domain::book::models::CategoryStats;
use crate::domain::book::models::Limit;
use crate::domain::book::models::OverviewStats;
use crate::domain::book::models::PriceRange;
use crate::domain::book::models::SearchQuery;
use crate::domain::book::models::TrainingRecord;

/// Port for catalog query operations.
///
/// Every operation fails with `DataUnavailable` while the catalog is empty.
pub trait BookServicePort: Send + Sync + 'static {
    /// Number of books currently loaded.
    fn books_count(&self) -> usize;

    /// All books in id order.
    fn list_books(&self) -> Result<Vec<Book>, BookError>;

    /// Retrieve a book by identifier.
    ///
    /// # Errors
    /// * `NotFound` - No book with this id
    fn get_book(&self, id: i64) -> Result<Book, BookError>;

    /// Books matching title and/or category.
    ///
    /// # Errors
    /// * `NoMatches` - Nothing matched
    fn search_books(&self, query: &SearchQuery) -> Result<Vec<Book>, BookError>;

    /// First `limit` books rated 5, in id order.
    fn top_rated_books(&self, limit: Limit) -> Result<Vec<Book>, BookError>;

    /// Books priced within `range`, bounds included.
    ///
    /// # Errors
    /// * `NoBooksInPriceRange` - Nothing in range
    fn books_in_price_range(&self, range: PriceRange) -> Result<Vec<Book>, BookError>;

    /// Distinct categories in order of first appearance.
    fn list_categories(&self) -> Result<Vec<String>, BookError>;

    /// Totals, mean price and rating distribution.
    fn overview_stats(&self) -> Result<OverviewStats, BookError>;

    /// Count and mean price per category, in category order.
    fn category_stats(&self) -> Result<Vec<CategoryStats>, BookError>;

    /// Price and one-hot category features of one book.
    ///
    /// # Errors
    /// * `NotFound` - No book with this id
    fn book_features(&self, id: i64) -> Result<BookFeatures, BookError>;

    /// Feature records with their rating for the first `limit` books.
    fn training_data(&self, limit: Limit) -> Result<Vec<TrainingRecord>, BookError>;
}

/// Read access to the loaded book records.
pub trait BookRepository: Send + Sync + 'static {
    /// Every record, in id order. Empty when no data was loaded.
    fn list_all(&self) -> Arc<[Book]>;
}
