use std::collections::BTreeMap;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::round2;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookFeatures;
use crate::domain::book::models::CategoryColumns;
use crate::domain::book::models::CategoryStats;
use crate::domain::book::models::Limit;
use crate::domain::book::models::OverviewStats;
use crate::domain::book::models::PriceRange;
use crate::domain::book::models::RatingCount;
use crate::domain::book::models::SearchQuery;
use crate::domain::book::models::TrainingRecord;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::ports::BookServicePort;

const TOP_RATING: u8 = 5;

/// Domain service implementation for catalog queries.
///
/// Concrete implementation of BookServicePort with dependency injection.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
    // One-hot columns over the catalog as loaded; the catalog never changes.
    category_columns: CategoryColumns,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    /// Create a new book service over a repository.
    pub fn new(repository: Arc<BR>) -> Self {
        let category_columns = CategoryColumns::from_books(&repository.list_all());

        Self {
            repository,
            category_columns,
        }
    }

    fn loaded_books(&self) -> Result<Arc<[Book]>, BookError> {
        let books = self.repository.list_all();
        if books.is_empty() {
            return Err(BookError::DataUnavailable);
        }
        Ok(books)
    }
}

fn find_book(books: &[Book], id: i64) -> Result<&Book, BookError> {
    books
        .iter()
        .find(|book| i64::from(book.id) == id)
        .ok_or(BookError::NotFound(id))
}

fn features_of(columns: &CategoryColumns, book: &Book) -> BookFeatures {
    BookFeatures {
        id: book.id,
        price_numeric: book.price_numeric,
        category_features: columns.encode(&book.category),
    }
}

impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    fn books_count(&self) -> usize {
        self.repository.list_all().len()
    }

    fn list_books(&self) -> Result<Vec<Book>, BookError> {
        Ok(self.loaded_books()?.to_vec())
    }

    fn get_book(&self, id: i64) -> Result<Book, BookError> {
        let books = self.loaded_books()?;
        find_book(&books, id).cloned()
    }

    fn search_books(&self, query: &SearchQuery) -> Result<Vec<Book>, BookError> {
        let books = self.loaded_books()?;

        let matches: Vec<Book> = books
            .iter()
            .filter(|book| query.matches(book))
            .cloned()
            .collect();

        if matches.is_empty() {
            return Err(BookError::NoMatches);
        }

        Ok(matches)
    }

    fn top_rated_books(&self, limit: Limit) -> Result<Vec<Book>, BookError> {
        let books = self.loaded_books()?;

        Ok(books
            .iter()
            .filter(|book| book.rating == TOP_RATING)
            .take(limit.get())
            .cloned()
            .collect())
    }

    fn books_in_price_range(&self, range: PriceRange) -> Result<Vec<Book>, BookError> {
        let books = self.loaded_books()?;

        let matches: Vec<Book> = books
            .iter()
            .filter(|book| range.contains(book.price_numeric))
            .cloned()
            .collect();

        if matches.is_empty() {
            return Err(BookError::NoBooksInPriceRange);
        }

        Ok(matches)
    }

    fn list_categories(&self) -> Result<Vec<String>, BookError> {
        let books = self.loaded_books()?;

        let mut seen = HashSet::new();
        Ok(books
            .iter()
            .filter(|book| seen.insert(book.category.as_str()))
            .map(|book| book.category.clone())
            .collect())
    }

    fn overview_stats(&self) -> Result<OverviewStats, BookError> {
        let books = self.loaded_books()?;

        let total_price: f64 = books.iter().map(|book| book.price_numeric).sum();

        let mut distribution: BTreeMap<u8, usize> = BTreeMap::new();
        for book in books.iter() {
            *distribution.entry(book.rating).or_default() += 1;
        }

        Ok(OverviewStats {
            total_books: books.len(),
            average_price: round2(total_price / books.len() as f64),
            rating_distribution: distribution
                .into_iter()
                .map(|(rating, count)| RatingCount { rating, count })
                .collect(),
        })
    }

    fn category_stats(&self) -> Result<Vec<CategoryStats>, BookError> {
        let books = self.loaded_books()?;

        let mut totals: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
        for book in books.iter() {
            let entry = totals.entry(book.category.as_str()).or_default();
            entry.0 += 1;
            entry.1 += book.price_numeric;
        }

        Ok(totals
            .into_iter()
            .map(|(category, (book_count, total_price))| CategoryStats {
                category: category.to_string(),
                book_count,
                average_price: round2(total_price / book_count as f64),
            })
            .collect())
    }

    fn book_features(&self, id: i64) -> Result<BookFeatures, BookError> {
        let books = self.loaded_books()?;
        let book = find_book(&books, id)?;

        Ok(features_of(&self.category_columns, book))
    }

    fn training_data(&self, limit: Limit) -> Result<Vec<TrainingRecord>, BookError> {
        let books = self.loaded_books()?;

        Ok(books
            .iter()
            .take(limit.get())
            .map(|book| TrainingRecord {
                features: features_of(&self.category_columns, book),
                target_rating: book.rating,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::book::errors::QueryError;

    mock! {
        pub TestBookRepository {}

        impl BookRepository for TestBookRepository {
            fn list_all(&self) -> Arc<[Book]>;
        }
    }

    fn book(id: u32, title: &str, price: f64, rating: u8, category: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            price: format!("£{:.2}", price),
            rating,
            availability: 10,
            category: category.to_string(),
            image_url: format!("https://books.example/{}.jpg", id),
            price_numeric: price,
        }
    }

    fn catalog() -> Vec<Book> {
        vec![
            book(0, "A Light in the Attic", 51.77, 3, "Poetry"),
            book(1, "Tipping the Velvet", 53.74, 1, "Historical Fiction"),
            book(2, "Soumission", 50.10, 5, "Fiction"),
            book(3, "Sharp Objects", 47.82, 4, "Mystery"),
            book(4, "Sapiens", 54.23, 5, "History"),
            book(5, "The Requiem Red", 22.65, 1, "Poetry"),
        ]
    }

    fn service_with(books: Vec<Book>) -> BookService<MockTestBookRepository> {
        let mut repository = MockTestBookRepository::new();
        let books: Arc<[Book]> = books.into();
        repository
            .expect_list_all()
            .returning(move || Arc::clone(&books));

        BookService::new(Arc::new(repository))
    }

    #[test]
    fn test_empty_catalog_is_unavailable() {
        let service = service_with(Vec::new());

        assert_eq!(service.books_count(), 0);
        assert_eq!(service.list_books(), Err(BookError::DataUnavailable));
        assert_eq!(service.get_book(0), Err(BookError::DataUnavailable));
        assert_eq!(service.overview_stats(), Err(BookError::DataUnavailable));
        assert_eq!(
            service.training_data(Limit::training_data(None).unwrap()),
            Err(BookError::DataUnavailable)
        );
    }

    #[test]
    fn test_list_books() {
        let service = service_with(catalog());

        let books = service.list_books().unwrap();
        assert_eq!(books.len(), 6);
        assert_eq!(books[0].title, "A Light in the Attic");
    }

    #[test]
    fn test_get_book() {
        let service = service_with(catalog());

        assert_eq!(service.get_book(3).unwrap().title, "Sharp Objects");
        assert_eq!(service.get_book(6), Err(BookError::NotFound(6)));
        assert_eq!(service.get_book(-1), Err(BookError::NotFound(-1)));
    }

    #[test]
    fn test_search_books_by_title() {
        let service = service_with(catalog());
        let query = SearchQuery::new(Some("the".to_string()), None).unwrap();

        let titles: Vec<String> = service
            .search_books(&query)
            .unwrap()
            .into_iter()
            .map(|book| book.title)
            .collect();

        assert_eq!(
            titles,
            vec!["A Light in the Attic", "Tipping the Velvet", "The Requiem Red"]
        );
    }

    #[test]
    fn test_search_books_by_title_and_category() {
        let service = service_with(catalog());
        let query = SearchQuery::new(Some("the".to_string()), Some("POETRY".to_string())).unwrap();

        let books = service.search_books(&query).unwrap();
        assert_eq!(books.len(), 2);
        assert!(books.iter().all(|book| book.category == "Poetry"));
    }

    #[test]
    fn test_search_books_no_matches() {
        let service = service_with(catalog());
        let query = SearchQuery::new(None, Some("Horror".to_string())).unwrap();

        assert_eq!(service.search_books(&query), Err(BookError::NoMatches));
    }

    #[test]
    fn test_top_rated_books() {
        let service = service_with(catalog());

        let ids: Vec<u32> = service
            .top_rated_books(Limit::top_rated(None).unwrap())
            .unwrap()
            .iter()
            .map(|book| book.id)
            .collect();
        assert_eq!(ids, vec![2, 4]);

        let limited = service
            .top_rated_books(Limit::top_rated(Some(1)).unwrap())
            .unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].id, 2);
    }

    #[test]
    fn test_books_in_price_range() {
        let service = service_with(catalog());

        let range = PriceRange::new(Some(50.10), Some(53.74)).unwrap();
        let ids: Vec<u32> = service
            .books_in_price_range(range)
            .unwrap()
            .iter()
            .map(|book| book.id)
            .collect();
        assert_eq!(ids, vec![0, 1, 2]);

        let empty = PriceRange::new(Some(100.0), Some(200.0)).unwrap();
        assert_eq!(
            service.books_in_price_range(empty),
            Err(BookError::NoBooksInPriceRange)
        );
    }

    #[test]
    fn test_list_categories_in_first_seen_order() {
        let service = service_with(catalog());

        assert_eq!(
            service.list_categories().unwrap(),
            vec!["Poetry", "Historical Fiction", "Fiction", "Mystery", "History"]
        );
    }

    #[test]
    fn test_overview_stats() {
        let service = service_with(catalog());

        let stats = service.overview_stats().unwrap();

        assert_eq!(stats.total_books, 6);
        // (51.77 + 53.74 + 50.10 + 47.82 + 54.23 + 22.65) / 6 = 46.718...
        assert_eq!(stats.average_price, 46.72);
        assert_eq!(
            stats.rating_distribution,
            vec![
                RatingCount { rating: 1, count: 2 },
                RatingCount { rating: 3, count: 1 },
                RatingCount { rating: 4, count: 1 },
                RatingCount { rating: 5, count: 2 },
            ]
        );
    }

    #[test]
    fn test_category_stats() {
        let service = service_with(catalog());

        let stats = service.category_stats().unwrap();
        let categories: Vec<&str> = stats.iter().map(|s| s.category.as_str()).collect();

        assert_eq!(
            categories,
            vec!["Fiction", "Historical Fiction", "History", "Mystery", "Poetry"]
        );

        let poetry = stats.iter().find(|s| s.category == "Poetry").unwrap();
        assert_eq!(poetry.book_count, 2);
        assert_eq!(poetry.average_price, 37.21);
    }

    #[test]
    fn test_book_features() {
        let service = service_with(catalog());

        let features = service.book_features(3).unwrap();

        assert_eq!(features.id, 3);
        assert_eq!(features.price_numeric, 47.82);
        assert_eq!(features.category_features.len(), 5);
        assert_eq!(features.category_features["category_Mystery"], 1);
        assert_eq!(
            features.category_features.values().map(|v| *v as u32).sum::<u32>(),
            1
        );
        assert_eq!(service.book_features(42), Err(BookError::NotFound(42)));
    }

    #[test]
    fn test_training_data() {
        let service = service_with(catalog());

        let records = service
            .training_data(Limit::training_data(Some(4)).unwrap())
            .unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[2].features.id, 2);
        assert_eq!(records[2].target_rating, 5);
        assert_eq!(records[2].features.category_features["category_Fiction"], 1);
    }

    #[test]
    fn test_limit_rejected_before_service() {
        assert!(matches!(
            Limit::training_data(Some(1001)),
            Err(QueryError::LimitOutOfRange { max: 1000, .. })
        ));
    }

    #[test]
    fn test_category_columns_fixed_at_construction() {
        let loaded: Arc<[Book]> = catalog().into();
        let mut later = catalog();
        later.push(book(6, "Dune", 10.0, 5, "Science Fiction"));
        let later: Arc<[Book]> = later.into();

        let mut calls = 0;
        let mut repository = MockTestBookRepository::new();
        repository.expect_list_all().returning(move || {
            calls += 1;
            if calls == 1 {
                Arc::clone(&loaded)
            } else {
                Arc::clone(&later)
            }
        });
        let service = BookService::new(Arc::new(repository));

        let features = service.book_features(6).unwrap();

        assert_eq!(features.category_features.len(), 5);
        assert!(!features
            .category_features
            .contains_key("category_Science Fiction"));
    }
}
