use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::book::errors::BookError;
use crate::domain::book::errors::QueryError;

/// Prefix of every one-hot category feature key.
pub const CATEGORY_FEATURE_PREFIX: &str = "category_";

/// One-hot encoded category, keyed `category_<name>` in name order.
pub type CategoryFeatures = BTreeMap<String, u8>;

/// Scraped book record.
///
/// `id` is the record's position in the source file. `price_numeric` is
/// derived from `price` at load time and is not part of the public shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub price: String,
    pub rating: u8,
    pub availability: u32,
    pub category: String,
    pub image_url: String,
    #[serde(skip)]
    pub price_numeric: f64,
}

impl Book {
    /// Numeric value of a display price such as `£51.77`.
    ///
    /// Everything except digits and `.` is dropped before parsing.
    pub fn parse_price(price: &str) -> Option<f64> {
        let digits: String = price
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        digits.parse().ok()
    }
}

/// Feature columns shared by every book of a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryColumns(BTreeSet<String>);

impl CategoryColumns {
    pub fn from_books(books: &[Book]) -> Self {
        Self(books.iter().map(|book| book.category.clone()).collect())
    }

    /// One-hot encoding of `category` over these columns.
    pub fn encode(&self, category: &str) -> CategoryFeatures {
        self.0
            .iter()
            .map(|column| {
                (
                    format!("{}{}", CATEGORY_FEATURE_PREFIX, column),
                    u8::from(column == category),
                )
            })
            .collect()
    }
}

/// Search criteria; at least one of title or category is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    title: Option<String>,
    category: Option<String>,
}

impl SearchQuery {
    const MIN_TITLE_LENGTH: usize = 3;

    /// Validate raw search parameters.
    ///
    /// # Errors
    /// * `InvalidQuery(TitleTooShort)` - Title shorter than 3 characters
    /// * `MissingSearchCriteria` - Neither title nor a non-empty category given
    pub fn new(title: Option<String>, category: Option<String>) -> Result<Self, BookError> {
        if let Some(title) = &title {
            let length = title.chars().count();
            if length < Self::MIN_TITLE_LENGTH {
                return Err(QueryError::TitleTooShort {
                    min: Self::MIN_TITLE_LENGTH,
                    actual: length,
                }
                .into());
            }
        }

        let category = category.filter(|category| !category.is_empty());
        if title.is_none() && category.is_none() {
            return Err(BookError::MissingSearchCriteria);
        }

        Ok(Self {
            title: title.map(|title| title.to_lowercase()),
            category: category.map(|category| category.to_lowercase()),
        })
    }

    /// Case-insensitive title substring and category equality.
    pub fn matches(&self, book: &Book) -> bool {
        let title_matches = self
            .title
            .as_ref()
            .map_or(true, |title| book.title.to_lowercase().contains(title));
        let category_matches = self
            .category
            .as_ref()
            .map_or(true, |category| book.category.to_lowercase() == *category);

        title_matches && category_matches
    }
}

/// Inclusive price bounds with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    /// Validate raw bounds.
    ///
    /// # Errors
    /// * `InvalidQuery` - A bound is missing or negative
    /// * `InvertedPriceRange` - `min` is greater than `max`
    pub fn new(min: Option<f64>, max: Option<f64>) -> Result<Self, BookError> {
        let min = Self::bound("min_price", min)?;
        let max = Self::bound("max_price", max)?;

        if min > max {
            return Err(BookError::InvertedPriceRange);
        }

        Ok(Self { min, max })
    }

    fn bound(name: &'static str, value: Option<f64>) -> Result<f64, QueryError> {
        let value = value.ok_or(QueryError::MissingParameter(name))?;
        // Also rejects NaN.
        if !(value >= 0.0) {
            return Err(QueryError::NegativePrice { name, value });
        }
        Ok(value)
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// Bounded result count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit(usize);

impl Limit {
    const MIN: i64 = 1;

    pub const TOP_RATED_DEFAULT: i64 = 10;
    pub const TOP_RATED_MAX: i64 = 50;
    pub const TRAINING_DATA_DEFAULT: i64 = 100;
    pub const TRAINING_DATA_MAX: i64 = 1000;

    /// Validate `value` against `1..=max`.
    pub fn new(value: i64, max: i64) -> Result<Self, QueryError> {
        if (Self::MIN..=max).contains(&value) {
            Ok(Self(value as usize))
        } else {
            Err(QueryError::LimitOutOfRange {
                min: Self::MIN,
                max,
                actual: value,
            })
        }
    }

    pub fn top_rated(value: Option<i64>) -> Result<Self, QueryError> {
        Self::new(
            value.unwrap_or(Self::TOP_RATED_DEFAULT),
            Self::TOP_RATED_MAX,
        )
    }

    pub fn training_data(value: Option<i64>) -> Result<Self, QueryError> {
        Self::new(
            value.unwrap_or(Self::TRAINING_DATA_DEFAULT),
            Self::TRAINING_DATA_MAX,
        )
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

/// Number of books holding one rating value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingCount {
    pub rating: u8,
    pub count: usize,
}

/// Collection-wide statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewStats {
    pub total_books: usize,
    pub average_price: f64,
    pub rating_distribution: Vec<RatingCount>,
}

/// Per-category statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category: String,
    pub book_count: usize,
    pub average_price: f64,
}

/// Numeric model inputs for one book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookFeatures {
    pub id: u32,
    pub price_numeric: f64,
    pub category_features: CategoryFeatures,
}

/// Model inputs plus the rating to learn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingRecord {
    #[serde(flatten)]
    pub features: BookFeatures,
    pub target_rating: u8,
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
