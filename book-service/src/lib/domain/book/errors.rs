use thiserror::Error;

/// Error for query parameter validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    #[error("Title too short: minimum {min} characters, got {actual}")]
    TitleTooShort { min: usize, actual: usize },

    #[error("Limit out of range: expected {min} to {max}, got {actual}")]
    LimitOutOfRange { min: i64, max: i64, actual: i64 },

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Parameter {name} must be a non-negative number, got {value}")]
    NegativePrice { name: &'static str, value: f64 },
}

/// Top-level error for all catalog operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BookError {
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] QueryError),

    #[error("Book data is not available. Run the scraper first.")]
    DataUnavailable,

    #[error("Book with ID {0} not found")]
    NotFound(i64),

    #[error("Provide 'title' or 'category' to search")]
    MissingSearchCriteria,

    #[error("Minimum price cannot be greater than maximum price")]
    InvertedPriceRange,

    #[error("No books found matching the given criteria")]
    NoMatches,

    #[error("No books found in the given price range")]
    NoBooksInPriceRange,
}
