use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// Features of a book to score.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionRequest {
    pub price_numeric: f64,
    /// One-hot flags in request order; the first flag set to `1` wins.
    pub category_features: IndexMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResponse {
    pub predicted_rating: f64,
}
