use rand::Rng;

use crate::domain::book::models::round2;
use crate::domain::book::models::CATEGORY_FEATURE_PREFIX;
use crate::domain::prediction::models::PredictionRequest;
use crate::domain::prediction::models::PredictionResponse;

const BONUS_CATEGORIES: [&str; 3] = ["Science Fiction", "Fantasy", "Mystery"];
const CATEGORY_BONUS: f64 = 0.5;
const NOISE_AMPLITUDE: f64 = 0.5;
const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 5.0;

/// Placeholder rating predictor.
///
/// Not a trained model: the score falls with price, favours a few genres and
/// carries uniform noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingPredictor;

impl RatingPredictor {
    pub fn new() -> Self {
        Self
    }

    pub fn predict(&self, request: &PredictionRequest) -> PredictionResponse {
        let noise = rand::rng().random_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE);
        PredictionResponse {
            predicted_rating: score(request, noise),
        }
    }
}

/// Name of the first category flagged `1`, if any.
fn active_category(request: &PredictionRequest) -> Option<String> {
    request
        .category_features
        .iter()
        .find(|(_, value)| **value == 1)
        .map(|(key, _)| key.replace(CATEGORY_FEATURE_PREFIX, ""))
}

/// `5 - price / 20 + bonus + noise`, clamped to the rating scale and
/// rounded to two decimals.
fn score(request: &PredictionRequest, noise: f64) -> f64 {
    let price_score = MAX_RATING - request.price_numeric / 20.0;

    let category_bonus = match active_category(request) {
        Some(category) if BONUS_CATEGORIES.contains(&category.as_str()) => CATEGORY_BONUS,
        _ => 0.0,
    };

    round2((price_score + category_bonus + noise).clamp(MIN_RATING, MAX_RATING))
}
