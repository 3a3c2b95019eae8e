use auth::AuthenticationError;
use auth::GuardError;
use axum::extract::rejection::FormRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::book::errors::BookError;

pub mod admin;
pub mod books;
pub mod health;
pub mod home;
pub mod login;
pub mod ml;
pub mod refresh;
pub mod stats;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect username or password";
pub const INVALID_TOKEN_MESSAGE: &str = "Could not validate credentials";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Unauthorized(msg) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, "Bearer")],
                    Json(ApiResponseBody::new_error(StatusCode::UNAUTHORIZED, msg)),
                )
                    .into_response();
            }
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::InvalidQuery(_) => ApiError::UnprocessableEntity(err.to_string()),
            BookError::MissingSearchCriteria | BookError::InvertedPriceRange => {
                ApiError::BadRequest(err.to_string())
            }
            BookError::NotFound(_) | BookError::NoMatches | BookError::NoBooksInPriceRange => {
                ApiError::NotFound(err.to_string())
            }
            BookError::DataUnavailable => ApiError::ServiceUnavailable(err.to_string()),
        }
    }
}

impl From<AuthenticationError> for ApiError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials | AuthenticationError::AccountDisabled(_) => {
                ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
            }
            AuthenticationError::JwtError(err) => {
                ApiError::InternalServerError(format!("Token generation failed: {}", err))
            }
        }
    }
}

impl From<GuardError> for ApiError {
    fn from(err: GuardError) -> Self {
        tracing::warn!(reason = %err, "Bearer token rejected");
        ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::UnprocessableEntity(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::UnprocessableEntity(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::UnprocessableEntity(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::UnprocessableEntity(rejection.body_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::errors::QueryError;

    #[test]
    fn test_book_error_mapping() {
        assert!(matches!(
            ApiError::from(BookError::DataUnavailable),
            ApiError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            ApiError::from(BookError::NotFound(7)),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(BookError::InvertedPriceRange),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(BookError::from(QueryError::MissingParameter("min_price"))),
            ApiError::UnprocessableEntity(_)
        ));
    }

    #[test]
    fn test_credential_failures_share_one_message() {
        let unknown = ApiError::from(AuthenticationError::InvalidCredentials);
        let disabled = ApiError::from(AuthenticationError::AccountDisabled("admin".to_string()));

        assert_eq!(unknown, disabled);
        assert_eq!(
            unknown,
            ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_token_failures_share_one_message() {
        let missing = ApiError::from(GuardError::MissingCredentials);
        let expired = ApiError::from(GuardError::InvalidToken(auth::JwtError::Expired));

        assert_eq!(missing, expired);
    }

    #[test]
    fn test_unauthorized_response_challenges_bearer() {
        let response = ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string()).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
