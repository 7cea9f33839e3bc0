use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use std::fmt;

use crate::serializers::FieldErrors;

pub const INVALID_CREDENTIALS: &str = "Invalid Credentials";
pub const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Hash(String),
    Session(String),
    Validation(FieldErrors),
    /// Malformed request body or query string.
    BadRequest(String),
    InvalidCredentials,
    TooManyAttempts,
    Unauthenticated,
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Validation(e) => write!(f, "Validation failed: {e}"),
            AppError::BadRequest(e) => write!(f, "Bad request: {e}"),
            AppError::InvalidCredentials => write!(f, "{INVALID_CREDENTIALS}"),
            AppError::TooManyAttempts => write!(f, "Too many failed login attempts"),
            AppError::Unauthenticated => write!(f, "{NOT_AUTHENTICATED}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            AppError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Db(_) | AppError::Hash(_) | AppError::Session(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());
        match self {
            AppError::Validation(errors) => res.json(errors),
            AppError::BadRequest(detail) => res.json(json!({ "detail": detail })),
            AppError::InvalidCredentials => res.json(json!({ "error": INVALID_CREDENTIALS })),
            AppError::TooManyAttempts => res.json(json!({
                "error": "Too many failed login attempts. Please try again later."
            })),
            AppError::Unauthenticated => res.json(json!({ "detail": NOT_AUTHENTICATED })),
            AppError::NotFound => res.json(json!({ "detail": "Not found." })),
            AppError::Db(_) | AppError::Hash(_) | AppError::Session(_) => {
                log::error!("{self}");
                res.json(json!({ "detail": "A server error occurred." }))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<FieldErrors> for AppError {
    fn from(e: FieldErrors) -> Self {
        AppError::Validation(e)
    }
}

impl From<actix_session::SessionInsertError> for AppError {
    fn from(e: actix_session::SessionInsertError) -> Self {
        AppError::Session(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.error_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn invalid_credentials_is_generic_400() {
        let (status, body) = body_of(AppError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid Credentials" }));
    }

    #[actix_web::test]
    async fn validation_errors_are_field_keyed() {
        let (status, body) =
            body_of(FieldErrors::single("agenda", "This field is required.").into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "agenda": ["This field is required."] }));
    }

    #[actix_web::test]
    async fn auth_and_lookup_failures_map_to_401_and_404() {
        let (status, _) = body_of(AppError::Unauthenticated).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, body) = body_of(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Not found.");
    }

    #[actix_web::test]
    async fn database_errors_hide_details() {
        let (status, body) = body_of(AppError::Db(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "A server error occurred.");
    }
}
