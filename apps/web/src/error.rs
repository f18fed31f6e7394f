//! Error types for the web server.
//!
//! ## Mapping
//! ```text
//! DbError / token failure → 500  generic message, details only in the log
//! ```
//!
//! Invalid input and bad credentials are answered by the handlers themselves
//! with 422 and the re-rendered form (or `{"errors": [...]}`).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use tipsplit_db::DbError;

use crate::auth::AuthError;

/// Web server errors.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Session error: {0}")]
    Session(String),
}

impl From<AuthError> for WebError {
    fn from(err: AuthError) -> Self {
        WebError::Session(err.to_string())
    }
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::Database(_) | WebError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        (self.status(), "Something went wrong. Please try again.").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_are_internal_errors() {
        let db = WebError::from(DbError::PoolExhausted);
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(db.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let session = WebError::from(AuthError::TokenEncoding("bad key".to_string()));
        assert_eq!(session.to_string(), "Session error: Failed to issue session token: bad key");
        assert_eq!(session.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
