//! Admin session module.
//!
//! Handles the admin login check, session token issuance and validation.
//!
//! ## Session States
//! ```text
//!                 login(ok)
//!   ┌───────────┐ ─────────► ┌────────────────────────────────┐
//!   │ Anonymous │            │ Authenticated { logged_in_at } │
//!   └───────────┘ ◄───────── └────────────────────────────────┘
//!        ▲   │      logout
//!        └───┘ login(bad)
//! ```
//!
//! The state is a pure function of the presented cookie: a missing,
//! malformed or tampered token is `Anonymous`. Tokens carry no expiry.

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::response::Redirect;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::SharedState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "tipsplit_admin";

/// Where anonymous dashboard requests are sent.
pub const LOGIN_PATH: &str = "/admin/login";

const SUBJECT: &str = "admin";

/// Session token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (always "admin")
    pub sub: String,

    /// Login time (Unix timestamp)
    pub iat: i64,

    /// Token ID
    pub jti: String,
}

/// Admin session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated { logged_in_at: DateTime<Utc> },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Failed to issue session token: {0}")]
    TokenEncoding(String),
}

/// Checks credentials and issues / validates session tokens.
pub struct SessionGate {
    admin_username: String,
    admin_password: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionGate {
    /// Create a new session gate.
    pub fn new(admin_username: String, admin_password: String, secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        SessionGate {
            admin_username,
            admin_password,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verifies the credentials and returns a fresh session token.
    ///
    /// Both fields are always compared, so the failure does not reveal
    /// which one was wrong.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user_ok = constant_time_eq(username.as_bytes(), self.admin_username.as_bytes());
        let pass_ok = constant_time_eq(password.as_bytes(), self.admin_password.as_bytes());

        if !(user_ok & pass_ok) {
            warn!("Admin login failed");
            return Err(AuthError::InvalidCredentials);
        }

        let claims = Claims {
            sub: SUBJECT.to_string(),
            iat: Utc::now().timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenEncoding(e.to_string()))?;

        info!(jti = %claims.jti, "Admin logged in");
        Ok(token)
    }

    /// Maps a presented token to the session state.
    pub fn session_state(&self, token: Option<&str>) -> SessionState {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return SessionState::Anonymous;
        };

        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) if data.claims.sub == SUBJECT => {
                match DateTime::<Utc>::from_timestamp(data.claims.iat, 0) {
                    Some(logged_in_at) => SessionState::Authenticated { logged_in_at },
                    None => SessionState::Anonymous,
                }
            }
            Ok(_) => SessionState::Anonymous,
            Err(e) => {
                debug!(error = %e, "Rejected session token");
                SessionState::Anonymous
            }
        }
    }
}

/// Byte comparison whose running time depends only on the lengths.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let len = a.len().max(b.len());
    let mut diff = (a.len() != b.len()) as u8;

    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= x ^ y;
    }

    diff == 0
}

// =============================================================================
// Cookie helpers
// =============================================================================

/// `Set-Cookie` value carrying a session token.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/")
}

/// `Set-Cookie` value that removes the session.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

/// Extracts the session token from the request's `Cookie` headers.
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token)
}

// =============================================================================
// Extractor
// =============================================================================

/// Guard for admin-only handlers: anonymous requests are redirected to
/// the login page.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin {
    pub logged_in_at: DateTime<Utc>,
}

impl FromRequestParts<SharedState> for RequireAdmin {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        match state.gate.session_state(token_from_headers(&parts.headers)) {
            SessionState::Authenticated { logged_in_at } => Ok(RequireAdmin { logged_in_at }),
            SessionState::Anonymous => {
                debug!(path = %parts.uri.path(), "Anonymous admin request redirected");
                Err(Redirect::to(LOGIN_PATH))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn gate() -> SessionGate {
        SessionGate::new("admin".to_string(), "tipcalculator2026".to_string(), "test-secret")
    }

    #[test]
    fn test_login_roundtrip() {
        let gate = gate();
        let token = gate.login("admin", "tipcalculator2026").unwrap();

        let state = gate.session_state(Some(&token));
        assert!(state.is_authenticated());
    }

    #[test]
    fn test_bad_credentials() {
        let gate = gate();
        assert!(matches!(
            gate.login("admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            gate.login("root", "tipcalculator2026"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(gate.login("", "").is_err());
    }

    #[test]
    fn test_invalid_tokens_are_anonymous() {
        let gate = gate();
        assert_eq!(gate.session_state(None), SessionState::Anonymous);
        assert_eq!(gate.session_state(Some("")), SessionState::Anonymous);
        assert_eq!(gate.session_state(Some("not-a-jwt")), SessionState::Anonymous);

        // Signed with another secret
        let other = SessionGate::new("admin".to_string(), "tipcalculator2026".to_string(), "x");
        let foreign = other.login("admin", "tipcalculator2026").unwrap();
        assert_eq!(gate.session_state(Some(&foreign)), SessionState::Anonymous);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abc\0"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_cookie_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(token_from_headers(&headers), None);

        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; tipsplit_admin=abc.def.ghi; lang=en"),
        );
        assert_eq!(token_from_headers(&headers), Some("abc.def.ghi"));

        assert!(session_cookie("t").starts_with("tipsplit_admin=t;"));
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
