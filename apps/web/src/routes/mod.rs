//! HTTP routes.
//!
//! | Method      | Path                  | Handler                      |
//! |-------------|-----------------------|------------------------------|
//! | GET         | `/`, `/calculations/new` | [`calculations::new_form`] |
//! | POST        | `/calculations`       | [`calculations::create`]     |
//! | GET / POST  | `/admin/login`        | [`admin::login_form`] / [`admin::login`] |
//! | POST/DELETE | `/admin/logout`       | [`admin::logout`]            |
//! | GET         | `/admin/dashboard`    | [`admin::dashboard`]         |
//! | GET         | `/health`             | [`health::health`]           |

pub mod admin;
pub mod calculations;
pub mod health;

use axum::http::header::ACCEPT;
use axum::http::HeaderMap;

/// True when the client asked for JSON.
pub(crate) fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.contains("application/json"))
}
