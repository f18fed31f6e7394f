//! Admin routes: login, logout and the dashboard.

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde::Deserialize;
use tracing::debug;

use crate::auth::{clear_session_cookie, session_cookie, token_from_headers, AuthError, RequireAdmin};
use crate::error::WebError;
use crate::payload::DashboardPayload;
use crate::routes::accepts_json;
use crate::services::dashboard::{load_dashboard, DashboardQuery};
use crate::views;
use crate::SharedState;

pub const DASHBOARD_PATH: &str = "/admin/dashboard";

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// `GET /admin/login`
pub async fn login_form(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    if state
        .gate
        .session_state(token_from_headers(&headers))
        .is_authenticated()
    {
        return Redirect::to(DASHBOARD_PATH).into_response();
    }

    Html(views::login_page(None)).into_response()
}

/// `POST /admin/login`
pub async fn login(
    State(state): State<SharedState>,
    Form(credentials): Form<LoginForm>,
) -> Result<Response, WebError> {
    match state.gate.login(&credentials.username, &credentials.password) {
        Ok(token) => Ok((
            [(SET_COOKIE, session_cookie(&token))],
            Redirect::to(DASHBOARD_PATH),
        )
            .into_response()),
        Err(AuthError::InvalidCredentials) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::login_page(Some(
                &AuthError::InvalidCredentials.to_string(),
            ))),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

/// `POST /admin/logout` and `DELETE /admin/logout`
pub async fn logout() -> Response {
    ([(SET_COOKIE, clear_session_cookie())], Redirect::to("/")).into_response()
}

/// `GET /admin/dashboard`
pub async fn dashboard(
    admin: RequireAdmin,
    State(state): State<SharedState>,
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let view = load_dashboard(&state.db, &query).await?;
    debug!(
        session_started = %admin.logged_in_at,
        page = view.current_page,
        sort = %view.sort,
        "Dashboard served"
    );

    if accepts_json(&headers) {
        Ok(Json(DashboardPayload::from(&view)).into_response())
    } else {
        Ok(Html(views::dashboard_page(&view)).into_response())
    }
}
