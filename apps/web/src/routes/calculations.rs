//! Public calculator routes.

use axum::extract::{FromRequest, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde_json::{json, Value};

use tipsplit_core::validation::CalculationForm;

use crate::error::WebError;
use crate::payload::CalculationPayload;
use crate::routes::accepts_json;
use crate::services::submission::{submit, SubmissionOutcome};
use crate::views;
use crate::SharedState;

/// Submission body: form-urlencoded or JSON, chosen by `Content-Type`.
///
/// Both bodies may scope the fields under `calculation`; see
/// [`CalculationForm::from_pairs`] and [`CalculationForm::from_json`].
pub struct Submission {
    pub form: CalculationForm,
    pub was_json: bool,
}

impl<S> FromRequest<S> for Submission
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        if is_json {
            let Json(body) = Json::<Value>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            let form = CalculationForm::from_json(body).map_err(|err| {
                (StatusCode::BAD_REQUEST, format!("Malformed calculation: {err}")).into_response()
            })?;
            Ok(Submission { form, was_json: true })
        } else {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Submission {
                form: CalculationForm::from_pairs(pairs),
                was_json: false,
            })
        }
    }
}

/// `GET /` and `GET /calculations/new`
pub async fn new_form() -> Html<String> {
    Html(views::calculator_page(&CalculationForm::default(), None))
}

/// `POST /calculations`
pub async fn create(
    State(state): State<SharedState>,
    headers: HeaderMap,
    submission: Submission,
) -> Result<Response, WebError> {
    let wants_json = submission.was_json || accepts_json(&headers);

    let response = match submit(&state.db, submission.form).await? {
        SubmissionOutcome::Created(record) if wants_json => {
            (StatusCode::CREATED, Json(CalculationPayload::from(&record))).into_response()
        }
        SubmissionOutcome::Created(record) => Html(views::result_page(&record)).into_response(),
        SubmissionOutcome::Invalid { errors, .. } if wants_json => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": errors.full_messages() })),
        )
            .into_response(),
        SubmissionOutcome::Invalid { errors, form } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::calculator_page(&form, Some(&errors))),
        )
            .into_response(),
    };

    Ok(response)
}
