use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::{
    app_state::AppState,
    lessons::dtos::{CreateLessonRequest, ErrorResponse, LessonResponse},
    pipeline::{self, PipelineError},
};

#[utoipa::path(
    post,
    path = "/v1/lessons",
    tag = "lessons",
    request_body = CreateLessonRequest,
    responses(
        (status = 200, description = "Lesson built; stages that failed are listed in errors", body = LessonResponse),
        (status = 400, description = "Invalid URL or missing credential", body = ErrorResponse),
        (status = 502, description = "Article could not be fetched", body = ErrorResponse)
    )
)]
pub async fn create_lesson(
    State(state): State<AppState>,
    Json(payload): Json<CreateLessonRequest>,
) -> Response {
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }

    let credential = payload
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .or(state.config.gemini_api_key())
        .unwrap_or_default();

    match pipeline::run(&payload.url, credential, &state.config).await {
        Ok(outcome) => {
            info!(
                "Lesson ready for {} (complete: {}, degraded: {})",
                outcome.url,
                outcome.is_complete(),
                outcome.is_degraded()
            );
            (StatusCode::OK, Json(LessonResponse::from(outcome))).into_response()
        }
        Err(err) => {
            warn!("Lesson for {} failed: {}", payload.url, err);
            let status = match &err {
                PipelineError::MissingCredential => StatusCode::BAD_REQUEST,
                PipelineError::Fetch(fetch_error) if fetch_error.is_input_error() => {
                    StatusCode::BAD_REQUEST
                }
                PipelineError::Fetch(_) => StatusCode::BAD_GATEWAY,
            };
            (
                status,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}
