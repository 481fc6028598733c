use axum::Json;
use utoipa::OpenApi;

use crate::{
    analysis::VocabularyEntry,
    extractor::TextKind,
    health::{self, HealthResponse},
    lessons::{
        dtos::{CreateLessonRequest, ErrorResponse, LessonResponse, NoticeResponse, StageError},
        handlers,
    },
    pipeline::Notice,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "newsvocab", description = "Thai news summaries and vocabulary lessons"),
    paths(health::health_check, handlers::create_lesson),
    components(schemas(
        HealthResponse,
        CreateLessonRequest,
        ErrorResponse,
        LessonResponse,
        StageError,
        NoticeResponse,
        Notice,
        TextKind,
        VocabularyEntry
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "lessons", description = "Article to lesson pipeline")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
