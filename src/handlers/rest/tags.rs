use axum::{
    Json,
    extract::{OriginalUri, Path, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;

use std::sync::Arc;

use super::created;
use crate::{
    AppState,
    dto::{TagRequest, TagResponse},
    error::{Error, ErrorResponse},
    service::TagService,
};

#[utoipa::path(
    get,
    path = "/tags",
    responses(
        (status = 200, description = "All tags, ascending by ID", body = Vec<TagResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tags"
)]
#[debug_handler(state = AppState)]
pub async fn list_tags(State(service): State<Arc<TagService>>) -> Response {
    match service.list_tags().await {
        Ok(tags) => (StatusCode::OK, Json(tags)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/tags/{id}",
    params(
        ("id" = i64, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Tag found", body = TagResponse),
        (status = 404, description = "Tag not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tags"
)]
#[debug_handler(state = AppState)]
pub async fn get_tag(
    State(service): State<Arc<TagService>>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return Error::from(rejection).into_response(),
    };

    match service.get_tag(id).await {
        Ok(tag) => (StatusCode::OK, Json(tag)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/tags",
    request_body = TagRequest,
    responses(
        (status = 201, description = "Tag created successfully", body = TagResponse),
        (status = 400, description = "Missing name", body = ErrorResponse),
        (status = 409, description = "Tag name already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tags"
)]
#[debug_handler(state = AppState)]
pub async fn create_tag(
    State(service): State<Arc<TagService>>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<TagRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return Error::from(rejection).into_response(),
    };

    match service.create_tag(payload).await {
        Ok(tag) => created(&uri, tag.id, tag),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/tags/{id}",
    params(
        ("id" = i64, Path, description = "Tag ID")
    ),
    request_body = TagRequest,
    responses(
        (status = 200, description = "Tag renamed successfully", body = TagResponse),
        (status = 400, description = "Missing name", body = ErrorResponse),
        (status = 404, description = "Tag not found", body = ErrorResponse),
        (status = 409, description = "Tag name already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tags"
)]
#[debug_handler(state = AppState)]
pub async fn update_tag(
    State(service): State<Arc<TagService>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TagRequest>, JsonRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return Error::from(rejection).into_response(),
    };

    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return Error::from(rejection).into_response(),
    };

    match service.update_tag(id, payload).await {
        Ok(tag) => (StatusCode::OK, Json(tag)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/tags/{id}",
    params(
        ("id" = i64, Path, description = "Tag ID")
    ),
    responses(
        (status = 204, description = "Tag deleted, or did not exist; it is detached from every note"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tags"
)]
#[debug_handler(state = AppState)]
pub async fn delete_tag(
    State(service): State<Arc<TagService>>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return Error::from(rejection).into_response(),
    };

    match service.delete_tag(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
