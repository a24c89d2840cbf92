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
    dto::{FolderRequest, FolderResponse},
    error::{Error, ErrorResponse},
    service::FolderService,
};

#[utoipa::path(
    get,
    path = "/folders",
    responses(
        (status = 200, description = "All folders, ascending by ID", body = Vec<FolderResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "folders"
)]
#[debug_handler(state = AppState)]
pub async fn list_folders(State(service): State<Arc<FolderService>>) -> Response {
    match service.list_folders().await {
        Ok(folders) => (StatusCode::OK, Json(folders)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/folders/{id}",
    params(
        ("id" = i64, Path, description = "Folder ID")
    ),
    responses(
        (status = 200, description = "Folder found", body = FolderResponse),
        (status = 404, description = "Folder not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "folders"
)]
#[debug_handler(state = AppState)]
pub async fn get_folder(
    State(service): State<Arc<FolderService>>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return Error::from(rejection).into_response(),
    };

    match service.get_folder(id).await {
        Ok(folder) => (StatusCode::OK, Json(folder)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/folders",
    request_body = FolderRequest,
    responses(
        (status = 201, description = "Folder created successfully", body = FolderResponse),
        (status = 400, description = "Missing name", body = ErrorResponse),
        (status = 409, description = "Folder name already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "folders"
)]
#[debug_handler(state = AppState)]
pub async fn create_folder(
    State(service): State<Arc<FolderService>>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<FolderRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return Error::from(rejection).into_response(),
    };

    match service.create_folder(payload).await {
        Ok(folder) => created(&uri, folder.id, folder),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/folders/{id}",
    params(
        ("id" = i64, Path, description = "Folder ID")
    ),
    request_body = FolderRequest,
    responses(
        (status = 200, description = "Folder renamed successfully", body = FolderResponse),
        (status = 400, description = "Missing name", body = ErrorResponse),
        (status = 404, description = "Folder not found", body = ErrorResponse),
        (status = 409, description = "Folder name already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "folders"
)]
#[debug_handler(state = AppState)]
pub async fn update_folder(
    State(service): State<Arc<FolderService>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<FolderRequest>, JsonRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return Error::from(rejection).into_response(),
    };

    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return Error::from(rejection).into_response(),
    };

    match service.update_folder(id, payload).await {
        Ok(folder) => (StatusCode::OK, Json(folder)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/folders/{id}",
    params(
        ("id" = i64, Path, description = "Folder ID")
    ),
    responses(
        (status = 204, description = "Folder deleted, or did not exist; its notes lose their folder"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "folders"
)]
#[debug_handler(state = AppState)]
pub async fn delete_folder(
    State(service): State<Arc<FolderService>>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return Error::from(rejection).into_response(),
    };

    match service.delete_folder(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
