pub mod folders;
pub mod notes;
pub mod tags;


use axum::{
    Json, Router,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::Serialize;
use utoipa::OpenApi;

use crate::{
    AppState,
    dto::{
        FolderRequest, FolderResponse, NoteRequest, NoteResponse, TagRequest, TagResponse,
    },
    error::ErrorResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        notes::list_notes,
        notes::get_note,
        notes::create_note,
        notes::update_note,
        notes::delete_note,
        folders::list_folders,
        folders::get_folder,
        folders::create_folder,
        folders::update_folder,
        folders::delete_folder,
        tags::list_tags,
        tags::get_tag,
        tags::create_tag,
        tags::update_tag,
        tags::delete_tag
    ),
    components(schemas(
        NoteResponse,
        NoteRequest,
        FolderResponse,
        FolderRequest,
        TagResponse,
        TagRequest,
        ErrorResponse
    )),
    tags(
        (name = "notes", description = "Notes management API"),
        (name = "folders", description = "Folders notes can be filed under"),
        (name = "tags", description = "Tags attachable to notes")
    )
)]
pub struct ApiDoc;

/// Resource routes, meant to be nested under the API prefix.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notes", get(notes::list_notes))
        .route("/notes", post(notes::create_note))
        .route("/notes/{id}", get(notes::get_note))
        .route("/notes/{id}", put(notes::update_note))
        .route("/notes/{id}", delete(notes::delete_note))
        .route("/folders", get(folders::list_folders))
        .route("/folders", post(folders::create_folder))
        .route("/folders/{id}", get(folders::get_folder))
        .route("/folders/{id}", put(folders::update_folder))
        .route("/folders/{id}", delete(folders::delete_folder))
        .route("/tags", get(tags::list_tags))
        .route("/tags", post(tags::create_tag))
        .route("/tags/{id}", get(tags::get_tag))
        .route("/tags/{id}", put(tags::update_tag))
        .route("/tags/{id}", delete(tags::delete_tag))
}

/// 201 response whose `Location` is the collection path the request was
/// made on, followed by the new id.
fn created<T: Serialize>(uri: &Uri, id: i64, body: T) -> Response {
    let location = format!("{}/{id}", uri.path().trim_end_matches('/'));

    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response()
}

pub async fn root() -> Response {
    (StatusCode::OK, "Noteful API is up").into_response()
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(StatusCode::NOT_FOUND, "Not found")),
    )
        .into_response()
}
