pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod hydration;
pub mod models;
pub mod repository;
pub mod service;

use axum::{Router, routing::get};
use axum_macros::FromRef;
use tower_http::trace::TraceLayer;
use utoipa::{OpenApi, openapi::Server};
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use handlers::rest;
use repository::Repository;
use service::{FolderService, NoteService, TagService};

/// Shared handler state. Each handler extracts only the service it needs.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub notes: Arc<NoteService>,
    pub folders: Arc<FolderService>,
    pub tags: Arc<TagService>,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self {
            notes: Arc::new(NoteService::new(repo.clone())),
            folders: Arc::new(FolderService::new(repo.clone())),
            tags: Arc::new(TagService::new(repo)),
        }
    }
}

/// Builds the full HTTP application with resource routes under `api_prefix`.
pub fn app(state: AppState, api_prefix: &str) -> Router {
    let prefix = api_prefix.trim_matches('/');
    let mut api_doc = rest::ApiDoc::openapi();

    let router = if prefix.is_empty() {
        Router::new().merge(rest::router())
    } else {
        let prefix = format!("/{prefix}");
        api_doc.servers = Some(vec![Server::new(prefix.clone())]);
        Router::new().nest(&prefix, rest::router())
    };

    router
        .route("/", get(rest::root))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", api_doc))
        .fallback(rest::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
