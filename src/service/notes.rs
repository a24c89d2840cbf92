use std::sync::Arc;

use super::{required, storable};
use crate::{
    dto::{NoteListParams, NoteRequest, NoteResponse},
    error::Error,
    hydration::hydrate,
    models::{NoteDraft, NoteFilter},
    repository::Repository,
};

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn Repository>,
}

impl NoteService {
    pub const fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    pub async fn list_notes(&self, params: NoteListParams) -> Result<Vec<NoteResponse>, Error> {
        let search_term = params
            .search_term
            .filter(|term| !term.is_empty())
            .map(|term| storable(term, "searchTerm"))
            .transpose()?;

        let filter = NoteFilter {
            search_term,
            folder_id: params.folder_id,
            tag_id: params.tag_id,
        };

        let rows = self.repo.list_notes(&filter).await?;

        Ok(hydrate(rows).into_iter().map(Into::into).collect())
    }

    pub async fn get_note(&self, id: i64) -> Result<NoteResponse, Error> {
        let rows = self.repo.get_note(id).await?;

        hydrate(rows)
            .into_iter()
            .next()
            .map(Into::into)
            .ok_or(Error::NotFound { resource: "Note", id })
    }

    pub async fn create_note(&self, request: NoteRequest) -> Result<NoteResponse, Error> {
        let draft = draft(request)?;
        let id = self.repo.insert_note(&draft).await?;

        tracing::info!(note_id = id, tags = draft.tag_ids.len(), "note created");

        self.get_note(id).await
    }

    pub async fn update_note(&self, id: i64, request: NoteRequest) -> Result<NoteResponse, Error> {
        let draft = draft(request)?;

        match self.repo.update_note(id, &draft).await? {
            Some(id) => self.get_note(id).await,
            None => Err(Error::NotFound { resource: "Note", id }),
        }
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), Error> {
        self.repo.delete_note(id).await.map_err(Into::into)
    }
}

/// Copies the writable fields off a request. A missing tag list means no tags.
fn draft(request: NoteRequest) -> Result<NoteDraft, Error> {
    let title = required(request.title, "title")?;
    let content = request
        .content
        .map(|content| storable(content, "content"))
        .transpose()?;

    let mut tag_ids = request.tags.unwrap_or_default();
    tag_ids.sort_unstable();
    tag_ids.dedup();

    Ok(NoteDraft {
        title,
        content,
        folder_id: request.folder_id,
        tag_ids,
    })
}
