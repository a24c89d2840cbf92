use std::sync::Arc;

use super::required;
use crate::{
    dto::{TagRequest, TagResponse},
    error::Error,
    repository::Repository,
};

#[derive(Clone)]
pub struct TagService {
    repo: Arc<dyn Repository>,
}

impl TagService {
    pub const fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    pub async fn list_tags(&self) -> Result<Vec<TagResponse>, Error> {
        let tags = self.repo.list_tags().await?;

        Ok(tags.into_iter().map(Into::into).collect())
    }

    pub async fn get_tag(&self, id: i64) -> Result<TagResponse, Error> {
        self.repo
            .get_tag(id)
            .await?
            .map(Into::into)
            .ok_or(Error::NotFound { resource: "Tag", id })
    }

    pub async fn create_tag(&self, request: TagRequest) -> Result<TagResponse, Error> {
        let name = required(request.name, "name")?;
        let tag = self.repo.insert_tag(&name).await?;

        tracing::info!(tag_id = tag.id, "tag created");

        Ok(tag.into())
    }

    pub async fn update_tag(&self, id: i64, request: TagRequest) -> Result<TagResponse, Error> {
        let name = required(request.name, "name")?;

        self.repo
            .update_tag(id, &name)
            .await?
            .map(Into::into)
            .ok_or(Error::NotFound { resource: "Tag", id })
    }

    /// Deleting a tag also detaches it from every note.
    pub async fn delete_tag(&self, id: i64) -> Result<(), Error> {
        self.repo.delete_tag(id).await.map_err(Into::into)
    }
}
