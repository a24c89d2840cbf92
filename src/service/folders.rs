use std::sync::Arc;

use super::required;
use crate::{
    dto::{FolderRequest, FolderResponse},
    error::Error,
    repository::Repository,
};

#[derive(Clone)]
pub struct FolderService {
    repo: Arc<dyn Repository>,
}

impl FolderService {
    pub const fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    pub async fn list_folders(&self) -> Result<Vec<FolderResponse>, Error> {
        let folders = self.repo.list_folders().await?;

        Ok(folders.into_iter().map(Into::into).collect())
    }

    pub async fn get_folder(&self, id: i64) -> Result<FolderResponse, Error> {
        self.repo
            .get_folder(id)
            .await?
            .map(Into::into)
            .ok_or(Error::NotFound {
                resource: "Folder",
                id,
            })
    }

    pub async fn create_folder(&self, request: FolderRequest) -> Result<FolderResponse, Error> {
        let name = required(request.name, "name")?;
        let folder = self.repo.insert_folder(&name).await?;

        tracing::info!(folder_id = folder.id, "folder created");

        Ok(folder.into())
    }

    pub async fn update_folder(
        &self,
        id: i64,
        request: FolderRequest,
    ) -> Result<FolderResponse, Error> {
        let name = required(request.name, "name")?;

        self.repo
            .update_folder(id, &name)
            .await?
            .map(Into::into)
            .ok_or(Error::NotFound {
                resource: "Folder",
                id,
            })
    }

    pub async fn delete_folder(&self, id: i64) -> Result<(), Error> {
        self.repo.delete_folder(id).await.map_err(Into::into)
    }
}
