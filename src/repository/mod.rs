mod embedded;
#[cfg(test)]
pub(crate) mod memory;
mod postgres;
mod query;

use async_trait::async_trait;
use tokio_postgres::error::SqlState;

use crate::models::{Folder, NoteDraft, NoteFilter, NoteRow, Tag};

pub use postgres::PgRepository;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(tokio_postgres::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("failed to create connection pool: {0}")]
    CreatePool(#[from] deadpool_postgres::CreatePoolError),

    #[error("migration failed: {0}")]
    Migration(#[from] refinery::Error),

    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unstorable text: {0}")]
    InvalidText(String),
}

impl From<tokio_postgres::Error> for RepositoryError {
    fn from(err: tokio_postgres::Error) -> Self {
        match err.code().cloned() {
            Some(code) if code == SqlState::FOREIGN_KEY_VIOLATION => {
                Self::InvalidReference(constraint_detail(&err))
            }
            Some(code) if code == SqlState::UNIQUE_VIOLATION => {
                Self::Conflict(constraint_detail(&err))
            }
            Some(code) if code == SqlState::CHARACTER_NOT_IN_REPERTOIRE => {
                Self::InvalidText(constraint_detail(&err))
            }
            _ => Self::Database(err),
        }
    }
}

// Postgres puts the offending key in DETAIL, e.g.
// `Key (folder_id)=(7) is not present in table "folders".`
fn constraint_detail(err: &tokio_postgres::Error) -> String {
    err.as_db_error().map_or_else(
        || err.to_string(),
        |db| db.detail().unwrap_or_else(|| db.message()).to_string(),
    )
}

/// Storage seam for notes, folders and tags.
///
/// Note reads return flat joined rows; regrouping them is left to
/// [`crate::hydration::hydrate`]. Note writes replace the whole tag set and
/// either apply completely or not at all.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Rows for every note matching `filter`, ascending by note id.
    async fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<NoteRow>, RepositoryError>;

    /// Rows for a single note; empty when the note does not exist.
    async fn get_note(&self, id: i64) -> Result<Vec<NoteRow>, RepositoryError>;

    async fn insert_note(&self, draft: &NoteDraft) -> Result<i64, RepositoryError>;

    /// Returns `None` when no note has this id.
    async fn update_note(&self, id: i64, draft: &NoteDraft)
    -> Result<Option<i64>, RepositoryError>;

    /// Removes the note and its tag links. Missing ids are not an error.
    async fn delete_note(&self, id: i64) -> Result<(), RepositoryError>;

    async fn list_folders(&self) -> Result<Vec<Folder>, RepositoryError>;

    async fn get_folder(&self, id: i64) -> Result<Option<Folder>, RepositoryError>;

    async fn insert_folder(&self, name: &str) -> Result<Folder, RepositoryError>;

    async fn update_folder(&self, id: i64, name: &str) -> Result<Option<Folder>, RepositoryError>;

    /// Notes filed under the folder are left without a folder.
    async fn delete_folder(&self, id: i64) -> Result<(), RepositoryError>;

    async fn list_tags(&self) -> Result<Vec<Tag>, RepositoryError>;

    async fn get_tag(&self, id: i64) -> Result<Option<Tag>, RepositoryError>;

    async fn insert_tag(&self, name: &str) -> Result<Tag, RepositoryError>;

    async fn update_tag(&self, id: i64, name: &str) -> Result<Option<Tag>, RepositoryError>;

    /// Also detaches the tag from every note.
    async fn delete_tag(&self, id: i64) -> Result<(), RepositoryError>;
}
