use async_trait::async_trait;
use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use tokio_postgres::{NoTls, Row, Transaction};

use super::{Repository, RepositoryError, embedded::migrations, query::NoteQuery};
use crate::models::{Folder, NoteDraft, NoteFilter, NoteRow, Tag};

/// Postgres-backed repository over a shared connection pool.
#[derive(Clone)]
pub struct PgRepository {
    pool: Pool,
}

impl PgRepository {
    pub const fn new(pool: Pool) -> Self {
        Self { pool }
    }

    pub fn connect(database_dsn: &str, pool_size: usize) -> Result<Self, RepositoryError> {
        let mut cfg = Config::new();
        cfg.url = Some(database_dsn.to_string());
        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        cfg.pool = Some(PoolConfig::new(pool_size));

        let pool = cfg.create_pool(Some(Runtime::Tokio1), NoTls)?;

        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await?;
        let migrations_report = migrations::runner().run_async(&mut **conn).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }

    async fn note_rows(&self, query: NoteQuery) -> Result<Vec<NoteRow>, RepositoryError> {
        let conn = self.pool.get().await?;
        let sql = query.sql();
        tracing::debug!(%sql, "querying notes");

        let rows = conn.query(sql.as_str(), &query.params()).await?;

        Ok(rows.iter().map(note_row).collect())
    }
}

fn note_row(row: &Row) -> NoteRow {
    NoteRow {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        folder_id: row.get("folder_id"),
        folder_name: row.get("folder_name"),
        tag_id: row.get("tag_id"),
        tag_name: row.get("tag_name"),
    }
}

fn folder(row: &Row) -> Folder {
    Folder {
        id: row.get("id"),
        name: row.get("name"),
    }
}

fn tag(row: &Row) -> Tag {
    Tag {
        id: row.get("id"),
        name: row.get("name"),
    }
}

async fn replace_note_tags(
    tx: &Transaction<'_>,
    note_id: i64,
    tag_ids: &[i64],
) -> Result<(), RepositoryError> {
    tx.execute("DELETE FROM notes_tags WHERE note_id = $1", &[&note_id])
        .await?;

    if !tag_ids.is_empty() {
        tx.execute(
            "INSERT INTO notes_tags (note_id, tag_id) \
             SELECT $1, UNNEST($2::BIGINT[]) ON CONFLICT DO NOTHING",
            &[&note_id, &tag_ids],
        )
        .await?;
    }

    Ok(())
}

#[async_trait]
impl Repository for PgRepository {
    async fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<NoteRow>, RepositoryError> {
        self.note_rows(NoteQuery::filtered(filter)).await
    }

    async fn get_note(&self, id: i64) -> Result<Vec<NoteRow>, RepositoryError> {
        self.note_rows(NoteQuery::by_id(id)).await
    }

    async fn insert_note(&self, draft: &NoteDraft) -> Result<i64, RepositoryError> {
        let mut conn = self.pool.get().await?;
        let tx = conn.transaction().await?;

        let row = tx
            .query_one(
                "INSERT INTO notes (title, content, folder_id) VALUES ($1, $2, $3) RETURNING id",
                &[&draft.title, &draft.content, &draft.folder_id],
            )
            .await?;
        let id: i64 = row.get("id");

        replace_note_tags(&tx, id, &draft.tag_ids).await?;
        tx.commit().await?;

        Ok(id)
    }

    async fn update_note(
        &self,
        id: i64,
        draft: &NoteDraft,
    ) -> Result<Option<i64>, RepositoryError> {
        let mut conn = self.pool.get().await?;
        let tx = conn.transaction().await?;

        let row = tx
            .query_opt(
                "UPDATE notes SET title = $1, content = $2, folder_id = $3 WHERE id = $4 RETURNING id",
                &[&draft.title, &draft.content, &draft.folder_id, &id],
            )
            .await?;

        if row.is_none() {
            return Ok(None);
        }

        replace_note_tags(&tx, id, &draft.tag_ids).await?;
        tx.commit().await?;

        Ok(Some(id))
    }

    async fn delete_note(&self, id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await?;
        let tx = conn.transaction().await?;

        tx.execute("DELETE FROM notes_tags WHERE note_id = $1", &[&id])
            .await?;
        tx.execute("DELETE FROM notes WHERE id = $1", &[&id]).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn list_folders(&self) -> Result<Vec<Folder>, RepositoryError> {
        let conn = self.pool.get().await?;
        let rows = conn
            .query("SELECT id, name FROM folders ORDER BY id", &[])
            .await?;

        Ok(rows.iter().map(folder).collect())
    }

    async fn get_folder(&self, id: i64) -> Result<Option<Folder>, RepositoryError> {
        let conn = self.pool.get().await?;
        let row = conn
            .query_opt("SELECT id, name FROM folders WHERE id = $1", &[&id])
            .await?;

        Ok(row.as_ref().map(folder))
    }

    async fn insert_folder(&self, name: &str) -> Result<Folder, RepositoryError> {
        let conn = self.pool.get().await?;
        let row = conn
            .query_one(
                "INSERT INTO folders (name) VALUES ($1) RETURNING id, name",
                &[&name],
            )
            .await?;

        Ok(folder(&row))
    }

    async fn update_folder(&self, id: i64, name: &str) -> Result<Option<Folder>, RepositoryError> {
        let conn = self.pool.get().await?;
        let row = conn
            .query_opt(
                "UPDATE folders SET name = $1 WHERE id = $2 RETURNING id, name",
                &[&name, &id],
            )
            .await?;

        Ok(row.as_ref().map(folder))
    }

    async fn delete_folder(&self, id: i64) -> Result<(), RepositoryError> {
        let conn = self.pool.get().await?;
        conn.execute("DELETE FROM folders WHERE id = $1", &[&id])
            .await?;

        Ok(())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, RepositoryError> {
        let conn = self.pool.get().await?;
        let rows = conn
            .query("SELECT id, name FROM tags ORDER BY id", &[])
            .await?;

        Ok(rows.iter().map(tag).collect())
    }

    async fn get_tag(&self, id: i64) -> Result<Option<Tag>, RepositoryError> {
        let conn = self.pool.get().await?;
        let row = conn
            .query_opt("SELECT id, name FROM tags WHERE id = $1", &[&id])
            .await?;

        Ok(row.as_ref().map(tag))
    }

    async fn insert_tag(&self, name: &str) -> Result<Tag, RepositoryError> {
        let conn = self.pool.get().await?;
        let row = conn
            .query_one(
                "INSERT INTO tags (name) VALUES ($1) RETURNING id, name",
                &[&name],
            )
            .await?;

        Ok(tag(&row))
    }

    async fn update_tag(&self, id: i64, name: &str) -> Result<Option<Tag>, RepositoryError> {
        let conn = self.pool.get().await?;
        let row = conn
            .query_opt(
                "UPDATE tags SET name = $1 WHERE id = $2 RETURNING id, name",
                &[&name, &id],
            )
            .await?;

        Ok(row.as_ref().map(tag))
    }

    async fn delete_tag(&self, id: i64) -> Result<(), RepositoryError> {
        let conn = self.pool.get().await?;
        conn.execute("DELETE FROM tags WHERE id = $1", &[&id])
            .await?;

        Ok(())
    }
}
