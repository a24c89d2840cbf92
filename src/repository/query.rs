use tokio_postgres::types::ToSql;

use crate::models::NoteFilter;

const NOTE_SELECT: &str = "\
SELECT notes.id, notes.title, notes.content, \
folders.id AS folder_id, folders.name AS folder_name, \
tags.id AS tag_id, tags.name AS tag_name \
FROM notes \
LEFT JOIN folders ON notes.folder_id = folders.id \
LEFT JOIN notes_tags ON notes.id = notes_tags.note_id \
LEFT JOIN tags ON notes_tags.tag_id = tags.id";

const NOTE_ORDER: &str = "ORDER BY notes.id, tags.id";

type Param = Box<dyn ToSql + Sync + Send>;

/// Joined note SELECT with a WHERE clause assembled from filters.
///
/// Conditions are ANDed together and bound as positional parameters in the
/// order they were added.
#[derive(Default)]
pub struct NoteQuery {
    conditions: Vec<String>,
    params: Vec<Param>,
}

impl NoteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: i64) -> Self {
        let mut query = Self::new();
        query.push(|n| format!("notes.id = ${n}"), id);
        query
    }

    pub fn filtered(filter: &NoteFilter) -> Self {
        let mut query = Self::new();

        if let Some(term) = filter.search_term.as_deref().filter(|t| !t.is_empty()) {
            query.push(|n| format!("notes.title LIKE ${n}"), like_pattern(term));
        }

        if let Some(folder_id) = filter.folder_id {
            query.push(|n| format!("notes.folder_id = ${n}"), folder_id);
        }

        // Sub-select so a matching note still carries all of its tags.
        if let Some(tag_id) = filter.tag_id {
            query.push(
                |n| format!("notes.id IN (SELECT note_id FROM notes_tags WHERE tag_id = ${n})"),
                tag_id,
            );
        }

        query
    }

    fn push<P>(&mut self, condition: impl FnOnce(usize) -> String, param: P)
    where
        P: ToSql + Sync + Send + 'static,
    {
        self.params.push(Box::new(param));
        self.conditions.push(condition(self.params.len()));
    }

    pub fn sql(&self) -> String {
        if self.conditions.is_empty() {
            format!("{NOTE_SELECT} {NOTE_ORDER}")
        } else {
            format!(
                "{NOTE_SELECT} WHERE {} {NOTE_ORDER}",
                self.conditions.join(" AND ")
            )
        }
    }

    pub fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| &**p as &(dyn ToSql + Sync))
            .collect()
    }
}

/// Wraps `term` for a literal substring `LIKE` match.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
