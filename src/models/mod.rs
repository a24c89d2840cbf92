/// One row of the note listing join (notes, folders, notes_tags, tags).
///
/// A note with N tags yields N rows; a note without tags yields a single row
/// whose tag columns are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
    pub folder_name: Option<String>,
    pub tag_id: Option<i64>,
    pub tag_name: Option<String>,
}

/// A note regrouped from its joined rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub folder: Option<Folder>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Filters accepted by the note listing query. `None` disables a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub search_term: Option<String>,
    pub folder_id: Option<i64>,
    pub tag_id: Option<i64>,
}

/// Validated field set written on note insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
    /// Deduplicated, ascending tag ids.
    pub tag_ids: Vec<i64>,
}
