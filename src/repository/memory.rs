use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;

use super::{Repository, RepositoryError};
use crate::models::{Folder, NoteDraft, NoteFilter, NoteRow, Tag};

struct StoredNote {
    title: String,
    content: Option<String>,
    folder_id: Option<i64>,
}

#[derive(Default)]
struct State {
    notes: BTreeMap<i64, StoredNote>,
    folders: BTreeMap<i64, String>,
    tags: BTreeMap<i64, String>,
    links: BTreeSet<(i64, i64)>,
    next_id: i64,
}

impl State {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_references(&self, draft: &NoteDraft) -> Result<(), RepositoryError> {
        if let Some(folder_id) = draft.folder_id {
            if !self.folders.contains_key(&folder_id) {
                return Err(RepositoryError::InvalidReference(format!(
                    "Key (folder_id)=({folder_id}) is not present in table \"folders\"."
                )));
            }
        }

        if let Some(tag_id) = draft.tag_ids.iter().find(|id| !self.tags.contains_key(*id)) {
            return Err(RepositoryError::InvalidReference(format!(
                "Key (tag_id)=({tag_id}) is not present in table \"tags\"."
            )));
        }

        Ok(())
    }

    fn write_note(&mut self, id: i64, draft: &NoteDraft) {
        self.notes.insert(
            id,
            StoredNote {
                title: draft.title.clone(),
                content: draft.content.clone(),
                folder_id: draft.folder_id,
            },
        );
        self.links.retain(|(note_id, _)| *note_id != id);
        self.links
            .extend(draft.tag_ids.iter().map(|tag_id| (id, *tag_id)));
    }

    fn rows_for(&self, id: i64, note: &StoredNote) -> Vec<NoteRow> {
        let base = NoteRow {
            id,
            title: note.title.clone(),
            content: note.content.clone(),
            folder_id: note.folder_id,
            folder_name: note
                .folder_id
                .and_then(|folder_id| self.folders.get(&folder_id).cloned()),
            tag_id: None,
            tag_name: None,
        };

        let tagged: Vec<NoteRow> = self
            .links
            .range((id, i64::MIN)..=(id, i64::MAX))
            .map(|(_, tag_id)| NoteRow {
                tag_id: Some(*tag_id),
                tag_name: self.tags.get(tag_id).cloned(),
                ..base.clone()
            })
            .collect();

        if tagged.is_empty() { vec![base] } else { tagged }
    }

    fn name_taken(names: &BTreeMap<i64, String>, name: &str, except: Option<i64>) -> bool {
        names
            .iter()
            .any(|(id, existing)| existing == name && Some(*id) != except)
    }
}

/// In-process stand-in for Postgres, used by router tests.
#[derive(Default)]
pub struct MemoryRepository {
    state: Mutex<State>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same folders, tags and notes as `db/seed.sql`.
    pub fn seeded() -> Self {
        let repo = Self::new();
        {
            let mut state = repo.lock();

            let folders = [
                (100, "Archive"),
                (101, "Drafts"),
                (102, "Personal"),
                (103, "Work"),
            ];
            for (id, name) in folders {
                state.folders.insert(id, name.to_string());
            }
            for (id, name) in [(1, "foo"), (2, "bar"), (3, "baz"), (4, "qux")] {
                state.tags.insert(id, name.to_string());
            }

            let notes: [(i64, &str, Option<&str>, Option<i64>, &[i64]); 10] = [
                (
                    1000,
                    "5 life lessons learned from cats",
                    Some("Lorem ipsum dolor sit amet."),
                    Some(100),
                    &[1, 2],
                ),
                (
                    1001,
                    "What the government doesn't want you to know about cats",
                    Some("Posuere sollicitudin aliquam."),
                    Some(101),
                    &[1],
                ),
                (
                    1002,
                    "The most boring article about cats you'll ever read",
                    Some("Lorem ipsum dolor sit amet."),
                    Some(102),
                    &[3],
                ),
                (
                    1003,
                    "7 things lady gaga has in common with cats",
                    Some("Posuere sollicitudin aliquam."),
                    Some(102),
                    &[1, 2, 3],
                ),
                (
                    1004,
                    "The most incredible article about cats you'll ever read",
                    Some("Lorem ipsum dolor sit amet."),
                    None,
                    &[],
                ),
                (
                    1005,
                    "10 ways cats can help you live to 100",
                    Some("Posuere sollicitudin aliquam."),
                    Some(103),
                    &[4],
                ),
                (
                    1006,
                    "9 reasons you can blame the recession on cats",
                    Some("Lorem ipsum dolor sit amet."),
                    Some(103),
                    &[],
                ),
                (
                    1007,
                    "10 ways marketers are making you addicted to cats",
                    Some("Posuere sollicitudin aliquam."),
                    None,
                    &[],
                ),
                (
                    1008,
                    "11 ways investing in cats can make you a millionaire",
                    Some("Lorem ipsum dolor sit amet."),
                    Some(100),
                    &[],
                ),
                (
                    1009,
                    "Why you should forget everything you learned about cats",
                    None,
                    Some(101),
                    &[],
                ),
            ];

            for (id, title, content, folder_id, tag_ids) in notes {
                state.write_note(
                    id,
                    &NoteDraft {
                        title: title.to_string(),
                        content: content.map(str::to_string),
                        folder_id,
                        tag_ids: tag_ids.to_vec(),
                    },
                );
            }

            state.next_id = 1009;
        }
        repo
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<NoteRow>, RepositoryError> {
        let state = self.lock();
        let term = filter.search_term.as_deref().unwrap_or_default();

        Ok(state
            .notes
            .iter()
            .filter(|(_, note)| note.title.contains(term))
            .filter(|(_, note)| filter.folder_id.is_none_or(|f| note.folder_id == Some(f)))
            .filter(|(id, _)| {
                filter
                    .tag_id
                    .is_none_or(|tag_id| state.links.contains(&(**id, tag_id)))
            })
            .flat_map(|(id, note)| state.rows_for(*id, note))
            .collect())
    }

    async fn get_note(&self, id: i64) -> Result<Vec<NoteRow>, RepositoryError> {
        let state = self.lock();

        Ok(state
            .notes
            .get(&id)
            .map(|note| state.rows_for(id, note))
            .unwrap_or_default())
    }

    async fn insert_note(&self, draft: &NoteDraft) -> Result<i64, RepositoryError> {
        let mut state = self.lock();
        state.check_references(draft)?;

        let id = state.allocate_id();
        state.write_note(id, draft);

        Ok(id)
    }

    async fn update_note(
        &self,
        id: i64,
        draft: &NoteDraft,
    ) -> Result<Option<i64>, RepositoryError> {
        let mut state = self.lock();
        if !state.notes.contains_key(&id) {
            return Ok(None);
        }
        state.check_references(draft)?;
        state.write_note(id, draft);

        Ok(Some(id))
    }

    async fn delete_note(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        state.links.retain(|(note_id, _)| *note_id != id);
        state.notes.remove(&id);

        Ok(())
    }

    async fn list_folders(&self) -> Result<Vec<Folder>, RepositoryError> {
        Ok(self
            .lock()
            .folders
            .iter()
            .map(|(id, name)| Folder {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn get_folder(&self, id: i64) -> Result<Option<Folder>, RepositoryError> {
        Ok(self
            .lock()
            .folders
            .get(&id)
            .map(|name| Folder {
                id,
                name: name.clone(),
            }))
    }

    async fn insert_folder(&self, name: &str) -> Result<Folder, RepositoryError> {
        let mut state = self.lock();
        if State::name_taken(&state.folders, name, None) {
            return Err(RepositoryError::Conflict(format!(
                "Key (name)=({name}) already exists."
            )));
        }

        let id = state.allocate_id();
        state.folders.insert(id, name.to_string());

        Ok(Folder {
            id,
            name: name.to_string(),
        })
    }

    async fn update_folder(&self, id: i64, name: &str) -> Result<Option<Folder>, RepositoryError> {
        let mut state = self.lock();
        if !state.folders.contains_key(&id) {
            return Ok(None);
        }
        if State::name_taken(&state.folders, name, Some(id)) {
            return Err(RepositoryError::Conflict(format!(
                "Key (name)=({name}) already exists."
            )));
        }

        state.folders.insert(id, name.to_string());

        Ok(Some(Folder {
            id,
            name: name.to_string(),
        }))
    }

    async fn delete_folder(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        state.folders.remove(&id);
        for note in state.notes.values_mut() {
            if note.folder_id == Some(id) {
                note.folder_id = None;
            }
        }

        Ok(())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, RepositoryError> {
        Ok(self
            .lock()
            .tags
            .iter()
            .map(|(id, name)| Tag {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn get_tag(&self, id: i64) -> Result<Option<Tag>, RepositoryError> {
        Ok(self.lock().tags.get(&id).map(|name| Tag {
            id,
            name: name.clone(),
        }))
    }

    async fn insert_tag(&self, name: &str) -> Result<Tag, RepositoryError> {
        let mut state = self.lock();
        if State::name_taken(&state.tags, name, None) {
            return Err(RepositoryError::Conflict(format!(
                "Key (name)=({name}) already exists."
            )));
        }

        let id = state.allocate_id();
        state.tags.insert(id, name.to_string());

        Ok(Tag {
            id,
            name: name.to_string(),
        })
    }

    async fn update_tag(&self, id: i64, name: &str) -> Result<Option<Tag>, RepositoryError> {
        let mut state = self.lock();
        if !state.tags.contains_key(&id) {
            return Ok(None);
        }
        if State::name_taken(&state.tags, name, Some(id)) {
            return Err(RepositoryError::Conflict(format!(
                "Key (name)=({name}) already exists."
            )));
        }

        state.tags.insert(id, name.to_string());

        Ok(Some(Tag {
            id,
            name: name.to_string(),
        }))
    }

    async fn delete_tag(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        state.tags.remove(&id);
        state.links.retain(|(_, tag_id)| *tag_id != id);

        Ok(())
    }
}
