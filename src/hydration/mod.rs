//! Regroups flat joined note rows into nested notes.
//!
//! The listing query returns one row per (note, tag) pair with the folder
//! columns repeated on every row. [`hydrate`] folds those rows back into one
//! [`Note`] per id, keeping the order in which ids first appear and dropping
//! repeated tag ids.

use std::collections::{HashMap, HashSet};

use crate::models::{Folder, Note, NoteRow, Tag};

struct Slot {
    index: usize,
    seen_tags: HashSet<i64>,
}

/// Folds joined rows into notes.
///
/// Rows for the same note do not need to be adjacent. Folder and tag presence
/// follow their id columns alone: a row whose tag id is `None` contributes no
/// tag, and an id without a name comes through with an empty name.
pub fn hydrate<I>(rows: I) -> Vec<Note>
where
    I: IntoIterator<Item = NoteRow>,
{
    let mut notes: Vec<Note> = Vec::new();
    let mut slots: HashMap<i64, Slot> = HashMap::new();

    for row in rows {
        let slot = slots.entry(row.id).or_insert_with(|| {
            notes.push(Note {
                id: row.id,
                title: row.title,
                content: row.content,
                folder: row.folder_id.map(|id| Folder {
                    id,
                    name: row.folder_name.unwrap_or_default(),
                }),
                tags: Vec::new(),
            });

            Slot {
                index: notes.len() - 1,
                seen_tags: HashSet::new(),
            }
        });

        if let Some(id) = row.tag_id {
            if slot.seen_tags.insert(id) {
                notes[slot.index].tags.push(Tag {
                    id,
                    name: row.tag_name.unwrap_or_default(),
                });
            }
        }
    }

    notes
}
