mod folders;
mod notes;
mod tags;

pub use folders::FolderService;
pub use notes::NoteService;
pub use tags::TagService;

use crate::error::Error;

/// Returns the field value if it holds something other than whitespace.
fn required(value: Option<String>, field: &str) -> Result<String, Error> {
    match value {
        Some(value) if !value.trim().is_empty() => storable(value, field),
        _ => Err(Error::missing_field(field)),
    }
}

// Postgres text cannot hold NUL.
fn storable(value: String, field: &str) -> Result<String, Error> {
    if value.contains('\0') {
        return Err(Error::Validation(format!(
            "`{field}` must not contain NUL characters"
        )));
    }
    Ok(value)
}
