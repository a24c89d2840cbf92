use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::{IntoParams, ToSchema};

use crate::models::{Folder, Note, Tag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FolderResponse {
    /// Folder ID
    pub id: i64,
    /// Folder name
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TagResponse {
    /// Tag ID
    pub id: i64,
    /// Tag name
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note content
    pub content: Option<String>,
    /// Folder the note is filed under, if any
    pub folder: Option<FolderResponse>,
    /// Tags attached to the note, ascending by tag ID
    pub tags: Vec<TagResponse>,
}

impl From<Folder> for FolderResponse {
    fn from(folder: Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name,
        }
    }
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            folder: note.folder.map(Into::into),
            tags: note.tags.into_iter().map(Into::into).collect(),
        }
    }
}

/// Body of note create and update requests. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteRequest {
    /// Note title, required
    pub title: Option<String>,
    /// Note content
    pub content: Option<String>,
    /// Folder ID; `null` or `""` leaves the note outside any folder
    #[serde(default, deserialize_with = "optional_id")]
    pub folder_id: Option<i64>,
    /// Tag IDs; replaces the note's whole tag set
    #[serde(default, deserialize_with = "optional_id_list")]
    pub tags: Option<Vec<i64>>,
}

/// Body of folder create and update requests.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct FolderRequest {
    /// Folder name, required
    pub name: Option<String>,
}

/// Body of tag create and update requests.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TagRequest {
    /// Tag name, required
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NoteListParams {
    /// Only notes whose title contains this text
    pub search_term: Option<String>,
    /// Only notes filed under this folder
    #[serde(default, deserialize_with = "optional_id")]
    pub folder_id: Option<i64>,
    /// Only notes carrying this tag
    #[serde(default, deserialize_with = "optional_id")]
    pub tag_id: Option<i64>,
}

// Ids arrive as JSON numbers, numeric strings, or query-string text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn parse<E: de::Error>(self) -> Result<Option<i64>, E> {
        match self {
            Self::Number(id) => Ok(Some(id)),
            Self::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                text.parse()
                    .map(Some)
                    .map_err(|_| E::custom(format!("invalid id `{text}`")))
            }
        }
    }
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer)?.map_or(Ok(None), RawId::parse)
}

fn optional_id_list<'de, D>(deserializer: D) -> Result<Option<Vec<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<Vec<RawId>>::deserialize(deserializer)? else {
        return Ok(None);
    };

    raw.into_iter()
        .map(|id| {
            id.parse::<D::Error>()?
                .ok_or_else(|| de::Error::custom("empty tag id"))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_request_accepts_numeric_and_string_ids() {
        let req: NoteRequest =
            serde_json::from_str(r#"{"title":"t","folderId":"12","tags":[1,"2"]}"#).unwrap();

        assert_eq!(req.folder_id, Some(12));
        assert_eq!(req.tags, Some(vec![1, 2]));
    }

    #[test]
    fn empty_or_null_folder_means_no_folder() {
        let empty: NoteRequest = serde_json::from_str(r#"{"title":"t","folderId":""}"#).unwrap();
        let null: NoteRequest = serde_json::from_str(r#"{"title":"t","folderId":null}"#).unwrap();
        let absent: NoteRequest = serde_json::from_str(r#"{"title":"t"}"#).unwrap();

        assert_eq!(empty.folder_id, None);
        assert_eq!(null.folder_id, None);
        assert_eq!(absent.folder_id, None);
        assert_eq!(absent.tags, None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let req: NoteRequest =
            serde_json::from_str(r#"{"title":"t","id":99,"owner":"someone"}"#).unwrap();

        assert_eq!(req.title.as_deref(), Some("t"));
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(serde_json::from_str::<NoteRequest>(r#"{"title":"t","folderId":"abc"}"#).is_err());
        assert!(serde_json::from_str::<NoteRequest>(r#"{"title":"t","tags":[""]}"#).is_err());
        assert!(serde_json::from_str::<NoteRequest>(r#"{"title":"t","tags":[1.5]}"#).is_err());
    }

    #[test]
    fn response_serializes_missing_folder_as_null() {
        let response = NoteResponse {
            id: 1,
            title: "t".to_string(),
            content: None,
            folder: None,
            tags: Vec::new(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "title": "t",
                "content": null,
                "folder": null,
                "tags": [],
            })
        );
    }
}
