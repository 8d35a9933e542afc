use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A single todo record.
/// - `id`: unique, assigned by the store, immutable after creation
/// - `title`: non-empty, stored trimmed
/// - `description`: free text, may be empty, never null
/// - `completed`: defaults to false at creation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl TodoItem {
    /// Construct a new item with `completed = false`. The title is trimmed
    /// of surrounding whitespace; an empty or whitespace-only title is a
    /// validation error.
    pub fn new(id: u64, title: &str, description: &str) -> Result<Self, ModelError> {
        let title = validate_title(title)?;
        Ok(Self {
            id,
            title,
            description: description.to_string(),
            completed: false,
        })
    }
}

/// Trim and validate a title. Shared by creation and update paths so both
/// enforce the same non-empty rule.
pub fn validate_title(title: &str) -> Result<String, ModelError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation(
            "title cannot be empty or whitespace".into(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Creation input: title is required, description defaults to empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Update input: unset fields leave the stored value unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
