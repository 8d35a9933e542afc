//! Data model for the todo service.
//! - Defines the `TodoItem` record and the input shapes used by front ends.
//! - Validation lives here so every caller enforces the same rules.

pub mod errors;
pub mod todo;

pub use errors::ModelError;
pub use todo::{validate_title, NewTodo, TodoItem, TodoPatch};
