use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::{NewTodo, TodoItem, TodoPatch};
use service::TodoStore;

use crate::errors::JsonApiError;

/// List all todo items in ascending ID order.
pub async fn list(State(store): State<Arc<TodoStore>>) -> Json<Vec<TodoItem>> {
    Json(store.list().await)
}

/// Create a new todo item. 201 with the item; 400 on an empty title.
pub async fn create(
    State(store): State<Arc<TodoStore>>,
    Json(input): Json<NewTodo>,
) -> Result<(StatusCode, Json<TodoItem>), JsonApiError> {
    let item = store.add(&input.title, &input.description).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Fetch a single todo item.
pub async fn get(
    State(store): State<Arc<TodoStore>>,
    Path(id): Path<u64>,
) -> Result<Json<TodoItem>, JsonApiError> {
    Ok(Json(store.get(id).await?))
}

/// Update title and/or description. Omitted fields are left unchanged.
pub async fn update(
    State(store): State<Arc<TodoStore>>,
    Path(id): Path<u64>,
    Json(patch): Json<TodoPatch>,
) -> Result<Json<TodoItem>, JsonApiError> {
    Ok(Json(store.update(id, patch).await?))
}

/// Delete a todo item. 204 on success.
pub async fn delete(
    State(store): State<Arc<TodoStore>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, JsonApiError> {
    store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mark an item complete. Idempotent.
pub async fn complete(
    State(store): State<Arc<TodoStore>>,
    Path(id): Path<u64>,
) -> Result<Json<TodoItem>, JsonApiError> {
    Ok(Json(store.mark_complete(id).await?))
}

/// Mark an item incomplete. Idempotent.
pub async fn incomplete(
    State(store): State<Arc<TodoStore>>,
    Path(id): Path<u64>,
) -> Result<Json<TodoItem>, JsonApiError> {
    Ok(Json(store.mark_incomplete(id).await?))
}
