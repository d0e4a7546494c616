use axum::extract::State;
use futures::TryStreamExt;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::extract::Json;
use crate::records::{Record, RecordsClient, RecordsError, Table};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub user: Map<String, Value>,
}

/// POST /user - look up a user by email, creating one when absent.
///
/// The scan-then-create sequence is not atomic: two concurrent requests for
/// the same email can both create. Known gap; the store enforces nothing.
pub async fn fetch_user(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> Result<Json<Record>, ApiError> {
    let email = req
        .user
        .get("email")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::bad_request("User payload requires an email field."))?
        .to_string();

    if let Some(existing) = find_by_email(&state.records, &email).await? {
        return Ok(Json(existing));
    }

    let created = state.records.create(Table::Users, req.user).await?;
    Ok(Json(created))
}

/// Full-table scan of Users, page by page, stopping at the first record whose
/// `email` field matches.
async fn find_by_email(
    records: &RecordsClient,
    email: &str,
) -> Result<Option<Record>, RecordsError> {
    let pages = records.select(Table::Users).pages();
    futures::pin_mut!(pages);
    while let Some(page) = pages.try_next().await? {
        if let Some(hit) = page.into_iter().find(|r| r.field_str("email") == Some(email)) {
            return Ok(Some(hit));
        }
    }
    Ok(None)
}

#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    /// Record id of the user in the Users table.
    pub user: String,
    /// Full replacement for the user's `Likes` field, not an append.
    pub posts: Vec<String>,
}

/// POST /like - replace the user's `Likes` list and echo the stored value.
pub async fn like_post(
    State(state): State<AppState>,
    Json(req): Json<LikeRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut fields = Map::new();
    fields.insert("Likes".to_string(), json!(req.posts));

    let record = state.records.update(Table::Users, &req.user, fields).await?;
    let likes = record.field("Likes").cloned().unwrap_or_else(|| json!([]));
    Ok(Json(likes))
}
