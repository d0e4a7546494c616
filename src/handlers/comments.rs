use axum::extract::State;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::extract::Json;
use crate::records::Table;
use crate::AppState;

/// GET /comments - deliberately unimplemented; an explicit 501 so clients can
/// tell "not supported" from "no comments".
pub async fn fetch_comments() -> Result<Json<Value>, ApiError> {
    Err(ApiError::not_implemented("Comment listing is not implemented."))
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub payload: Map<String, Value>,
}

/// POST /comment - create a comment record from the nested `payload` fields
/// and return the created record's id.
pub async fn post_comment(
    State(state): State<AppState>,
    Json(req): Json<CommentRequest>,
) -> Result<Json<Value>, ApiError> {
    let record = state.records.create(Table::Comments, req.payload).await.map_err(|err| {
        tracing::error!(error = %err, "comment creation failed");
        ApiError::internal_server_error("Comment creation failed.")
    })?;
    Ok(Json(json!({ "id": record.id })))
}
