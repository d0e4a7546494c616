use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::error::ApiError;
use crate::records::{Record, Table};
use crate::AppState;

/// GET /posts - all post records, newest first by the `Date` field.
///
/// The store paginates internally; every page is drained before the response
/// is produced, so clients always see one well-formed JSON array.
pub async fn fetch_posts(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    let records = state.records.select(Table::Posts).sort_desc("Date").all().await?;
    Ok(Json(records))
}

/// GET /post/:id - a single post record, or an explicit 404/502.
pub async fn fetch_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let record = state.records.find(Table::Posts, &id).await?;
    Ok(Json(record))
}
