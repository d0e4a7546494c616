use axum::{extract::State, response::Json};

use crate::error::ApiError;
use crate::records::{Record, Table};
use crate::AppState;

/// GET /tags - all tag records, unsorted, all pages concatenated.
pub async fn fetch_tags(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    let records = state.records.select(Table::Tags).all().await?;
    Ok(Json(records))
}
