use axum::extract::State;
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::extract::Json;
use crate::records::Table;
use crate::AppState;

/// POST /subscribe - create a subscriber record and return its id.
///
/// Accepts either a bare JSON object of fields or an object carrying a nested
/// `payload` object.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let fields = subscriber_fields(body)
        .ok_or_else(|| ApiError::bad_request("Subscriber payload must be a JSON object."))?;

    let record = state.records.create(Table::Subscribers, fields).await.map_err(|err| {
        tracing::error!(error = %err, "subscriber creation failed");
        ApiError::internal_server_error("Subscriber creation failed.")
    })?;
    Ok(Json(json!({ "id": record.id })))
}

fn subscriber_fields(body: Value) -> Option<Map<String, Value>> {
    let Value::Object(mut map) = body else {
        return None;
    };
    match map.remove("payload") {
        Some(Value::Object(payload)) => Some(payload),
        Some(_) => None,
        None => Some(map),
    }
}
