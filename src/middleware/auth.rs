use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::AppState;

/// Bearer-token gate for mutating routes.
///
/// One shared secret per deployment environment; no per-user identity and no
/// expiry. A missing header is 403, a mismatched token is 401, and on a match
/// the wrapped handler runs exactly once.
pub async fn bearer_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::forbidden("Forbidden."))?;

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .unwrap_or_default();

    if token.is_empty() || token != state.config.auth.bearer_token {
        return Err(ApiError::unauthorized("Unauthorized."));
    }

    Ok(next.run(request).await)
}
