use std::sync::Arc;

use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use stash_core::token::credential_from_header;

use crate::error::ApiError;
use crate::state::AppState;

/// The user a request was authenticated as, taken from the token's subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

/// Middleware that validates the access token in `Authorization` and attaches
/// the caller as an [`AuthUser`] extension.
///
/// Accepts the raw token as well as `Bearer <token>`.
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(value) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return ApiError::unauthorized("missing Authorization header").into_response();
    };

    match state.tokens.verify(credential_from_header(value)) {
        Ok(user_id) => {
            request.extensions_mut().insert(AuthUser(user_id));
            next.run(request).await
        }
        Err(err) => ApiError(err).into_response(),
    }
}
