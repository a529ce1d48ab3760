use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Router, middleware};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{AuthUser, require_token};
use crate::dto::{CredentialsRequest, HealthResponse, ItemListResponse};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Response header carrying the access token issued by `/login`.
pub const TOKEN_HEADER: &str = "authentication";

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/items", get(list_items).post(add_item))
        .layer(middleware::from_fn_with_state(state.clone(), require_token));

    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(api).with_state(state)
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Empty login or password", body = crate::dto::ErrorResponse),
        (status = 409, description = "Login already taken", body = crate::dto::ErrorResponse),
    ),
    tag = "accounts"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<axum::Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let axum::Json(body) = body?;
    state.accounts.register(&body.into()).await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Logged in; token returned in a response header",
            headers(("Authentication" = String, description = "Access token"))),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    tag = "accounts"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<axum::Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let axum::Json(body) = body?;
    let token = state.accounts.login(&body.into()).await?;
    Ok([(TOKEN_HEADER, token)])
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/items",
    request_body(content = Object, description = "Any JSON object"),
    responses(
        (status = 201, description = "Item stored"),
        (status = 400, description = "Body is not a JSON object", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "items"
)]
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(owner)): Extension<AuthUser>,
    body: Result<axum::Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let axum::Json(body) = body?;
    state.items.add(owner, body).await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "Items owned by the caller", body = ItemListResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "items"
)]
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(owner)): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.items.list(owner).await?;
    Ok(axum::Json(ItemListResponse::from(items)))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let healthy = match state.db.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            false
        }
    };

    let (status, response) = if healthy {
        (
            StatusCode::OK,
            HealthResponse {
                status: "healthy",
                database: "ok",
            },
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            HealthResponse {
                status: "unhealthy",
                database: "error",
            },
        )
    };

    (status, axum::Json(response))
}
