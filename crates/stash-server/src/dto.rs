use serde::{Deserialize, Serialize};

use stash_core::models::{Credentials, Item};

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Body of `/register` and `/login`. Missing fields read as empty strings.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
}

impl From<CredentialsRequest> for Credentials {
    fn from(req: CredentialsRequest) -> Self {
        Credentials::new(req.login, req.password)
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ItemListResponse {
    /// Stored documents, each with its `owner` and `_id`
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<serde_json::Value>,
}

impl From<Vec<Item>> for ItemListResponse {
    fn from(items: Vec<Item>) -> Self {
        Self {
            items: items.iter().map(Item::to_document).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
