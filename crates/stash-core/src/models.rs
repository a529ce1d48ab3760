use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::AppError;

/// Field injected into every stored item, holding the creator's user id.
pub const OWNER_FIELD: &str = "owner";

/// Field carrying the store-generated item id on output.
pub const ID_FIELD: &str = "_id";

/// Login name and plaintext password as submitted by a client.
#[derive(Clone, Default)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    /// Both fields must be non-empty. No further rules apply.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.login.is_empty() {
            return Err(AppError::Validation("login must not be empty".into()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("password must not be empty".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A registered account as stored in the credential store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Hex-encoded PBKDF2-HMAC-SHA256 output
    pub password_hash: String,
    /// Hex-encoded random salt
    pub salt: String,
    /// PBKDF2 rounds used when this password was hashed
    pub iterations: u32,
    pub created_at: DateTime<Utc>,
}

/// DTO for inserting a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub salt: String,
    pub iterations: u32,
}

/// A stored item: client-supplied fields tagged with their owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: Uuid,
    pub owner: Uuid,
    pub fields: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Render the item as returned to clients: the stored fields plus `owner` and `_id`.
    pub fn to_document(&self) -> Value {
        let mut doc = self.fields.clone();
        doc.insert(OWNER_FIELD.into(), Value::String(self.owner.to_string()));
        doc.insert(ID_FIELD.into(), Value::String(self.id.to_string()));
        Value::Object(doc)
    }
}

/// DTO for inserting a new item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub owner: Uuid,
    /// Document to persist, `owner` already injected.
    pub document: Map<String, Value>,
}

impl NewItem {
    /// Build an item from a client body, stamping it with `owner`.
    ///
    /// The body must be a JSON object. A client-supplied `owner` is overwritten;
    /// every other field is kept as sent. Strings and keys may not contain
    /// U+0000, which the JSONB column cannot store.
    pub fn new(owner: Uuid, body: Value) -> Result<Self, AppError> {
        let Value::Object(mut document) = body else {
            return Err(AppError::Validation(
                "item body must be a JSON object".into(),
            ));
        };
        if document
            .iter()
            .any(|(key, value)| key.contains('\0') || contains_nul(value))
        {
            return Err(AppError::Validation(
                "item fields must not contain NUL characters".into(),
            ));
        }
        document.insert(OWNER_FIELD.into(), Value::String(owner.to_string()));
        Ok(Self { owner, document })
    }
}

fn contains_nul(value: &Value) -> bool {
    match value {
        Value::String(s) => s.contains('\0'),
        Value::Array(values) => values.iter().any(contains_nul),
        Value::Object(map) => map
            .iter()
            .any(|(key, value)| key.contains('\0') || contains_nul(value)),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}
