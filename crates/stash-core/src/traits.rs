use std::future::Future;

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Item, NewItem, NewUser, User};

/// Persists accounts and looks them up by username.
pub trait UserStore: Send + Sync + Clone {
    /// Insert a new user. Returns the generated id.
    ///
    /// Must fail with [`AppError::Conflict`] when the username is taken and
    /// must leave the existing record untouched.
    fn create_user(&self, user: &NewUser) -> impl Future<Output = Result<Uuid, AppError>> + Send;

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;
}

/// Persists owner-tagged items.
pub trait ItemStore: Send + Sync + Clone {
    /// Save a new item. Returns the generated id.
    fn insert_item(&self, item: &NewItem) -> impl Future<Output = Result<Uuid, AppError>> + Send;

    /// All items belonging to `owner`, oldest first.
    fn list_by_owner(&self, owner: Uuid)
    -> impl Future<Output = Result<Vec<Item>, AppError>> + Send;
}
