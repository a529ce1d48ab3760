//! Test utilities: in-memory implementations of the store traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls. An injected error is returned
//! by the next call only.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Item, NewItem, NewUser, User};
use crate::traits::{ItemStore, UserStore};

// ---------------------------------------------------------------------------
// MockUserStore
// ---------------------------------------------------------------------------

/// In-memory credential store with unique usernames.
#[derive(Clone, Default)]
pub struct MockUserStore {
    pub users: Arc<Mutex<Vec<User>>>,
    error: Arc<Mutex<Option<AppError>>>,
}

impl MockUserStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The next call fails with `error`.
    pub fn with_error(error: AppError) -> Self {
        Self {
            users: Arc::default(),
            error: Arc::new(Mutex::new(Some(error))),
        }
    }

    fn take_error(&self) -> Result<(), AppError> {
        match self.error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl UserStore for MockUserStore {
    async fn create_user(&self, user: &NewUser) -> Result<Uuid, AppError> {
        self.take_error()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(format!(
                "username '{}' is already taken",
                user.username
            )));
        }
        let id = Uuid::new_v4();
        users.push(User {
            id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            salt: user.salt.clone(),
            iterations: user.iterations,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.take_error()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}

// ---------------------------------------------------------------------------
// MockItemStore
// ---------------------------------------------------------------------------

/// In-memory item store that keeps insertion order.
#[derive(Clone, Default)]
pub struct MockItemStore {
    pub saved: Arc<Mutex<Vec<Item>>>,
    error: Arc<Mutex<Option<AppError>>>,
}

impl MockItemStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The next call fails with `error`.
    pub fn with_error(error: AppError) -> Self {
        Self {
            saved: Arc::default(),
            error: Arc::new(Mutex::new(Some(error))),
        }
    }

    fn take_error(&self) -> Result<(), AppError> {
        match self.error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl ItemStore for MockItemStore {
    async fn insert_item(&self, item: &NewItem) -> Result<Uuid, AppError> {
        self.take_error()?;
        let id = Uuid::new_v4();
        self.saved.lock().unwrap().push(Item {
            id,
            owner: item.owner,
            fields: item.document.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Item>, AppError> {
        self.take_error()?;
        let saved = self.saved.lock().unwrap();
        Ok(saved.iter().filter(|i| i.owner == owner).cloned().collect())
    }
}
