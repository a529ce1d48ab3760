use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Item, NewItem};
use crate::traits::ItemStore;

/// Per-user item access. Callers pass an owner id that has already been authenticated.
#[derive(Debug, Clone)]
pub struct ItemService<I>
where
    I: ItemStore,
{
    store: I,
}

impl<I> ItemService<I>
where
    I: ItemStore,
{
    pub fn new(store: I) -> Self {
        Self { store }
    }

    /// Stamp `body` with `owner` and persist it. Returns the new item id.
    pub async fn add(&self, owner: Uuid, body: serde_json::Value) -> Result<Uuid, AppError> {
        let item = NewItem::new(owner, body)?;
        let id = self.store.insert_item(&item).await?;
        tracing::info!(item_id = %id, owner = %owner, "Saved item");
        Ok(id)
    }

    /// Every item owned by `owner`.
    pub async fn list(&self, owner: Uuid) -> Result<Vec<Item>, AppError> {
        let items = self.store.list_by_owner(owner).await?;
        tracing::debug!(owner = %owner, count = items.len(), "Listed items");
        Ok(items)
    }
}
