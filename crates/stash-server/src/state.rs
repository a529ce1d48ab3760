use stash_core::{AccountService, ItemService, PasswordHasher, TokenService};
use stash_db::{Database, ItemRepository, UserRepository};

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
    pub accounts: AccountService<UserRepository>,
    pub items: ItemService<ItemRepository>,
    /// Verifies tokens presented on `/items`.
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(db: Database, tokens: TokenService, hasher: PasswordHasher) -> Self {
        Self {
            accounts: AccountService::new(db.user_repo(), hasher, tokens.clone()),
            items: ItemService::new(db.item_repo()),
            db,
            tokens,
        }
    }
}
