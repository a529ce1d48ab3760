pub mod account;
pub mod error;
pub mod items;
pub mod models;
pub mod password;
pub mod token;
pub mod traits;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use account::AccountService;
pub use error::AppError;
pub use items::ItemService;
pub use models::{Credentials, Item, NewItem, NewUser, User};
pub use password::PasswordHasher;
pub use token::TokenService;
pub use traits::{ItemStore, UserStore};
