pub mod config;
pub mod database;
pub mod item_repository;
pub mod user_repository;

pub use config::DatabaseConfig;
pub use database::Database;
pub use item_repository::ItemRepository;
pub use user_repository::UserRepository;
