// Core storage modules
pub mod db;
pub mod postgres_backend;
pub mod sqlite_backend;
pub mod r#trait;

pub use postgres_backend::PostgresStore;
pub use r#trait::DataStore;
pub use sqlite_backend::SqliteStore;
