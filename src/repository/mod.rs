//! Repository layer for database operations

pub mod books;
pub mod memory;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mongodb::{bson::doc, options::ClientOptions, Client, Database};

use crate::{config::DatabaseConfig, error::AppResult, models::Book};

pub use books::MongoBookRepository;
pub use memory::InMemoryBookRepository;

/// Name of the collection holding book documents
pub const COLLECTION: &str = "books";

/// Storage operations over the `books` collection.
///
/// Ids are taken in their external (hex string) form. An id that does not
/// match any record, including one that is not valid hex, yields
/// `AppError::NotFound`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All records in the store's natural order
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Book>;

    /// Store a new record; `book.id` must already be assigned
    async fn insert(&self, book: &Book) -> AppResult<()>;

    /// Overwrite every field of the record with the same id
    async fn replace(&self, book: &Book) -> AppResult<()>;

    async fn delete_by_id(&self, id: &str) -> AppResult<()>;

    /// Remove every record. Test harness use only.
    async fn clear(&self) -> AppResult<()>;
}

/// Shared, concurrency-safe repository handle
pub type Repository = Arc<dyn BookRepository>;

/// Open the MongoDB connection and check it answers a ping
pub async fn connect(config: &DatabaseConfig) -> AppResult<Database> {
    let mut options = ClientOptions::parse(config.uri()).await?;
    let timeout = Duration::from_secs(config.connect_timeout_secs);
    options.connect_timeout = Some(timeout);
    options.server_selection_timeout = Some(timeout);
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

    let client = Client::with_options(options)?;
    let database = client.database(&config.name);
    database.run_command(doc! { "ping": 1 }, None).await?;

    Ok(database)
}
