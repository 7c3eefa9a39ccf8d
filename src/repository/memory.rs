//! In-process books repository.
//!
//! Keeps records in insertion order, which stands in for the store's
//! natural order. Used by the test harness.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::BookRepository;
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookId},
};

#[derive(Default)]
pub struct InMemoryBookRepository {
    books: RwLock<IndexMap<BookId, Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(id: &str) -> AppResult<BookId> {
        id.parse().map_err(|_| AppError::NotFound(id.to_string()))
    }

    fn assigned_id(book: &Book) -> AppResult<BookId> {
        book.id
            .ok_or_else(|| AppError::Internal("Book id must be assigned before storing".to_string()))
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Book> {
        let key = Self::key(id)?;
        self.books
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    async fn insert(&self, book: &Book) -> AppResult<()> {
        let key = Self::assigned_id(book)?;
        let mut books = self.books.write().await;
        if books.contains_key(&key) {
            return Err(AppError::Internal(format!("duplicate key: {}", key)));
        }
        books.insert(key, book.clone());
        Ok(())
    }

    async fn replace(&self, book: &Book) -> AppResult<()> {
        let key = Self::assigned_id(book)?;
        match self.books.write().await.get_mut(&key) {
            Some(stored) => {
                *stored = book.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(key.to_string())),
        }
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        let key = Self::key(id)?;
        self.books
            .write()
            .await
            .shift_remove(&key)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    async fn clear(&self) -> AppResult<()> {
        self.books.write().await.clear();
        Ok(())
    }
}
