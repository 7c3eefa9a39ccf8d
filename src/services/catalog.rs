//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookId},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every book in the catalog
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.find_all().await
    }

    /// Get a book by its external id
    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        ensure_well_formed(id)?;
        self.repository.find_by_id(id).await
    }

    /// Validate a new book, assign it a fresh id and store it.
    /// Any client-supplied id is overwritten.
    pub async fn create_book(&self, mut book: Book) -> AppResult<Book> {
        if let Some(message) = book.validation_message() {
            return Err(AppError::InvalidData(message));
        }

        let id = BookId::generate();
        book.id = Some(id);
        self.repository.insert(&book).await?;

        tracing::info!("Catalog create: book id={}", id);
        Ok(book)
    }

    /// Replace all fields of an existing book. The record is stored as sent, without validation.
    pub async fn replace_book(&self, book: Book) -> AppResult<()> {
        if book.id.is_none() {
            return Err(AppError::InvalidJson);
        }
        self.repository.replace(&book).await
    }

    /// Delete a book by its external id
    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        ensure_well_formed(id)?;
        self.repository.delete_by_id(id).await?;

        tracing::info!("Catalog delete: book id={}", id);
        Ok(())
    }
}

fn ensure_well_formed(id: &str) -> AppResult<()> {
    if !BookId::is_well_formed(id) {
        return Err(AppError::InvalidId(id.to_string()));
    }
    Ok(())
}
