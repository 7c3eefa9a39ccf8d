//! MongoDB-backed books repository

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime as BsonDateTime},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

use super::{BookRepository, COLLECTION};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookId},
};

/// Book as stored in the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub publish_date: BsonDateTime,
    pub rating: i64,
    pub status: String,
}

impl BookDocument {
    pub fn from_book(book: &Book) -> AppResult<Self> {
        let id = book
            .id
            .ok_or_else(|| AppError::Internal("Book id must be assigned before storing".to_string()))?;

        Ok(Self {
            id: id.object_id(),
            title: book.title.clone(),
            author: book.author.clone(),
            publisher: book.publisher.clone(),
            publish_date: BsonDateTime::from_millis(book.publish_date.timestamp_millis()),
            rating: book.rating,
            status: book.status.clone(),
        })
    }

    pub fn into_book(self) -> AppResult<Book> {
        let millis = self.publish_date.timestamp_millis();
        let publish_date = Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
            AppError::Internal(format!("Stored publish_date out of range for book {}", self.id))
        })?;

        Ok(Book {
            id: Some(BookId::from(self.id)),
            title: self.title,
            author: self.author,
            publisher: self.publisher,
            publish_date,
            rating: self.rating,
            status: self.status,
        })
    }
}

#[derive(Clone)]
pub struct MongoBookRepository {
    collection: Collection<BookDocument>,
}

impl MongoBookRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection::<BookDocument>(COLLECTION),
        }
    }

    /// Storage id for an external id; non-hex input matches nothing
    fn object_id(id: &str) -> AppResult<ObjectId> {
        ObjectId::parse_str(id).map_err(|_| AppError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl BookRepository for MongoBookRepository {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let documents: Vec<BookDocument> = self.collection.find(doc! {}, None).await?.try_collect().await?;
        documents.into_iter().map(BookDocument::into_book).collect()
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Book> {
        let oid = Self::object_id(id)?;
        self.collection
            .find_one(doc! { "_id": oid }, None)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))?
            .into_book()
    }

    async fn insert(&self, book: &Book) -> AppResult<()> {
        let document = BookDocument::from_book(book)?;
        self.collection.insert_one(&document, None).await?;
        Ok(())
    }

    async fn replace(&self, book: &Book) -> AppResult<()> {
        let document = BookDocument::from_book(book)?;
        let result = self
            .collection
            .replace_one(doc! { "_id": document.id }, &document, None)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(document.id.to_hex()));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        let oid = Self::object_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": oid }, None).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        self.collection.delete_many(doc! {}, None).await?;
        Ok(())
    }
}
