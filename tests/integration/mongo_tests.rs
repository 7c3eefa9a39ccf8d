//! MongoDB repository tests
//!
//! Require a MongoDB server on localhost. Run with: cargo test -- --ignored

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{
    api::create_router,
    config::DatabaseConfig,
    models::{Book, BookId},
    repository::{self, BookRepository, MongoBookRepository},
    AppConfig, AppError, AppState,
};

async fn repository(name: &str) -> MongoBookRepository {
    let config = DatabaseConfig {
        name: name.to_string(),
        ..DatabaseConfig::default()
    };
    let database = repository::connect(&config)
        .await
        .expect("Failed to connect to MongoDB");
    let repo = MongoBookRepository::new(&database);
    repo.clear().await.expect("Failed to clear collection");
    repo
}

fn book(title: &str) -> Book {
    Book {
        id: Some(BookId::generate()),
        title: title.to_string(),
        author: "Madeleine L'Engle".to_string(),
        publisher: "Farrar, Straus & Giroux".to_string(),
        publish_date: "1962-01-01T07:00:00Z".parse().unwrap(),
        rating: 1,
        status: "CheckedIn".to_string(),
    }
}

#[tokio::test]
#[ignore]
async fn test_repository_crud() {
    let repo = repository("books_test_repository").await;
    assert!(repo.find_all().await.unwrap().is_empty());

    let mut stored = book("A Wrinkle In Time");
    repo.insert(&stored).await.unwrap();
    let id = stored.id.unwrap().to_string();
    assert_eq!(repo.find_by_id(&id).await.unwrap(), stored);

    stored.status = "CheckedOut".to_string();
    repo.replace(&stored).await.unwrap();
    assert_eq!(repo.find_by_id(&id).await.unwrap().status, "CheckedOut");

    // Duplicate keys are storage failures
    assert!(matches!(repo.insert(&stored).await, Err(AppError::Database(_))));

    repo.delete_by_id(&id).await.unwrap();
    assert!(matches!(repo.find_by_id(&id).await, Err(AppError::NotFound(_))));
    assert!(matches!(repo.delete_by_id(&id).await, Err(AppError::NotFound(_))));
    assert!(matches!(repo.replace(&stored).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
#[ignore]
async fn test_non_hex_id_is_not_found() {
    let repo = repository("books_test_non_hex").await;
    let err = repo.find_by_id("zzzzzzzzzzzzzzzzzzzzzzzz").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
#[ignore]
async fn test_api_over_mongodb() {
    let repo = repository("books_test_api").await;
    let app = create_router(AppState::new(AppConfig::default(), Arc::new(repo)));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/books")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(to_bytes(response.into_body(), usize::MAX).await.unwrap().is_empty());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .body(Body::from(
            json!({
                "title": "A Wrinkle In Time",
                "author": "Madeleine L'Engle",
                "publisher": "Farrar, Straus & Giroux",
                "publish_date": "1962-01-01T00:00:00-07:00",
                "rating": 1,
                "status": "CheckedIn"
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value =
        serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap()).unwrap();
    let id = created["id"].as_str().unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri(format!("/books/{}", id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Value =
        serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(fetched, created);
}
