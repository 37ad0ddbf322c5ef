//! Клиентская библиотека для REST API постов блога.
//!
//! Предоставляет трейт `PostGateway` — шов между лентой и удалённым API — и его
//! HTTP-реализацию `PostsClient` поверх `reqwest`.
//!
//! Посты с отрицательным `id` создаются локально; удалённый API о них никогда
//! не узнаёт.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{FeedClientError, FeedClientResult};
pub use http_client::PostsClient;
pub use models::{CreatePostDto, Post, PostPatch, PostSource, UpdatePostDto};

use async_trait::async_trait;

/// Базовый URL публичного API по умолчанию.
pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[async_trait]
/// Доступ к удалённым постам.
pub trait PostGateway: Send + Sync {
    /// `GET /posts` — все посты.
    async fn fetch_posts(&self) -> FeedClientResult<Vec<Post>>;

    /// `GET /posts/{id}` — один пост; 404 возвращается как
    /// `FeedClientError::Status` с `is_not_found() == true`.
    async fn fetch_post_by_id(&self, id: i64) -> FeedClientResult<Post>;

    /// `PUT /posts/{id}` для удалённых постов.
    ///
    /// Для отрицательного `id` запрос не отправляется, пост собирается локально
    /// из входных данных.
    async fn update_post(&self, input: UpdatePostDto) -> FeedClientResult<Post>;
}
