use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

use crate::PostGateway;
use crate::error::{FeedClientError, FeedClientResult};
use crate::models::{Post, PostSource, UpdatePostDto};

pub(crate) const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
struct UpdatePostRequestDto<'a> {
    id: i64,
    title: &'a str,
    body: &'a str,
    #[serde(rename = "userId")]
    user_id: i64,
}

#[derive(Debug, Deserialize)]
struct PostDto {
    id: i64,
    #[serde(rename = "userId")]
    user_id: i64,
    title: String,
    body: String,
}

impl From<PostDto> for Post {
    fn from(value: PostDto) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            title: value.title,
            body: value.body,
            source: Some(PostSource::Remote),
        }
    }
}

impl From<&UpdatePostDto> for Post {
    fn from(value: &UpdatePostDto) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            title: value.title.clone(),
            body: value.body.clone(),
            source: Some(PostSource::Saved),
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API постов (`/posts`, `/posts/{id}`).
///
/// Повторов не делает: политика повторов живёт уровнем выше.
pub struct PostsClient {
    base_url: String,
    client: Client,
}

impl PostsClient {
    /// Создаёт клиент с таймаутами по умолчанию.
    pub fn new(base_url: impl Into<String>) -> FeedClientResult<Self> {
        Self::with_timeouts(base_url, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Создаёт клиент с явными таймаутами соединения и запроса.
    pub fn with_timeouts(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> FeedClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Базовый URL API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// универсальный helper: отправить запрос, проверить статус, разобрать JSON
    async fn send<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: Option<&TReq>,
        resource: &str,
    ) -> FeedClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%method, %url, "sending request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| FeedClientError::from_reqwest(err, resource))?;

        let status = response.status();
        debug!(status = status.as_u16(), resource, "response received");
        if !status.is_success() {
            return Err(FeedClientError::from_http_status(status, resource));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| FeedClientError::from_reqwest(err, resource))?;
        serde_json::from_slice::<TRes>(&bytes)
            .map_err(|err| FeedClientError::Decode(format!("{resource}: {err}")))
    }
}

#[async_trait]
impl PostGateway for PostsClient {
    async fn fetch_posts(&self) -> FeedClientResult<Vec<Post>> {
        let dtos: Vec<PostDto> = self
            .send::<(), _>(Method::GET, "/posts", None, "posts")
            .await?;
        Ok(dtos.into_iter().map(Post::from).collect())
    }

    async fn fetch_post_by_id(&self, id: i64) -> FeedClientResult<Post> {
        let dto: PostDto = self
            .send::<(), _>(
                Method::GET,
                &format!("/posts/{id}"),
                None,
                &format!("post {id}"),
            )
            .await?;
        Ok(dto.into())
    }

    async fn update_post(&self, input: UpdatePostDto) -> FeedClientResult<Post> {
        // локальные посты удалённому API неизвестны
        if input.id < 0 {
            debug!(id = input.id, "local post update, remote api skipped");
            return Ok(Post::from(&input));
        }

        let payload = UpdatePostRequestDto {
            id: input.id,
            title: &input.title,
            body: &input.body,
            user_id: input.user_id,
        };
        let dto: PostDto = self
            .send(
                Method::PUT,
                &format!("/posts/{}", input.id),
                Some(&payload),
                &format!("post {}", input.id),
            )
            .await?;
        Ok(dto.into())
    }
}
