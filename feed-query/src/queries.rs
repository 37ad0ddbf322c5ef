use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use feed_client::{CreatePostDto, Post, PostGateway, PostPatch, PostSource, UpdatePostDto};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::cache::{CachedValue, DEFAULT_GC_TIME, DEFAULT_STALE_TIME, QueryCache, QueryKey};
use crate::error::{QueryError, QueryResult};
use crate::merge::merge_posts;
use crate::post_id::PostId;
use crate::retry::RetryPolicy;
use crate::store::SavedPostStore;

/// Настройки слоя запросов.
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    pub stale_time: Duration,
    pub gc_time: Duration,
    /// Повторы для запроса деталей поста.
    pub retry: RetryPolicy,
    /// Отправлять ли правки удалённых постов в API через `PUT`.
    pub sync_remote_updates: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: DEFAULT_STALE_TIME,
            gc_time: DEFAULT_GC_TIME,
            retry: RetryPolicy::default(),
            sync_remote_updates: false,
        }
    }
}

#[derive(Debug)]
struct QueryState {
    store: SavedPostStore,
    cache: QueryCache,
}

impl QueryState {
    fn invalidate(&mut self) {
        self.cache.invalidate_all();
    }
}

/// Единое представление ленты: удалённые посты плюс сохранённые.
///
/// Хранилище и кэш лежат под одним мьютексом, поэтому мутация и сброс кэша
/// видны читателям одновременно. Мьютекс не удерживается через `.await`.
pub struct PostQueries<G: PostGateway> {
    gateway: G,
    state: Mutex<QueryState>,
    retry: RetryPolicy,
    sync_remote_updates: bool,
}

impl<G: PostGateway> PostQueries<G> {
    pub fn new(gateway: G, store: SavedPostStore) -> Self {
        Self::with_options(gateway, store, QueryOptions::default())
    }

    pub fn with_options(gateway: G, store: SavedPostStore, options: QueryOptions) -> Self {
        Self {
            gateway,
            state: Mutex::new(QueryState {
                store,
                cache: QueryCache::new(options.stale_time, options.gc_time),
            }),
            retry: options.retry,
            sync_remote_updates: options.sync_remote_updates,
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Сведённая лента: сохранённые посты затеняют удалённые с тем же id,
    /// порядок — см. [`crate::compare_post_ids`].
    pub async fn list_posts(&self) -> QueryResult<Vec<Post>> {
        {
            let mut state = self.lock();
            let version = state.store.version();
            if let Some(CachedValue::List(posts)) = state.cache.get(QueryKey::List, version) {
                debug!(version, "post list served from cache");
                return Ok(posts);
            }
        }

        let remote = self.gateway.fetch_posts().await?;

        // сводим с хранилищем уже после ответа, чтобы не потерять мутации,
        // случившиеся во время запроса
        let mut state = self.lock();
        let version = state.store.version();
        let merged = merge_posts(state.store.list(), remote);
        state
            .cache
            .insert(QueryKey::List, CachedValue::List(merged.clone()), version);
        debug!(version, count = merged.len(), "post list computed");
        Ok(merged)
    }

    /// Пост по идентификатору из адреса страницы.
    ///
    /// Нечисловой или нулевой id отклоняется без обращения к сети.
    pub async fn get_post(&self, raw_id: &str) -> QueryResult<Post> {
        let id: PostId = raw_id.parse()?;
        self.get_post_by_id(id).await
    }

    pub async fn get_post_by_id(&self, id: PostId) -> QueryResult<Post> {
        let key = QueryKey::Detail(id.value());
        {
            let mut state = self.lock();
            let version = state.store.version();
            if let Some(CachedValue::Detail(post)) = state.cache.get(key, version) {
                return Ok(post);
            }

            let saved = state.store.get_by_id(id.value()).cloned();
            match (id, saved) {
                (_, Some(post)) => {
                    state
                        .cache
                        .insert(key, CachedValue::Detail(post.clone()), version);
                    return Ok(post);
                }
                (PostId::Local(local_id), None) => return Err(QueryError::NotFound(local_id)),
                (PostId::Remote(_), None) => {}
            }
        }

        let remote_id = id.value();
        let post = self
            .retry
            .run(move || async move {
                self.gateway
                    .fetch_post_by_id(remote_id)
                    .await
                    .map_err(QueryError::from)
            })
            .await?;

        let mut state = self.lock();
        if let Some(adopted) = state.store.get_by_id(remote_id) {
            return Ok(adopted.clone());
        }
        let version = state.store.version();
        state
            .cache
            .insert(key, CachedValue::Detail(post.clone()), version);
        Ok(post)
    }

    /// Сохранённые посты в порядке создания.
    pub fn saved_posts(&self) -> Vec<Post> {
        self.lock().store.list()
    }

    /// Создаёт локальный пост с новым отрицательным id.
    pub fn create_post(&self, input: CreatePostDto) -> QueryResult<Post> {
        let input = input.normalized();
        input.validate()?;

        let post = {
            let mut state = self.lock();
            let post = Post {
                id: state.store.next_local_id(),
                user_id: input.user_id,
                title: input.title,
                body: input.body,
                source: Some(PostSource::Saved),
            };
            state.store.add(post.clone());
            state.invalidate();
            post
        };

        info!(id = post.id, "saved post created");
        Ok(post)
    }

    /// Применяет изменение к сохранённому посту.
    ///
    /// Удалённый пост, которого ещё нет в хранилище, сначала загружается и
    /// переносится туда. При `sync_remote_updates` правка удалённого поста
    /// дополнительно уходит в API; ошибка синхронизации только логируется.
    pub async fn update_post(&self, id: i64, patch: PostPatch) -> QueryResult<Post> {
        let patch = patch.normalized();
        patch.validate()?;

        let updated = {
            let mut state = self.lock();
            let updated = state.store.update(id, &patch);
            if updated.is_some() {
                state.invalidate();
            }
            updated
        };

        let updated = match updated {
            Some(post) => post,
            None if id < 0 => return Err(QueryError::NotFound(id)),
            None => self.adopt_remote(id, &patch).await?,
        };
        info!(id, "saved post updated");

        if self.sync_remote_updates && id >= 0 {
            self.sync_remote(&updated).await;
        }
        Ok(updated)
    }

    async fn adopt_remote(&self, id: i64, patch: &PostPatch) -> QueryResult<Post> {
        let mut post = self.get_post_by_id(PostId::from_i64(id)?).await?;
        patch.apply(&mut post);
        post.source = Some(PostSource::Saved);

        let mut state = self.lock();
        let adopted = match state.store.update(id, patch) {
            Some(existing) => existing,
            None => {
                state.store.add(post.clone());
                post
            }
        };
        state.invalidate();
        debug!(id, "remote post adopted into saved posts");
        Ok(adopted)
    }

    async fn sync_remote(&self, post: &Post) {
        let input = UpdatePostDto {
            id: post.id,
            title: post.title.clone(),
            body: post.body.clone(),
            user_id: post.user_id,
        };
        if let Err(err) = self.gateway.update_post(input).await {
            warn!(id = post.id, error = %err, "failed to sync post update to remote api");
        }
    }

    /// Удаляет сохранённый пост.
    pub fn delete_post(&self, id: i64) -> QueryResult<Post> {
        let removed = {
            let mut state = self.lock();
            let removed = state.store.remove(id).ok_or(QueryError::NotFound(id))?;
            state.invalidate();
            removed
        };

        info!(id, "saved post deleted");
        Ok(removed)
    }

    /// Принудительно сбрасывает кэш запросов.
    pub fn invalidate_all(&self) {
        self.lock().invalidate();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use feed_client::{FeedClientError, FeedClientResult};
    use tokio::sync::Notify;

    use super::*;

    #[derive(Clone, Default)]
    struct FakeGateway {
        remote_posts: Arc<Mutex<Vec<Post>>>,
        list_calls: Arc<Mutex<usize>>,
        list_failure: Arc<Mutex<Option<u16>>>,
        detail_calls: Arc<Mutex<Vec<i64>>>,
        detail_failures: Arc<Mutex<VecDeque<u16>>>,
        update_calls: Arc<Mutex<Vec<UpdatePostDto>>>,
        gate: Arc<Mutex<Option<RequestGate>>>,
    }

    /// Задерживает первый запрос к шлюзу, пока тест не отпустит его.
    #[derive(Clone, Default)]
    struct RequestGate {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    impl RequestGate {
        async fn pass(&self) {
            self.entered.notify_one();
            self.release.notified().await;
        }
    }

    impl FakeGateway {
        fn hold_next_request(&self) -> RequestGate {
            let gate = RequestGate::default();
            *self.gate.lock().expect("gate mutex poisoned") = Some(gate.clone());
            gate
        }

        async fn wait_at_gate(&self) {
            let gate = self.gate.lock().expect("gate mutex poisoned").take();
            if let Some(gate) = gate {
                gate.pass().await;
            }
        }

        fn with_remote(ids: &[i64]) -> Self {
            let gateway = Self::default();
            *gateway
                .remote_posts
                .lock()
                .expect("remote_posts mutex poisoned") =
                ids.iter().map(|&id| remote_post(id)).collect();
            gateway
        }

        fn list_calls(&self) -> usize {
            *self.list_calls.lock().expect("list_calls mutex poisoned")
        }

        fn detail_calls(&self) -> Vec<i64> {
            self.detail_calls
                .lock()
                .expect("detail_calls mutex poisoned")
                .clone()
        }

        fn fail_details(&self, statuses: &[u16]) {
            self.detail_failures
                .lock()
                .expect("detail_failures mutex poisoned")
                .extend(statuses.iter().copied());
        }
    }

    fn status_error(status: u16, resource: &str) -> FeedClientError {
        FeedClientError::Status {
            status,
            resource: resource.to_string(),
        }
    }

    #[async_trait]
    impl PostGateway for FakeGateway {
        async fn fetch_posts(&self) -> FeedClientResult<Vec<Post>> {
            *self.list_calls.lock().expect("list_calls mutex poisoned") += 1;
            self.wait_at_gate().await;
            if let Some(status) = *self.list_failure.lock().expect("list_failure mutex poisoned") {
                return Err(status_error(status, "posts"));
            }
            Ok(self
                .remote_posts
                .lock()
                .expect("remote_posts mutex poisoned")
                .clone())
        }

        async fn fetch_post_by_id(&self, id: i64) -> FeedClientResult<Post> {
            self.detail_calls
                .lock()
                .expect("detail_calls mutex poisoned")
                .push(id);
            self.wait_at_gate().await;
            let failure = self
                .detail_failures
                .lock()
                .expect("detail_failures mutex poisoned")
                .pop_front();
            if let Some(status) = failure {
                return Err(status_error(status, &format!("post {id}")));
            }
            self.remote_posts
                .lock()
                .expect("remote_posts mutex poisoned")
                .iter()
                .find(|post| post.id == id)
                .cloned()
                .ok_or_else(|| status_error(404, &format!("post {id}")))
        }

        async fn update_post(&self, input: UpdatePostDto) -> FeedClientResult<Post> {
            self.update_calls
                .lock()
                .expect("update_calls mutex poisoned")
                .push(input.clone());
            Ok(Post {
                id: input.id,
                user_id: input.user_id,
                title: input.title,
                body: input.body,
                source: Some(PostSource::Remote),
            })
        }
    }

    fn remote_post(id: i64) -> Post {
        Post {
            id,
            user_id: 1,
            title: format!("remote {id}"),
            body: format!("remote body {id}"),
            source: Some(PostSource::Remote),
        }
    }

    fn create_dto(title: &str) -> CreatePostDto {
        CreatePostDto {
            title: title.to_string(),
            body: "text".to_string(),
            user_id: 1,
        }
    }

    fn queries(gateway: &FakeGateway) -> PostQueries<FakeGateway> {
        let options = QueryOptions {
            retry: RetryPolicy::immediate(2),
            ..QueryOptions::default()
        };
        PostQueries::with_options(gateway.clone(), SavedPostStore::new(), options)
    }

    fn ids(posts: &[Post]) -> Vec<i64> {
        posts.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn list_merges_saved_and_remote_in_feed_order() {
        let gateway = FakeGateway::with_remote(&[3, 1, 2]);
        let queries = queries(&gateway);
        queries.create_post(create_dto("a")).expect("create must succeed");
        queries.create_post(create_dto("b")).expect("create must succeed");

        let posts = queries.list_posts().await.expect("list must succeed");
        assert_eq!(ids(&posts), vec![-2, -1, 1, 2, 3]);
    }

    #[tokio::test]
    async fn list_is_served_from_cache_until_mutation() {
        let gateway = FakeGateway::with_remote(&[1, 2]);
        let queries = queries(&gateway);

        let first = queries.list_posts().await.expect("list must succeed");
        let second = queries.list_posts().await.expect("list must succeed");
        assert_eq!(first, second);
        assert_eq!(gateway.list_calls(), 1);

        queries.create_post(create_dto("new")).expect("create must succeed");
        let third = queries.list_posts().await.expect("list must succeed");
        assert_eq!(gateway.list_calls(), 2);
        assert_eq!(third.len(), 3);
    }

    #[tokio::test]
    async fn created_post_heads_the_next_list() {
        let gateway = FakeGateway::with_remote(&[1, 2, 3]);
        let queries = queries(&gateway);
        queries.list_posts().await.expect("list must succeed");
        queries.create_post(create_dto("older")).expect("create must succeed");

        let created = queries.create_post(create_dto("T")).expect("create must succeed");
        let posts = queries.list_posts().await.expect("list must succeed");

        assert!(created.id < 0);
        assert_eq!(posts[0].id, created.id);
        assert_eq!(posts[0].title, "T");
        assert!(posts[0].is_saved());
    }

    #[tokio::test]
    async fn local_detail_is_resolved_without_network() {
        let gateway = FakeGateway::with_remote(&[1]);
        let queries = queries(&gateway);
        let created = queries.create_post(create_dto("mine")).expect("create must succeed");

        let post = queries
            .get_post(&created.id.to_string())
            .await
            .expect("saved post must resolve");

        assert_eq!(post, created);
        assert_eq!(gateway.list_calls(), 0);
        assert!(gateway.detail_calls().is_empty());
    }

    #[tokio::test]
    async fn invalid_ids_fail_without_network() {
        let gateway = FakeGateway::with_remote(&[1]);
        let queries = queries(&gateway);

        for raw in ["abc", "0"] {
            let err = queries
                .get_post(raw)
                .await
                .expect_err("invalid id must be rejected");
            assert!(matches!(err, QueryError::InvalidId(_)));
        }
        assert!(gateway.detail_calls().is_empty());
    }

    #[tokio::test]
    async fn deleted_post_disappears_from_list_and_detail() {
        let gateway = FakeGateway::with_remote(&[1]);
        let queries = queries(&gateway);
        let created = queries.create_post(create_dto("gone")).expect("create must succeed");
        queries.list_posts().await.expect("list must succeed");
        queries
            .get_post(&created.id.to_string())
            .await
            .expect("saved post must resolve");

        queries.delete_post(created.id).expect("delete must succeed");

        let posts = queries.list_posts().await.expect("list must succeed");
        assert_eq!(ids(&posts), vec![1]);
        let err = queries
            .get_post(&created.id.to_string())
            .await
            .expect_err("deleted post must be gone");
        assert!(matches!(err, QueryError::NotFound(id) if id == created.id));
        assert!(queries.saved_posts().is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_post_is_not_found() {
        let gateway = FakeGateway::default();
        let queries = queries(&gateway);

        let err = queries.delete_post(-7).expect_err("nothing to delete");
        assert!(matches!(err, QueryError::NotFound(-7)));
    }

    #[tokio::test]
    async fn remote_detail_is_fetched_once_and_cached() {
        let gateway = FakeGateway::with_remote(&[1, 2]);
        let queries = queries(&gateway);

        let first = queries.get_post("2").await.expect("post 2 exists");
        let second = queries.get_post("2").await.expect("post 2 exists");

        assert_eq!(first, second);
        assert_eq!(gateway.detail_calls(), vec![2]);
    }

    #[tokio::test]
    async fn transient_detail_failures_are_retried_twice() {
        let gateway = FakeGateway::with_remote(&[1]);
        gateway.fail_details(&[500, 503, 500]);
        let queries = queries(&gateway);

        let err = queries.get_post("1").await.expect_err("all attempts fail");
        assert!(matches!(err, QueryError::Fetch(_)));
        assert_eq!(gateway.detail_calls(), vec![1, 1, 1]);
    }

    #[tokio::test]
    async fn retry_recovers_from_single_failure() {
        let gateway = FakeGateway::with_remote(&[1]);
        gateway.fail_details(&[502]);
        let queries = queries(&gateway);

        let post = queries.get_post("1").await.expect("second attempt succeeds");
        assert_eq!(post.id, 1);
        assert_eq!(gateway.detail_calls().len(), 2);
    }

    #[tokio::test]
    async fn missing_remote_post_is_not_retried() {
        let gateway = FakeGateway::with_remote(&[1]);
        let queries = queries(&gateway);

        let err = queries.get_post("99").await.expect_err("post 99 is absent");
        assert!(err.is_not_found());
        assert_eq!(gateway.detail_calls(), vec![99]);
    }

    #[tokio::test]
    async fn list_failure_is_propagated() {
        let gateway = FakeGateway::with_remote(&[1]);
        *gateway
            .list_failure
            .lock()
            .expect("list_failure mutex poisoned") = Some(500);
        let queries = queries(&gateway);

        let err = queries.list_posts().await.expect_err("list must fail");
        assert!(matches!(err, QueryError::Fetch(_)));
    }

    #[tokio::test]
    async fn edited_remote_post_shadows_original() {
        let gateway = FakeGateway::with_remote(&[1, 2, 3]);
        let queries = queries(&gateway);

        let patch = PostPatch {
            title: Some("edited".to_string()),
            body: None,
        };
        let updated = queries.update_post(2, patch).await.expect("update must succeed");
        assert_eq!(updated.title, "edited");
        assert_eq!(updated.body, "remote body 2");
        assert!(updated.is_saved());

        let posts = queries.list_posts().await.expect("list must succeed");
        assert_eq!(ids(&posts), vec![1, 2, 3]);
        assert_eq!(posts[1].title, "edited");

        let detail = queries.get_post("2").await.expect("post 2 resolves");
        assert_eq!(detail.title, "edited");
        assert_eq!(gateway.detail_calls(), vec![2]);
        assert_eq!(ids(&queries.saved_posts()), vec![2]);
    }

    #[tokio::test]
    async fn update_of_saved_post_invalidates_cached_detail() {
        let gateway = FakeGateway::default();
        let queries = queries(&gateway);
        let created = queries.create_post(create_dto("draft")).expect("create must succeed");
        let raw_id = created.id.to_string();
        queries.get_post(&raw_id).await.expect("saved post resolves");

        let patch = PostPatch {
            title: Some("final".to_string()),
            body: Some("done".to_string()),
        };
        queries
            .update_post(created.id, patch)
            .await
            .expect("update must succeed");

        let detail = queries.get_post(&raw_id).await.expect("saved post resolves");
        assert_eq!(detail.title, "final");
        assert_eq!(detail.body, "done");
    }

    #[tokio::test]
    async fn update_of_unknown_local_post_is_not_found() {
        let gateway = FakeGateway::default();
        let queries = queries(&gateway);

        let err = queries
            .update_post(-4, PostPatch::default())
            .await
            .expect_err("nothing to update");
        assert!(matches!(err, QueryError::NotFound(-4)));
    }

    #[tokio::test]
    async fn remote_sync_is_opt_in_and_skips_local_posts() {
        let gateway = FakeGateway::with_remote(&[1]);
        let patch = PostPatch {
            title: Some("synced".to_string()),
            body: None,
        };

        let silent = queries(&gateway);
        silent
            .update_post(1, patch.clone())
            .await
            .expect("update must succeed");
        assert!(gateway.update_calls.lock().expect("update_calls mutex poisoned").is_empty());

        let options = QueryOptions {
            retry: RetryPolicy::immediate(0),
            sync_remote_updates: true,
            ..QueryOptions::default()
        };
        let syncing =
            PostQueries::with_options(gateway.clone(), SavedPostStore::new(), options);
        let local = syncing.create_post(create_dto("local")).expect("create must succeed");
        syncing
            .update_post(local.id, patch.clone())
            .await
            .expect("update must succeed");
        syncing.update_post(1, patch).await.expect("update must succeed");

        let calls = gateway
            .update_calls
            .lock()
            .expect("update_calls mutex poisoned")
            .clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, 1);
        assert_eq!(calls[0].title, "synced");
    }

    #[tokio::test]
    async fn blank_title_is_rejected_on_create() {
        let gateway = FakeGateway::default();
        let queries = queries(&gateway);

        let err = queries
            .create_post(create_dto("   "))
            .expect_err("blank title must be rejected");
        assert!(matches!(err, QueryError::Validation(_)));
        assert!(queries.saved_posts().is_empty());
    }

    #[tokio::test]
    async fn invalid_patch_leaves_saved_post_untouched() {
        let gateway = FakeGateway::default();
        let queries = queries(&gateway);
        let created = queries.create_post(create_dto("ok")).expect("create must succeed");

        let patches = [
            PostPatch {
                title: Some(String::new()),
                body: Some("   ".to_string()),
            },
            PostPatch {
                title: Some("t".repeat(256)),
                body: None,
            },
        ];
        for patch in patches {
            let err = queries
                .update_post(created.id, patch)
                .await
                .expect_err("invalid patch must be rejected");
            assert!(matches!(err, QueryError::Validation(_)));
        }

        assert_eq!(queries.saved_posts(), vec![created]);
    }

    #[tokio::test]
    async fn invalid_patch_does_not_adopt_remote_post() {
        let gateway = FakeGateway::with_remote(&[1]);
        let queries = queries(&gateway);

        let patch = PostPatch {
            title: Some("  ".to_string()),
            body: None,
        };
        let err = queries
            .update_post(1, patch)
            .await
            .expect_err("blank title must be rejected");
        assert!(matches!(err, QueryError::Validation(_)));
        assert!(queries.saved_posts().is_empty());
        assert!(gateway.detail_calls().is_empty());
    }

    #[tokio::test]
    async fn patch_fields_are_trimmed_before_update() {
        let gateway = FakeGateway::default();
        let queries = queries(&gateway);
        let created = queries.create_post(create_dto("draft")).expect("create must succeed");

        let patch = PostPatch {
            title: Some("  final  ".to_string()),
            body: None,
        };
        let updated = queries
            .update_post(created.id, patch)
            .await
            .expect("update must succeed");
        assert_eq!(updated.title, "final");
    }

    #[tokio::test]
    async fn post_created_during_list_request_is_in_the_result() {
        let gateway = FakeGateway::with_remote(&[1]);
        let queries = queries(&gateway);
        let gate = gateway.hold_next_request();

        let (listed, created) = tokio::join!(queries.list_posts(), async {
            gate.entered.notified().await;
            let created = queries.create_post(create_dto("mid")).expect("create must succeed");
            gate.release.notify_one();
            created
        });

        let listed = listed.expect("list must succeed");
        assert_eq!(ids(&listed), vec![created.id, 1]);

        let next = queries.list_posts().await.expect("list must succeed");
        assert_eq!(ids(&next), vec![created.id, 1]);
    }

    #[tokio::test]
    async fn detail_in_flight_returns_copy_adopted_meanwhile() {
        let gateway = FakeGateway::with_remote(&[1, 2]);
        let queries = queries(&gateway);
        let gate = gateway.hold_next_request();

        let (detail, adopted) = tokio::join!(queries.get_post("2"), async {
            gate.entered.notified().await;
            let patch = PostPatch {
                title: Some("edited".to_string()),
                body: None,
            };
            let adopted = queries.update_post(2, patch).await.expect("update must succeed");
            gate.release.notify_one();
            adopted
        });

        let detail = detail.expect("post 2 resolves");
        assert_eq!(detail, adopted);
        assert_eq!(detail.title, "edited");
        assert!(detail.is_saved());

        let cached = queries.get_post("2").await.expect("post 2 resolves");
        assert_eq!(cached.title, "edited");
        assert_eq!(gateway.detail_calls(), vec![2, 2]);
    }
}
