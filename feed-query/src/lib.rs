//! Слой запросов ленты блога.
//!
//! Сводит посты удалённого API с локально сохранёнными постами, держит кэш
//! запросов и сбрасывает его после каждой мутации:
//! - `SavedPostStore` — сохранённые посты сессии;
//! - `PostQueries` — список, детали, создание, правка и удаление;
//! - `QueryCache` — записи с версией хранилища и временем устаревания.

mod cache;
mod error;
mod merge;
mod post_id;
mod queries;
mod retry;
mod store;

pub use cache::{
    CachedEntry, CachedValue, DEFAULT_GC_TIME, DEFAULT_STALE_TIME, QueryCache, QueryKey,
};
pub use error::{QueryError, QueryResult};
pub use merge::{compare_post_ids, merge_posts};
pub use post_id::PostId;
pub use queries::{PostQueries, QueryOptions};
pub use retry::RetryPolicy;
pub use store::SavedPostStore;
