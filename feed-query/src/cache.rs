// Кэш запросов в памяти: ключ запроса плюс версия хранилища сохранённых постов.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use feed_client::Post;

/// Через сколько запись считается устаревшей и пересчитывается.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(30);
/// Через сколько неиспользуемая запись удаляется из кэша.
pub const DEFAULT_GC_TIME: Duration = Duration::from_secs(5 * 60);

/// Ключ запроса в пространстве имён постов.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    List,
    Detail(i64),
}

/// Закэшированное значение запроса.
#[derive(Debug, Clone)]
pub enum CachedValue {
    List(Vec<Post>),
    Detail(Post),
}

/// Запись кэша с метаданными.
#[derive(Debug, Clone)]
pub struct CachedEntry {
    pub value: CachedValue,
    /// Версия хранилища, на которой значение было посчитано.
    pub version: u64,
    pub cached_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl CachedEntry {
    fn new(value: CachedValue, version: u64) -> Self {
        let now = Utc::now();
        Self {
            value,
            version,
            cached_at: now,
            last_used_at: now,
        }
    }

    /// Запись старше `stale_time`. Нулевой `stale_time` делает запись
    /// устаревшей сразу.
    pub fn is_stale(&self, stale_time: Duration) -> bool {
        elapsed_since(self.cached_at) >= stale_time
    }

    fn is_collectable(&self, gc_time: Duration) -> bool {
        elapsed_since(self.last_used_at) >= gc_time
    }
}

fn elapsed_since(at: DateTime<Utc>) -> Duration {
    Utc::now()
        .signed_duration_since(at)
        .to_std()
        .unwrap_or(Duration::ZERO)
}

/// Кэш запросов ленты.
#[derive(Debug)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CachedEntry>,
    stale_time: Duration,
    gc_time: Duration,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_TIME, DEFAULT_GC_TIME)
    }
}

impl QueryCache {
    pub fn new(stale_time: Duration, gc_time: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stale_time,
            gc_time,
        }
    }

    /// Свежее значение для ключа, посчитанное на версии `version`.
    pub fn get(&mut self, key: QueryKey, version: u64) -> Option<CachedValue> {
        self.collect_garbage();

        let stale_time = self.stale_time;
        let entry = self.entries.get_mut(&key)?;
        if entry.version != version || entry.is_stale(stale_time) {
            return None;
        }
        entry.last_used_at = Utc::now();
        Some(entry.value.clone())
    }

    pub fn insert(&mut self, key: QueryKey, value: CachedValue, version: u64) {
        self.entries.insert(key, CachedEntry::new(value, version));
    }

    /// Сбрасывает всё пространство имён постов.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn collect_garbage(&mut self) {
        let gc_time = self.gc_time;
        self.entries
            .retain(|_, entry| !entry.is_collectable(gc_time));
    }
}
