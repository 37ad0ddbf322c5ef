use feed_client::{Post, PostPatch, PostSource};

/// Хранилище сохранённых (локально созданных или отредактированных) постов.
///
/// Порядок — порядок вставки. Каждая успешная мутация увеличивает `version`,
/// по которой кэш запросов понимает, что данные устарели.
#[derive(Debug, Clone)]
pub struct SavedPostStore {
    posts: Vec<Post>,
    version: u64,
    last_local_id: i64,
}

impl Default for SavedPostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SavedPostStore {
    /// Пустое хранилище на старте сессии.
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            version: 0,
            last_local_id: 0,
        }
    }

    /// Следующий локальный идентификатор: -1, -2, -3 ...
    ///
    /// Более новый пост всегда получает более отрицательный id.
    pub fn next_local_id(&mut self) -> i64 {
        self.last_local_id -= 1;
        self.last_local_id
    }

    /// Добавляет пост в конец. Пост с уже существующим id заменяется на месте.
    pub fn add(&mut self, mut post: Post) {
        post.source = Some(PostSource::Saved);
        if post.id < 0 {
            self.last_local_id = self.last_local_id.min(post.id);
        }

        match self.position(post.id) {
            Some(index) => self.posts[index] = post,
            None => self.posts.push(post),
        }
        self.bump();
    }

    /// Применяет частичное изменение. `None`, если поста нет.
    pub fn update(&mut self, id: i64, patch: &PostPatch) -> Option<Post> {
        let index = self.position(id)?;
        patch.apply(&mut self.posts[index]);
        let updated = self.posts[index].clone();
        self.bump();
        Some(updated)
    }

    /// Удаляет пост. `None`, если поста нет.
    pub fn remove(&mut self, id: i64) -> Option<Post> {
        let index = self.position(id)?;
        let removed = self.posts.remove(index);
        self.bump();
        Some(removed)
    }

    pub fn get_by_id(&self, id: i64) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.position(id).is_some()
    }

    /// Снимок всех постов в порядке вставки.
    pub fn list(&self) -> Vec<Post> {
        self.posts.clone()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Номер версии содержимого.
    pub fn version(&self) -> u64 {
        self.version
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.posts.iter().position(|post| post.id == id)
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
