use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Откуда пост попал в ленту.
pub enum PostSource {
    /// Получен из удалённого API.
    Remote,
    /// Создан или отредактирован локально и лежит в хранилище сохранённых постов.
    Saved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Публичная модель поста.
///
/// Отрицательный `id` означает локально созданный пост, неотрицательный — пост
/// удалённого API.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Идентификатор автора.
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Текст поста.
    pub body: String,
    /// Происхождение поста.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PostSource>,
}

impl Post {
    /// Пост создан локально (отрицательный id).
    pub fn is_local(&self) -> bool {
        self.id < 0
    }

    /// Пост лежит в хранилище сохранённых постов.
    pub fn is_saved(&self) -> bool {
        self.source == Some(PostSource::Saved)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
/// Данные для создания поста. Идентификатор назначается локально.
pub struct CreatePostDto {
    /// Заголовок поста.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Текст поста.
    #[validate(length(min = 1))]
    pub body: String,
    /// Идентификатор автора.
    #[serde(rename = "userId")]
    pub user_id: i64,
}

impl CreatePostDto {
    /// Обрезает пробелы по краям заголовка и текста.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            body: self.body.trim().to_string(),
            user_id: self.user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Полное представление поста для `PUT /posts/{id}`.
pub struct UpdatePostDto {
    /// Идентификатор поста.
    pub id: i64,
    /// Новый заголовок.
    pub title: String,
    /// Новый текст.
    pub body: String,
    /// Идентификатор автора.
    #[serde(rename = "userId")]
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Validate)]
/// Частичное изменение поста: заголовок и текст.
///
/// Присутствующие поля проверяются по тем же правилам, что и при создании.
pub struct PostPatch {
    /// Новый заголовок, `None` — оставить как есть.
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    /// Новый текст, `None` — оставить как есть.
    #[validate(length(min = 1))]
    pub body: Option<String>,
}

impl PostPatch {
    /// Обрезает пробелы по краям присутствующих полей.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.map(|title| title.trim().to_string()),
            body: self.body.map(|body| body.trim().to_string()),
        }
    }

    /// Применяет изменение к посту.
    pub fn apply(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(body) = &self.body {
            post.body = body.clone();
        }
    }
}
