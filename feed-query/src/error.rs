use feed_client::FeedClientError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
/// Ошибки слоя запросов ленты.
pub enum QueryError {
    /// Идентификатор не число или ноль.
    #[error("invalid post id: {0}")]
    InvalidId(String),

    /// Локального поста с таким id нет.
    #[error("saved post {0} not found")]
    NotFound(i64),

    /// Ошибка удалённого API.
    #[error(transparent)]
    Fetch(#[from] FeedClientError),

    /// Данные поста не прошли валидацию.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Результат операций `feed-query`.
pub type QueryResult<T> = Result<T, QueryError>;

impl QueryError {
    /// Имеет ли смысл повторять запрос после этой ошибки.
    ///
    /// Не повторяются: неверный id, отсутствующий локальный пост, 404 от API и
    /// ошибки валидации.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch(err) => !err.is_not_found(),
            Self::InvalidId(_) | Self::NotFound(_) | Self::Validation(_) => false,
        }
    }

    /// Пост отсутствует локально или удалённо.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Fetch(err) => err.is_not_found(),
            _ => false,
        }
    }
}
