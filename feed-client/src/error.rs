use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `feed-client`.
pub enum FeedClientError {
    /// Ошибка HTTP-транспорта (`reqwest`): соединение, таймаут, TLS.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Сервер ответил статусом вне диапазона 2xx.
    #[error("failed to fetch {resource}: {status}")]
    Status {
        /// HTTP-статус ответа.
        status: u16,
        /// Что запрашивали, например `posts` или `post 7`.
        resource: String,
    },

    /// Тело ответа не удалось разобрать как JSON ожидаемой формы.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Результат операций `feed-client`.
pub type FeedClientResult<T> = Result<T, FeedClientError>;

impl FeedClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, resource: impl Into<String>) -> Self {
        Self::Status {
            status: status.as_u16(),
            resource: resource.into(),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, resource: &str) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, resource);
        }
        Self::Http(err)
    }

    /// Сервер сообщил, что ресурс отсутствует (404).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// HTTP-статус ответа, если ошибка пришла от сервера.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
