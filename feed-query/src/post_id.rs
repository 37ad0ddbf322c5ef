use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;

/// Разобранный идентификатор поста из адреса страницы или команды.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostId {
    /// Локальный пост, id < 0. Ищется только в хранилище.
    Local(i64),
    /// Удалённый пост, id > 0.
    Remote(i64),
}

impl PostId {
    pub fn value(self) -> i64 {
        match self {
            Self::Local(id) | Self::Remote(id) => id,
        }
    }

    pub fn from_i64(id: i64) -> Result<Self, QueryError> {
        match id {
            0 => Err(QueryError::InvalidId(id.to_string())),
            id if id < 0 => Ok(Self::Local(id)),
            id => Ok(Self::Remote(id)),
        }
    }
}

impl FromStr for PostId {
    type Err = QueryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let id = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| QueryError::InvalidId(raw.to_string()))?;
        Self::from_i64(id).map_err(|_| QueryError::InvalidId(raw.to_string()))
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
