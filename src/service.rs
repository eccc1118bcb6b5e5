// Joke service contract: the interpreter only ever talks to the backend
// through this trait, so tests can plug in an in-memory service and the
// binary plugs in the REST client from `api`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A joke as returned by the backend, including its reaction counters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Joke {
    pub id: i64,
    pub content: String,
    pub likes: i64,
    pub dislikes: i64,
}

/// Failures reported by a `JokeService`. Every variant is recoverable: the
/// interpreter renders it as `Error: <message>` and stays usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The requested joke or category does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The backend refused the request (duplicate name, bad payload).
    #[error("{0}")]
    Rejected(String),

    /// Any other non-success status.
    #[error("{message}. Status: {status}")]
    Status { status: u16, message: String },

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    Decode(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Backend operations the command interpreter can invoke. Identifiers are
/// passed through as the user typed them; the backend decides validity.
#[async_trait]
pub trait JokeService: Send + Sync {
    /// Random joke, from all jokes or from `category` when given.
    async fn random_joke(&self, category: Option<&str>) -> ServiceResult<Joke>;

    async fn list_categories(&self) -> ServiceResult<Vec<String>>;

    /// Joke texts, from all jokes or from `category` when given.
    async fn list_jokes(&self, category: Option<&str>) -> ServiceResult<Vec<String>>;

    async fn joke_by_id(&self, id: &str) -> ServiceResult<Joke>;

    async fn create_category(&self, name: &str) -> ServiceResult<()>;

    /// Create a new joke and file it under an existing category.
    async fn create_joke(&self, content: &str, category: &str) -> ServiceResult<()>;

    /// Link an existing joke to another category.
    async fn attach_joke(&self, id: &str, category: &str) -> ServiceResult<()>;

    async fn like_joke(&self, id: &str) -> ServiceResult<()>;

    async fn dislike_joke(&self, id: &str) -> ServiceResult<()>;
}
