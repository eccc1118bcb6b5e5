// API client module: a small async HTTP client for the HaHaSaaS backend.
// It implements `JokeService`, translating each operation into one REST
// call and every failure into a `ServiceError`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::service::{Joke, JokeService, ServiceError, ServiceResult};

/// Holds a reqwest client and the base URL of the joke API, e.g.
/// `http://localhost:8080/api`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

/// Payload for `POST /joke/category`.
#[derive(Serialize, Debug)]
pub struct NewCategory<'a> {
    pub name: &'a str,
}

/// Payload for `POST /joke`.
#[derive(Serialize, Debug)]
pub struct NewJoke<'a> {
    pub category: &'a str,
    pub joke: &'a str,
}

#[derive(Deserialize)]
struct JokeEnvelope {
    joke: Joke,
}

// The backend sends `null` instead of `[]` for an empty table.
#[derive(Deserialize)]
struct CategoriesEnvelope {
    categories: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct JokesEnvelope {
    jokes: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    /// Build a client for the configured API URL and timeout.
    pub fn from_config(config: &Config) -> ServiceResult<Self> {
        Self::new(&config.api_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn new(base_url: &str, timeout: Duration) -> ServiceResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ServiceError::Network(format!("invalid API URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::Network(format!("invalid API URL {base_url}")));
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hahasaas/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        Ok(ApiClient {
            client,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one so
    /// category names with spaces or slashes stay a single segment.
    ///
    /// `.` and `..` are refused: the URL parser would fold them away and the
    /// request would silently reach a different route.
    fn url(&self, segments: &[&str]) -> ServiceResult<Url> {
        if let Some(seg) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(ServiceError::Rejected(format!("invalid path segment {seg:?}")));
        }
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str], failure: &str) -> ServiceResult<T> {
        let url = self.url(segments)?;
        debug!(%url, "GET");
        let res = self.client.get(url).send().await.map_err(|e| self.transport_error(e))?;
        let res = check_status(res, failure).await?;
        res.json().await.map_err(|e| ServiceError::Decode(e.to_string()))
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: Option<&B>,
        failure: &str,
    ) -> ServiceResult<()> {
        let url = self.url(segments)?;
        debug!(%url, "POST");
        let mut req = self.client.post(url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let res = req.send().await.map_err(|e| self.transport_error(e))?;
        check_status(res, failure).await?;
        Ok(())
    }

    fn transport_error(&self, err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            ServiceError::Timeout(self.timeout.as_secs())
        } else {
            ServiceError::Network(err.to_string())
        }
    }
}

/// Pass successful responses through; turn anything else into an error,
/// preferring the backend's own `{"error": ...}` message over `failure`.
async fn check_status(res: Response, failure: &str) -> ServiceResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let txt = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&txt)
        .map(|b| b.error)
        .unwrap_or_else(|_| failure.to_owned());
    Err(match status {
        StatusCode::NOT_FOUND => ServiceError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            ServiceError::Rejected(message)
        }
        other => ServiceError::Status {
            status: other.as_u16(),
            message,
        },
    })
}

#[async_trait]
impl JokeService for ApiClient {
    async fn random_joke(&self, category: Option<&str>) -> ServiceResult<Joke> {
        let env: JokeEnvelope = match category {
            Some(cat) => self.get_json(&["joke", "random", cat], "Failed to fetch joke").await?,
            None => self.get_json(&["joke", "random"], "Failed to fetch joke").await?,
        };
        Ok(env.joke)
    }

    async fn list_categories(&self) -> ServiceResult<Vec<String>> {
        let env: CategoriesEnvelope = self
            .get_json(&["joke", "categories"], "Failed to fetch categories")
            .await?;
        Ok(env.categories.unwrap_or_default())
    }

    async fn list_jokes(&self, category: Option<&str>) -> ServiceResult<Vec<String>> {
        let env: JokesEnvelope = match category {
            Some(cat) => self.get_json(&["joke", "category", cat], "Failed to fetch jokes").await?,
            None => self.get_json(&["joke", "all"], "Failed to fetch jokes").await?,
        };
        Ok(env.jokes.unwrap_or_default())
    }

    async fn joke_by_id(&self, id: &str) -> ServiceResult<Joke> {
        let env: JokeEnvelope = self.get_json(&["joke", id], "Failed to fetch joke").await?;
        Ok(env.joke)
    }

    async fn create_category(&self, name: &str) -> ServiceResult<()> {
        self.post(&["joke", "category"], Some(&NewCategory { name }), "Failed to add category")
            .await
    }

    async fn create_joke(&self, content: &str, category: &str) -> ServiceResult<()> {
        let body = NewJoke {
            category,
            joke: content,
        };
        self.post(&["joke"], Some(&body), "Failed to add joke").await
    }

    async fn attach_joke(&self, id: &str, category: &str) -> ServiceResult<()> {
        self.post::<()>(
            &["joke", "category", category, id],
            None,
            "Failed to add joke to category",
        )
        .await
    }

    async fn like_joke(&self, id: &str) -> ServiceResult<()> {
        self.post::<()>(&["joke", "like", id], None, "Failed to like joke").await
    }

    async fn dislike_joke(&self, id: &str) -> ServiceResult<()> {
        self.post::<()>(&["joke", "dislike", id], None, "Failed to dislike joke").await
    }
}
