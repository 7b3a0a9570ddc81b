pub mod client;
pub mod live;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::Stream;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use thiserror::Error;

/// A single wall entry as stored by the remote service.
///
/// `id` and `created_at` are server-assigned; clients never send them.
/// `author` is kept in the model even though the wall renders every post
/// as "Anonymous" today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub author: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// An open-ended push stream of newly created posts. Dropping the stream
/// closes the underlying connection.
pub type PostStream = Pin<Box<dyn Stream<Item = Post> + Send>>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(StatusCode),
}

#[derive(Debug, Error)]
pub enum CreateError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(StatusCode),
}

#[derive(Debug, Error)]
pub enum SubscribeError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(StatusCode),
}

/// The remote wall service boundary. The app talks to the service only
/// through this trait so tests can substitute a double.
#[async_trait]
pub trait WallService: Send + Sync {
    /// All posts, newest first.
    async fn fetch_all_posts(&self) -> Result<Vec<Post>, FetchError>;

    /// Create a post with a server-assigned id and timestamp. The created
    /// post also arrives back on the live stream.
    async fn create_post(&self, body: &str) -> Result<Post, CreateError>;

    /// Open the live stream of creation events.
    async fn subscribe_to_creations(&self) -> Result<PostStream, SubscribeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_deserializes_from_service_json() {
        let json = r#"{"id":"a1","author":null,"body":"hi","created_at":"2024-01-01T00:00:00Z"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, "a1");
        assert_eq!(post.author, None);
        assert_eq!(post.body, "hi");
        assert_eq!(post.created_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn post_deserializes_without_author_field() {
        let json = r#"{"id":"a2","body":"yo","created_at":"2024-01-01T00:05:00Z"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.author, None);
    }

    #[test]
    fn post_keeps_author_when_present() {
        let json = r#"{"id":"a3","author":"u-7","body":"x","created_at":"2024-01-01T00:00:00Z"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.author.as_deref(), Some("u-7"));
    }
}
