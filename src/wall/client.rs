use super::live::sse_post_stream;
use super::{CreateError, FetchError, Post, PostStream, SubscribeError, WallService};
use crate::config::WallConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Per-request deadline for the one-shot REST calls. The live stream is
/// exempt: it stays open until the consumer drops it.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub struct WallClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct NewPost<'a> {
    body: &'a str,
}

impl WallClient {
    pub fn new(config: &WallConfig) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent("walltui/0.1")
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn with_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.header("apikey", key),
            None => req,
        }
    }
}

#[async_trait]
impl WallService for WallClient {
    async fn fetch_all_posts(&self) -> Result<Vec<Post>, FetchError> {
        let req = self
            .client
            .get(self.endpoint("posts"))
            .query(&[("order", "created_at.desc")])
            .timeout(REQUEST_TIMEOUT);

        let response = self.with_auth(req).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let posts: Vec<Post> = response.json().await?;
        tracing::debug!(count = posts.len(), "fetched wall history");
        Ok(posts)
    }

    async fn create_post(&self, body: &str) -> Result<Post, CreateError> {
        let req = self
            .client
            .post(self.endpoint("posts"))
            .json(&NewPost { body })
            .timeout(REQUEST_TIMEOUT);

        let response = self.with_auth(req).send().await?;
        if !response.status().is_success() {
            return Err(CreateError::Status(response.status()));
        }

        let post: Post = response.json().await?;
        tracing::debug!(id = %post.id, "post created");
        Ok(post)
    }

    async fn subscribe_to_creations(&self) -> Result<PostStream, SubscribeError> {
        let req = self
            .client
            .get(self.endpoint("posts/stream"))
            .header("Accept", "text/event-stream");

        let response = self.with_auth(req).send().await?;
        if !response.status().is_success() {
            return Err(SubscribeError::Status(response.status()));
        }

        tracing::debug!("live subscription open");
        Ok(sse_post_stream(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client(base_url: &str) -> WallClient {
        WallClient::new(&WallConfig {
            base_url: base_url.to_string(),
            api_key: None,
        })
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let client = make_client("http://localhost:8000");
        assert_eq!(client.endpoint("posts"), "http://localhost:8000/posts");
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let client = make_client("http://localhost:8000/");
        assert_eq!(
            client.endpoint("posts/stream"),
            "http://localhost:8000/posts/stream"
        );
    }

    #[test]
    fn new_post_serializes_raw_body() {
        let json = serde_json::to_string(&NewPost { body: "hello" }).unwrap();
        assert_eq!(json, r#"{"body":"hello"}"#);
    }
}
