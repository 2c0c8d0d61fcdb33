//! JSON-over-HTTP client for the generation and posting services.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::{
    GenerateThreadRequest, GenerateThreadResponse, GenerateTweetRequest, GenerateTweetResponse,
    GenerationApi, Language, PostReceipt, PostThreadRequest, PostTweetRequest, PostingApi,
    RateLimitStatus,
};
use crate::error::{ApiError, ApiResult};

const GENERATE_TWEET_PATH: &str = "/generate-tweet";
const GENERATE_THREAD_PATH: &str = "/generate-thread";
const POST_TWEET_PATH: &str = "/post-tweet";
const POST_THREAD_PATH: &str = "/post-thread";
const RATE_LIMIT_PATH: &str = "/rate-limit";

/// HTTP client implementing both service contracts against one base URL.
pub struct HttpApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpApi {
    /// Create a client for the given base URL.
    ///
    /// The URL is validated eagerly so a misconfigured endpoint fails at
    /// startup rather than on the first request.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        url::Url::parse(&base_url)
            .map_err(|e| ApiError::Malformed(format!("invalid base URL '{}': {}", base_url, e)))?;

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "sending request");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "sending request");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    match response.status() {
        StatusCode::TOO_MANY_REQUESTS => Err(ApiError::RateLimited),
        status if !status.is_success() => Err(ApiError::Status(status.as_u16())),
        _ => response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string())),
    }
}

#[async_trait]
impl GenerationApi for HttpApi {
    async fn generate_single(&self, topic: &str, language: Language) -> ApiResult<String> {
        let body = GenerateTweetRequest {
            topic: topic.to_string(),
            language,
        };
        let response: GenerateTweetResponse = self.post_json(GENERATE_TWEET_PATH, &body).await?;
        Ok(response.tweet)
    }

    async fn generate_thread(
        &self,
        topic: &str,
        part_count: usize,
        language: Language,
    ) -> ApiResult<Vec<String>> {
        let body = GenerateThreadRequest {
            topic: topic.to_string(),
            part_count,
            language,
        };
        let response: GenerateThreadResponse = self.post_json(GENERATE_THREAD_PATH, &body).await?;
        Ok(response.tweets)
    }
}

#[async_trait]
impl PostingApi for HttpApi {
    async fn post_single(&self, text: &str) -> ApiResult<PostReceipt> {
        let body = PostTweetRequest {
            tweet: text.to_string(),
        };
        self.post_json(POST_TWEET_PATH, &body).await
    }

    async fn post_thread(&self, texts: &[String]) -> ApiResult<PostReceipt> {
        let body = PostThreadRequest {
            tweets: texts.to_vec(),
        };
        self.post_json(POST_THREAD_PATH, &body).await
    }

    async fn fetch_rate_limit(&self) -> ApiResult<u32> {
        let status: RateLimitStatus = self.get_json(RATE_LIMIT_PATH).await?;
        Ok(status.remaining)
    }
}
