//! Mock transport for exercising workflow logic without a network.
//!
//! Available in all builds (not just tests) so integration tests can drive
//! the full workflow against configurable successes, failures, and 429s.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{GenerationApi, Language, PostReceipt, PostingApi, RateLimitInfo};
use crate::error::{ApiError, ApiResult};

/// Configuration for mock transport behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Canned single-post generation response
    pub single_response: String,

    /// Canned thread generation response; when empty, the mock synthesizes
    /// exactly the requested number of parts
    pub thread_response: Vec<String>,

    /// Error to return from generation calls
    pub generate_error: Option<ApiError>,

    /// Error to return from post calls
    pub post_error: Option<ApiError>,

    /// Rate-limit metadata attached to post receipts (None = no metadata)
    pub receipt_remaining: Option<u32>,

    /// Value returned by the rate-limit fetch
    pub rate_limit_remaining: u32,

    /// Error to return from the rate-limit fetch
    pub fetch_error: Option<ApiError>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            single_response: "A generated post about the topic.".to_string(),
            thread_response: Vec::new(),
            generate_error: None,
            post_error: None,
            receipt_remaining: Some(16),
            rate_limit_remaining: 17,
            fetch_error: None,
        }
    }
}

/// Mock transport for testing
pub struct MockApi {
    config: MockConfig,
    generate_call_count: Arc<Mutex<usize>>,
    post_call_count: Arc<Mutex<usize>>,
    posted_payloads: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockApi {
    /// Create a new mock with the given configuration
    pub fn new(config: MockConfig) -> Self {
        Self {
            config,
            generate_call_count: Arc::new(Mutex::new(0)),
            post_call_count: Arc::new(Mutex::new(0)),
            posted_payloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that always succeeds
    pub fn success() -> Self {
        Self::new(MockConfig::default())
    }

    /// Create a mock with a canned single-post generation response
    pub fn with_single_response(text: &str) -> Self {
        Self::new(MockConfig {
            single_response: text.to_string(),
            ..Default::default()
        })
    }

    /// Create a mock with a canned thread generation response
    pub fn with_thread_response(parts: Vec<String>) -> Self {
        Self::new(MockConfig {
            thread_response: parts,
            ..Default::default()
        })
    }

    /// Create a mock whose generation calls fail
    pub fn generation_failure(error: ApiError) -> Self {
        Self::new(MockConfig {
            generate_error: Some(error),
            ..Default::default()
        })
    }

    /// Create a mock whose post calls fail
    pub fn posting_failure(error: ApiError) -> Self {
        Self::new(MockConfig {
            post_error: Some(error),
            ..Default::default()
        })
    }

    /// Create a mock whose post calls are rejected with a 429
    pub fn rate_limited() -> Self {
        Self::posting_failure(ApiError::RateLimited)
    }

    /// Number of generation calls issued
    pub fn generate_call_count(&self) -> usize {
        *self.generate_call_count.lock().unwrap()
    }

    /// Number of post calls issued
    pub fn post_call_count(&self) -> usize {
        *self.post_call_count.lock().unwrap()
    }

    /// Payloads of all post calls, in order. Single posts are recorded as a
    /// one-element payload.
    pub fn posted_payloads(&self) -> Vec<Vec<String>> {
        self.posted_payloads.lock().unwrap().clone()
    }

    fn receipt(&self) -> PostReceipt {
        PostReceipt {
            rate_limit: self
                .config
                .receipt_remaining
                .map(|remaining| RateLimitInfo { remaining }),
        }
    }
}

#[async_trait]
impl GenerationApi for MockApi {
    async fn generate_single(&self, _topic: &str, _language: Language) -> ApiResult<String> {
        *self.generate_call_count.lock().unwrap() += 1;

        if let Some(error) = &self.config.generate_error {
            return Err(error.clone());
        }

        Ok(self.config.single_response.clone())
    }

    async fn generate_thread(
        &self,
        topic: &str,
        part_count: usize,
        _language: Language,
    ) -> ApiResult<Vec<String>> {
        *self.generate_call_count.lock().unwrap() += 1;

        if let Some(error) = &self.config.generate_error {
            return Err(error.clone());
        }

        if self.config.thread_response.is_empty() {
            Ok((1..=part_count)
                .map(|i| format!("Part {} about {}.", i, topic))
                .collect())
        } else {
            Ok(self.config.thread_response.clone())
        }
    }
}

#[async_trait]
impl PostingApi for MockApi {
    async fn post_single(&self, text: &str) -> ApiResult<PostReceipt> {
        *self.post_call_count.lock().unwrap() += 1;

        if let Some(error) = &self.config.post_error {
            return Err(error.clone());
        }

        self.posted_payloads
            .lock()
            .unwrap()
            .push(vec![text.to_string()]);
        Ok(self.receipt())
    }

    async fn post_thread(&self, texts: &[String]) -> ApiResult<PostReceipt> {
        *self.post_call_count.lock().unwrap() += 1;

        if let Some(error) = &self.config.post_error {
            return Err(error.clone());
        }

        self.posted_payloads.lock().unwrap().push(texts.to_vec());
        Ok(self.receipt())
    }

    async fn fetch_rate_limit(&self) -> ApiResult<u32> {
        if let Some(error) = &self.config.fetch_error {
            return Err(error.clone());
        }

        Ok(self.config.rate_limit_remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_single_generation() {
        let mock = MockApi::with_single_response("Hello from the mock");

        let text = mock
            .generate_single("anything", Language::English)
            .await
            .unwrap();
        assert_eq!(text, "Hello from the mock");
        assert_eq!(mock.generate_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_thread_synthesizes_requested_count() {
        let mock = MockApi::success();

        let parts = mock
            .generate_thread("rust", 4, Language::English)
            .await
            .unwrap();
        assert_eq!(parts.len(), 4);
        assert!(parts[0].contains("rust"));
    }

    #[tokio::test]
    async fn test_mock_thread_canned_response_wins() {
        let mock = MockApi::with_thread_response(vec!["a".to_string(), "b".to_string()]);

        // The canned response is returned regardless of the requested count,
        // which lets tests simulate contract violations.
        let parts = mock
            .generate_thread("rust", 5, Language::English)
            .await
            .unwrap();
        assert_eq!(parts, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_mock_generation_failure() {
        let mock = MockApi::generation_failure(ApiError::Status(500));

        let result = mock.generate_single("topic", Language::Hindi).await;
        assert_eq!(result.unwrap_err(), ApiError::Status(500));
        assert_eq!(mock.generate_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_records_posted_payloads() {
        let mock = MockApi::success();

        mock.post_single("solo post").await.unwrap();
        mock.post_thread(&["one".to_string(), "two".to_string()])
            .await
            .unwrap();

        let payloads = mock.posted_payloads();
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[0], vec!["solo post"]);
        assert_eq!(payloads[1], vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_mock_rate_limited() {
        let mock = MockApi::rate_limited();

        let result = mock.post_single("anything").await;
        assert_eq!(result.unwrap_err(), ApiError::RateLimited);
        assert!(mock.posted_payloads().is_empty());
    }

    #[tokio::test]
    async fn test_mock_receipt_metadata() {
        let mock = MockApi::new(MockConfig {
            receipt_remaining: Some(4),
            ..Default::default()
        });

        let receipt = mock.post_single("text").await.unwrap();
        assert_eq!(receipt.rate_limit.unwrap().remaining, 4);

        let mock = MockApi::new(MockConfig {
            receipt_remaining: None,
            ..Default::default()
        });
        let receipt = mock.post_single("text").await.unwrap();
        assert!(receipt.rate_limit.is_none());
    }

    #[tokio::test]
    async fn test_mock_fetch_rate_limit() {
        let mock = MockApi::new(MockConfig {
            rate_limit_remaining: 11,
            ..Default::default()
        });
        assert_eq!(mock.fetch_rate_limit().await.unwrap(), 11);

        let mock = MockApi::new(MockConfig {
            fetch_error: Some(ApiError::Network("offline".to_string())),
            ..Default::default()
        });
        assert!(mock.fetch_rate_limit().await.is_err());
    }
}
