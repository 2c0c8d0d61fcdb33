//! Transport contracts for the generation and posting services.
//!
//! The core depends only on these request/response shapes and the two
//! traits below; the services behind them are external collaborators.
//! [`http::HttpApi`] implements both traits against a real backend, and
//! [`mock::MockApi`] provides a configurable test double.

use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;

pub mod http;
pub mod mock;

/// Target language for generated content, passed through to the generator
/// on every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Hinglish,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" => Ok(Language::English),
            "hindi" => Ok(Language::Hindi),
            "hinglish" => Ok(Language::Hinglish),
            _ => Err(format!(
                "Invalid language: '{}'. Valid options: english, hindi, hinglish",
                s
            )),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::English => write!(f, "english"),
            Language::Hindi => write!(f, "hindi"),
            Language::Hinglish => write!(f, "hinglish"),
        }
    }
}

/// Request body for single-post generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTweetRequest {
    pub topic: String,
    pub language: Language,
}

/// Success body for single-post generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTweetResponse {
    pub tweet: String,
}

/// Request body for thread generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateThreadRequest {
    pub topic: String,
    pub part_count: usize,
    pub language: Language,
}

/// Success body for thread generation; part order is the reply-chain order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateThreadResponse {
    pub tweets: Vec<String>,
}

/// Request body for publishing a single post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostTweetRequest {
    pub tweet: String,
}

/// Request body for publishing a thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostThreadRequest {
    pub tweets: Vec<String>,
}

/// Rate-limit metadata optionally attached to post responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitInfo {
    pub remaining: u32,
}

/// Success body for both publish operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostReceipt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimitInfo>,
}

/// Success body of the standalone rate-limit fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitStatus {
    pub remaining: u32,
}

/// Client for the external AI generation service.
#[async_trait]
pub trait GenerationApi: Send + Sync {
    /// Generate one post about `topic` in `language`.
    async fn generate_single(&self, topic: &str, language: Language) -> ApiResult<String>;

    /// Generate an ordered thread of `part_count` posts about `topic`.
    async fn generate_thread(
        &self,
        topic: &str,
        part_count: usize,
        language: Language,
    ) -> ApiResult<Vec<String>>;
}

/// Client for the external posting service.
#[async_trait]
pub trait PostingApi: Send + Sync {
    /// Publish a single post.
    async fn post_single(&self, text: &str) -> ApiResult<PostReceipt>;

    /// Publish an ordered thread. `texts` is sent exactly as given; the
    /// order is the reply-chain order.
    async fn post_thread(&self, texts: &[String]) -> ApiResult<PostReceipt>;

    /// Fetch the authoritative remaining quota for the current period.
    async fn fetch_rate_limit(&self) -> ApiResult<u32>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_str() {
        assert_eq!("english".parse::<Language>().unwrap(), Language::English);
        assert_eq!("hindi".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!("hinglish".parse::<Language>().unwrap(), Language::Hinglish);

        // Case insensitive
        assert_eq!("English".parse::<Language>().unwrap(), Language::English);
        assert_eq!("HINGLISH".parse::<Language>().unwrap(), Language::Hinglish);
    }

    #[test]
    fn test_language_from_str_invalid() {
        let result = "klingon".parse::<Language>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid language: 'klingon'"));
    }

    #[test]
    fn test_language_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Language::Hinglish).unwrap(),
            r#""hinglish""#
        );
        let parsed: Language = serde_json::from_str(r#""hindi""#).unwrap();
        assert_eq!(parsed, Language::Hindi);
    }

    #[test]
    fn test_generate_thread_request_wire_shape() {
        let request = GenerateThreadRequest {
            topic: "AI in healthcare".to_string(),
            part_count: 3,
            language: Language::English,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["topic"], "AI in healthcare");
        assert_eq!(json["partCount"], 3);
        assert_eq!(json["language"], "english");
    }

    #[test]
    fn test_post_receipt_rate_limit_optional() {
        // A bare object is a valid receipt with no rate-limit metadata.
        let receipt: PostReceipt = serde_json::from_str("{}").unwrap();
        assert!(receipt.rate_limit.is_none());

        let receipt: PostReceipt =
            serde_json::from_str(r#"{"rateLimit":{"remaining":9}}"#).unwrap();
        assert_eq!(receipt.rate_limit.unwrap().remaining, 9);
    }
}
