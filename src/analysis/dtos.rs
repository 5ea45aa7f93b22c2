use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MAX_CONTENT_CHARS: usize = 100_000;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub content: String,
}

impl AnalyzeRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err("Content is required".to_string());
        }
        if self.content.chars().count() > MAX_CONTENT_CHARS {
            return Err("Content too long".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UrlTrustRequest {
    #[serde(default)]
    pub url: String,
    /// Verdict from an upstream Safe Browsing lookup, when one was made.
    #[serde(default)]
    pub safe_browsing_flagged: Option<bool>,
}

impl UrlTrustRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("URL is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
