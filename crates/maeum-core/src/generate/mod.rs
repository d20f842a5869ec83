//! Conversational-generation boundary.

pub mod openai;

use async_trait::async_trait;

use crate::error::CounselError;

/// Complete input for one generation call, produced by the composer.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Counselor persona sent as the system message.
    pub system_prompt: String,
    /// Turn-specific counseling prompt.
    pub user_prompt: String,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Boundary to a hosted chat-completion service.
///
/// Implementations return the first completion's text verbatim. Failures
/// (network, auth, quota, empty choices) map to
/// [`CounselError::GenerationUnavailable`].
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, CounselError>;
}
