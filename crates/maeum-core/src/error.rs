//! Pipeline error taxonomy.
//!
//! Every fallible operation in maeum-core returns `Result<T, CounselError>`.
//! The two service-backed variants are transient and eligible for the
//! pipeline's bounded retry; everything else fails the turn immediately.
//! Only [`CounselError::user_notice`] may reach the rendering layer –
//! technical detail stays in the structured logs.

use thiserror::Error;

/// All errors that can occur while handling one submitted message.
#[derive(Debug, Error)]
pub enum CounselError {
    /// The submitted text was empty or whitespace-only. Nothing was
    /// dispatched and nothing was recorded in the session history.
    #[error("empty input")]
    EmptyInput,

    /// The emotion-classification service could not be reached, timed out,
    /// or returned a malformed/empty response.
    #[error("classification unavailable: {message}")]
    ClassificationUnavailable { message: String },

    /// The chat-completion call failed (network, auth, quota) or returned
    /// no choices.
    #[error("generation unavailable: {message}")]
    GenerationUnavailable { message: String },

    /// The counseling prompt template failed to render.
    #[error("prompt compose failed: {0}")]
    Compose(#[from] minijinja::Error),
}

impl CounselError {
    /// Returns `true` for failures worth one more attempt. Guard and
    /// template failures are deterministic and never retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CounselError::ClassificationUnavailable { .. }
                | CounselError::GenerationUnavailable { .. }
        )
    }

    /// User-facing notice the rendering layer shows in place of a bot reply.
    pub fn user_notice(&self) -> &'static str {
        match self {
            CounselError::EmptyInput => "메시지를 입력해 주세요.",
            CounselError::ClassificationUnavailable { .. } => {
                "감정 분석 서비스에 연결하지 못했어요. 잠시 후 다시 시도해 주세요."
            }
            CounselError::GenerationUnavailable { .. } => {
                "상담 답변을 생성하지 못했어요. 잠시 후 다시 시도해 주세요."
            }
            CounselError::Compose(_) => "답변을 준비하지 못했어요. 잠시 후 다시 시도해 주세요.",
        }
    }
}
