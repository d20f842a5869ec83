//! Pipeline configuration, loaded from environment variables at startup.

use std::time::Duration;

/// Default system instruction sent with every generation call.
pub const DEFAULT_PERSONA: &str =
    "너는 따뜻한 심리상담사이다. 사용자의 감정을 공감하고 현실적인 조언을 제공해줘.";

/// Default bot message a fresh session is seeded with.
pub const DEFAULT_GREETING: &str =
    "안녕하세요! 필요한 도움이 있으신가요? 당신의 이야기를 들려주세요. 😊";

/// Default confidence cutoff below which the composer asks a clarifying
/// question instead of asserting the emotion.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.6;

/// Default sampling temperature for generation calls.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default number of extra attempts after a transient adapter failure.
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Runtime configuration for the maeum pipeline and front-end.
///
/// Every field has a working default so the demo runs without any
/// environment variables set, except the generator API key.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted text-classification inference API
    /// (default: `"https://api-inference.huggingface.co/models"`).
    pub classifier_endpoint: String,

    /// Classification model identifier appended to the endpoint
    /// (default: `"Jinuuuu/KoELECTRA_fine_tunning_emotion"`).
    pub classifier_model: String,

    /// Optional bearer token for the classification service.
    pub classifier_token: Option<String>,

    /// Base URL of the OpenAI-compatible chat-completion API
    /// (default: `"https://api.openai.com/v1"`).
    pub generator_base_url: String,

    /// API key for the chat-completion service, from
    /// `MAEUM_OPENAI_API_KEY` with `OPENAI_API_KEY` as fallback.
    pub generator_api_key: Option<String>,

    /// Chat-completion model identifier (default: `"gpt-4o-mini"`).
    pub generator_model: String,

    /// Sampling temperature for generation calls (default: `0.7`).
    pub temperature: f32,

    /// Clarifying-question cutoff (default: `0.6`).
    pub confidence_threshold: f32,

    /// Extra attempts after a transient failure (default: `1`).
    pub max_retries: u32,

    /// Per-request HTTP timeout in seconds (default: `30`).
    pub http_timeout_secs: u64,

    /// System instruction sent with every generation call.
    pub persona: String,

    /// Bot message a fresh session is seeded with.
    pub greeting: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,reqwest=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            classifier_endpoint: env_or(
                "MAEUM_CLASSIFIER_ENDPOINT",
                "https://api-inference.huggingface.co/models",
            ),
            classifier_model: env_or(
                "MAEUM_CLASSIFIER_MODEL",
                "Jinuuuu/KoELECTRA_fine_tunning_emotion",
            ),
            classifier_token: std::env::var("MAEUM_CLASSIFIER_TOKEN").ok(),
            generator_base_url: env_or("MAEUM_GENERATOR_BASE_URL", "https://api.openai.com/v1"),
            generator_api_key: std::env::var("MAEUM_OPENAI_API_KEY")
                .or_else(|_| std::env::var("OPENAI_API_KEY"))
                .ok(),
            generator_model: env_or("MAEUM_GENERATOR_MODEL", "gpt-4o-mini"),
            temperature: parse_env("MAEUM_TEMPERATURE", DEFAULT_TEMPERATURE),
            confidence_threshold: parse_env(
                "MAEUM_CONFIDENCE_THRESHOLD",
                DEFAULT_CONFIDENCE_THRESHOLD,
            ),
            max_retries: parse_env("MAEUM_MAX_RETRIES", DEFAULT_MAX_RETRIES),
            http_timeout_secs: parse_env("MAEUM_HTTP_TIMEOUT_SECS", 30),
            persona: env_or("MAEUM_PERSONA", DEFAULT_PERSONA),
            greeting: env_or("MAEUM_GREETING", DEFAULT_GREETING),
            log_level: env_or("MAEUM_LOG", "info"),
            log_json: std::env::var("MAEUM_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Per-request HTTP timeout as a [`Duration`].
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
