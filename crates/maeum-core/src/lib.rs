//! Core pipeline for maeum, an emotion-aware counseling chat.
//!
//! One user message becomes one counselor reply: the text is scored by a
//! hosted emotion classifier, the best label is mapped to a Korean display
//! emotion, a counseling prompt is composed around it, and an
//! OpenAI-compatible chat model writes the reply. The exchange is kept in
//! an in-memory session transcript.
//!
//! # Quick-start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use maeum_core::{
//!     Config, CounselPipeline, HfClassifier, OpenAiGenerator, PromptComposer, SessionHistory,
//! };
//!
//! # async fn demo() -> Result<(), maeum_core::CounselError> {
//! let cfg = Config::from_env();
//! let classifier = Arc::new(HfClassifier::new(
//!     &cfg.classifier_endpoint,
//!     &cfg.classifier_model,
//!     cfg.classifier_token.clone(),
//!     cfg.http_timeout(),
//! )?);
//! let generator = Arc::new(OpenAiGenerator::new(
//!     &cfg.generator_base_url,
//!     cfg.generator_api_key.clone().unwrap_or_default(),
//!     cfg.generator_model.clone(),
//!     cfg.http_timeout(),
//! )?);
//! let pipeline = CounselPipeline::new(
//!     classifier,
//!     generator,
//!     PromptComposer::new(cfg.persona.clone(), cfg.confidence_threshold, cfg.temperature),
//! )
//! .with_max_retries(cfg.max_retries);
//!
//! let mut history = SessionHistory::with_greeting(cfg.greeting.clone());
//! let outcome = pipeline
//!     .handle_message(&mut history, "오늘 너무 힘들었어")
//!     .await?;
//! println!("{}", outcome.reply);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod compose;
pub mod config;
pub mod emotion;
pub mod error;
pub mod generate;
pub mod history;
pub mod message;
pub mod normalize;
pub mod pipeline;

pub use classify::huggingface::HfClassifier;
pub use classify::{EmotionClassifier, LabelScore};
pub use compose::PromptComposer;
pub use config::Config;
pub use emotion::{Emotion, EmotionPrediction, LabelMap};
pub use error::CounselError;
pub use generate::openai::OpenAiGenerator;
pub use generate::{GenerationRequest, ResponseGenerator};
pub use history::SessionHistory;
pub use message::{ChatMessage, ChatRole};
pub use normalize::normalize;
pub use pipeline::{CounselPipeline, TurnOutcome, TurnPhase};
