//! Turn orchestration for the counseling chat.
//!
//! Each user message runs through a fixed phase sequence:
//!
//! 1. `Received` – the raw text passed the empty-input guard and was
//!    appended to the session transcript.
//! 2. `Classifying` – the emotion classifier scores the text.
//! 3. `Composing` – the best label is mapped and rendered into prompts.
//! 4. `Generating` – the response generator produces the counselor reply.
//! 5. `Completed` or `Failed` – terminal. A failed turn leaves the user
//!    message in the transcript with no reply appended.
//!
//! Transient adapter failures are retried a bounded number of times
//! before the turn fails.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::classify::{self, EmotionClassifier, LabelScore};
use crate::compose::PromptComposer;
use crate::config::DEFAULT_MAX_RETRIES;
use crate::emotion::{EmotionPrediction, LabelMap};
use crate::error::CounselError;
use crate::generate::{GenerationRequest, ResponseGenerator};
use crate::history::SessionHistory;
use crate::message::ChatMessage;
use crate::normalize::normalize;

/// Pause between attempts at a transient adapter failure.
const RETRY_DELAY: Duration = Duration::from_millis(500);

// ── Turn lifecycle ───────────────────────────────────────────────────────────

/// Where a turn currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Received,
    Classifying,
    Composing,
    Generating,
    Completed,
    Failed,
}

impl TurnPhase {
    /// `true` once the turn can no longer change phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnPhase::Completed | TurnPhase::Failed)
    }
}

/// Result of a completed turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// Correlation id shared by every log record of this turn.
    pub turn_id: String,
    /// Mapped emotion and raw confidence the reply was composed around.
    pub prediction: EmotionPrediction,
    /// Counselor reply, already appended to the transcript.
    pub reply: String,
}

fn advance(turn_id: &str, phase: &mut TurnPhase, next: TurnPhase) {
    debug!(turn = turn_id, from = ?*phase, to = ?next, "turn phase change");
    *phase = next;
}

// ── Pipeline ─────────────────────────────────────────────────────────────────

/// Drives one chat turn end to end:
/// normalize → classify → map → compose → generate → append.
pub struct CounselPipeline {
    classifier: Arc<dyn EmotionClassifier>,
    generator: Arc<dyn ResponseGenerator>,
    label_map: LabelMap,
    composer: PromptComposer,
    max_retries: u32,
}

impl CounselPipeline {
    pub fn new(
        classifier: Arc<dyn EmotionClassifier>,
        generator: Arc<dyn ResponseGenerator>,
        composer: PromptComposer,
    ) -> Self {
        Self {
            classifier,
            generator,
            label_map: LabelMap::default(),
            composer,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Replace the default label table.
    pub fn with_label_map(mut self, label_map: LabelMap) -> Self {
        self.label_map = label_map;
        self
    }

    /// Set how many extra attempts a transient adapter failure gets.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Run one turn against `history`.
    ///
    /// The user message is appended before classification starts, so a
    /// failing turn still leaves it in the transcript. Blank input is
    /// rejected up front and appends nothing.
    pub async fn handle_message(
        &self,
        history: &mut SessionHistory,
        raw: &str,
    ) -> Result<TurnOutcome, CounselError> {
        let text = normalize(raw)?;
        let turn_id = Uuid::new_v4().to_string();
        let mut phase = TurnPhase::Received;
        history.append(ChatMessage::user(text));

        let result = self.run_turn(&turn_id, &mut phase, history, text).await;
        if let Err(error) = &result {
            advance(&turn_id, &mut phase, TurnPhase::Failed);
            warn!(turn = %turn_id, error = %error, "turn failed");
        }
        debug_assert!(phase.is_terminal());
        result
    }

    async fn run_turn(
        &self,
        turn_id: &str,
        phase: &mut TurnPhase,
        history: &mut SessionHistory,
        text: &str,
    ) -> Result<TurnOutcome, CounselError> {
        let started = Instant::now();

        advance(turn_id, phase, TurnPhase::Classifying);
        let scores = self.classify_with_retry(text).await?;
        let best = classify::best(&scores).ok_or_else(|| CounselError::ClassificationUnavailable {
            message: "classifier returned no scores".to_owned(),
        })?;
        let prediction = EmotionPrediction {
            emotion: self.label_map.map(&best.label),
            confidence: best.score,
        };
        debug!(
            turn = turn_id,
            emotion = %prediction.emotion,
            confidence = prediction.confidence,
            "emotion classified"
        );

        advance(turn_id, phase, TurnPhase::Composing);
        let request = self.composer.compose(text, &prediction)?;

        advance(turn_id, phase, TurnPhase::Generating);
        let reply = self.generate_with_retry(&request).await?;
        history.append(ChatMessage::bot(reply.clone()));

        advance(turn_id, phase, TurnPhase::Completed);
        info!(
            turn = turn_id,
            emotion = %prediction.emotion,
            confidence = prediction.confidence,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "turn completed"
        );
        Ok(TurnOutcome {
            turn_id: turn_id.to_owned(),
            prediction,
            reply,
        })
    }

    async fn classify_with_retry(&self, text: &str) -> Result<Vec<LabelScore>, CounselError> {
        let attempts = self.max_retries.saturating_add(1);
        let mut last_err = None;
        for attempt in 0..attempts {
            match self.classifier.classify(text).await {
                Ok(scores) => return Ok(scores),
                Err(e) if !e.is_transient() => return Err(e),
                Err(e) => {
                    warn!(error = %e, attempt = attempt + 1, "classification attempt failed");
                    last_err = Some(e);
                    if attempt + 1 < attempts {
                        tokio::time::sleep(RETRY_DELAY).await;
                    }
                }
            }
        }
        Err(last_err.unwrap_or_else(|| CounselError::ClassificationUnavailable {
            message: "no classification attempts were made".to_owned(),
        }))
    }

    async fn generate_with_retry(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, CounselError> {
        let attempts = self.max_retries.saturating_add(1);
        let mut last_err = None;
        for attempt in 0..attempts {
            match self.generator.generate(request).await {
                Ok(reply) => return Ok(reply),
                Err(e) if !e.is_transient() => return Err(e),
                Err(e) => {
                    warn!(error = %e, attempt = attempt + 1, "generation attempt failed");
                    last_err = Some(e);
                    if attempt + 1 < attempts {
                        tokio::time::sleep(RETRY_DELAY).await;
                    }
                }
            }
        }
        Err(last_err.unwrap_or_else(|| CounselError::GenerationUnavailable {
            message: "no generation attempts were made".to_owned(),
        }))
    }
}
