//! Counseling prompt assembly.
//!
//! Turns a normalized user message plus its classified emotion into the
//! system/user prompt pair sent to the response generator. Rendering goes
//! through [`minijinja`] so the wording lives in one template instead of
//! being scattered over `format!` calls.

use minijinja::{Environment, context};

use crate::emotion::EmotionPrediction;
use crate::error::CounselError;
use crate::generate::GenerationRequest;

/// Template for the user-side prompt.
///
/// The empathy and two-to-three-suggestions requirements are always
/// present; `low_confidence` adds the instruction to gently re-ask the
/// user's feeling instead of asserting the detected emotion.
const USER_PROMPT_TEMPLATE: &str = "\
사용자가 방금 이렇게 말했어:
\"{{ user_text }}\"

감정 분석 결과는 '{{ emotion }}' (확신도 {{ confidence }})이야.
먼저 이 감정을 충분히 공감하고 이해를 표현해 줘. 그리고 상황을 개선할 수 있는 현실적인 조언을 두세 가지 건네줘.
{%- if low_confidence %}
다만 확신도가 낮으니 감정을 단정하지 말고, 지금 기분이 어떤지 부드럽게 한 번 더 되물어봐 줘.
{%- endif %}
답변은 한국어로, 따뜻한 말투로 작성해 줘.";

/// Builds [`GenerationRequest`]s from classified user messages.
pub struct PromptComposer {
    env: Environment<'static>,
    persona: String,
    confidence_threshold: f32,
    temperature: f32,
}

impl PromptComposer {
    pub fn new(
        persona: impl Into<String>,
        confidence_threshold: f32,
        temperature: f32,
    ) -> Self {
        Self {
            env: Environment::new(),
            persona: persona.into(),
            confidence_threshold,
            temperature,
        }
    }

    /// Render the prompt pair for one turn.
    ///
    /// Confidence at or above the threshold counts as confident; only
    /// strictly lower scores get the clarifying instruction.
    pub fn compose(
        &self,
        user_text: &str,
        prediction: &EmotionPrediction,
    ) -> Result<GenerationRequest, CounselError> {
        let low_confidence = prediction.confidence < self.confidence_threshold;
        let user_prompt = self.env.render_str(
            USER_PROMPT_TEMPLATE,
            context! {
                user_text,
                emotion => prediction.emotion.to_string(),
                confidence => format!("{:.2}", prediction.confidence),
                low_confidence,
            },
        )?;
        Ok(GenerationRequest {
            system_prompt: self.persona.clone(),
            user_prompt,
            temperature: self.temperature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_PERSONA, DEFAULT_TEMPERATURE};
    use crate::emotion::Emotion;

    fn composer() -> PromptComposer {
        PromptComposer::new(
            DEFAULT_PERSONA,
            DEFAULT_CONFIDENCE_THRESHOLD,
            DEFAULT_TEMPERATURE,
        )
    }

    #[test]
    fn low_confidence_prompt_carries_label_score_and_followup() {
        let prediction = EmotionPrediction {
            emotion: Emotion::Sadness,
            confidence: 0.42,
        };
        let request = composer().compose("오늘 너무 힘들었어", &prediction).unwrap();

        assert_eq!(request.system_prompt, DEFAULT_PERSONA);
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
        assert!(request.user_prompt.contains("오늘 너무 힘들었어"));
        assert!(request.user_prompt.contains("슬픔"));
        assert!(request.user_prompt.contains("0.42"));
        assert!(request.user_prompt.contains("되물어"));
        // The re-ask supplements the standing requirements, it does not
        // replace them.
        assert!(request.user_prompt.contains("공감"));
        assert!(request.user_prompt.contains("조언"));
    }

    #[test]
    fn confident_prompt_omits_followup_request() {
        let prediction = EmotionPrediction {
            emotion: Emotion::Joy,
            confidence: 0.95,
        };
        let request = composer().compose("오늘 정말 좋은 일이 있었어", &prediction).unwrap();

        assert!(request.user_prompt.contains("기쁨"));
        assert!(request.user_prompt.contains("0.95"));
        assert!(!request.user_prompt.contains("되물어"));
        assert!(request.user_prompt.contains("공감"));
        assert!(request.user_prompt.contains("조언"));
    }

    #[test]
    fn threshold_boundary_counts_as_confident() {
        let prediction = EmotionPrediction {
            emotion: Emotion::Anxiety,
            confidence: DEFAULT_CONFIDENCE_THRESHOLD,
        };
        let request = composer().compose("발표가 코앞이야", &prediction).unwrap();

        assert!(!request.user_prompt.contains("되물어"));
    }

    #[test]
    fn confidence_renders_with_two_decimals() {
        let prediction = EmotionPrediction {
            emotion: Emotion::Hurt,
            confidence: 0.9,
        };
        let request = composer().compose("친구가 한 말이 계속 맴돌아", &prediction).unwrap();

        assert!(request.user_prompt.contains("0.90"));
    }

    #[test]
    fn unmapped_labels_render_verbatim() {
        let prediction = EmotionPrediction {
            emotion: Emotion::Other("neutral".to_owned()),
            confidence: 0.81,
        };
        let request = composer().compose("그냥 그랬어", &prediction).unwrap();

        assert!(request.user_prompt.contains("neutral"));
    }
}
