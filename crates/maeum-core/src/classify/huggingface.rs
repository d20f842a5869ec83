//! Hosted inference-API classifier.
//!
//! Calls the serverless text-classification endpoint
//! (`POST {endpoint}/{model}` with `{"inputs": text}`). The API answers
//! with one score row per input, so a single-string request comes back as
//! `[[{label, score}, …]]`; some deployments return the row unnested.
//! Both shapes are accepted.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{EmotionClassifier, LabelScore};
use crate::error::CounselError;

/// Classifier backed by a hosted text-classification inference API.
pub struct HfClassifier {
    client: Client,
    url: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// The two response shapes the inference API has been observed to return.
#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl InferenceResponse {
    fn into_scores(self) -> Vec<LabelScore> {
        match self {
            InferenceResponse::Nested(mut rows) => {
                if rows.is_empty() {
                    Vec::new()
                } else {
                    rows.swap_remove(0)
                }
            }
            InferenceResponse::Flat(scores) => scores,
        }
    }
}

impl HfClassifier {
    /// Build a classifier for `model` served under `endpoint`.
    ///
    /// The HTTP client is built once here and reused for every call;
    /// `token` is sent as a bearer credential when present.
    pub fn new(
        endpoint: &str,
        model: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CounselError> {
        let client = Client::builder()
            .user_agent(concat!("maeum/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| CounselError::ClassificationUnavailable {
                message: format!("http client: {e}"),
            })?;
        Ok(Self {
            client,
            url: format!("{}/{}", endpoint.trim_end_matches('/'), model),
            token,
        })
    }
}

#[async_trait]
impl EmotionClassifier for HfClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, CounselError> {
        let mut request = self
            .client
            .post(&self.url)
            .json(&InferenceRequest { inputs: text });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CounselError::ClassificationUnavailable {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CounselError::ClassificationUnavailable {
                message: format!("{status}: {body}"),
            });
        }

        let scores = response
            .json::<InferenceResponse>()
            .await
            .map_err(|e| CounselError::ClassificationUnavailable {
                message: format!("decode: {e}"),
            })?
            .into_scores();

        debug!(labels = scores.len(), "classification scores received");
        Ok(scores)
    }
}
