// Detection Module
// AI content detection core organized into specialized submodules:
// - remote: prediction-endpoint HTTP client (Prefer: wait)
// - normalize: dual-shape response normalization
// - heuristic: local fallback scoring with injectable jitter
// - error: internal error taxonomy (absorbed, never propagated)

pub mod error;
pub mod heuristic;
pub mod normalize;
pub mod remote;

pub use error::DetectionError;
pub use heuristic::{heuristic_result, JitterSource};
pub use normalize::{normalize_output, NormalizedOutput, RawOutput};
pub use remote::{PredictionClient, MODEL_VERSION};

use crate::models::{DetectionOrigin, DetectionResult, DetectionStatus};
use crate::services::credentials::is_placeholder;
use tracing::{info, warn};

/// Remote analysis rejects texts shorter than this (character count).
pub const MIN_TEXT_CHARS: usize = 50;
/// Remote analysis rejects texts longer than this (character count).
pub const MAX_TEXT_CHARS: usize = 50_000;

/// Best-effort progress callback; receives interim status strings.
pub type ProgressFn = dyn Fn(&str) + Send + Sync;

/// AI content detector for essay submissions.
///
/// Explicitly constructed with its credential (no process-wide singleton);
/// `detect` is total: every internal failure degrades to the heuristic.
pub struct AiContentDetector {
    client: PredictionClient,
    credential: Option<String>,
    jitter: JitterSource,
}

impl AiContentDetector {
    pub fn new(credential: Option<String>) -> Self {
        Self {
            client: PredictionClient::new(),
            credential,
            jitter: JitterSource::default(),
        }
    }

    pub fn with_client(credential: Option<String>, client: PredictionClient) -> Self {
        Self {
            client,
            credential,
            jitter: JitterSource::default(),
        }
    }

    /// Replace the jitter source; tests pin it to `JitterSource::Fixed(0.0)`.
    pub fn with_jitter(mut self, jitter: JitterSource) -> Self {
        self.jitter = jitter;
        self
    }

    /// Detect whether `text` is AI-generated. Never fails: on any internal
    /// error the result comes from the local heuristic instead.
    pub async fn detect(&self, text: &str) -> DetectionResult {
        self.detect_with_progress(text, None).await
    }

    pub async fn detect_with_progress(
        &self,
        text: &str,
        progress: Option<&ProgressFn>,
    ) -> DetectionResult {
        match self.try_remote(text, progress).await {
            Ok(result) => result,
            Err(e) => {
                warn!("[DETECTOR] remote path unavailable, using heuristic: {}", e);
                report(progress, "Remote analysis unavailable, computing local estimate...");
                heuristic_result(text, &self.jitter)
            }
        }
    }

    async fn try_remote(
        &self,
        text: &str,
        progress: Option<&ProgressFn>,
    ) -> Result<DetectionResult, DetectionError> {
        let token = self.usable_credential()?;

        let chars = text.chars().count();
        if chars < MIN_TEXT_CHARS {
            return Err(DetectionError::TextTooShort(chars));
        }
        if chars > MAX_TEXT_CHARS {
            return Err(DetectionError::TextTooLong(chars));
        }

        report(progress, "Submitting essay to the detection model...");
        info!("[DETECTOR] remote detection start chars={}", chars);

        let outcome = self.client.predict(token, text).await?;
        report(progress, "Analyzing model output...");

        let normalized = normalize_output(outcome.output);
        info!(
            "[DETECTOR] remote detection done ai={:.2} latency_ms={}",
            normalized.ai_probability, outcome.latency_ms
        );

        Ok(DetectionResult {
            ai_probability: normalized.ai_probability,
            human_probability: normalized.human_probability,
            confidence: normalized.confidence,
            analysis: normalized.analysis,
            status: DetectionStatus::Completed,
            origin: DetectionOrigin::Remote,
            processing_time_ms: Some(outcome.latency_ms),
            request_id: DetectionResult::new_request_id(),
        })
    }

    fn usable_credential(&self) -> Result<&str, DetectionError> {
        match self.credential.as_deref() {
            Some(token) if !is_placeholder(token) => Ok(token),
            _ => Err(DetectionError::MisconfiguredCredential),
        }
    }
}

fn report(progress: Option<&ProgressFn>, message: &str) {
    if let Some(cb) = progress {
        cb(message);
    }
}
