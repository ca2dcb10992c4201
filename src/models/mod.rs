// EssayLens Data Models
// Serde models shared between the detection services and consumers
// (essay record stores, grading UI surfaces).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Terminal state of one detection call as seen by consumers.
///
/// The detector itself only ever produces `Completed` (remote failures are
/// absorbed into the heuristic path); `Processing` and `Failed` exist for
/// essay records that persist intermediate or integration-level states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DetectionStatus {
    #[default]
    Completed,
    Processing,
    Failed,
}

/// Where a result came from: the remote prediction service, or the local
/// heuristic fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionOrigin {
    Remote,
    Heuristic,
}

/// Output of one detection call. Constructed fresh per call, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Probability in [0,1] that the text is AI-generated, 2 decimals.
    #[serde(alias = "ai_probability")]
    pub ai_probability: f64,
    /// Complement of `ai_probability`, 2 decimals; the pair sums to ~1.
    #[serde(alias = "human_probability")]
    pub human_probability: f64,
    /// Confidence in [0,1]; defaults to `|ai - 0.5| * 2` when the upstream
    /// source supplies none.
    pub confidence: f64,
    /// Human-readable summary of the decision.
    pub analysis: String,
    pub status: DetectionStatus,
    pub origin: DetectionOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<i64>,
    pub request_id: String,
}

impl DetectionResult {
    pub fn new_request_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// True when the probability pair respects the sum-to-one invariant
    /// within rounding tolerance.
    pub fn probabilities_consistent(&self) -> bool {
        (0.0..=1.0).contains(&self.ai_probability)
            && (0.0..=1.0).contains(&self.human_probability)
            && (self.ai_probability + self.human_probability - 1.0).abs() < 0.011
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serialization_is_camel_case() {
        let result = DetectionResult {
            ai_probability: 0.82,
            human_probability: 0.18,
            confidence: 0.64,
            analysis: "test".to_string(),
            status: DetectionStatus::Completed,
            origin: DetectionOrigin::Remote,
            processing_time_ms: Some(1200),
            request_id: DetectionResult::new_request_id(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"aiProbability\":0.82"));
        assert!(json.contains("\"humanProbability\":0.18"));
        assert!(json.contains("\"status\":\"completed\""));
        assert!(json.contains("\"origin\":\"remote\""));
        assert!(json.contains("\"processingTimeMs\":1200"));
    }

    #[test]
    fn test_result_accepts_snake_case_aliases() {
        let json = r#"{
            "ai_probability": 0.4,
            "human_probability": 0.6,
            "confidence": 0.2,
            "analysis": "",
            "status": "completed",
            "origin": "heuristic",
            "requestId": "abc"
        }"#;
        let parsed: DetectionResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.ai_probability, 0.4);
        assert!(parsed.probabilities_consistent());
    }

    #[test]
    fn test_probabilities_consistent_rejects_bad_pair() {
        let result = DetectionResult {
            ai_probability: 0.9,
            human_probability: 0.4,
            confidence: 0.5,
            analysis: String::new(),
            status: DetectionStatus::Completed,
            origin: DetectionOrigin::Heuristic,
            processing_time_ms: None,
            request_id: "x".to_string(),
        };
        assert!(!result.probabilities_consistent());
    }
}
