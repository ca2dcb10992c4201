// Response Normalization
// The prediction service does not guarantee an output shape: some model
// versions return a structured object, others a free-text verdict. Both are
// resolved into one tagged variant at the boundary, then normalized into a
// (ai, human, confidence, analysis) tuple with stable invariants.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// Raw `output` payload of a prediction response.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawOutput {
    Object(ObjectOutput),
    Text(String),
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ObjectOutput {
    #[serde(default, alias = "ai_score")]
    pub ai_probability: f64,
    #[serde(default, alias = "human_score")]
    pub human_probability: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default, alias = "explanation")]
    pub analysis: Option<String>,
}

/// Normalized probabilities ready to be attached to a DetectionResult.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedOutput {
    pub ai_probability: f64,
    pub human_probability: f64,
    pub confidence: f64,
    pub analysis: String,
}

fn ai_percent_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bai\b[:\s]+([0-9]+(?:\.[0-9]+)?)\s*%?").expect("ai percent regex"))
}

fn human_percent_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bhuman\b[:\s]+([0-9]+(?:\.[0-9]+)?)\s*%?").expect("human percent regex")
    })
}

/// A matched value containing a decimal point is treated as already
/// fractional; a bare integer is a percentage.
fn parse_fraction(raw: &str) -> f64 {
    let value: f64 = raw.parse().unwrap_or(0.0);
    if raw.contains('.') {
        value
    } else {
        value / 100.0
    }
}

fn extract_fraction(re: &Regex, text: &str) -> f64 {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| parse_fraction(m.as_str()))
        .unwrap_or(0.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Resolve a raw output into normalized probabilities.
pub fn normalize_output(output: RawOutput) -> NormalizedOutput {
    let (ai, human, confidence, analysis) = match output {
        RawOutput::Object(obj) => {
            let ai = obj.ai_probability;
            let human = obj.human_probability.unwrap_or(1.0 - ai);
            let analysis = obj
                .analysis
                .unwrap_or_else(|| "AI content analysis completed.".to_string());
            (ai, human, obj.confidence, analysis)
        }
        RawOutput::Text(text) => {
            let ai = extract_fraction(ai_percent_re(), &text);
            let human = extract_fraction(human_percent_re(), &text);
            (ai, human, None, text)
        }
    };

    let (ai, human) = reconcile_probabilities(ai, human);
    let confidence = confidence.unwrap_or_else(|| (ai - 0.5).abs() * 2.0);

    NormalizedOutput {
        ai_probability: round2(ai),
        human_probability: round2(human),
        confidence: round2(confidence.clamp(0.0, 1.0)),
        analysis,
    }
}

/// Apply the probability invariants: a zero pair falls back to a weak prior,
/// and pairs whose sum drifts more than 0.1 from 1 are rescaled by the sum.
fn reconcile_probabilities(ai: f64, human: f64) -> (f64, f64) {
    if ai == 0.0 && human == 0.0 {
        return (0.30, 0.70);
    }
    let sum = ai + human;
    if (sum - 1.0).abs() > 0.1 && sum > 0.0 {
        return (ai / sum, human / sum);
    }
    (ai, human)
}
