// Detection error taxonomy.
// Every variant is absorbed inside the detector and converted into a
// heuristic-based result; nothing here reaches detect() callers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("API credential missing or placeholder")]
    MisconfiguredCredential,
    #[error("text too short for remote analysis ({0} chars)")]
    TextTooShort(usize),
    #[error("text too long for remote analysis ({0} chars)")]
    TextTooLong(usize),
    #[error("API credential rejected (401)")]
    InvalidCredential,
    #[error("rate limited by prediction service (429)")]
    RateLimited,
    #[error("prediction service error: {status} - {message}")]
    Upstream { status: u16, message: String },
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("malformed prediction response: {0}")]
    MalformedResponse(String),
}
