pub mod models;
pub mod services;

pub use models::{DetectionOrigin, DetectionResult, DetectionStatus};
pub use services::detection::{AiContentDetector, JitterSource, PredictionClient};
pub use services::{resolve_api_token, ConfigStore};
