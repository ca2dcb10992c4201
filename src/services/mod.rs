// EssayLens Services

pub mod config_store;
pub mod credentials;
pub mod detection;
pub mod text_stats;

pub use config_store::{AppConfig, ConfigStore};
pub use credentials::{is_placeholder, resolve_api_token};
pub use detection::{
    heuristic_result, normalize_output, AiContentDetector, DetectionError, JitterSource,
    NormalizedOutput, PredictionClient, RawOutput,
};
pub use text_stats::{compute_stats, EssayStats, FORMAL_MARKERS};
