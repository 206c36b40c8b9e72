use serde::{Deserialize, Serialize};

pub mod errors;
pub mod types;

pub use errors::*;
pub use types::{HistoryEvent, ImageId, ImageRecord, ImageReference, LayerId};

/// Docker connection information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub host: String,
    pub version: String,
    pub api_version: String,
    pub os: String,
    pub arch: String,
}

impl Default for ConnectionInfo {
    fn default() -> Self {
        Self {
            host: "unknown".to_string(),
            version: "unknown".to_string(),
            api_version: "unknown".to_string(),
            os: "unknown".to_string(),
            arch: "unknown".to_string(),
        }
    }
}
