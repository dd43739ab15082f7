use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::components::animation::SubscribePolicy;

/// Configuration for a stage, provided by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Upper bound on catch-up steps per host frame (default: 10).
    pub max_steps_per_frame: u32,
    /// Directory descriptor paths are resolved against (default: "Content").
    pub content_root: PathBuf,
    /// Whether subscribing to completion restarts the active clip.
    pub subscribe_policy: SubscribePolicy,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            content_root: PathBuf::from("Content"),
            subscribe_policy: SubscribePolicy::default(),
        }
    }
}

impl StageConfig {
    /// Parse a config from a JSON string. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = StageConfig::from_json("{}").unwrap();
        assert_eq!(config, StageConfig::default());
        assert!((config.fixed_dt - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn partial_override() {
        let json = r#"{ "fixed_dt": 0.02, "subscribe_policy": "reset_on_subscribe" }"#;
        let config = StageConfig::from_json(json).unwrap();
        assert_eq!(config.fixed_dt, 0.02);
        assert_eq!(config.max_steps_per_frame, 10);
        assert_eq!(config.subscribe_policy, SubscribePolicy::ResetOnSubscribe);
        assert_eq!(config.content_root, PathBuf::from("Content"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(StageConfig::from_json("{ fixed_dt: }").is_err());
    }
}
