//! Controller and builder configuration.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Playback speed a freshly built controller starts with.
    pub default_speed: f32,

    /// Frame rate the builder snaps key times to when none is given.
    pub default_fps: f32,

    /// Maximum undrained playback events before the oldest are dropped.
    pub max_events: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_speed: 1.0,
            default_fps: 60.0,
            max_events: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "max_events": 8 }"#).unwrap();
        assert_eq!(cfg.max_events, 8);
        assert_eq!(cfg.default_speed, 1.0);
        assert_eq!(cfg.default_fps, 60.0);
    }
}
