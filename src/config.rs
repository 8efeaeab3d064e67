use serde::Deserialize;

use crate::viewport::FitMode;

pub const DEFAULT_TICK_RATE_HZ: f64 = 480.0;
pub const DEFAULT_ZOOM: f64 = 500.0;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tick_rate_hz: f64,
    pub seed: [f64; 2],
    pub child_distance: f64,
    pub fit_margin: f64,
    pub fit_mode: FitMode,
    pub default_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            seed: [1.0, 1.0],
            child_distance: 0.5,
            fit_margin: 3.0,
            fit_mode: FitMode::Cover,
            default_zoom: DEFAULT_ZOOM,
            min_zoom: 1.0,
            max_zoom: 100_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "tick_rate_hz": 120.0, "fit_mode": "contain" }"#).unwrap();

        assert_eq!(config.tick_rate_hz, 120.0);
        assert_eq!(config.fit_mode, FitMode::Contain);
        assert_eq!(config.seed, [1.0, 1.0]);
        assert_eq!(config.default_zoom, DEFAULT_ZOOM);
    }
}
