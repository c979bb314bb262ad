use log::Level;
use serde::Deserialize;

use crate::error::PageError;

/// Height of the fixed navbar; anchor targets land this far below the top.
pub const HEADER_OFFSET: f64 = 80.0;
pub const NAVBAR_SHADOW_THRESHOLD: f64 = 50.0;
pub const BACK_TO_TOP_THRESHOLD: f64 = 300.0;
pub const ALERT_LIFETIME_MS: u32 = 5_000;
pub const ACCORDION_SETTLE_MS: u32 = 350;
pub const ACCORDION_OFFSET: f64 = 100.0;
pub const FADE_IN_THRESHOLD: f64 = 0.1;
pub const FADE_IN_PULL_IN_PX: u32 = 50;
pub const COUNTER_STEPS: u32 = 50;
pub const COUNTER_TICK_MS: u32 = 30;

/// Id of the optional `<script type="application/json">` block carrying overrides.
pub const CONFIG_ELEMENT_ID: &str = "page-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub header_offset: f64,
    pub navbar_shadow_threshold: f64,
    pub back_to_top_threshold: f64,
    pub alert_lifetime_ms: u32,
    pub accordion_settle_ms: u32,
    pub accordion_offset: f64,
    pub fade_in_threshold: f64,
    pub fade_in_pull_in_px: u32,
    pub counter_steps: u32,
    pub counter_tick_ms: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            header_offset: HEADER_OFFSET,
            navbar_shadow_threshold: NAVBAR_SHADOW_THRESHOLD,
            back_to_top_threshold: BACK_TO_TOP_THRESHOLD,
            alert_lifetime_ms: ALERT_LIFETIME_MS,
            accordion_settle_ms: ACCORDION_SETTLE_MS,
            accordion_offset: ACCORDION_OFFSET,
            fade_in_threshold: FADE_IN_THRESHOLD,
            fade_in_pull_in_px: FADE_IN_PULL_IN_PX,
            counter_steps: COUNTER_STEPS,
            counter_tick_ms: COUNTER_TICK_MS,
        }
    }
}

impl PageConfig {
    /// Parses an override block. Blank input means "no overrides".
    pub fn from_json(raw: &str) -> Result<Self, PageError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(raw)?;
        Ok(config.sanitized())
    }

    // A zero step count would never advance a counter.
    fn sanitized(mut self) -> Self {
        if self.counter_steps == 0 {
            self.counter_steps = COUNTER_STEPS;
        }
        self.fade_in_threshold = self.fade_in_threshold.clamp(0.0, 1.0);
        self
    }

    /// Reads overrides from the page, falling back to defaults.
    pub fn load() -> Self {
        let Some(element) = crate::dom::by_id(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        let raw = element.text_content().unwrap_or_default();
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring malformed #{} block: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_yields_defaults() {
        assert_eq!(PageConfig::from_json("  ").unwrap(), PageConfig::default());
        assert_eq!(PageConfig::from_json("{}").unwrap(), PageConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            PageConfig::from_json(r#"{"header_offset": 64, "alert_lifetime_ms": 2500, "theme": "dark"}"#)
                .unwrap();
        assert_eq!(config.header_offset, 64.0);
        assert_eq!(config.alert_lifetime_ms, 2500);
        assert_eq!(config.back_to_top_threshold, BACK_TO_TOP_THRESHOLD);
        assert_eq!(config.counter_steps, COUNTER_STEPS);
    }

    #[test]
    fn degenerate_values_are_corrected() {
        let config = PageConfig::from_json(r#"{"counter_steps": 0, "fade_in_threshold": 3.5}"#).unwrap();
        assert_eq!(config.counter_steps, COUNTER_STEPS);
        assert_eq!(config.fade_in_threshold, 1.0);
    }

    #[test]
    fn malformed_block_is_an_error() {
        let err = PageConfig::from_json("{header_offset: }").unwrap_err();
        assert!(matches!(err, PageError::Config(_)));
    }
}
