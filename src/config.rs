//! Chart and avatar configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;

use crate::avatar::AvatarGenerator;
use crate::chart::ChartScale;
use crate::consts::{CHART_PADDING_PX, CHART_SIZE_PX, DEFAULT_AVATAR_BASE_URL, MAX_SCORE, MIN_SCORE};

/// Error returned when configuration values cannot form a usable chart.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("canvas size {size} leaves no plot area with padding {padding}")]
    InvalidCanvas { size: f64, padding: f64 },
    #[error("score domain is empty: min {min} must be below max {max}")]
    InvalidScoreDomain { min: f64, max: f64 },
    #[error("invalid avatar base URL `{url}`: {reason}")]
    InvalidAvatarUrl { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub scale: ChartScale,
    pub avatars: AvatarGenerator,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { scale: ChartScale::default(), avatars: AvatarGenerator::default() }
    }
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `ROSTER_CHART_SIZE`: default 600
    /// - `ROSTER_CHART_PADDING`: default 40
    /// - `ROSTER_MIN_SCORE`: default 10
    /// - `ROSTER_MAX_SCORE`: default 20
    /// - `ROSTER_AVATAR_BASE_URL`: default dicebear avataaars
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the values parse but do not form a valid chart.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(e) => {
                tracing::warn!(%key, error = %e, "ignoring unreadable config variable");
                None
            }
        })
    }

    /// Build config from an arbitrary key lookup. Unparseable numbers fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the values do not form a valid chart or URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scale = ChartScale::new(
            parse_f64(&lookup, "ROSTER_CHART_SIZE", CHART_SIZE_PX),
            parse_f64(&lookup, "ROSTER_CHART_PADDING", CHART_PADDING_PX),
            parse_f64(&lookup, "ROSTER_MIN_SCORE", MIN_SCORE),
            parse_f64(&lookup, "ROSTER_MAX_SCORE", MAX_SCORE),
        )?;
        let base_url = lookup("ROSTER_AVATAR_BASE_URL").unwrap_or_else(|| DEFAULT_AVATAR_BASE_URL.to_string());
        let avatars = AvatarGenerator::new(base_url.trim())?;
        Ok(Self { scale, avatars })
    }
}

fn parse_f64<F>(lookup: &F, key: &str, default: f64) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(%key, value = %raw, error = %e, "ignoring unparseable config value");
            default
        }
    }
}
