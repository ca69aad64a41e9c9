// src/planning/config.rs

use std::time::Duration;

use crate::error::{ForecastError, Result};
use crate::forecast::calculator::{DEFAULT_HORIZON_DAYS, DEFAULT_WINDOW_DAYS};

#[derive(Debug, Clone)]
pub struct ForecastConfig {
    /// Trailing window for usage averaging, in days.
    pub window_days: usize,
    /// Length of the projected trajectory, in days.
    pub horizon_days: usize,
    /// How often `watch` recomputes.
    pub refresh_interval: Duration,
    /// How long a loaded snapshot is reused before it is read again.
    pub cache_ttl: Duration,
    /// Items above the reorder point but within `factor * ROP` count as approaching.
    pub approaching_factor: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            horizon_days: DEFAULT_HORIZON_DAYS,
            refresh_interval: Duration::from_secs(15),
            cache_ttl: Duration::from_secs(15),
            approaching_factor: 1.5,
        }
    }
}

impl ForecastConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_days == 0 {
            return Err(ForecastError::InvalidConfig(
                "window_days must be at least 1".to_string(),
            ));
        }
        if self.horizon_days == 0 {
            return Err(ForecastError::InvalidConfig(
                "horizon_days must be at least 1".to_string(),
            ));
        }
        if self.refresh_interval.is_zero() {
            return Err(ForecastError::InvalidConfig(
                "refresh_interval must be greater than zero".to_string(),
            ));
        }
        if !self.approaching_factor.is_finite() || self.approaching_factor < 1.0 {
            return Err(ForecastError::InvalidConfig(format!(
                "approaching_factor must be >= 1.0, got {}",
                self.approaching_factor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = ForecastConfig::default();
        assert_eq!(config.window_days, 14);
        assert_eq!(config.horizon_days, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_window_and_small_factor() {
        let config = ForecastConfig {
            window_days: 0,
            ..ForecastConfig::default()
        };
        assert!(matches!(config.validate(), Err(ForecastError::InvalidConfig(_))));

        let config = ForecastConfig {
            approaching_factor: 0.5,
            ..ForecastConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_refresh_but_allows_zero_ttl() {
        let config = ForecastConfig {
            refresh_interval: Duration::ZERO,
            ..ForecastConfig::default()
        };
        assert!(matches!(config.validate(), Err(ForecastError::InvalidConfig(_))));

        let config = ForecastConfig {
            cache_ttl: Duration::ZERO,
            ..ForecastConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
