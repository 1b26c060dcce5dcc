use common::config::{Validate, validate_duration_ms};
use common::protocol::ROOM_EXPIRED_CLOSE_CODE;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ReconnectConfig {
    pub initial_delay_ms: u64,
    pub multiplier: f64,
    pub max_delay_ms: u64,
    pub expired_close_code: u16,
}

impl Validate for ReconnectConfig {
    fn validate(&self) -> Result<(), String> {
        validate_duration_ms("reconnect.initial_delay_ms", self.initial_delay_ms)?;
        validate_duration_ms("reconnect.max_delay_ms", self.max_delay_ms)?;
        if self.max_delay_ms < self.initial_delay_ms {
            return Err(format!(
                "reconnect.max_delay_ms ({}) must not be below reconnect.initial_delay_ms ({})",
                self.max_delay_ms, self.initial_delay_ms
            ));
        }
        if !self.multiplier.is_finite() || self.multiplier <= 1.0 {
            return Err(format!(
                "reconnect.multiplier must be greater than 1, got {}",
                self.multiplier
            ));
        }
        Ok(())
    }
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 2000,
            multiplier: 1.5,
            max_delay_ms: 30_000,
            expired_close_code: ROOM_EXPIRED_CLOSE_CODE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ReconnectConfig::default().validate().is_ok());
    }

    #[test]
    fn test_shrinking_backoff_is_rejected() {
        let config = ReconnectConfig {
            multiplier: 1.0,
            ..ReconnectConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ReconnectConfig {
            max_delay_ms: 1000,
            ..ReconnectConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
