use std::time::Duration;

use crate::config::ReconnectConfig;

/// Reconnect delay that grows by a fixed factor per failure, bounded by a
/// ceiling. Only a successful open brings it back to the floor.
#[derive(Debug, Clone, PartialEq)]
pub struct Backoff {
    floor_ms: u64,
    ceiling_ms: u64,
    multiplier: f64,
    current_ms: u64,
}

impl Backoff {
    pub fn new(floor_ms: u64, multiplier: f64, ceiling_ms: u64) -> Self {
        Self {
            floor_ms,
            ceiling_ms,
            multiplier,
            current_ms: floor_ms,
        }
    }

    pub fn from_config(config: &ReconnectConfig) -> Self {
        Self::new(config.initial_delay_ms, config.multiplier, config.max_delay_ms)
    }

    #[cfg(test)]
    pub fn current(&self) -> Duration {
        Duration::from_millis(self.current_ms)
    }

    /// Returns the delay to wait now and advances to the next one.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current_ms;
        let grown = (self.current_ms as f64 * self.multiplier).round() as u64;
        self.current_ms = grown.min(self.ceiling_ms);
        Duration::from_millis(delay)
    }

    pub fn reset(&mut self) {
        self.current_ms = self.floor_ms;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::from_config(&ReconnectConfig::default())
    }
}
