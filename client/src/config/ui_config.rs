use common::config::{Validate, validate_duration_ms};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub struct UiConfig {
    pub notice_duration_ms: u64,
    pub chat_bubble_duration_ms: u64,
    pub dice_cycle_interval_ms: u64,
    pub dice_cycle_frames: u32,
}

impl UiConfig {
    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }

    pub fn chat_bubble_duration(&self) -> Duration {
        Duration::from_millis(self.chat_bubble_duration_ms)
    }

    pub fn dice_cycle_interval(&self) -> Duration {
        Duration::from_millis(self.dice_cycle_interval_ms)
    }
}

impl Validate for UiConfig {
    fn validate(&self) -> Result<(), String> {
        validate_duration_ms("ui.notice_duration_ms", self.notice_duration_ms)?;
        validate_duration_ms("ui.chat_bubble_duration_ms", self.chat_bubble_duration_ms)?;
        validate_duration_ms("ui.dice_cycle_interval_ms", self.dice_cycle_interval_ms)?;
        if self.dice_cycle_frames > 100 {
            return Err(format!(
                "ui.dice_cycle_frames must be at most 100, got {}",
                self.dice_cycle_frames
            ));
        }
        Ok(())
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_duration_ms: 3000,
            chat_bubble_duration_ms: 5000,
            dice_cycle_interval_ms: 80,
            dice_cycle_frames: 8,
        }
    }
}
