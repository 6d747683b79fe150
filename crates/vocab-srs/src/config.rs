use serde::{Deserialize, Serialize};

use crate::error::SrsError;

/// Tunable SM-2 parameters.
///
/// The defaults follow the conventional SM-2 values. Every field can be
/// overridden (the API reads them from `SRS_*` environment variables), but an
/// overridden config must pass [`SchedulerConfig::validate`] before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Ease factor given to a freshly created card.
    pub initial_ease: f64,
    /// Floor for the ease factor. Must stay above 1.0 or intervals stop growing.
    pub min_ease: f64,
    /// Ease lost on a failing review (quality 1 or 2).
    pub fail_ease_penalty: f64,
    /// Ease gained on an easy review (quality 5).
    pub easy_bonus: f64,
    /// Ease lost on a hard pass (quality 3).
    pub hard_penalty: f64,
    /// Interval after a failing review, in days.
    pub min_interval_days: u32,
    /// Interval after the first consecutive pass, in days.
    pub first_interval_days: u32,
    /// Interval after the second consecutive pass, in days.
    pub second_interval_days: u32,
    /// Interval (days) at or above which a card counts as mature.
    pub maturity_threshold_days: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            min_ease: 1.3,
            fail_ease_penalty: 0.2,
            easy_bonus: 0.1,
            hard_penalty: 0.14,
            min_interval_days: 1,
            first_interval_days: 1,
            second_interval_days: 6,
            maturity_threshold_days: 21,
        }
    }
}

impl SchedulerConfig {
    /// Check that the parameters keep the scheduler well-behaved.
    pub fn validate(&self) -> Result<(), SrsError> {
        let floats = [
            ("initial_ease", self.initial_ease),
            ("min_ease", self.min_ease),
            ("fail_ease_penalty", self.fail_ease_penalty),
            ("easy_bonus", self.easy_bonus),
            ("hard_penalty", self.hard_penalty),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(SrsError::InvalidConfig(format!("{name} must be finite")));
            }
        }

        if self.min_ease <= 1.0 {
            return Err(SrsError::InvalidConfig(format!(
                "min_ease must be greater than 1.0, got {}",
                self.min_ease
            )));
        }
        if self.initial_ease < self.min_ease {
            return Err(SrsError::InvalidConfig(format!(
                "initial_ease ({}) must not be below min_ease ({})",
                self.initial_ease, self.min_ease
            )));
        }
        if self.fail_ease_penalty < 0.0 || self.hard_penalty < 0.0 || self.easy_bonus < 0.0 {
            return Err(SrsError::InvalidConfig(
                "ease adjustments must be non-negative".to_string(),
            ));
        }
        if self.min_interval_days == 0
            || self.first_interval_days == 0
            || self.second_interval_days == 0
        {
            return Err(SrsError::InvalidConfig(
                "intervals must be at least one day".to_string(),
            ));
        }
        // A pass must never schedule earlier than a fail would.
        if self.first_interval_days < self.min_interval_days {
            return Err(SrsError::InvalidConfig(format!(
                "first_interval_days ({}) must not be below min_interval_days ({})",
                self.first_interval_days, self.min_interval_days
            )));
        }
        if self.second_interval_days < self.first_interval_days {
            return Err(SrsError::InvalidConfig(format!(
                "second_interval_days ({}) must not be below first_interval_days ({})",
                self.second_interval_days, self.first_interval_days
            )));
        }
        if self.maturity_threshold_days == 0 {
            return Err(SrsError::InvalidConfig(
                "maturity_threshold_days must be at least one day".to_string(),
            ));
        }

        Ok(())
    }
}
