//! Habit tracking configuration

use serde::Deserialize;

use crate::domain::foundation::{DayBoundary, MAX_OFFSET_MINUTES};

use super::error::ValidationError;

/// Habit tracking configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackingConfig {
    /// Offset from UTC, in minutes, of the user's local midnight
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl TrackingConfig {
    /// The local day boundary for "today" checks.
    pub fn day_boundary(&self) -> Result<DayBoundary, ValidationError> {
        DayBoundary::from_offset_minutes(self.utc_offset_minutes)
            .map_err(|_| ValidationError::InvalidUtcOffset(self.utc_offset_minutes))
    }

    /// Validate tracking configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&self.utc_offset_minutes) {
            return Err(ValidationError::InvalidUtcOffset(self.utc_offset_minutes));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_utc() {
        let config = TrackingConfig::default();
        assert_eq!(config.day_boundary().unwrap().offset_minutes(), 0);
    }

    #[test]
    fn test_offset_out_of_range_rejected() {
        let config = TrackingConfig {
            utc_offset_minutes: 15 * 60,
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidUtcOffset(900)));
        assert!(config.day_boundary().is_err());
    }

    #[test]
    fn test_most_negative_offset_rejected() {
        let config = TrackingConfig {
            utc_offset_minutes: i32::MIN,
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidUtcOffset(i32::MIN))
        );
        assert!(config.day_boundary().is_err());
    }

    #[test]
    fn test_negative_offset_accepted() {
        let config = TrackingConfig {
            utc_offset_minutes: -300,
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.day_boundary().unwrap().offset_minutes(), -300);
    }
}
