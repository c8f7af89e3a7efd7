use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("session duration must be > 0 seconds")]
    InvalidSessionDuration,

    #[error("motivation interval must be > 0 seconds")]
    InvalidMotivationInterval,

    #[error("cold-start threshold must be > 0 attempts")]
    InvalidColdStartThreshold,

    #[error("mastery jitter must be finite and within [0, 0.5], got {provided}")]
    InvalidJitter { provided: f64 },

    #[error("selection retry cap must be > 0")]
    InvalidRetryCap,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Tunables for the practice engine.
///
/// The defaults are hand-tuned values carried over from the practice pages:
/// - 30 minute sessions
/// - a motivational nudge every 45 seconds
/// - categories with fewer than 5 attempts are practised first
/// - ±0.005 jitter on mastery so near-ties do not always resolve the same way
/// - at most 10 selection attempts when generators keep skipping
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    session_duration_secs: u32,
    motivation_interval_secs: u32,
    cold_start_threshold: u32,
    mastery_jitter: f64,
    selection_retry_cap: u32,
}

impl EngineSettings {
    /// Creates custom engine settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if any value is out of range.
    pub fn new(
        session_duration_secs: u32,
        motivation_interval_secs: u32,
        cold_start_threshold: u32,
        mastery_jitter: f64,
        selection_retry_cap: u32,
    ) -> Result<Self, SettingsError> {
        if session_duration_secs == 0 {
            return Err(SettingsError::InvalidSessionDuration);
        }
        if motivation_interval_secs == 0 {
            return Err(SettingsError::InvalidMotivationInterval);
        }
        if cold_start_threshold == 0 {
            return Err(SettingsError::InvalidColdStartThreshold);
        }
        if !mastery_jitter.is_finite() || !(0.0..=0.5).contains(&mastery_jitter) {
            return Err(SettingsError::InvalidJitter {
                provided: mastery_jitter,
            });
        }
        if selection_retry_cap == 0 {
            return Err(SettingsError::InvalidRetryCap);
        }

        Ok(Self {
            session_duration_secs,
            motivation_interval_secs,
            cold_start_threshold,
            mastery_jitter,
            selection_retry_cap,
        })
    }

    /// Same settings with a different session length.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidSessionDuration` for zero.
    pub fn with_session_duration(mut self, secs: u32) -> Result<Self, SettingsError> {
        if secs == 0 {
            return Err(SettingsError::InvalidSessionDuration);
        }
        self.session_duration_secs = secs;
        Ok(self)
    }

    #[must_use]
    pub fn session_duration_secs(&self) -> u32 {
        self.session_duration_secs
    }

    #[must_use]
    pub fn motivation_interval_secs(&self) -> u32 {
        self.motivation_interval_secs
    }

    #[must_use]
    pub fn cold_start_threshold(&self) -> u32 {
        self.cold_start_threshold
    }

    #[must_use]
    pub fn mastery_jitter(&self) -> f64 {
        self.mastery_jitter
    }

    #[must_use]
    pub fn selection_retry_cap(&self) -> u32 {
        self.selection_retry_cap
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            session_duration_secs: 30 * 60,
            motivation_interval_secs: 45,
            cold_start_threshold: 5,
            mastery_jitter: 0.005,
            selection_retry_cap: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        let d = EngineSettings::default();
        let rebuilt = EngineSettings::new(
            d.session_duration_secs(),
            d.motivation_interval_secs(),
            d.cold_start_threshold(),
            d.mastery_jitter(),
            d.selection_retry_cap(),
        )
        .unwrap();
        assert_eq!(rebuilt, d);
        assert_eq!(d.session_duration_secs(), 1800);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(
            EngineSettings::new(0, 45, 5, 0.005, 10),
            Err(SettingsError::InvalidSessionDuration)
        );
        assert_eq!(
            EngineSettings::new(60, 0, 5, 0.005, 10),
            Err(SettingsError::InvalidMotivationInterval)
        );
        assert!(matches!(
            EngineSettings::new(60, 45, 5, f64::NAN, 10),
            Err(SettingsError::InvalidJitter { .. })
        ));
        assert_eq!(
            EngineSettings::new(60, 45, 5, 0.0, 0),
            Err(SettingsError::InvalidRetryCap)
        );
    }

    #[test]
    fn with_session_duration_overrides_only_duration() {
        let settings = EngineSettings::default().with_session_duration(90).unwrap();
        assert_eq!(settings.session_duration_secs(), 90);
        assert_eq!(settings.motivation_interval_secs(), 45);
        assert!(EngineSettings::default().with_session_duration(0).is_err());
    }
}
