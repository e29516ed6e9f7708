use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not read settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cycle bounds are empty: min {min_days} > max {max_days}")]
    EmptyBounds { min_days: u32, max_days: u32 },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("recency weights must contain at least one non-zero weight")]
    NoWeights,
    #[error("luteal phase of {luteal} days does not fit in a {min_cycle}-day cycle")]
    LutealTooLong { luteal: u32, min_cycle: u32 },
    #[error("peak window of {peak} days does not fit in a {fertile}-day fertile window")]
    PeakOutsideFertile { peak: u32, fertile: u32 },
}

/// Inclusive range of cycle lengths treated as physiologically plausible.
/// Anything outside is noise: a missed log, a typo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleBounds {
    pub min_days: u32,
    pub max_days: u32,
}

impl CycleBounds {
    pub fn contains(&self, days: i64) -> bool {
        (i64::from(self.min_days)..=i64::from(self.max_days)).contains(&days)
    }
}

impl Default for CycleBounds {
    fn default() -> Self {
        Self {
            min_days: 21,
            max_days: 45,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionSettings {
    /// Used when there is a single start date, and as the rolling average
    /// when no plausible cycle has been observed.
    pub default_cycle_days: u32,
    pub bounds: CycleBounds,
    /// Weights over the trailing valid cycle lengths, oldest first.
    /// Only applied once there are at least as many lengths as weights.
    pub recency_weights: Vec<u32>,
    pub luteal_phase_days: u32,
    pub fertile_days_before_ovulation: u32,
    pub peak_days_before_ovulation: u32,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            default_cycle_days: 28,
            bounds: CycleBounds::default(),
            recency_weights: vec![20, 30, 50],
            luteal_phase_days: 14,
            fertile_days_before_ovulation: 5,
            peak_days_before_ovulation: 2,
        }
    }
}

impl PredictionSettings {
    /// Deserialize settings; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let CycleBounds { min_days, max_days } = self.bounds;
        if min_days == 0 {
            return Err(SettingsError::Zero {
                field: "bounds.min_days",
            });
        }
        if min_days > max_days {
            return Err(SettingsError::EmptyBounds { min_days, max_days });
        }
        if self.default_cycle_days == 0 {
            return Err(SettingsError::Zero {
                field: "default_cycle_days",
            });
        }
        if self.recency_weights.iter().all(|w| *w == 0) {
            return Err(SettingsError::NoWeights);
        }
        if self.luteal_phase_days == 0 {
            return Err(SettingsError::Zero {
                field: "luteal_phase_days",
            });
        }
        if self.luteal_phase_days >= min_days {
            return Err(SettingsError::LutealTooLong {
                luteal: self.luteal_phase_days,
                min_cycle: min_days,
            });
        }
        if self.peak_days_before_ovulation > self.fertile_days_before_ovulation {
            return Err(SettingsError::PeakOutsideFertile {
                peak: self.peak_days_before_ovulation,
                fertile: self.fertile_days_before_ovulation,
            });
        }
        Ok(())
    }
}
