use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::history::CycleHistory;
use crate::prediction;
use crate::settings::PredictionSettings;

/// Values returned after a new period start has been recorded, ready for the
/// caller to persist and send back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub start_date: NaiveDate,
    pub predicted_next_date: Option<NaiveDate>,
    pub avg_cycle_days: u32,
}

/// Derived per-user values kept alongside the stored history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleProfile {
    pub avg_cycle_days: u32,
    #[serde(default)]
    pub next_period_date: Option<NaiveDate>,
}

impl Default for CycleProfile {
    fn default() -> Self {
        Self {
            avg_cycle_days: PredictionSettings::default().default_cycle_days,
            next_period_date: None,
        }
    }
}

impl CycleProfile {
    /// Recompute both derived values from the current history snapshot.
    pub fn refresh(&mut self, history: &CycleHistory, settings: &PredictionSettings) {
        self.avg_cycle_days = prediction::average_cycle_days(history, settings);
        self.next_period_date = prediction::predict_next_start(history, settings);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertilityWindow {
    pub fertile_start: NaiveDate,
    pub fertile_end: NaiveDate,
    pub ovulation_day: NaiveDate,
    pub peak_start: NaiveDate,
    pub peak_end: NaiveDate,
}

/// Summary figures for a stats view. Only plausible cycle lengths feed the
/// length figures; `discarded_cycles` counts the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleStats {
    pub total_starts: usize,
    pub valid_cycles: usize,
    pub discarded_cycles: usize,
    pub avg_cycle_length: Option<f32>,
    pub shortest_cycle: Option<i64>,
    pub longest_cycle: Option<i64>,
    pub last_period_start: Option<NaiveDate>,
}
