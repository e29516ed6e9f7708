//! Next-period prediction from a history of cycle start dates.
//!
//! Everything here is a pure function over an explicit [`CycleHistory`]
//! snapshot. Storage, identity and transport belong to the caller, which
//! persists the derived [`PeriodRecord`] / [`CycleProfile`] values itself.

pub mod cycles;
pub mod dates;
pub mod history;
pub mod models;
pub mod prediction;
pub mod settings;

pub use dates::DateError;
pub use history::{CycleHistory, HistoryError, HistoryShape};
pub use models::{CycleProfile, CycleStats, FertilityWindow, PeriodRecord};
pub use prediction::{
    average_cycle_days, calculate_next_period, cycle_stats, fertility_window,
    predict_next_start, record_period, update_average_cycle_days,
};
pub use settings::{CycleBounds, PredictionSettings, SettingsError};
