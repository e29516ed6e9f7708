use chrono::NaiveDate;

use crate::cycles::{cycle_lengths, filter_outliers, recency_weighted_average};
use crate::dates::{add_days, days_between, format_iso_date};
use crate::history::{CycleHistory, HistoryError, HistoryShape};
use crate::models::{CycleStats, FertilityWindow, PeriodRecord};
use crate::settings::PredictionSettings;

/// Predict the next period start.
///
/// - no history: no prediction
/// - one start: `default_cycle_days` after it
/// - two starts: the single observed gap, unfiltered
/// - more: plausible gaps only, recency weighted; no prediction if none are
///   plausible, since the data is too noisy to trust
pub fn predict_next_start(
    history: &CycleHistory,
    settings: &PredictionSettings,
) -> Option<NaiveDate> {
    match history.shape() {
        HistoryShape::Empty => None,
        HistoryShape::Single(only) => {
            tracing::trace!(%only, "single start, using default cycle length");
            add_days(only, i64::from(settings.default_cycle_days))
        }
        HistoryShape::Pair(first, last) => add_days(last, days_between(first, last)),
        HistoryShape::Many(starts) => {
            let last = *starts.last()?;
            let valid = filter_outliers(&cycle_lengths(starts), &settings.bounds);
            match recency_weighted_average(&valid, &settings.recency_weights) {
                Some(days) => {
                    tracing::trace!(%last, days, valid = valid.len(), "weighted prediction");
                    add_days(last, days)
                }
                None => {
                    tracing::debug!(
                        starts = starts.len(),
                        "no plausible cycle lengths, withholding prediction"
                    );
                    None
                }
            }
        }
    }
}

/// Rolling average cycle length to store on the user's profile.
///
/// Same filtering and weighting as [`predict_next_start`], but every shape
/// goes through the outlier filter and the fallback is `default_cycle_days`
/// rather than no value.
pub fn average_cycle_days(history: &CycleHistory, settings: &PredictionSettings) -> u32 {
    let valid = filter_outliers(&cycle_lengths(history.dates()), &settings.bounds);
    recency_weighted_average(&valid, &settings.recency_weights)
        .and_then(|days| u32::try_from(days).ok())
        .unwrap_or(settings.default_cycle_days)
}

/// Predict from raw `YYYY-MM-DD` strings in any order, with default settings.
///
/// Input must already be well formed; a bad value is returned as an error
/// naming it, and repeated dates are rejected.
pub fn calculate_next_period<S: AsRef<str>>(dates: &[S]) -> Result<Option<String>, HistoryError> {
    let history = CycleHistory::parse(dates)?;
    Ok(predict_next_start(&history, &PredictionSettings::default()).map(format_iso_date))
}

/// Rolling average from raw `YYYY-MM-DD` strings, with default settings.
pub fn update_average_cycle_days<S: AsRef<str>>(dates: &[S]) -> Result<u32, HistoryError> {
    let history = CycleHistory::parse(dates)?;
    Ok(average_cycle_days(&history, &PredictionSettings::default()))
}

/// Add a new period start and derive the values to persist with it.
pub fn record_period(
    history: &CycleHistory,
    start_date: NaiveDate,
    settings: &PredictionSettings,
) -> Result<PeriodRecord, HistoryError> {
    let history = history.with_entry(start_date)?;
    let record = PeriodRecord {
        start_date,
        predicted_next_date: predict_next_start(&history, settings),
        avg_cycle_days: average_cycle_days(&history, settings),
    };
    tracing::debug!(
        %start_date,
        starts = history.len(),
        avg_cycle_days = record.avg_cycle_days,
        "recorded period start"
    );
    Ok(record)
}

/// Estimate the fertility window before the predicted next period.
/// Ovulation is `luteal_phase_days` before the predicted start.
pub fn fertility_window(
    history: &CycleHistory,
    settings: &PredictionSettings,
) -> Option<FertilityWindow> {
    let predicted_start = predict_next_start(history, settings)?;

    let ovulation_day = add_days(predicted_start, -i64::from(settings.luteal_phase_days))?;
    let fertile_start = add_days(
        ovulation_day,
        -i64::from(settings.fertile_days_before_ovulation),
    )?;
    let peak_start = add_days(ovulation_day, -i64::from(settings.peak_days_before_ovulation))?;

    Some(FertilityWindow {
        fertile_start,
        fertile_end: ovulation_day,
        ovulation_day,
        peak_start,
        peak_end: ovulation_day,
    })
}

/// Compute cycle statistics for the stats view.
pub fn cycle_stats(history: &CycleHistory, settings: &PredictionSettings) -> CycleStats {
    let lengths = cycle_lengths(history.dates());
    let valid = filter_outliers(&lengths, &settings.bounds);

    CycleStats {
        total_starts: history.len(),
        valid_cycles: valid.len(),
        discarded_cycles: lengths.len() - valid.len(),
        avg_cycle_length: if valid.is_empty() {
            None
        } else {
            Some(valid.iter().sum::<i64>() as f32 / valid.len() as f32)
        },
        shortest_cycle: valid.iter().copied().min(),
        longest_cycle: valid.iter().copied().max(),
        last_period_start: history.last(),
    }
}
