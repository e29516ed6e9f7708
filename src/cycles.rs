use chrono::NaiveDate;

use crate::dates::{days_between, round_half_away};
use crate::settings::CycleBounds;

/// Day counts between consecutive start dates, oldest gap first.
/// `starts` must be ascending; fewer than two dates gives no gaps.
pub fn cycle_lengths(starts: &[NaiveDate]) -> Vec<i64> {
    starts.windows(2).map(|w| days_between(w[0], w[1])).collect()
}

/// Drop implausible lengths. Survivors keep their order and nothing is
/// imputed in place of what was removed.
pub fn filter_outliers(lengths: &[i64], bounds: &CycleBounds) -> Vec<i64> {
    let valid: Vec<i64> = lengths
        .iter()
        .copied()
        .filter(|days| bounds.contains(*days))
        .collect();

    let discarded = lengths.len() - valid.len();
    if discarded > 0 {
        tracing::debug!(
            discarded,
            kept = valid.len(),
            min_days = bounds.min_days,
            max_days = bounds.max_days,
            "discarded implausible cycle lengths"
        );
    }
    valid
}

/// Recency-weighted average of valid cycle lengths, rounded to whole days.
///
/// `weights` covers the trailing window, oldest first. With fewer lengths
/// than weights there is not enough history to weight, so the plain mean of
/// every length is used instead. Returns `None` for an empty input.
pub fn recency_weighted_average(valid: &[i64], weights: &[u32]) -> Option<i64> {
    if valid.is_empty() {
        return None;
    }

    if weights.is_empty() || valid.len() < weights.len() {
        let sum: i64 = valid.iter().sum();
        return Some(round_half_away(sum, valid.len() as i64));
    }

    let window = &valid[valid.len() - weights.len()..];
    let (weighted, total) = window
        .iter()
        .zip(weights)
        .fold((0i64, 0i64), |(acc, total), (days, w)| {
            (acc + days * i64::from(*w), total + i64::from(*w))
        });

    if total == 0 {
        let sum: i64 = window.iter().sum();
        return Some(round_half_away(sum, window.len() as i64));
    }
    Some(round_half_away(weighted, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEIGHTS: [u32; 3] = [20, 30, 50];

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn lengths_between_adjacent_starts() {
        let starts = [
            date("2024-01-01"),
            date("2024-01-29"),
            date("2024-02-26"),
            date("2024-03-27"),
        ];
        assert_eq!(cycle_lengths(&starts), vec![28, 28, 30]);
        assert!(cycle_lengths(&starts[..1]).is_empty());
        assert!(cycle_lengths(&[]).is_empty());
    }

    #[test]
    fn filter_keeps_order_and_bounds() {
        let bounds = CycleBounds::default();
        assert_eq!(
            filter_outliers(&[10, 28, 60, 21, 45, 46, 20, 30], &bounds),
            vec![28, 21, 45, 30]
        );
        assert!(filter_outliers(&[5, 60, 90], &bounds).is_empty());
    }

    #[test]
    fn empty_input_has_no_average() {
        assert_eq!(recency_weighted_average(&[], &WEIGHTS), None);
    }

    #[test]
    fn short_input_uses_plain_mean() {
        assert_eq!(recency_weighted_average(&[31], &WEIGHTS), Some(31));
        assert_eq!(recency_weighted_average(&[28, 30], &WEIGHTS), Some(29));
        // 28.5 rounds up
        assert_eq!(recency_weighted_average(&[28, 29], &WEIGHTS), Some(29));
    }

    #[test]
    fn weights_favour_recent_cycles() {
        // 29*0.5 + 28*0.3 + 28*0.2 = 28.5
        assert_eq!(recency_weighted_average(&[28, 28, 29], &WEIGHTS), Some(29));
        // Only the last three count: 40*0.5 + 30*0.3 + 25*0.2 = 34
        assert_eq!(
            recency_weighted_average(&[21, 45, 25, 30, 40], &WEIGHTS),
            Some(34)
        );
    }

    #[test]
    fn all_zero_weights_fall_back_to_window_mean() {
        // Only the trailing two lengths are averaged: (30 + 41) / 2 = 35.5
        assert_eq!(recency_weighted_average(&[22, 30, 41], &[0, 0]), Some(36));
    }

    #[test]
    fn window_follows_weight_count() {
        assert_eq!(recency_weighted_average(&[22, 30, 40], &[1, 3]), Some(38));
        assert_eq!(recency_weighted_average(&[22, 30, 40], &[1]), Some(40));
    }
}
