use chrono::{Datelike, Weekday};

use crate::config::EngineConfig;
use crate::models::{MoodAnalysis, MoodRecord, Trend};

pub fn analyze_mood(moods: &[MoodRecord], config: &EngineConfig) -> MoodAnalysis {
    let scores: Vec<f64> = moods.iter().map(|m| m.score as f64).collect();

    MoodAnalysis {
        average_mood: round1(mean(&scores)),
        trend: classify_trend(&scores, config),
        volatility: round1(population_std_dev(&scores)),
        low_mood_day_count: low_mood_count(moods, config),
        pattern_notes: pattern_notes(moods, config),
    }
}

pub fn low_mood_count(moods: &[MoodRecord], config: &EngineConfig) -> usize {
    moods
        .iter()
        .filter(|m| m.score <= config.low_mood_max_score)
        .count()
}

/// Compares the mean of the first half of the series against the second half.
/// Odd-length series put the extra point in the second half.
pub fn classify_trend(scores: &[f64], config: &EngineConfig) -> Trend {
    if scores.len() < config.min_trend_points.max(2) {
        return Trend::Stable;
    }

    let (first, second) = scores.split_at(scores.len() / 2);
    let delta = mean(second) - mean(first);

    if delta > config.trend_sensitivity {
        Trend::Increasing
    } else if delta < -config.trend_sensitivity {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

fn pattern_notes(moods: &[MoodRecord], config: &EngineConfig) -> Vec<String> {
    let mut notes = Vec::new();
    let low: Vec<Weekday> = moods
        .iter()
        .filter(|m| m.score <= config.low_mood_max_score)
        .map(|m| m.timestamp.weekday())
        .collect();

    if low.len() >= 2 {
        let midweek = low
            .iter()
            .filter(|d| matches!(d, Weekday::Tue | Weekday::Wed | Weekday::Thu))
            .count();
        let weekend = low
            .iter()
            .filter(|d| matches!(d, Weekday::Sat | Weekday::Sun))
            .count();

        if midweek * 2 > low.len() {
            notes.push("Low mood concentrated mid-week".to_string());
        } else if weekend * 2 > low.len() {
            notes.push("Low mood concentrated on weekends".to_string());
        }
    }

    if moods.iter().any(|m| m.score == config.mood_scale_min) {
        notes.push("At least one entry at the lowest point of the mood scale".to_string());
    }

    notes
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    // 2026-10-12 is a Monday.
    fn week(scores: &[i32]) -> Vec<MoodRecord> {
        let start = Utc.with_ymd_and_hms(2026, 10, 12, 20, 0, 0).unwrap();
        scores
            .iter()
            .enumerate()
            .map(|(i, score)| MoodRecord {
                timestamp: start + Duration::days(i as i64),
                score: *score,
                note: None,
            })
            .collect()
    }

    #[test]
    fn empty_series_degrades_to_zero() {
        let analysis = analyze_mood(&[], &EngineConfig::default());
        assert_eq!(analysis.average_mood, 0.0);
        assert_eq!(analysis.volatility, 0.0);
        assert_eq!(analysis.trend, Trend::Stable);
        assert_eq!(analysis.low_mood_day_count, 0);
        assert!(analysis.pattern_notes.is_empty());
    }

    #[test]
    fn sharp_drop_is_decreasing() {
        let analysis = analyze_mood(&week(&[5, 5, 5, 1, 1, 1]), &EngineConfig::default());
        assert_eq!(analysis.trend, Trend::Decreasing);
    }

    #[test]
    fn flat_series_is_stable() {
        let analysis = analyze_mood(&week(&[3, 3, 3, 3, 3, 3]), &EngineConfig::default());
        assert_eq!(analysis.trend, Trend::Stable);
        assert_eq!(analysis.volatility, 0.0);
    }

    #[test]
    fn rising_series_is_increasing() {
        let analysis = analyze_mood(&week(&[2, 2, 4, 4]), &EngineConfig::default());
        assert_eq!(analysis.trend, Trend::Increasing);
    }

    #[test]
    fn small_shift_stays_within_sensitivity() {
        // 3.0 -> 3.25, delta 0.25
        let analysis = analyze_mood(&week(&[3, 3, 3, 3, 3, 3, 3, 4]), &EngineConfig::default());
        assert_eq!(analysis.trend, Trend::Stable);
    }

    #[test]
    fn two_points_are_too_few_for_a_trend() {
        let analysis = analyze_mood(&week(&[1, 5]), &EngineConfig::default());
        assert_eq!(analysis.trend, Trend::Stable);
    }

    #[test]
    fn single_point_has_no_volatility() {
        let analysis = analyze_mood(&week(&[4]), &EngineConfig::default());
        assert_eq!(analysis.volatility, 0.0);
        assert_eq!(analysis.average_mood, 4.0);
    }

    #[test]
    fn volatility_is_population_std_dev() {
        // mean 3, squared deviations 4+0+4 => variance 8/3
        let analysis = analyze_mood(&week(&[1, 3, 5]), &EngineConfig::default());
        assert_eq!(analysis.volatility, 1.6);
    }

    #[test]
    fn average_is_rounded_to_one_decimal() {
        let analysis = analyze_mood(&week(&[3, 3, 3, 3, 2, 2, 1]), &EngineConfig::default());
        assert_eq!(analysis.average_mood, 2.4);
        assert_eq!(analysis.low_mood_day_count, 3);
        assert_eq!(analysis.trend, Trend::Decreasing);
    }

    #[test]
    fn every_score_at_or_below_threshold_counts_as_low() {
        let analysis = analyze_mood(&week(&[4, 4, 3, 2, 2, 1, 1]), &EngineConfig::default());
        assert_eq!(analysis.average_mood, 2.4);
        assert_eq!(analysis.low_mood_day_count, 4);
    }

    #[test]
    fn midweek_low_mood_is_noted() {
        // Mon 4, Tue 2, Wed 2, Thu 2, Fri 4
        let analysis = analyze_mood(&week(&[4, 2, 2, 2, 4]), &EngineConfig::default());
        assert!(analysis
            .pattern_notes
            .contains(&"Low mood concentrated mid-week".to_string()));
    }

    #[test]
    fn weekend_low_mood_is_noted() {
        // Mon..Fri fine, Sat 2, Sun 1
        let analysis = analyze_mood(&week(&[4, 4, 4, 4, 4, 2, 1]), &EngineConfig::default());
        assert_eq!(
            analysis.pattern_notes,
            vec![
                "Low mood concentrated on weekends".to_string(),
                "At least one entry at the lowest point of the mood scale".to_string(),
            ]
        );
    }

    #[test]
    fn sensitivity_comes_from_config() {
        let config = EngineConfig {
            trend_sensitivity: 0.2,
            ..EngineConfig::default()
        };
        let analysis = analyze_mood(&week(&[3, 3, 3, 3, 3, 3, 3, 4]), &config);
        assert_eq!(analysis.trend, Trend::Increasing);
    }
}
