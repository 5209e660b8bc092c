use std::collections::HashMap;

use serde::Serialize;

use crate::models::entry::{EntryWithMetrics, WellnessEntry};
use crate::services::metrics::{self, DEFAULT_THRESHOLDS};

/// Everything the dashboard renders: the entries themselves (with derived
/// metrics for per-entry display) plus the aggregate statistics.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub entries: Vec<EntryWithMetrics>,
    pub total_entries: usize,
    pub avg_sleep: f64,
    pub avg_steps: f64,
    pub avg_water: f64,
    pub avg_bmi: f64,
    pub wellness_score: u32,
    pub mood_distribution: HashMap<String, i64>,
}

/// Reduce one user's entries into a `DashboardSummary`. Pure: the caller owns
/// windowing and ordering, and has already filtered by user.
///
/// The composite score awards 20 points per satisfied dimension: average
/// sleep, steps and water against the habit thresholds, average BMI inside
/// the healthy band, and a strict majority of positive moods (integer half,
/// so 2 of 4 does not qualify but 3 of 5 does).
pub fn summarize(entries: Vec<WellnessEntry>) -> DashboardSummary {
    let total = entries.len();
    if total == 0 {
        return DashboardSummary {
            entries: Vec::new(),
            total_entries: 0,
            avg_sleep: 0.0,
            avg_steps: 0.0,
            avg_water: 0.0,
            avg_bmi: 0.0,
            wellness_score: 0,
            mood_distribution: HashMap::new(),
        };
    }

    let mut sleep_sum = 0.0;
    let mut steps_sum = 0.0;
    let mut water_sum = 0.0;
    let mut bmi_sum = 0.0;
    let mut positive_moods = 0usize;
    let mut mood_distribution: HashMap<String, i64> = HashMap::new();

    for e in &entries {
        sleep_sum += e.sleep_hours;
        steps_sum += e.steps as f64;
        water_sum += e.water_liters as f64;
        bmi_sum += metrics::bmi(e.weight_kg, e.height_meters);
        if metrics::is_positive_mood(&e.mood) {
            positive_moods += 1;
        }
        *mood_distribution.entry(e.mood.clone()).or_insert(0) += 1;
    }

    let n = total as f64;
    let avg_sleep = sleep_sum / n;
    let avg_steps = steps_sum / n;
    let avg_water = water_sum / n;
    let avg_bmi = bmi_sum / n;

    let t = &DEFAULT_THRESHOLDS;
    let mut wellness_score = 0u32;
    if avg_sleep >= t.sleep_hours {
        wellness_score += 20;
    }
    if avg_steps >= t.steps as f64 {
        wellness_score += 20;
    }
    if avg_water >= t.water_liters as f64 {
        wellness_score += 20;
    }
    if avg_bmi >= t.bmi_band_min && avg_bmi <= t.bmi_band_max {
        wellness_score += 20;
    }
    if positive_moods > total / 2 {
        wellness_score += 20;
    }

    DashboardSummary {
        entries: entries.into_iter().map(EntryWithMetrics::from).collect(),
        total_entries: total,
        avg_sleep,
        avg_steps,
        avg_water,
        avg_bmi,
        wellness_score,
        mood_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn entry(sleep: f64, water: i32, steps: i32, mood: &str, weight: f64, height: f64) -> WellnessEntry {
        WellnessEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            entry_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            water_liters: water,
            steps,
            sleep_hours: sleep,
            mood: mood.to_string(),
            weight_kg: weight,
            height_meters: height,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_input_yields_zero_summary() {
        let summary = summarize(Vec::new());
        assert_eq!(summary.total_entries, 0);
        assert_eq!(summary.avg_sleep, 0.0);
        assert_eq!(summary.avg_steps, 0.0);
        assert_eq!(summary.avg_water, 0.0);
        assert_eq!(summary.avg_bmi, 0.0);
        assert_eq!(summary.wellness_score, 0);
        assert!(summary.mood_distribution.is_empty());
        assert!(summary.entries.is_empty());
    }

    #[test]
    fn test_full_score_when_all_averages_qualify() {
        // Averages: sleep 8, steps 8000, water 2.5, BMI ~22.86; 4 of 5 moods
        // positive, a strict majority.
        let entries: Vec<WellnessEntry> = (0..5)
            .map(|i| {
                let mood = if i < 4 { "Great" } else { "Tired" };
                entry(8.0, if i % 2 == 0 { 3 } else { 2 }, 8000, mood, 70.0, 1.75)
            })
            .collect();
        let summary = summarize(entries);
        assert_eq!(summary.wellness_score, 100);
        assert_eq!(summary.total_entries, 5);
    }

    #[test]
    fn test_mood_majority_is_strict() {
        // 2 positive of 4: 2 > 4/2 is false, so no mood points. Everything
        // else qualifies, leaving 80.
        let entries = vec![
            entry(8.0, 3, 8000, "Great", 70.0, 1.75),
            entry(8.0, 3, 8000, "Good", 70.0, 1.75),
            entry(8.0, 3, 8000, "Meh", 70.0, 1.75),
            entry(8.0, 3, 8000, "Tired", 70.0, 1.75),
        ];
        let summary = summarize(entries);
        assert_eq!(summary.wellness_score, 80);
    }

    #[test]
    fn test_mood_histogram_counts_labels() {
        let entries = vec![
            entry(6.0, 1, 3000, "Great", 70.0, 1.75),
            entry(6.0, 1, 3000, "Good", 70.0, 1.75),
            entry(6.0, 1, 3000, "Great", 70.0, 1.75),
        ];
        let summary = summarize(entries);
        assert_eq!(summary.mood_distribution.get("Great"), Some(&2));
        assert_eq!(summary.mood_distribution.get("Good"), Some(&1));
        assert_eq!(summary.mood_distribution.len(), 2);
    }

    #[test]
    fn test_averages_over_mixed_entries() {
        let entries = vec![
            entry(6.0, 1, 4000, "Okay", 70.0, 1.75),
            entry(8.0, 3, 12000, "Great", 70.0, 1.75),
        ];
        let summary = summarize(entries);
        assert_eq!(summary.avg_sleep, 7.0);
        assert_eq!(summary.avg_steps, 8000.0);
        assert_eq!(summary.avg_water, 2.0);
        assert_eq!(summary.avg_bmi, 22.86);
        // 7 >= 7, 8000 >= 7000, 2 >= 2, BMI in band; moods split 1/2.
        assert_eq!(summary.wellness_score, 80);
    }

    #[test]
    fn test_avg_bmi_averages_per_entry_values() {
        // Per-entry BMIs 0 (zero height is guarded to 0) and 22.86.
        let entries = vec![
            entry(8.0, 3, 8000, "Great", 70.0, 0.0),
            entry(8.0, 3, 8000, "Great", 70.0, 1.75),
        ];
        let summary = summarize(entries);
        assert_eq!(summary.avg_bmi, 11.43);
    }

    #[test]
    fn test_entries_carry_derived_metrics() {
        let entries = vec![entry(8.0, 3, 9000, "Great", 70.0, 1.75)];
        let summary = summarize(entries);
        assert_eq!(summary.entries.len(), 1);
        assert_eq!(summary.entries[0].metrics.bmi, 22.86);
    }
}
