use serde::{Serialize, Serializer};

use crate::models::entry::WellnessEntry;

/// Habit thresholds shared by the per-entry status and the dashboard score.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub sleep_hours: f64,
    pub water_liters: i32,
    pub steps: i32,
    pub bmi_band_min: f64,
    pub bmi_band_max: f64,
}

pub const DEFAULT_THRESHOLDS: Thresholds = Thresholds {
    sleep_hours: 7.0,
    water_liters: 2,
    steps: 7000,
    bmi_band_min: 18.5,
    bmi_band_max: 24.9,
};

/// Mood labels that count as positive for scoring.
pub fn is_positive_mood(mood: &str) -> bool {
    matches!(mood, "Great" | "Good")
}

/// BMI rounded to 2 decimal places. Returns 0 when height is not positive,
/// guarding the division; 0 is a sentinel, not a clinical value.
pub fn bmi(weight_kg: f64, height_meters: f64) -> f64 {
    if height_meters <= 0.0 {
        return 0.0;
    }
    (weight_kg / (height_meters * height_meters) * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
    NotAvailable,
}

impl Serialize for BmiCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl BmiCategory {
    /// Half-open thresholds: 18.5 is Normal, 25.0 is Overweight, 30.0 is Obese.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi == 0.0 {
            Self::NotAvailable
        } else if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
            Self::NotAvailable => "N/A",
        }
    }

    pub fn feedback(&self) -> &'static str {
        match self {
            Self::Underweight => "You may need to improve your nutrition.",
            Self::Normal => "Great job! Keep maintaining a healthy lifestyle.",
            Self::Overweight => "Consider more physical activity and balanced meals.",
            Self::Obese => "It may help to consult a health professional.",
            Self::NotAvailable => "",
        }
    }

    /// Badge class hint for the frontend, matching the classes the dashboard
    /// styles against.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Normal => "bg-success",
            Self::Underweight | Self::Overweight => "bg-warning text-dark",
            Self::Obese => "bg-danger",
            Self::NotAvailable => "bg-secondary",
        }
    }
}

/// One evaluation of an entry against the threshold table. Both the wellness
/// status (all five flags) and the health insight (the four lifestyle flags)
/// are derived from this, so the thresholds live in exactly one place.
///
/// `bmi_in_band` and `bmi_normal` differ at the upper bound: the scored band
/// is inclusive at 24.9 while the Normal category extends to just under 25.
#[derive(Debug, Clone, Copy)]
pub struct HabitFlags {
    pub rested: bool,
    pub active: bool,
    pub hydrated: bool,
    pub positive_mood: bool,
    pub bmi_in_band: bool,
    pub bmi_normal: bool,
}

impl HabitFlags {
    pub fn evaluate(entry: &WellnessEntry, t: &Thresholds) -> Self {
        let bmi = bmi(entry.weight_kg, entry.height_meters);
        Self {
            rested: entry.sleep_hours >= t.sleep_hours,
            active: entry.steps >= t.steps,
            hydrated: entry.water_liters >= t.water_liters,
            positive_mood: is_positive_mood(&entry.mood),
            bmi_in_band: bmi >= t.bmi_band_min && bmi <= t.bmi_band_max,
            bmi_normal: BmiCategory::from_bmi(bmi) == BmiCategory::Normal,
        }
    }

    /// 0-5 points: sleep, water, steps, mood, BMI band.
    pub fn score(&self) -> u8 {
        [
            self.rested,
            self.hydrated,
            self.active,
            self.positive_mood,
            self.bmi_in_band,
        ]
        .iter()
        .filter(|&&f| f)
        .count() as u8
    }

    /// 0-4 lifestyle flags: sleep, steps, water, Normal BMI category. Mood is
    /// deliberately excluded here.
    pub fn lifestyle_count(&self) -> u8 {
        [self.rested, self.active, self.hydrated, self.bmi_normal]
            .iter()
            .filter(|&&f| f)
            .count() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellnessStatus {
    Good,
    Fair,
    NeedsAttention,
}

impl Serialize for WellnessStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl WellnessStatus {
    pub fn from_flags(flags: &HabitFlags) -> Self {
        match flags.score() {
            4.. => Self::Good,
            2..=3 => Self::Fair,
            _ => Self::NeedsAttention,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsAttention => "Needs Attention",
        }
    }
}

/// Narrative summary keyed by how many of the four lifestyle flags hold.
pub fn health_insight(flags: &HabitFlags) -> &'static str {
    match flags.lifestyle_count() {
        4 => "Excellent! Your sleep, activity, hydration, and BMI all indicate a very healthy lifestyle.",
        3 => "You're doing well overall. One small improvement—like better sleep, hydration, or activity—could make a big difference.",
        2 => "Your habits are mixed. Try focusing on hydration, regular activity, and sleep consistency to improve your wellness.",
        _ => "Your wellness indicators suggest that several lifestyle changes—especially hydration, movement, and sleep—could significantly improve your health.",
    }
}

/// All derived health indicators for one entry, bundled for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct EntryMetrics {
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub bmi_feedback: &'static str,
    pub bmi_badge: &'static str,
    pub wellness_status: WellnessStatus,
    pub health_insight: &'static str,
}

impl EntryMetrics {
    pub fn for_entry(entry: &WellnessEntry) -> Self {
        let bmi = bmi(entry.weight_kg, entry.height_meters);
        let category = BmiCategory::from_bmi(bmi);
        let flags = HabitFlags::evaluate(entry, &DEFAULT_THRESHOLDS);
        Self {
            bmi,
            bmi_category: category,
            bmi_feedback: category.feedback(),
            bmi_badge: category.badge_class(),
            wellness_status: WellnessStatus::from_flags(&flags),
            health_insight: health_insight(&flags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn entry(
        sleep_hours: f64,
        water_liters: i32,
        steps: i32,
        mood: &str,
        weight_kg: f64,
        height_meters: f64,
    ) -> WellnessEntry {
        WellnessEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            entry_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            water_liters,
            steps,
            sleep_hours,
            mood: mood.to_string(),
            weight_kg,
            height_meters,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_bmi_zero_height_is_zero() {
        assert_eq!(bmi(70.0, 0.0), 0.0);
        assert_eq!(bmi(70.0, -1.0), 0.0);
        assert_eq!(BmiCategory::from_bmi(0.0), BmiCategory::NotAvailable);
    }

    #[test]
    fn test_bmi_rounds_to_two_decimals() {
        // 70 / 1.75^2 = 22.857... -> 22.86
        assert_eq!(bmi(70.0, 1.75), 22.86);
    }

    #[test]
    fn test_bmi_monotonic_in_weight() {
        let height = 1.7;
        let mut prev = bmi(40.0, height);
        for w in [50.0, 60.0, 70.0, 80.0, 90.0] {
            let next = bmi(w, height);
            assert!(next > prev, "BMI should increase with weight");
            prev = next;
        }
    }

    #[test]
    fn test_category_boundaries_are_half_open() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.99), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.99), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_feedback_empty_only_for_na() {
        assert_eq!(BmiCategory::NotAvailable.feedback(), "");
        for c in [
            BmiCategory::Underweight,
            BmiCategory::Normal,
            BmiCategory::Overweight,
            BmiCategory::Obese,
        ] {
            assert!(!c.feedback().is_empty());
        }
    }

    #[test]
    fn test_wellness_status_all_flags_good() {
        // 8h sleep, 3L water, 9000 steps, Great mood, BMI ~22.86
        let e = entry(8.0, 3, 9000, "Great", 70.0, 1.75);
        let flags = HabitFlags::evaluate(&e, &DEFAULT_THRESHOLDS);
        assert_eq!(flags.score(), 5);
        assert_eq!(WellnessStatus::from_flags(&flags), WellnessStatus::Good);
    }

    #[test]
    fn test_wellness_status_two_flags_fair() {
        // Only sleep and water qualify; BMI 35+ is far out of band.
        let e = entry(8.0, 2, 1000, "Tired", 120.0, 1.6);
        let flags = HabitFlags::evaluate(&e, &DEFAULT_THRESHOLDS);
        assert_eq!(flags.score(), 2);
        assert_eq!(WellnessStatus::from_flags(&flags), WellnessStatus::Fair);
    }

    #[test]
    fn test_wellness_status_needs_attention() {
        let e = entry(4.0, 0, 500, "Bad", 120.0, 1.6);
        let flags = HabitFlags::evaluate(&e, &DEFAULT_THRESHOLDS);
        assert!(flags.score() <= 1);
        assert_eq!(
            WellnessStatus::from_flags(&flags),
            WellnessStatus::NeedsAttention
        );
    }

    #[test]
    fn test_insight_excludes_mood() {
        // All four lifestyle flags hold even with a negative mood.
        let e = entry(8.0, 3, 9000, "Awful", 70.0, 1.75);
        let flags = HabitFlags::evaluate(&e, &DEFAULT_THRESHOLDS);
        assert_eq!(flags.lifestyle_count(), 4);
        assert!(health_insight(&flags).starts_with("Excellent!"));
    }

    #[test]
    fn test_band_and_category_diverge_between_24_9_and_25() {
        // BMI 24.97: Normal category, but outside the scored [18.5, 24.9] band.
        let e = entry(8.0, 3, 9000, "Great", 63.9, 1.6);
        let flags = HabitFlags::evaluate(&e, &DEFAULT_THRESHOLDS);
        assert!(flags.bmi_normal);
        assert!(!flags.bmi_in_band);
    }

    #[test]
    fn test_serialized_vocabulary() {
        let cat = serde_json::to_string(&BmiCategory::NotAvailable).unwrap();
        assert_eq!(cat, "\"N/A\"");
        let status = serde_json::to_string(&WellnessStatus::NeedsAttention).unwrap();
        assert_eq!(status, "\"Needs Attention\"");
    }

    #[test]
    fn test_entry_metrics_bundle() {
        let e = entry(8.0, 3, 9000, "Great", 70.0, 1.75);
        let m = EntryMetrics::for_entry(&e);
        assert_eq!(m.bmi, 22.86);
        assert_eq!(m.bmi_category, BmiCategory::Normal);
        assert_eq!(m.bmi_badge, "bg-success");
        assert_eq!(m.wellness_status, WellnessStatus::Good);
    }
}
