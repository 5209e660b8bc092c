use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::services::metrics::EntryMetrics;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WellnessEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub water_liters: i32,
    pub steps: i32,
    pub sleep_hours: f64,
    pub mood: String,
    pub weight_kg: f64,
    pub height_meters: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    /// Defaults to today when omitted.
    pub entry_date: Option<NaiveDate>,

    #[validate(range(min = 0, max = 20, message = "Water intake must be 0-20 liters"))]
    pub water_liters: i32,

    #[validate(range(min = 0, max = 100000, message = "Steps must be 0-100000"))]
    pub steps: i32,

    #[validate(range(min = 0.0, max = 24.0, message = "Sleep hours must be 0-24"))]
    pub sleep_hours: f64,

    #[validate(length(min = 1, max = 20, message = "Mood must be 1-20 characters"))]
    pub mood: String,

    #[validate(range(min = 20.0, max = 300.0, message = "Weight must be 20-300 kg"))]
    pub weight_kg: f64,

    #[validate(range(min = 0.5, max = 2.5, message = "Height must be 0.5-2.5 meters"))]
    pub height_meters: f64,

    #[validate(length(max = 250, message = "Notes must be at most 250 characters"))]
    pub notes: Option<String>,
}

/// Full overwrite: every stored field except id and owner is replaced, so the
/// edit form carries all of them.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEntryRequest {
    pub entry_date: NaiveDate,

    #[validate(range(min = 0, max = 20, message = "Water intake must be 0-20 liters"))]
    pub water_liters: i32,

    #[validate(range(min = 0, max = 100000, message = "Steps must be 0-100000"))]
    pub steps: i32,

    #[validate(range(min = 0.0, max = 24.0, message = "Sleep hours must be 0-24"))]
    pub sleep_hours: f64,

    #[validate(length(min = 1, max = 20, message = "Mood must be 1-20 characters"))]
    pub mood: String,

    #[validate(range(min = 20.0, max = 300.0, message = "Weight must be 20-300 kg"))]
    pub weight_kg: f64,

    #[validate(range(min = 0.5, max = 2.5, message = "Height must be 0.5-2.5 meters"))]
    pub height_meters: f64,

    #[validate(length(max = 250, message = "Notes must be at most 250 characters"))]
    pub notes: Option<String>,
}

/// API shape for an entry: the stored row plus its derived health indicators.
#[derive(Debug, Serialize)]
pub struct EntryWithMetrics {
    #[serde(flatten)]
    pub entry: WellnessEntry,
    #[serde(flatten)]
    pub metrics: EntryMetrics,
}

impl From<WellnessEntry> for EntryWithMetrics {
    fn from(entry: WellnessEntry) -> Self {
        let metrics = EntryMetrics::for_entry(&entry);
        Self { entry, metrics }
    }
}
