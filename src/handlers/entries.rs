use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::entry::{
    CreateEntryRequest, EntryWithMetrics, UpdateEntryRequest, WellnessEntry,
};
use crate::AppState;

/// All of the user's entries, newest first, each with derived health
/// indicators attached.
pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<EntryWithMetrics>>> {
    let entries = sqlx::query_as::<_, WellnessEntry>(
        r#"
        SELECT * FROM wellness_entries
        WHERE user_id = $1
        ORDER BY entry_date DESC, created_at DESC
        "#,
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries.into_iter().map(EntryWithMetrics::from).collect()))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateEntryRequest>,
) -> AppResult<Json<EntryWithMetrics>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let entry_date = body.entry_date.unwrap_or_else(|| Utc::now().date_naive());

    // Owner comes from the access token, never from the body.
    let entry = sqlx::query_as::<_, WellnessEntry>(
        r#"
        INSERT INTO wellness_entries
            (id, user_id, entry_date, water_liters, steps, sleep_hours, mood, weight_kg, height_meters, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(entry_date)
    .bind(body.water_liters)
    .bind(body.steps)
    .bind(body.sleep_hours)
    .bind(&body.mood)
    .bind(body.weight_kg)
    .bind(body.height_meters)
    .bind(&body.notes)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(entry.into()))
}

/// The most recent entry, or null when the user has none yet. Backs the
/// landing view's "latest check-in" card.
pub async fn latest_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Option<EntryWithMetrics>>> {
    let entry = sqlx::query_as::<_, WellnessEntry>(
        r#"
        SELECT * FROM wellness_entries
        WHERE user_id = $1
        ORDER BY entry_date DESC, created_at DESC
        LIMIT 1
        "#,
    )
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?;

    Ok(Json(entry.map(EntryWithMetrics::from)))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<EntryWithMetrics>> {
    let entry = sqlx::query_as::<_, WellnessEntry>(
        "SELECT * FROM wellness_entries WHERE id = $1 AND user_id = $2",
    )
    .bind(entry_id)
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Entry not found".into()))?;

    Ok(Json(entry.into()))
}

/// Overwrite every mutable field, preserving id and owner. Reports 404 when
/// the entry vanished between read and write (e.g. a concurrent delete).
pub async fn update_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
    Json(body): Json<UpdateEntryRequest>,
) -> AppResult<Json<EntryWithMetrics>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let entry = sqlx::query_as::<_, WellnessEntry>(
        r#"
        UPDATE wellness_entries SET
            entry_date = $3,
            water_liters = $4,
            steps = $5,
            sleep_hours = $6,
            mood = $7,
            weight_kg = $8,
            height_meters = $9,
            notes = $10,
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(entry_id)
    .bind(auth_user.id)
    .bind(body.entry_date)
    .bind(body.water_liters)
    .bind(body.steps)
    .bind(body.sleep_hours)
    .bind(&body.mood)
    .bind(body.weight_kg)
    .bind(body.height_meters)
    .bind(&body.notes)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Entry not found".into()))?;

    Ok(Json(entry.into()))
}

/// Idempotent scoped delete: succeeds whether or not the row still exists.
pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM wellness_entries WHERE id = $1 AND user_id = $2")
        .bind(entry_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        tracing::debug!(entry_id = %entry_id, "Delete of absent entry");
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
