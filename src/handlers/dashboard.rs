use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::entry::WellnessEntry;
use crate::services::dashboard::{self, DashboardSummary};
use crate::AppState;

/// Aggregate the user's full history into dashboard statistics. Windowing
/// policy: the entire history, ascending by date (see DESIGN.md); the
/// aggregator itself reduces whatever slice it is handed.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<DashboardSummary>> {
    let entries = sqlx::query_as::<_, WellnessEntry>(
        r#"
        SELECT * FROM wellness_entries
        WHERE user_id = $1
        ORDER BY entry_date ASC, created_at ASC
        "#,
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(dashboard::summarize(entries)))
}
