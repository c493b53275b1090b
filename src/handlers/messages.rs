use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::db::MessageStore;
use crate::dto::GenerationReport;
use crate::error::AppResult;
use crate::models::ai_message::LatestMessages;
use crate::AppState;

pub async fn get_latest_messages(
    State(state): State<AppState>,
) -> AppResult<Json<LatestMessages>> {
    let latest = state.store.latest_messages().await?;
    Ok(Json(latest))
}

/// Manual trigger for the generation job.
pub async fn generate_messages(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<GenerationReport>> {
    tracing::info!(user_id = %auth_user.id, "Manual AI message generation requested");
    let report = state
        .generator
        .run_once(state.config.local_today())
        .await?;
    Ok(Json(report))
}
