use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::dto::DashboardSummary;
use crate::error::AppResult;
use crate::services::dashboard::load_dashboard;
use crate::AppState;

pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<DashboardSummary>> {
    let today = state.config.local_today();
    let summary = load_dashboard(state.store.as_ref(), auth_user.id, today).await?;
    Ok(Json(summary))
}
