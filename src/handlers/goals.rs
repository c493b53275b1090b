use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::db::RecordStore;
use crate::dto::UpdateGoalsRequest;
use crate::error::AppResult;
use crate::models::goals::Goals;
use crate::AppState;

pub async fn get_goals(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Goals>> {
    let goals = state.store.get_or_create_goals(auth_user.id).await?;
    Ok(Json(goals))
}

pub async fn update_goals(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpdateGoalsRequest>,
) -> AppResult<Json<Goals>> {
    body.validate()?;

    let goals = state
        .store
        .update_goals(auth_user.id, body.weekly_goal, body.monthly_goal)
        .await?;

    tracing::info!(
        user_id = %auth_user.id,
        weekly_goal = goals.weekly_goal,
        monthly_goal = goals.monthly_goal,
        "Goals updated"
    );
    Ok(Json(goals))
}
