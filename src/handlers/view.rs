use axum::{extract::State, Extension, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::db::RecordStore;
use crate::dto::{CalendarMonth, DashboardSummary};
use crate::error::AppResult;
use crate::models::goals::Goals;
use crate::services::calendar::load_month;
use crate::services::dashboard::load_dashboard;
use crate::services::view_state::{ViewAction, ViewEffect, ViewState};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    #[serde(default)]
    pub state: ViewState,
    pub action: ViewAction,
}

#[derive(Debug, Serialize)]
#[serde(tag = "screen", content = "payload", rename_all = "lowercase")]
pub enum ScreenData {
    Home(DashboardSummary),
    Calendar(CalendarMonth),
    Settings(Goals),
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub state: ViewState,
    pub effects: Vec<ViewEffect>,
    pub data: ScreenData,
}

/// Applies one screen action and runs its effects for the caller. The
/// response always carries data for the resulting screen; transitions
/// without a load effect reload the current screen.
pub async fn transition(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<ViewRequest>,
) -> AppResult<Json<ViewResponse>> {
    let today = state.config.local_today();
    let next = body.state.apply(body.action, today)?;

    let mut data = None;
    for effect in &next.effects {
        if let Some(loaded) = run_effect(&state, auth_user.id, effect, today).await? {
            data = Some(loaded);
        }
    }
    let data = match data {
        Some(data) => data,
        None => {
            let reload = next.state.reload_effect();
            run_effect(&state, auth_user.id, &reload, today)
                .await?
                .ok_or_else(|| anyhow::anyhow!("reload effect produced no screen data"))?
        }
    };

    Ok(Json(ViewResponse {
        state: next.state,
        effects: next.effects,
        data,
    }))
}

async fn run_effect(
    state: &AppState,
    user_id: Uuid,
    effect: &ViewEffect,
    today: NaiveDate,
) -> AppResult<Option<ScreenData>> {
    let data = match *effect {
        ViewEffect::UpsertRecord { date, status } => {
            state.store.upsert_record(user_id, date, status).await?;
            return Ok(None);
        }
        ViewEffect::LoadHome => {
            ScreenData::Home(load_dashboard(state.store.as_ref(), user_id, today).await?)
        }
        ViewEffect::LoadMonth { year, month } => ScreenData::Calendar(
            load_month(state.store.as_ref(), user_id, year, month, today).await?,
        ),
        ViewEffect::LoadGoals => {
            ScreenData::Settings(state.store.get_or_create_goals(user_id).await?)
        }
    };
    Ok(Some(data))
}
