use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::NaiveDate;

use crate::auth::middleware::AuthUser;
use crate::db::RecordStore;
use crate::dto::CalendarMonth;
use crate::error::{AppError, AppResult};
use crate::models::daily_record::{DailyRecord, DailyRecordQuery, UpsertDailyRecordRequest};
use crate::services::calendar::load_month;
use crate::services::dates::{parse_local_date_string, week_date_range};
use crate::AppState;

pub async fn get_today_record(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Option<DailyRecord>>> {
    let today = state.config.local_today();
    let record = state.store.get_record(auth_user.id, today).await?;
    Ok(Json(record))
}

pub async fn upsert_record(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpsertDailyRecordRequest>,
) -> AppResult<Json<DailyRecord>> {
    let date = body.date.unwrap_or_else(|| state.config.local_today());

    let record = state
        .store
        .upsert_record(auth_user.id, date, body.status)
        .await?;

    tracing::debug!(user_id = %auth_user.id, date = %date, status = body.status.as_str(), "Day record saved");
    Ok(Json(record))
}

pub async fn list_records(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<DailyRecordQuery>,
) -> AppResult<Json<Vec<DailyRecord>>> {
    let week = week_date_range(state.config.local_today());
    let start = parse_bound(query.start_date.as_deref(), "start_date")?.unwrap_or(week.start);
    let end = parse_bound(query.end_date.as_deref(), "end_date")?.unwrap_or(week.end);

    if start > end {
        return Err(AppError::Validation(
            "start_date must not be after end_date".into(),
        ));
    }

    let records = state.store.list_records(auth_user.id, start, end).await?;
    Ok(Json(records))
}

fn parse_bound(raw: Option<&str>, field: &str) -> AppResult<Option<NaiveDate>> {
    match raw {
        None => Ok(None),
        Some(s) => parse_local_date_string(s)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("{field} is not a valid date"))),
    }
}

pub async fn get_month(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((year, month)): Path<(i32, u32)>,
) -> AppResult<Json<CalendarMonth>> {
    let view = load_month(
        state.store.as_ref(),
        auth_user.id,
        year,
        month,
        state.config.local_today(),
    )
    .await?;
    Ok(Json(view))
}
