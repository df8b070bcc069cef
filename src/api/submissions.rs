use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentCaller;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::schemas::inbox::{InboxQuery, InboxRow, PageResponse};
use crate::schemas::submission::{StatusUpdateResponse, SubmissionResponse, UpdateStatusRequest};
use crate::services::grading::{self, StatusChange};
use crate::services::{inbox, submissions};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/inbox", get(list_inbox))
        .route("/:submission_id", get(get_submission))
        .route("/:submission_id/status", patch(update_status))
}

async fn list_inbox(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    params: Result<Query<InboxQuery>, QueryRejection>,
) -> Result<Json<PageResponse<InboxRow>>, ApiError> {
    let Query(params) = params?;
    let (filter, page_request) = params.into_parts();
    let page = inbox::list_submissions_inbox(
        state.store(),
        &caller,
        &filter,
        page_request,
        state.settings().inbox(),
    )
    .await?;

    Ok(Json(page.into()))
}

async fn get_submission(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let record = submissions::get_submission(state.store(), &caller, &submission_id).await?;
    Ok(Json(record.into()))
}

async fn update_status(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<StatusUpdateResponse>, ApiError> {
    let Json(payload) = payload?;
    payload.validate().map_err(ApiError::validation)?;

    let change = StatusChange::from(payload);
    let updated = grading::update_submission_status(
        state.store(),
        &caller,
        &submission_id,
        &change,
        state.settings().submissions().grading_retry_limit,
        primitive_now_utc(),
    )
    .await?;

    Ok(Json(StatusUpdateResponse { success: true, submission: updated.into() }))
}
