use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentCaller;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::AssessmentKind;
use crate::schemas::inbox::{AssessmentSubmissionsQuery, InboxRow, PageResponse};
use crate::schemas::submission::{
    AssignmentReceiptResponse, SubmissionResponse, SubmitAssignmentRequest,
};
use crate::services::{inbox, submissions};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/:assignment_id/submissions", post(submit_assignment).get(list_submissions))
        .route("/:assignment_id/my-submissions", get(my_submissions))
}

async fn submit_assignment(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Path(assignment_id): Path<String>,
    payload: Result<Json<SubmitAssignmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AssignmentReceiptResponse>), ApiError> {
    let Json(payload) = payload?;
    let receipt = submissions::submit_assignment(
        state.store(),
        &caller,
        &assignment_id,
        payload.submission_type,
        payload.content,
        state.settings().submissions(),
        primitive_now_utc(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(receipt.into())))
}

async fn list_submissions(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Path(assignment_id): Path<String>,
    params: Result<Query<AssessmentSubmissionsQuery>, QueryRejection>,
) -> Result<Json<PageResponse<InboxRow>>, ApiError> {
    let Query(params) = params?;
    let page = inbox::list_submissions_for_assessment(
        state.store(),
        &caller,
        AssessmentKind::Assignment,
        &assignment_id,
        params.status,
        params.page_request(),
        state.settings().inbox(),
    )
    .await?;

    Ok(Json(page.into()))
}

async fn my_submissions(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Path(assignment_id): Path<String>,
) -> Result<Json<Vec<SubmissionResponse>>, ApiError> {
    let records = submissions::list_my_submissions(
        state.store(),
        &caller,
        AssessmentKind::Assignment,
        &assignment_id,
    )
    .await?;

    Ok(Json(records.into_iter().map(SubmissionResponse::from).collect()))
}
