use sqlx::types::Json;
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::core::config::SubmissionSettings;
use crate::core::identity::CallerIdentity;
use crate::core::metrics;
use crate::db::models::{AssignmentSubmission, QuizAnswer, QuizSubmission};
use crate::db::types::{AssessmentKind, AssignmentStatus, QuizStatus, SubmissionType};
use crate::repositories::AssessmentStore;
use crate::services::{
    attempts, enrollment_gate, lateness, quiz_scoring, submission_validator, EngineError,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AssignmentReceipt {
    pub(crate) submission_id: String,
    pub(crate) is_late: bool,
    pub(crate) attempt_number: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QuizReceipt {
    pub(crate) submission_id: String,
    pub(crate) score: f64,
    pub(crate) max_score: f64,
    pub(crate) percentage: i32,
    pub(crate) attempt_number: i32,
}

#[derive(Debug, Clone)]
pub(crate) enum SubmissionRecord {
    Assignment(AssignmentSubmission),
    Quiz(QuizSubmission),
}

impl SubmissionRecord {
    pub(crate) fn user_id(&self) -> &str {
        match self {
            SubmissionRecord::Assignment(row) => &row.user_id,
            SubmissionRecord::Quiz(row) => &row.user_id,
        }
    }
}

pub(crate) async fn submit_assignment(
    store: &dyn AssessmentStore,
    caller: &CallerIdentity,
    assignment_id: &str,
    submission_type: SubmissionType,
    content: String,
    settings: &SubmissionSettings,
    now: PrimitiveDateTime,
) -> Result<AssignmentReceipt, EngineError> {
    let admission = enrollment_gate::admit_assignment(store, caller, assignment_id).await?;
    let assignment = admission.assessment;

    submission_validator::validate_assignment_content(
        assignment.submission_type,
        submission_type,
        &content,
    )?;

    let is_late = lateness::is_late(now, assignment.due_date);
    let mut submission = AssignmentSubmission {
        id: Uuid::new_v4().to_string(),
        assignment_id: assignment.id.clone(),
        user_id: caller.id.clone(),
        user_name: caller.display_name.clone(),
        enrollment_id: admission.enrollment.id,
        submission_type,
        content,
        submitted_at: now,
        is_late,
        attempt_number: 0,
        status: AssignmentStatus::Submitted,
        score: None,
        feedback: None,
        graded_at: None,
        graded_by: None,
        version: 0,
    };

    let attempt_number =
        attempts::record_attempt(store, &mut submission, settings.attempt_retry_limit).await?;

    metrics::record_submission(AssessmentKind::Assignment, is_late);
    tracing::info!(
        submission_id = %submission.id,
        assignment_id = %assignment.id,
        user_id = %caller.id,
        attempt_number,
        is_late,
        "Assignment submitted"
    );

    Ok(AssignmentReceipt { submission_id: submission.id, is_late, attempt_number })
}

pub(crate) async fn submit_quiz(
    store: &dyn AssessmentStore,
    caller: &CallerIdentity,
    quiz_id: &str,
    answers: Vec<QuizAnswer>,
    time_spent_seconds: Option<i32>,
    settings: &SubmissionSettings,
    now: PrimitiveDateTime,
) -> Result<QuizReceipt, EngineError> {
    let admission = enrollment_gate::admit_quiz(store, caller, quiz_id).await?;
    let quiz = admission.assessment;

    submission_validator::validate_quiz_answers(&quiz.questions, &answers)?;

    let result = quiz_scoring::score_quiz(&quiz.questions, quiz.max_score, &answers);
    if result.raw_score > result.score {
        tracing::warn!(
            quiz_id = %quiz.id,
            raw_score = result.raw_score,
            max_score = result.max_score,
            "Quiz points exceed its declared max score, clamping"
        );
    }

    let mut submission = QuizSubmission {
        id: Uuid::new_v4().to_string(),
        quiz_id: quiz.id.clone(),
        user_id: caller.id.clone(),
        user_name: caller.display_name.clone(),
        enrollment_id: admission.enrollment.id,
        answers: Json(answers),
        score: result.score,
        max_score: result.max_score,
        percentage: result.percentage,
        submitted_at: now,
        time_spent_seconds,
        attempt_number: 0,
        status: QuizStatus::Completed,
    };

    let attempt_number =
        attempts::record_attempt(store, &mut submission, settings.attempt_retry_limit).await?;

    metrics::record_submission(AssessmentKind::Quiz, false);
    tracing::info!(
        submission_id = %submission.id,
        quiz_id = %quiz.id,
        user_id = %caller.id,
        attempt_number,
        score = result.score,
        percentage = result.percentage,
        "Quiz submitted"
    );

    Ok(QuizReceipt {
        submission_id: submission.id,
        score: result.score,
        max_score: result.max_score,
        percentage: result.percentage,
        attempt_number,
    })
}

/// One submission of either kind, visible to its author and to graders.
pub(crate) async fn get_submission(
    store: &dyn AssessmentStore,
    caller: &CallerIdentity,
    submission_id: &str,
) -> Result<SubmissionRecord, EngineError> {
    let record = match store.find_assignment_submission(submission_id).await? {
        Some(row) => SubmissionRecord::Assignment(row),
        None => store
            .find_quiz_submission(submission_id)
            .await?
            .map(SubmissionRecord::Quiz)
            .ok_or(EngineError::NotFound { what: "submission" })?,
    };

    if record.user_id() != caller.id && !caller.is_grader() {
        return Err(EngineError::Forbidden("Submission belongs to another learner"));
    }

    Ok(record)
}

/// The caller's own attempts for one assessment, oldest first.
pub(crate) async fn list_my_submissions(
    store: &dyn AssessmentStore,
    caller: &CallerIdentity,
    kind: AssessmentKind,
    assessment_id: &str,
) -> Result<Vec<SubmissionRecord>, EngineError> {
    let records = match kind {
        AssessmentKind::Assignment => {
            store
                .find_assignment(assessment_id)
                .await?
                .ok_or(EngineError::NotFound { what: "assignment" })?;
            store
                .list_assignment_submissions_for_user(assessment_id, &caller.id)
                .await?
                .into_iter()
                .map(SubmissionRecord::Assignment)
                .collect()
        }
        AssessmentKind::Quiz => {
            store.find_quiz(assessment_id).await?.ok_or(EngineError::NotFound { what: "quiz" })?;
            store
                .list_quiz_submissions_for_user(assessment_id, &caller.id)
                .await?
                .into_iter()
                .map(SubmissionRecord::Quiz)
                .collect()
        }
    };

    Ok(records)
}
