use time::PrimitiveDateTime;

use crate::core::identity::CallerIdentity;
use crate::core::metrics;
use crate::db::models::{Assignment, AssignmentSubmission};
use crate::db::types::AssignmentStatus;
use crate::repositories::{AssessmentStore, GradingUpdate};
use crate::services::EngineError;

/// A requested status transition with its optional grading fields.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatusChange {
    pub(crate) status: AssignmentStatus,
    pub(crate) score: Option<f64>,
    pub(crate) feedback: Option<String>,
    pub(crate) graded_by: Option<String>,
}

impl StatusChange {
    fn carries_grading_fields(&self) -> bool {
        self.score.is_some() || self.feedback.is_some() || self.graded_by.is_some()
    }
}

/// Moving a submission to `graded` is for instructors and admins.
pub(crate) fn authorize_grade(caller: &CallerIdentity) -> Result<(), EngineError> {
    if caller.is_grader() {
        Ok(())
    } else {
        Err(EngineError::Forbidden("Only instructors and admins can grade submissions"))
    }
}

/// Moving a submission back to `submitted` is for its author alone, graders included.
pub(crate) fn authorize_revert(
    caller: &CallerIdentity,
    submission: &AssignmentSubmission,
) -> Result<(), EngineError> {
    if submission.user_id == caller.id {
        Ok(())
    } else {
        Err(EngineError::Forbidden("Only the author can revert a submission"))
    }
}

/// Evaluates a transition against the current row and returns the columns to write.
pub(crate) fn plan_transition(
    caller: &CallerIdentity,
    submission: &AssignmentSubmission,
    assignment: &Assignment,
    change: &StatusChange,
    now: PrimitiveDateTime,
) -> Result<GradingUpdate, EngineError> {
    if change.carries_grading_fields() && !caller.is_grader() {
        return Err(EngineError::Forbidden("Only graders can set score, feedback or graded_by"));
    }

    match change.status {
        AssignmentStatus::Graded => {
            authorize_grade(caller)?;

            let score = change.score.ok_or(EngineError::MissingScore)?;
            if !score.is_finite() || score < 0.0 || score > assignment.max_score {
                return Err(EngineError::ScoreOutOfBounds { score, max: assignment.max_score });
            }

            let graded_by = change
                .graded_by
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(caller.id.as_str())
                .to_string();

            Ok(GradingUpdate {
                status: AssignmentStatus::Graded,
                score: Some(score),
                feedback: change.feedback.clone().or_else(|| submission.feedback.clone()),
                graded_at: Some(now),
                graded_by: Some(graded_by),
            })
        }
        AssignmentStatus::Submitted => {
            authorize_revert(caller, submission)?;

            // Reverting reopens the submission; the last grade stays visible for reference.
            Ok(GradingUpdate {
                status: AssignmentStatus::Submitted,
                score: submission.score,
                feedback: submission.feedback.clone(),
                graded_at: submission.graded_at,
                graded_by: submission.graded_by.clone(),
            })
        }
    }
}

/// Applies a status change under optimistic locking. A stale version re-reads the row and
/// re-evaluates the whole transition, authorization included.
pub(crate) async fn update_submission_status(
    store: &dyn AssessmentStore,
    caller: &CallerIdentity,
    submission_id: &str,
    change: &StatusChange,
    retry_limit: u32,
    now: PrimitiveDateTime,
) -> Result<AssignmentSubmission, EngineError> {
    for round in 1..=retry_limit {
        let submission = store
            .find_assignment_submission(submission_id)
            .await?
            .ok_or(EngineError::NotFound { what: "submission" })?;

        let assignment =
            store.find_assignment(&submission.assignment_id).await?.ok_or_else(|| {
                tracing::error!(
                    submission_id = %submission.id,
                    assignment_id = %submission.assignment_id,
                    "Submission references a missing assignment"
                );
                EngineError::BrokenReference {
                    what: "assignment",
                    id: submission.assignment_id.clone(),
                }
            })?;

        let update = plan_transition(caller, &submission, &assignment, change, now)?;

        match store.apply_grading(&submission.id, submission.version, &update).await? {
            Some(updated) => {
                metrics::record_transition(updated.status);
                tracing::info!(
                    submission_id = %updated.id,
                    from = submission.status.as_str(),
                    to = updated.status.as_str(),
                    score = ?updated.score,
                    actor = %caller.id,
                    "Submission status updated"
                );
                return Ok(updated);
            }
            None => {
                metrics::record_retry("grading");
                tracing::debug!(
                    submission_id = %submission.id,
                    version = submission.version,
                    round,
                    "Submission changed underneath, re-evaluating"
                );
            }
        }
    }

    tracing::warn!(submission_id = %submission_id, retry_limit, "Grading retry budget exhausted");
    Err(EngineError::Conflict)
}
