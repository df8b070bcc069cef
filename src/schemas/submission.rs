use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::{AssignmentSubmission, QuizAnswer, QuizSubmission};
use crate::db::types::{AssignmentStatus, QuizStatus, SubmissionType};
use crate::services::grading::StatusChange;
use crate::services::submissions::{AssignmentReceipt, QuizReceipt, SubmissionRecord};

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitAssignmentRequest {
    pub(crate) submission_type: SubmissionType,
    pub(crate) content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct SubmitQuizRequest {
    pub(crate) answers: Vec<QuizAnswer>,
    #[validate(range(min = 0, message = "time_spent_seconds must be non-negative"))]
    pub(crate) time_spent_seconds: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct UpdateStatusRequest {
    pub(crate) status: AssignmentStatus,
    pub(crate) score: Option<f64>,
    #[validate(length(max = 10000, message = "feedback must be at most 10000 characters"))]
    pub(crate) feedback: Option<String>,
    pub(crate) graded_by: Option<String>,
}

impl From<UpdateStatusRequest> for StatusChange {
    fn from(request: UpdateStatusRequest) -> Self {
        Self {
            status: request.status,
            score: request.score,
            feedback: request.feedback,
            graded_by: request.graded_by,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AssignmentReceiptResponse {
    pub(crate) submission_id: String,
    pub(crate) is_late: bool,
    pub(crate) attempt_number: i32,
}

impl From<AssignmentReceipt> for AssignmentReceiptResponse {
    fn from(receipt: AssignmentReceipt) -> Self {
        Self {
            submission_id: receipt.submission_id,
            is_late: receipt.is_late,
            attempt_number: receipt.attempt_number,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizReceiptResponse {
    pub(crate) submission_id: String,
    pub(crate) score: f64,
    pub(crate) max_score: f64,
    pub(crate) percentage: i32,
    pub(crate) attempt_number: i32,
}

impl From<QuizReceipt> for QuizReceiptResponse {
    fn from(receipt: QuizReceipt) -> Self {
        Self {
            submission_id: receipt.submission_id,
            score: receipt.score,
            max_score: receipt.max_score,
            percentage: receipt.percentage,
            attempt_number: receipt.attempt_number,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AssignmentSubmissionResponse {
    pub(crate) id: String,
    pub(crate) assignment_id: String,
    pub(crate) user_id: String,
    pub(crate) user_name: String,
    pub(crate) submission_type: SubmissionType,
    pub(crate) content: String,
    pub(crate) submitted_at: String,
    pub(crate) is_late: bool,
    pub(crate) attempt_number: i32,
    pub(crate) status: AssignmentStatus,
    pub(crate) score: Option<f64>,
    pub(crate) feedback: Option<String>,
    pub(crate) graded_at: Option<String>,
    pub(crate) graded_by: Option<String>,
}

impl From<AssignmentSubmission> for AssignmentSubmissionResponse {
    fn from(row: AssignmentSubmission) -> Self {
        Self {
            id: row.id,
            assignment_id: row.assignment_id,
            user_id: row.user_id,
            user_name: row.user_name,
            submission_type: row.submission_type,
            content: row.content,
            submitted_at: format_primitive(row.submitted_at),
            is_late: row.is_late,
            attempt_number: row.attempt_number,
            status: row.status,
            score: row.score,
            feedback: row.feedback,
            graded_at: row.graded_at.map(format_primitive),
            graded_by: row.graded_by,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizSubmissionResponse {
    pub(crate) id: String,
    pub(crate) quiz_id: String,
    pub(crate) user_id: String,
    pub(crate) user_name: String,
    pub(crate) answers: Vec<QuizAnswer>,
    pub(crate) score: f64,
    pub(crate) max_score: f64,
    pub(crate) percentage: i32,
    pub(crate) submitted_at: String,
    pub(crate) time_spent_seconds: Option<i32>,
    pub(crate) attempt_number: i32,
    pub(crate) status: QuizStatus,
}

impl From<QuizSubmission> for QuizSubmissionResponse {
    fn from(row: QuizSubmission) -> Self {
        Self {
            id: row.id,
            quiz_id: row.quiz_id,
            user_id: row.user_id,
            user_name: row.user_name,
            answers: row.answers.0,
            score: row.score,
            max_score: row.max_score,
            percentage: row.percentage,
            submitted_at: format_primitive(row.submitted_at),
            time_spent_seconds: row.time_spent_seconds,
            attempt_number: row.attempt_number,
            status: row.status,
        }
    }
}

/// Either submission kind, tagged with `kind`.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub(crate) enum SubmissionResponse {
    Assignment(AssignmentSubmissionResponse),
    Quiz(QuizSubmissionResponse),
}

impl From<SubmissionRecord> for SubmissionResponse {
    fn from(record: SubmissionRecord) -> Self {
        match record {
            SubmissionRecord::Assignment(row) => SubmissionResponse::Assignment(row.into()),
            SubmissionRecord::Quiz(row) => SubmissionResponse::Quiz(row.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusUpdateResponse {
    pub(crate) success: bool,
    pub(crate) submission: AssignmentSubmissionResponse,
}
