use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::PrimitiveDateTime;

use crate::db::types::{AssignmentStatus, QuizStatus, SubmissionType};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Assignment {
    pub(crate) id: String,
    pub(crate) content_unit_id: String,
    pub(crate) title: String,
    pub(crate) submission_type: SubmissionType,
    pub(crate) max_score: f64,
    pub(crate) due_date: Option<PrimitiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct QuizOption {
    pub(crate) text: String,
    pub(crate) is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct QuizQuestion {
    pub(crate) text: String,
    pub(crate) options: Vec<QuizOption>,
    pub(crate) points: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Quiz {
    pub(crate) id: String,
    pub(crate) content_unit_id: String,
    pub(crate) title: String,
    pub(crate) questions: Json<Vec<QuizQuestion>>,
    pub(crate) max_score: f64,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct ContentUnit {
    pub(crate) id: String,
    pub(crate) module_id: String,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct CourseModule {
    pub(crate) id: String,
    pub(crate) course_version_id: String,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct CourseVersion {
    pub(crate) id: String,
    pub(crate) course_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Enrollment {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) course_id: String,
    pub(crate) enrolled_at: PrimitiveDateTime,
}

/// Indices are signed so that negative input reaches validation instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct QuizAnswer {
    pub(crate) question_index: i64,
    pub(crate) selected_option_index: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct AssignmentSubmission {
    pub(crate) id: String,
    pub(crate) assignment_id: String,
    pub(crate) user_id: String,
    pub(crate) user_name: String,
    pub(crate) enrollment_id: String,
    pub(crate) submission_type: SubmissionType,
    pub(crate) content: String,
    pub(crate) submitted_at: PrimitiveDateTime,
    pub(crate) is_late: bool,
    pub(crate) attempt_number: i32,
    pub(crate) status: AssignmentStatus,
    pub(crate) score: Option<f64>,
    pub(crate) feedback: Option<String>,
    pub(crate) graded_at: Option<PrimitiveDateTime>,
    pub(crate) graded_by: Option<String>,
    pub(crate) version: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct QuizSubmission {
    pub(crate) id: String,
    pub(crate) quiz_id: String,
    pub(crate) user_id: String,
    pub(crate) user_name: String,
    pub(crate) enrollment_id: String,
    pub(crate) answers: Json<Vec<QuizAnswer>>,
    pub(crate) score: f64,
    pub(crate) max_score: f64,
    pub(crate) percentage: i32,
    pub(crate) submitted_at: PrimitiveDateTime,
    pub(crate) time_spent_seconds: Option<i32>,
    pub(crate) attempt_number: i32,
    pub(crate) status: QuizStatus,
}
