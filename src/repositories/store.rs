use async_trait::async_trait;
use thiserror::Error;
use time::PrimitiveDateTime;

use crate::db::models::{
    Assignment, AssignmentSubmission, ContentUnit, CourseModule, CourseVersion, Enrollment, Quiz,
    QuizSubmission,
};
use crate::db::types::{AssessmentKind, AssignmentStatus, InboxStatus};

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Replacement values for the mutable grading columns of an assignment submission.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GradingUpdate {
    pub(crate) status: AssignmentStatus,
    pub(crate) score: Option<f64>,
    pub(crate) feedback: Option<String>,
    pub(crate) graded_at: Option<PrimitiveDateTime>,
    pub(crate) graded_by: Option<String>,
}

/// One submission of either kind, joined to the assessment and course it belongs to.
#[derive(Debug, Clone)]
pub(crate) struct InboxCandidate {
    pub(crate) kind: AssessmentKind,
    pub(crate) submission_id: String,
    pub(crate) assessment_id: String,
    pub(crate) assessment_title: String,
    /// `None` when the content chain above the assessment is broken.
    pub(crate) course_id: Option<String>,
    pub(crate) user_id: String,
    pub(crate) user_name: String,
    pub(crate) submitted_at: PrimitiveDateTime,
    pub(crate) status: InboxStatus,
    pub(crate) score: Option<f64>,
    pub(crate) max_score: f64,
    pub(crate) is_late: bool,
    pub(crate) attempt_number: i32,
}

/// Persistence seam for the engine.
///
/// Inserts report `Ok(false)` when the `(assessment, user, attempt_number)` slot is already taken,
/// and [`AssessmentStore::apply_grading`] returns `Ok(None)` when `expected_version` is stale.
/// Callers use these signals to recount or re-read and retry.
#[async_trait]
pub(crate) trait AssessmentStore: Send + Sync {
    async fn find_assignment(&self, id: &str) -> Result<Option<Assignment>, StoreError>;
    async fn find_quiz(&self, id: &str) -> Result<Option<Quiz>, StoreError>;
    async fn find_content_unit(&self, id: &str) -> Result<Option<ContentUnit>, StoreError>;
    async fn find_course_module(&self, id: &str) -> Result<Option<CourseModule>, StoreError>;
    async fn find_course_version(&self, id: &str) -> Result<Option<CourseVersion>, StoreError>;
    async fn find_enrollment(
        &self,
        user_id: &str,
        course_id: &str,
    ) -> Result<Option<Enrollment>, StoreError>;

    async fn count_assignment_submissions(
        &self,
        assignment_id: &str,
        user_id: &str,
    ) -> Result<i64, StoreError>;
    async fn insert_assignment_submission(
        &self,
        submission: &AssignmentSubmission,
    ) -> Result<bool, StoreError>;
    async fn find_assignment_submission(
        &self,
        id: &str,
    ) -> Result<Option<AssignmentSubmission>, StoreError>;
    async fn list_assignment_submissions_for_user(
        &self,
        assignment_id: &str,
        user_id: &str,
    ) -> Result<Vec<AssignmentSubmission>, StoreError>;
    async fn apply_grading(
        &self,
        id: &str,
        expected_version: i32,
        update: &GradingUpdate,
    ) -> Result<Option<AssignmentSubmission>, StoreError>;

    async fn count_quiz_submissions(&self, quiz_id: &str, user_id: &str) -> Result<i64, StoreError>;
    async fn insert_quiz_submission(&self, submission: &QuizSubmission) -> Result<bool, StoreError>;
    async fn find_quiz_submission(&self, id: &str) -> Result<Option<QuizSubmission>, StoreError>;
    async fn list_quiz_submissions_for_user(
        &self,
        quiz_id: &str,
        user_id: &str,
    ) -> Result<Vec<QuizSubmission>, StoreError>;

    async fn list_inbox_candidates(
        &self,
        assessment_id: Option<&str>,
    ) -> Result<Vec<InboxCandidate>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
