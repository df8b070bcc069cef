use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::models::{
    Assignment, AssignmentSubmission, ContentUnit, CourseModule, CourseVersion, Enrollment, Quiz,
    QuizSubmission,
};

use super::store::{AssessmentStore, GradingUpdate, InboxCandidate, StoreError};
use super::{assessments, assignment_submissions, enrollments, health, inbox, quiz_submissions};

/// [`AssessmentStore`] backed by the shared Postgres pool.
#[derive(Clone)]
pub(crate) struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssessmentStore for PgStore {
    async fn find_assignment(&self, id: &str) -> Result<Option<Assignment>, StoreError> {
        Ok(assessments::find_assignment(&self.pool, id).await?)
    }

    async fn find_quiz(&self, id: &str) -> Result<Option<Quiz>, StoreError> {
        Ok(assessments::find_quiz(&self.pool, id).await?)
    }

    async fn find_content_unit(&self, id: &str) -> Result<Option<ContentUnit>, StoreError> {
        Ok(assessments::find_content_unit(&self.pool, id).await?)
    }

    async fn find_course_module(&self, id: &str) -> Result<Option<CourseModule>, StoreError> {
        Ok(assessments::find_course_module(&self.pool, id).await?)
    }

    async fn find_course_version(&self, id: &str) -> Result<Option<CourseVersion>, StoreError> {
        Ok(assessments::find_course_version(&self.pool, id).await?)
    }

    async fn find_enrollment(
        &self,
        user_id: &str,
        course_id: &str,
    ) -> Result<Option<Enrollment>, StoreError> {
        Ok(enrollments::find_for_user_course(&self.pool, user_id, course_id).await?)
    }

    async fn count_assignment_submissions(
        &self,
        assignment_id: &str,
        user_id: &str,
    ) -> Result<i64, StoreError> {
        Ok(assignment_submissions::count_for_user(&self.pool, assignment_id, user_id).await?)
    }

    async fn insert_assignment_submission(
        &self,
        submission: &AssignmentSubmission,
    ) -> Result<bool, StoreError> {
        Ok(assignment_submissions::create(&self.pool, submission).await?)
    }

    async fn find_assignment_submission(
        &self,
        id: &str,
    ) -> Result<Option<AssignmentSubmission>, StoreError> {
        Ok(assignment_submissions::find_by_id(&self.pool, id).await?)
    }

    async fn list_assignment_submissions_for_user(
        &self,
        assignment_id: &str,
        user_id: &str,
    ) -> Result<Vec<AssignmentSubmission>, StoreError> {
        Ok(assignment_submissions::list_for_user(&self.pool, assignment_id, user_id).await?)
    }

    async fn apply_grading(
        &self,
        id: &str,
        expected_version: i32,
        update: &GradingUpdate,
    ) -> Result<Option<AssignmentSubmission>, StoreError> {
        Ok(assignment_submissions::apply_grading(&self.pool, id, expected_version, update).await?)
    }

    async fn count_quiz_submissions(&self, quiz_id: &str, user_id: &str) -> Result<i64, StoreError> {
        Ok(quiz_submissions::count_for_user(&self.pool, quiz_id, user_id).await?)
    }

    async fn insert_quiz_submission(&self, submission: &QuizSubmission) -> Result<bool, StoreError> {
        Ok(quiz_submissions::create(&self.pool, submission).await?)
    }

    async fn find_quiz_submission(&self, id: &str) -> Result<Option<QuizSubmission>, StoreError> {
        Ok(quiz_submissions::find_by_id(&self.pool, id).await?)
    }

    async fn list_quiz_submissions_for_user(
        &self,
        quiz_id: &str,
        user_id: &str,
    ) -> Result<Vec<QuizSubmission>, StoreError> {
        Ok(quiz_submissions::list_for_user(&self.pool, quiz_id, user_id).await?)
    }

    async fn list_inbox_candidates(
        &self,
        assessment_id: Option<&str>,
    ) -> Result<Vec<InboxCandidate>, StoreError> {
        Ok(inbox::list_candidates(&self.pool, assessment_id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(health::ping(&self.pool).await?)
    }
}
