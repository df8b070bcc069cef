use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::Barrier;

use crate::db::models::{
    Assignment, AssignmentSubmission, ContentUnit, CourseModule, CourseVersion, Enrollment, Quiz,
    QuizSubmission,
};
use crate::db::types::AssessmentKind;

use super::store::{AssessmentStore, GradingUpdate, InboxCandidate, StoreError};

#[derive(Default)]
struct Tables {
    assignments: HashMap<String, Assignment>,
    quizzes: HashMap<String, Quiz>,
    content_units: HashMap<String, ContentUnit>,
    course_modules: HashMap<String, CourseModule>,
    course_versions: HashMap<String, CourseVersion>,
    enrollments: Vec<Enrollment>,
    assignment_submissions: Vec<AssignmentSubmission>,
    quiz_submissions: Vec<QuizSubmission>,
    contended_writes: u32,
    count_barrier: Option<(Arc<Barrier>, usize)>,
    attempt_conflicts: u32,
}

impl Tables {
    fn course_for_content_unit(&self, content_unit_id: &str) -> Option<String> {
        let unit = self.content_units.get(content_unit_id)?;
        let module = self.course_modules.get(&unit.module_id)?;
        let version = self.course_versions.get(&module.course_version_id)?;
        Some(version.course_id.clone())
    }

    fn take_count_barrier(&mut self) -> Option<Arc<Barrier>> {
        let (barrier, remaining) = self.count_barrier.as_mut()?;
        if *remaining == 0 {
            return None;
        }
        *remaining -= 1;
        Some(Arc::clone(barrier))
    }
}

/// Test double with the same uniqueness and compare-and-set behaviour as the Postgres schema.
#[derive(Default)]
pub(crate) struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn put_assignment(&self, assignment: Assignment) {
        self.tables().assignments.insert(assignment.id.clone(), assignment);
    }

    pub(crate) fn put_quiz(&self, quiz: Quiz) {
        self.tables().quizzes.insert(quiz.id.clone(), quiz);
    }

    pub(crate) fn put_content_unit(&self, unit: ContentUnit) {
        self.tables().content_units.insert(unit.id.clone(), unit);
    }

    pub(crate) fn put_course_module(&self, module: CourseModule) {
        self.tables().course_modules.insert(module.id.clone(), module);
    }

    pub(crate) fn put_course_version(&self, version: CourseVersion) {
        self.tables().course_versions.insert(version.id.clone(), version);
    }

    pub(crate) fn remove_course_module(&self, id: &str) {
        self.tables().course_modules.remove(id);
    }

    pub(crate) fn put_enrollment(&self, enrollment: Enrollment) {
        self.tables().enrollments.push(enrollment);
    }

    pub(crate) fn assignment_submission_count(&self) -> usize {
        self.tables().assignment_submissions.len()
    }

    pub(crate) fn quiz_submission_count(&self) -> usize {
        self.tables().quiz_submissions.len()
    }

    /// The next `writes` grading writes lose to a simulated concurrent writer, which bumps the
    /// row version just before the compare-and-set.
    pub(crate) fn contend_grading_writes(&self, writes: u32) {
        self.tables().contended_writes = writes;
    }

    /// The next `callers` attempt counts all return before any of them may insert, so every
    /// caller computes its attempt number from the same stale count.
    pub(crate) fn hold_attempt_counts(&self, callers: usize) {
        self.tables().count_barrier = Some((Arc::new(Barrier::new(callers)), callers));
    }

    /// Inserts refused because the attempt slot was already taken.
    pub(crate) fn attempt_conflicts(&self) -> u32 {
        self.tables().attempt_conflicts
    }

    async fn finish_count(&self, count: usize, barrier: Option<Arc<Barrier>>) -> i64 {
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }
        count as i64
    }
}

#[async_trait]
impl AssessmentStore for MemoryStore {
    async fn find_assignment(&self, id: &str) -> Result<Option<Assignment>, StoreError> {
        Ok(self.tables().assignments.get(id).cloned())
    }

    async fn find_quiz(&self, id: &str) -> Result<Option<Quiz>, StoreError> {
        Ok(self.tables().quizzes.get(id).cloned())
    }

    async fn find_content_unit(&self, id: &str) -> Result<Option<ContentUnit>, StoreError> {
        Ok(self.tables().content_units.get(id).cloned())
    }

    async fn find_course_module(&self, id: &str) -> Result<Option<CourseModule>, StoreError> {
        Ok(self.tables().course_modules.get(id).cloned())
    }

    async fn find_course_version(&self, id: &str) -> Result<Option<CourseVersion>, StoreError> {
        Ok(self.tables().course_versions.get(id).cloned())
    }

    async fn find_enrollment(
        &self,
        user_id: &str,
        course_id: &str,
    ) -> Result<Option<Enrollment>, StoreError> {
        Ok(self
            .tables()
            .enrollments
            .iter()
            .find(|row| row.user_id == user_id && row.course_id == course_id)
            .cloned())
    }

    async fn count_assignment_submissions(
        &self,
        assignment_id: &str,
        user_id: &str,
    ) -> Result<i64, StoreError> {
        let (count, barrier) = {
            let mut tables = self.tables();
            let count = tables
                .assignment_submissions
                .iter()
                .filter(|row| row.assignment_id == assignment_id && row.user_id == user_id)
                .count();
            (count, tables.take_count_barrier())
        };
        Ok(self.finish_count(count, barrier).await)
    }

    async fn insert_assignment_submission(
        &self,
        submission: &AssignmentSubmission,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        let taken = tables.assignment_submissions.iter().any(|row| {
            row.assignment_id == submission.assignment_id
                && row.user_id == submission.user_id
                && row.attempt_number == submission.attempt_number
        });
        if taken {
            tables.attempt_conflicts += 1;
            return Ok(false);
        }
        tables.assignment_submissions.push(submission.clone());
        Ok(true)
    }

    async fn find_assignment_submission(
        &self,
        id: &str,
    ) -> Result<Option<AssignmentSubmission>, StoreError> {
        Ok(self.tables().assignment_submissions.iter().find(|row| row.id == id).cloned())
    }

    async fn list_assignment_submissions_for_user(
        &self,
        assignment_id: &str,
        user_id: &str,
    ) -> Result<Vec<AssignmentSubmission>, StoreError> {
        let mut rows: Vec<AssignmentSubmission> = self
            .tables()
            .assignment_submissions
            .iter()
            .filter(|row| row.assignment_id == assignment_id && row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.attempt_number);
        Ok(rows)
    }

    async fn apply_grading(
        &self,
        id: &str,
        expected_version: i32,
        update: &GradingUpdate,
    ) -> Result<Option<AssignmentSubmission>, StoreError> {
        let mut tables = self.tables();
        if tables.contended_writes > 0 {
            tables.contended_writes -= 1;
            if let Some(row) = tables.assignment_submissions.iter_mut().find(|row| row.id == id) {
                row.version += 1;
            }
        }

        let Some(row) = tables
            .assignment_submissions
            .iter_mut()
            .find(|row| row.id == id && row.version == expected_version)
        else {
            return Ok(None);
        };

        row.status = update.status;
        row.score = update.score;
        row.feedback = update.feedback.clone();
        row.graded_at = update.graded_at;
        row.graded_by = update.graded_by.clone();
        row.version += 1;
        Ok(Some(row.clone()))
    }

    async fn count_quiz_submissions(&self, quiz_id: &str, user_id: &str) -> Result<i64, StoreError> {
        let (count, barrier) = {
            let mut tables = self.tables();
            let count = tables
                .quiz_submissions
                .iter()
                .filter(|row| row.quiz_id == quiz_id && row.user_id == user_id)
                .count();
            (count, tables.take_count_barrier())
        };
        Ok(self.finish_count(count, barrier).await)
    }

    async fn insert_quiz_submission(&self, submission: &QuizSubmission) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        let taken = tables.quiz_submissions.iter().any(|row| {
            row.quiz_id == submission.quiz_id
                && row.user_id == submission.user_id
                && row.attempt_number == submission.attempt_number
        });
        if taken {
            tables.attempt_conflicts += 1;
            return Ok(false);
        }
        tables.quiz_submissions.push(submission.clone());
        Ok(true)
    }

    async fn find_quiz_submission(&self, id: &str) -> Result<Option<QuizSubmission>, StoreError> {
        Ok(self.tables().quiz_submissions.iter().find(|row| row.id == id).cloned())
    }

    async fn list_quiz_submissions_for_user(
        &self,
        quiz_id: &str,
        user_id: &str,
    ) -> Result<Vec<QuizSubmission>, StoreError> {
        let mut rows: Vec<QuizSubmission> = self
            .tables()
            .quiz_submissions
            .iter()
            .filter(|row| row.quiz_id == quiz_id && row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.attempt_number);
        Ok(rows)
    }

    async fn list_inbox_candidates(
        &self,
        assessment_id: Option<&str>,
    ) -> Result<Vec<InboxCandidate>, StoreError> {
        let tables = self.tables();
        let wanted = |id: &str| assessment_id.map_or(true, |wanted| wanted == id);
        let mut candidates = Vec::new();

        for row in tables.assignment_submissions.iter().filter(|row| wanted(&row.assignment_id)) {
            let Some(assignment) = tables.assignments.get(&row.assignment_id) else {
                continue;
            };
            candidates.push(InboxCandidate {
                kind: AssessmentKind::Assignment,
                submission_id: row.id.clone(),
                assessment_id: row.assignment_id.clone(),
                assessment_title: assignment.title.clone(),
                course_id: tables.course_for_content_unit(&assignment.content_unit_id),
                user_id: row.user_id.clone(),
                user_name: row.user_name.clone(),
                submitted_at: row.submitted_at,
                status: row.status.into(),
                score: row.score,
                max_score: assignment.max_score,
                is_late: row.is_late,
                attempt_number: row.attempt_number,
            });
        }

        for row in tables.quiz_submissions.iter().filter(|row| wanted(&row.quiz_id)) {
            let Some(quiz) = tables.quizzes.get(&row.quiz_id) else {
                continue;
            };
            candidates.push(InboxCandidate {
                kind: AssessmentKind::Quiz,
                submission_id: row.id.clone(),
                assessment_id: row.quiz_id.clone(),
                assessment_title: quiz.title.clone(),
                course_id: tables.course_for_content_unit(&quiz.content_unit_id),
                user_id: row.user_id.clone(),
                user_name: row.user_name.clone(),
                submitted_at: row.submitted_at,
                status: row.status.into(),
                score: Some(row.score),
                max_score: row.max_score,
                is_late: false,
                attempt_number: row.attempt_number,
            });
        }

        Ok(candidates)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
