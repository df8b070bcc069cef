use async_trait::async_trait;

use crate::core::metrics;
use crate::db::models::{AssignmentSubmission, QuizSubmission};
use crate::db::types::AssessmentKind;
use crate::repositories::{AssessmentStore, StoreError};
use crate::services::EngineError;

/// A new submission row that still needs its attempt ordinal.
#[async_trait]
pub(crate) trait AttemptRecord: Send + Sync {
    const KIND: AssessmentKind;

    async fn prior_attempts(&self, store: &dyn AssessmentStore) -> Result<i64, StoreError>;

    /// `Ok(false)` when another writer already holds this attempt number.
    async fn try_insert(&self, store: &dyn AssessmentStore) -> Result<bool, StoreError>;

    fn set_attempt_number(&mut self, attempt_number: i32);
}

pub(crate) fn next_attempt_number(prior_attempts: i64) -> i32 {
    i32::try_from(prior_attempts.max(0)).unwrap_or(i32::MAX - 1).saturating_add(1)
}

/// Counts prior attempts, stamps `count + 1` and inserts. A lost race recounts and tries again,
/// up to `retry_limit` inserts in total.
pub(crate) async fn record_attempt<R: AttemptRecord>(
    store: &dyn AssessmentStore,
    record: &mut R,
    retry_limit: u32,
) -> Result<i32, EngineError> {
    for round in 1..=retry_limit {
        let attempt_number = next_attempt_number(record.prior_attempts(store).await?);
        record.set_attempt_number(attempt_number);

        if record.try_insert(store).await? {
            return Ok(attempt_number);
        }

        metrics::record_retry("attempt_number");
        tracing::debug!(
            kind = R::KIND.as_str(),
            attempt_number,
            round,
            "Attempt number already taken, recounting"
        );
    }

    tracing::warn!(kind = R::KIND.as_str(), retry_limit, "Attempt numbering retry budget exhausted");
    Err(EngineError::Conflict)
}

#[async_trait]
impl AttemptRecord for AssignmentSubmission {
    const KIND: AssessmentKind = AssessmentKind::Assignment;

    async fn prior_attempts(&self, store: &dyn AssessmentStore) -> Result<i64, StoreError> {
        store.count_assignment_submissions(&self.assignment_id, &self.user_id).await
    }

    async fn try_insert(&self, store: &dyn AssessmentStore) -> Result<bool, StoreError> {
        store.insert_assignment_submission(self).await
    }

    fn set_attempt_number(&mut self, attempt_number: i32) {
        self.attempt_number = attempt_number;
    }
}

#[async_trait]
impl AttemptRecord for QuizSubmission {
    const KIND: AssessmentKind = AssessmentKind::Quiz;

    async fn prior_attempts(&self, store: &dyn AssessmentStore) -> Result<i64, StoreError> {
        store.count_quiz_submissions(&self.quiz_id, &self.user_id).await
    }

    async fn try_insert(&self, store: &dyn AssessmentStore) -> Result<bool, StoreError> {
        store.insert_quiz_submission(self).await
    }

    fn set_attempt_number(&mut self, attempt_number: i32) {
        self.attempt_number = attempt_number;
    }
}
