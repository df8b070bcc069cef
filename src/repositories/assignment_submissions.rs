use sqlx::PgPool;

use crate::db::models::AssignmentSubmission;

use super::store::GradingUpdate;

pub(crate) const COLUMNS: &str = "\
    id, assignment_id, user_id, user_name, enrollment_id, submission_type, content, \
    submitted_at, is_late, attempt_number, status, score, feedback, graded_at, graded_by, version";

pub(crate) async fn count_for_user(
    pool: &PgPool,
    assignment_id: &str,
    user_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM assignment_submissions WHERE assignment_id = $1 AND user_id = $2",
    )
    .bind(assignment_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Returns `false` when another request already claimed this attempt number.
pub(crate) async fn create(
    pool: &PgPool,
    submission: &AssignmentSubmission,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO assignment_submissions (
            id, assignment_id, user_id, user_name, enrollment_id, submission_type, content,
            submitted_at, is_late, attempt_number, status, score, feedback, graded_at, graded_by,
            version
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16)
        ON CONFLICT ON CONSTRAINT assignment_submissions_attempt_unique DO NOTHING",
    )
    .bind(&submission.id)
    .bind(&submission.assignment_id)
    .bind(&submission.user_id)
    .bind(&submission.user_name)
    .bind(&submission.enrollment_id)
    .bind(submission.submission_type)
    .bind(&submission.content)
    .bind(submission.submitted_at)
    .bind(submission.is_late)
    .bind(submission.attempt_number)
    .bind(submission.status)
    .bind(submission.score)
    .bind(&submission.feedback)
    .bind(submission.graded_at)
    .bind(&submission.graded_by)
    .bind(submission.version)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    id: &str,
) -> Result<Option<AssignmentSubmission>, sqlx::Error> {
    sqlx::query_as::<_, AssignmentSubmission>(&format!(
        "SELECT {COLUMNS} FROM assignment_submissions WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn list_for_user(
    pool: &PgPool,
    assignment_id: &str,
    user_id: &str,
) -> Result<Vec<AssignmentSubmission>, sqlx::Error> {
    sqlx::query_as::<_, AssignmentSubmission>(&format!(
        "SELECT {COLUMNS}
         FROM assignment_submissions
         WHERE assignment_id = $1 AND user_id = $2
         ORDER BY attempt_number ASC"
    ))
    .bind(assignment_id)
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Compare-and-set on `version`; `None` means the row changed since it was read.
pub(crate) async fn apply_grading(
    pool: &PgPool,
    id: &str,
    expected_version: i32,
    update: &GradingUpdate,
) -> Result<Option<AssignmentSubmission>, sqlx::Error> {
    sqlx::query_as::<_, AssignmentSubmission>(&format!(
        "UPDATE assignment_submissions
         SET status = $1,
             score = $2,
             feedback = $3,
             graded_at = $4,
             graded_by = $5,
             version = version + 1
         WHERE id = $6 AND version = $7
         RETURNING {COLUMNS}"
    ))
    .bind(update.status)
    .bind(update.score)
    .bind(&update.feedback)
    .bind(update.graded_at)
    .bind(&update.graded_by)
    .bind(id)
    .bind(expected_version)
    .fetch_optional(pool)
    .await
}
