use sqlx::PgPool;

use crate::db::models::QuizSubmission;

pub(crate) const COLUMNS: &str = "\
    id, quiz_id, user_id, user_name, enrollment_id, answers, score, max_score, percentage, \
    submitted_at, time_spent_seconds, attempt_number, status";

pub(crate) async fn count_for_user(
    pool: &PgPool,
    quiz_id: &str,
    user_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM quiz_submissions WHERE quiz_id = $1 AND user_id = $2")
        .bind(quiz_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub(crate) async fn create(pool: &PgPool, submission: &QuizSubmission) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO quiz_submissions (
            id, quiz_id, user_id, user_name, enrollment_id, answers, score, max_score,
            percentage, submitted_at, time_spent_seconds, attempt_number, status
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)
        ON CONFLICT ON CONSTRAINT quiz_submissions_attempt_unique DO NOTHING",
    )
    .bind(&submission.id)
    .bind(&submission.quiz_id)
    .bind(&submission.user_id)
    .bind(&submission.user_name)
    .bind(&submission.enrollment_id)
    .bind(&submission.answers)
    .bind(submission.score)
    .bind(submission.max_score)
    .bind(submission.percentage)
    .bind(submission.submitted_at)
    .bind(submission.time_spent_seconds)
    .bind(submission.attempt_number)
    .bind(submission.status)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub(crate) async fn find_by_id(
    pool: &PgPool,
    id: &str,
) -> Result<Option<QuizSubmission>, sqlx::Error> {
    sqlx::query_as::<_, QuizSubmission>(&format!(
        "SELECT {COLUMNS} FROM quiz_submissions WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn list_for_user(
    pool: &PgPool,
    quiz_id: &str,
    user_id: &str,
) -> Result<Vec<QuizSubmission>, sqlx::Error> {
    sqlx::query_as::<_, QuizSubmission>(&format!(
        "SELECT {COLUMNS}
         FROM quiz_submissions
         WHERE quiz_id = $1 AND user_id = $2
         ORDER BY attempt_number ASC"
    ))
    .bind(quiz_id)
    .bind(user_id)
    .fetch_all(pool)
    .await
}
