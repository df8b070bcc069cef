use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::types::{AssessmentKind, AssignmentStatus, QuizStatus};

use super::store::InboxCandidate;

#[derive(Debug, sqlx::FromRow)]
struct AssignmentCandidateRow {
    id: String,
    assignment_id: String,
    assignment_title: String,
    course_id: Option<String>,
    user_id: String,
    user_name: String,
    submitted_at: PrimitiveDateTime,
    status: AssignmentStatus,
    score: Option<f64>,
    max_score: f64,
    is_late: bool,
    attempt_number: i32,
}

#[derive(Debug, sqlx::FromRow)]
struct QuizCandidateRow {
    id: String,
    quiz_id: String,
    quiz_title: String,
    course_id: Option<String>,
    user_id: String,
    user_name: String,
    submitted_at: PrimitiveDateTime,
    status: QuizStatus,
    score: f64,
    max_score: f64,
    attempt_number: i32,
}

// Broken content chains come back with a NULL course id.
pub(crate) async fn list_candidates(
    pool: &PgPool,
    assessment_id: Option<&str>,
) -> Result<Vec<InboxCandidate>, sqlx::Error> {
    let assignment_rows = sqlx::query_as::<_, AssignmentCandidateRow>(
        "SELECT s.id,
                s.assignment_id,
                a.title AS assignment_title,
                cv.course_id,
                s.user_id,
                s.user_name,
                s.submitted_at,
                s.status,
                s.score,
                a.max_score,
                s.is_late,
                s.attempt_number
         FROM assignment_submissions s
         JOIN assignments a ON a.id = s.assignment_id
         LEFT JOIN content_units cu ON cu.id = a.content_unit_id
         LEFT JOIN course_modules m ON m.id = cu.module_id
         LEFT JOIN course_versions cv ON cv.id = m.course_version_id
         WHERE ($1::text IS NULL OR s.assignment_id = $1)",
    )
    .bind(assessment_id)
    .fetch_all(pool)
    .await?;

    let quiz_rows = sqlx::query_as::<_, QuizCandidateRow>(
        "SELECT s.id,
                s.quiz_id,
                q.title AS quiz_title,
                cv.course_id,
                s.user_id,
                s.user_name,
                s.submitted_at,
                s.status,
                s.score,
                s.max_score,
                s.attempt_number
         FROM quiz_submissions s
         JOIN quizzes q ON q.id = s.quiz_id
         LEFT JOIN content_units cu ON cu.id = q.content_unit_id
         LEFT JOIN course_modules m ON m.id = cu.module_id
         LEFT JOIN course_versions cv ON cv.id = m.course_version_id
         WHERE ($1::text IS NULL OR s.quiz_id = $1)",
    )
    .bind(assessment_id)
    .fetch_all(pool)
    .await?;

    let mut candidates = Vec::with_capacity(assignment_rows.len() + quiz_rows.len());
    candidates.extend(assignment_rows.into_iter().map(|row| InboxCandidate {
        kind: AssessmentKind::Assignment,
        submission_id: row.id,
        assessment_id: row.assignment_id,
        assessment_title: row.assignment_title,
        course_id: row.course_id,
        user_id: row.user_id,
        user_name: row.user_name,
        submitted_at: row.submitted_at,
        status: row.status.into(),
        score: row.score,
        max_score: row.max_score,
        is_late: row.is_late,
        attempt_number: row.attempt_number,
    }));
    candidates.extend(quiz_rows.into_iter().map(|row| InboxCandidate {
        kind: AssessmentKind::Quiz,
        submission_id: row.id,
        assessment_id: row.quiz_id,
        assessment_title: row.quiz_title,
        course_id: row.course_id,
        user_id: row.user_id,
        user_name: row.user_name,
        submitted_at: row.submitted_at,
        status: row.status.into(),
        score: Some(row.score),
        max_score: row.max_score,
        is_late: false,
        attempt_number: row.attempt_number,
    }));

    Ok(candidates)
}
