use sqlx::PgPool;

use crate::db::models::{Assignment, ContentUnit, CourseModule, CourseVersion, Quiz};

pub(crate) async fn find_assignment(
    pool: &PgPool,
    id: &str,
) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(
        "SELECT id, content_unit_id, title, submission_type, max_score, due_date
         FROM assignments
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn find_quiz(pool: &PgPool, id: &str) -> Result<Option<Quiz>, sqlx::Error> {
    sqlx::query_as::<_, Quiz>(
        "SELECT id, content_unit_id, title, questions, max_score
         FROM quizzes
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn find_content_unit(
    pool: &PgPool,
    id: &str,
) -> Result<Option<ContentUnit>, sqlx::Error> {
    sqlx::query_as::<_, ContentUnit>("SELECT id, module_id FROM content_units WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn find_course_module(
    pool: &PgPool,
    id: &str,
) -> Result<Option<CourseModule>, sqlx::Error> {
    sqlx::query_as::<_, CourseModule>(
        "SELECT id, course_version_id FROM course_modules WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn find_course_version(
    pool: &PgPool,
    id: &str,
) -> Result<Option<CourseVersion>, sqlx::Error> {
    sqlx::query_as::<_, CourseVersion>("SELECT id, course_id FROM course_versions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
