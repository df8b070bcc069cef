use sqlx::PgPool;

use crate::db::models::Enrollment;

pub(crate) async fn find_for_user_course(
    pool: &PgPool,
    user_id: &str,
    course_id: &str,
) -> Result<Option<Enrollment>, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(
        "SELECT id, user_id, course_id, enrolled_at
         FROM enrollments
         WHERE user_id = $1 AND course_id = $2",
    )
    .bind(user_id)
    .bind(course_id)
    .fetch_optional(pool)
    .await
}
