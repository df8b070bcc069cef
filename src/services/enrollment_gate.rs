use crate::core::identity::CallerIdentity;
use crate::db::models::{Assignment, Enrollment, Quiz};
use crate::repositories::AssessmentStore;
use crate::services::EngineError;

/// An assessment the caller is allowed to submit to, with the enrollment that admits them.
#[derive(Debug, Clone)]
pub(crate) struct Admission<T> {
    pub(crate) assessment: T,
    pub(crate) enrollment: Enrollment,
}

pub(crate) async fn admit_assignment(
    store: &dyn AssessmentStore,
    caller: &CallerIdentity,
    assignment_id: &str,
) -> Result<Admission<Assignment>, EngineError> {
    let assignment = store
        .find_assignment(assignment_id)
        .await?
        .ok_or(EngineError::NotFound { what: "assignment" })?;

    let enrollment = admit(store, caller, &assignment.content_unit_id).await?;
    Ok(Admission { assessment: assignment, enrollment })
}

pub(crate) async fn admit_quiz(
    store: &dyn AssessmentStore,
    caller: &CallerIdentity,
    quiz_id: &str,
) -> Result<Admission<Quiz>, EngineError> {
    let quiz = store.find_quiz(quiz_id).await?.ok_or(EngineError::NotFound { what: "quiz" })?;

    let enrollment = admit(store, caller, &quiz.content_unit_id).await?;
    Ok(Admission { assessment: quiz, enrollment })
}

/// Walks content unit -> module -> course version and returns the owning course id.
pub(crate) async fn resolve_course_id(
    store: &dyn AssessmentStore,
    content_unit_id: &str,
) -> Result<String, EngineError> {
    let unit = store
        .find_content_unit(content_unit_id)
        .await?
        .ok_or_else(|| broken_reference("content unit", content_unit_id))?;

    let module = store
        .find_course_module(&unit.module_id)
        .await?
        .ok_or_else(|| broken_reference("course module", &unit.module_id))?;

    let version = store
        .find_course_version(&module.course_version_id)
        .await?
        .ok_or_else(|| broken_reference("course version", &module.course_version_id))?;

    tracing::debug!(
        content_unit_id = %unit.id,
        module_id = %module.id,
        course_version_id = %version.id,
        course_id = %version.course_id,
        "Resolved owning course"
    );
    Ok(version.course_id)
}

async fn admit(
    store: &dyn AssessmentStore,
    caller: &CallerIdentity,
    content_unit_id: &str,
) -> Result<Enrollment, EngineError> {
    let course_id = resolve_course_id(store, content_unit_id).await?;

    store.find_enrollment(&caller.id, &course_id).await?.ok_or_else(|| {
        tracing::info!(user_id = %caller.id, course_id = %course_id, "Submission refused: not enrolled");
        EngineError::NotEnrolled
    })
}

fn broken_reference(what: &'static str, id: &str) -> EngineError {
    tracing::error!(entity = what, id = %id, "Content hierarchy is broken above an assessment");
    EngineError::BrokenReference { what, id: id.to_string() }
}
