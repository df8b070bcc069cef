use std::cmp::Ordering;

use crate::core::config::InboxSettings;
use crate::core::identity::CallerIdentity;
use crate::db::types::{AssessmentKind, InboxStatus};
use crate::repositories::{AssessmentStore, InboxCandidate};
use crate::services::EngineError;

#[derive(Debug, Clone, Default)]
pub(crate) struct InboxFilter {
    pub(crate) course_id: Option<String>,
    pub(crate) assessment_id: Option<String>,
    pub(crate) status: Option<InboxStatus>,
    pub(crate) query: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PageRequest {
    pub(crate) page: Option<i64>,
    pub(crate) page_size: Option<i64>,
}

#[derive(Debug, Clone)]
pub(crate) struct Page<T> {
    pub(crate) total: i64,
    pub(crate) page: i64,
    pub(crate) page_size: i64,
    pub(crate) rows: Vec<T>,
}

/// Clamps the page to `>= 1` and the page size to `[1, max_page_size]`.
pub(crate) fn normalize_page(request: PageRequest, settings: &InboxSettings) -> (i64, i64) {
    let page = request.page.unwrap_or(1).max(1);
    let page_size =
        request.page_size.unwrap_or(settings.default_page_size).clamp(1, settings.max_page_size);
    (page, page_size)
}

pub(crate) fn apply_filters(
    candidates: Vec<InboxCandidate>,
    filter: &InboxFilter,
) -> Vec<InboxCandidate> {
    let needle = filter
        .query
        .as_deref()
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .map(str::to_lowercase);

    candidates
        .into_iter()
        .filter(|row| {
            filter.assessment_id.as_deref().map_or(true, |wanted| row.assessment_id == wanted)
        })
        .filter(|row| filter.status.map_or(true, |wanted| row.status == wanted))
        .filter(|row| {
            filter
                .course_id
                .as_deref()
                .map_or(true, |wanted| row.course_id.as_deref() == Some(wanted))
        })
        .filter(|row| needle.as_deref().map_or(true, |needle| matches_query(row, needle)))
        .collect()
}

fn matches_query(row: &InboxCandidate, needle: &str) -> bool {
    [&row.assessment_title, &row.user_id, &row.user_name]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Newest first; equal timestamps fall back to submission id ascending.
pub(crate) fn sort_newest_first(rows: &mut [InboxCandidate]) {
    rows.sort_by(|left, right| match right.submitted_at.cmp(&left.submitted_at) {
        Ordering::Equal => left.submission_id.cmp(&right.submission_id),
        other => other,
    });
}

pub(crate) fn paginate<T>(rows: Vec<T>, page: i64, page_size: i64) -> Page<T> {
    let total = rows.len() as i64;
    let offset =
        usize::try_from(page.saturating_sub(1).saturating_mul(page_size)).unwrap_or(usize::MAX);
    let take = usize::try_from(page_size).unwrap_or(0);

    let rows = rows.into_iter().skip(offset).take(take).collect();
    Page { total, page, page_size, rows }
}

pub(crate) async fn list_submissions_inbox(
    store: &dyn AssessmentStore,
    caller: &CallerIdentity,
    filter: &InboxFilter,
    page_request: PageRequest,
    settings: &InboxSettings,
) -> Result<Page<InboxCandidate>, EngineError> {
    require_grader(caller)?;

    let (page, page_size) = normalize_page(page_request, settings);
    let candidates = store.list_inbox_candidates(filter.assessment_id.as_deref()).await?;
    report_orphans(&candidates);

    let mut rows = apply_filters(candidates, filter);
    sort_newest_first(&mut rows);

    let result = paginate(rows, page, page_size);
    tracing::debug!(
        caller = %caller.id,
        total = result.total,
        page,
        page_size,
        "Inbox listed"
    );
    Ok(result)
}

/// Submissions for one assignment or quiz, newest first.
pub(crate) async fn list_submissions_for_assessment(
    store: &dyn AssessmentStore,
    caller: &CallerIdentity,
    kind: AssessmentKind,
    assessment_id: &str,
    status: Option<InboxStatus>,
    page_request: PageRequest,
    settings: &InboxSettings,
) -> Result<Page<InboxCandidate>, EngineError> {
    require_grader(caller)?;

    let exists = match kind {
        AssessmentKind::Assignment => store.find_assignment(assessment_id).await?.is_some(),
        AssessmentKind::Quiz => store.find_quiz(assessment_id).await?.is_some(),
    };
    if !exists {
        return Err(EngineError::NotFound { what: kind.as_str() });
    }

    let (page, page_size) = normalize_page(page_request, settings);
    let candidates: Vec<InboxCandidate> = store
        .list_inbox_candidates(Some(assessment_id))
        .await?
        .into_iter()
        .filter(|row| row.kind == kind)
        .collect();

    let filter = InboxFilter {
        assessment_id: Some(assessment_id.to_string()),
        status,
        ..InboxFilter::default()
    };
    let mut rows = apply_filters(candidates, &filter);
    sort_newest_first(&mut rows);

    Ok(paginate(rows, page, page_size))
}

fn require_grader(caller: &CallerIdentity) -> Result<(), EngineError> {
    if caller.is_grader() {
        Ok(())
    } else {
        Err(EngineError::Forbidden("Only instructors and admins can browse submissions"))
    }
}

fn report_orphans(candidates: &[InboxCandidate]) {
    for row in candidates.iter().filter(|row| row.course_id.is_none()) {
        tracing::error!(
            submission_id = %row.submission_id,
            assessment_id = %row.assessment_id,
            kind = row.kind.as_str(),
            "Submission has no resolvable course"
        );
    }
}
