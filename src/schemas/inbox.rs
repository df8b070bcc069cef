use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;
use crate::db::types::{AssessmentKind, InboxStatus};
use crate::repositories::InboxCandidate;
use crate::services::inbox::{InboxFilter, Page, PageRequest};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InboxQuery {
    pub(crate) course_id: Option<String>,
    pub(crate) assessment_id: Option<String>,
    pub(crate) status: Option<InboxStatus>,
    pub(crate) query: Option<String>,
    pub(crate) page: Option<i64>,
    pub(crate) page_size: Option<i64>,
}

impl InboxQuery {
    pub(crate) fn into_parts(self) -> (InboxFilter, PageRequest) {
        let filter = InboxFilter {
            course_id: self.course_id,
            assessment_id: self.assessment_id,
            status: self.status,
            query: self.query,
        };
        (filter, PageRequest { page: self.page, page_size: self.page_size })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AssessmentSubmissionsQuery {
    pub(crate) status: Option<InboxStatus>,
    pub(crate) page: Option<i64>,
    pub(crate) page_size: Option<i64>,
}

impl AssessmentSubmissionsQuery {
    pub(crate) fn page_request(&self) -> PageRequest {
        PageRequest { page: self.page, page_size: self.page_size }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct InboxRow {
    pub(crate) kind: AssessmentKind,
    pub(crate) submission_id: String,
    pub(crate) assessment_id: String,
    pub(crate) assessment_title: String,
    pub(crate) course_id: Option<String>,
    pub(crate) user_id: String,
    pub(crate) user_name: String,
    pub(crate) submitted_at: String,
    pub(crate) status: InboxStatus,
    pub(crate) score: Option<f64>,
    pub(crate) max_score: f64,
    pub(crate) is_late: bool,
    pub(crate) attempt_number: i32,
}

impl From<InboxCandidate> for InboxRow {
    fn from(row: InboxCandidate) -> Self {
        Self {
            kind: row.kind,
            submission_id: row.submission_id,
            assessment_id: row.assessment_id,
            assessment_title: row.assessment_title,
            course_id: row.course_id,
            user_id: row.user_id,
            user_name: row.user_name,
            submitted_at: format_primitive(row.submitted_at),
            status: row.status,
            score: row.score,
            max_score: row.max_score,
            is_late: row.is_late,
            attempt_number: row.attempt_number,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PageResponse<T> {
    pub(crate) total: i64,
    pub(crate) page: i64,
    pub(crate) page_size: i64,
    pub(crate) rows: Vec<T>,
}

impl<T, U: From<T>> From<Page<T>> for PageResponse<U> {
    fn from(page: Page<T>) -> Self {
        Self {
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            rows: page.rows.into_iter().map(U::from).collect(),
        }
    }
}
