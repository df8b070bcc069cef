mod assessments;
mod assignment_submissions;
mod enrollments;
mod health;
mod inbox;
#[cfg(test)]
pub(crate) mod memory;
mod postgres;
mod store;
mod quiz_submissions;

pub(crate) use postgres::PgStore;
pub(crate) use store::{AssessmentStore, GradingUpdate, InboxCandidate, StoreError};
