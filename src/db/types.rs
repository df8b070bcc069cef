use serde::{Deserialize, Serialize};
use sqlx::Type;

/// Platform role attached to a caller identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum UserRole {
    Learner,
    Instructor,
    Admin,
}

impl UserRole {
    /// Graders are instructors and admins.
    pub(crate) fn is_grader(self) -> bool {
        matches!(self, UserRole::Instructor | UserRole::Admin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "submissiontype", rename_all = "lowercase")]
pub(crate) enum SubmissionType {
    File,
    Text,
    Url,
}

impl SubmissionType {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            SubmissionType::File => "file",
            SubmissionType::Text => "text",
            SubmissionType::Url => "url",
        }
    }
}

impl std::fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a manually graded assignment submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "assignmentstatus", rename_all = "lowercase")]
pub(crate) enum AssignmentStatus {
    Submitted,
    Graded,
}

impl AssignmentStatus {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Submitted => "submitted",
            AssignmentStatus::Graded => "graded",
        }
    }
}

/// Quizzes are auto-graded on receipt, so there is only the terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "quizstatus", rename_all = "lowercase")]
pub(crate) enum QuizStatus {
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum AssessmentKind {
    Assignment,
    Quiz,
}

impl AssessmentKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            AssessmentKind::Assignment => "assignment",
            AssessmentKind::Quiz => "quiz",
        }
    }
}

/// Status as seen by the staff inbox, spanning both submission kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum InboxStatus {
    Submitted,
    Graded,
    Completed,
}

impl From<AssignmentStatus> for InboxStatus {
    fn from(status: AssignmentStatus) -> Self {
        match status {
            AssignmentStatus::Submitted => InboxStatus::Submitted,
            AssignmentStatus::Graded => InboxStatus::Graded,
        }
    }
}

impl From<QuizStatus> for InboxStatus {
    fn from(status: QuizStatus) -> Self {
        match status {
            QuizStatus::Completed => InboxStatus::Completed,
        }
    }
}
