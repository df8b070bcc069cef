//! Two courses, a handful of assessments and enrollments shared by engine and router tests.

use sqlx::types::Json;
use time::macros::datetime;

use crate::core::config::SubmissionSettings;
use crate::core::identity::CallerIdentity;
use crate::db::models::{
    Assignment, AssignmentSubmission, ContentUnit, CourseModule, CourseVersion, Enrollment, Quiz,
    QuizOption, QuizQuestion,
};
use crate::db::types::{AssignmentStatus, SubmissionType, UserRole};
use crate::repositories::memory::MemoryStore;

pub(crate) const COURSE_ID: &str = "course-algorithms";
pub(crate) const MODULE_ID: &str = "module-algorithms-1";
pub(crate) const OTHER_COURSE_ID: &str = "course-physics";

pub(crate) const TEXT_ASSIGNMENT_ID: &str = "assignment-essay";
pub(crate) const URL_ASSIGNMENT_ID: &str = "assignment-repo-link";
pub(crate) const FILE_ASSIGNMENT_ID: &str = "assignment-lab-report";
pub(crate) const QUIZ_ID: &str = "quiz-sorting";

pub(crate) const LEARNER_ID: &str = "learner-ada";
pub(crate) const LEARNER_ENROLLMENT_ID: &str = "enrollment-ada-algorithms";
pub(crate) const OTHER_LEARNER_ID: &str = "learner-grace";
pub(crate) const OUTSIDER_ID: &str = "learner-alan";
pub(crate) const INSTRUCTOR_ID: &str = "instructor-edsger";
pub(crate) const ADMIN_ID: &str = "admin-barbara";

fn caller(id: &str, display_name: &str, role: UserRole) -> CallerIdentity {
    CallerIdentity { id: id.to_string(), display_name: display_name.to_string(), role }
}

pub(crate) fn learner() -> CallerIdentity {
    caller(LEARNER_ID, "Ada Lovelace", UserRole::Learner)
}

pub(crate) fn other_learner() -> CallerIdentity {
    caller(OTHER_LEARNER_ID, "Grace Hopper", UserRole::Learner)
}

pub(crate) fn outsider() -> CallerIdentity {
    caller(OUTSIDER_ID, "Alan Turing", UserRole::Learner)
}

pub(crate) fn instructor() -> CallerIdentity {
    caller(INSTRUCTOR_ID, "Edsger Dijkstra", UserRole::Instructor)
}

pub(crate) fn admin() -> CallerIdentity {
    caller(ADMIN_ID, "Barbara Liskov", UserRole::Admin)
}

pub(crate) fn submission_settings() -> SubmissionSettings {
    SubmissionSettings::default()
}

/// Text assignment worth 100 points, due 2024-01-10T00:00:00Z.
pub(crate) fn text_assignment() -> Assignment {
    Assignment {
        id: TEXT_ASSIGNMENT_ID.to_string(),
        content_unit_id: "unit-algorithms-essay".to_string(),
        title: "Reflective essay on recursion".to_string(),
        submission_type: SubmissionType::Text,
        max_score: 100.0,
        due_date: Some(datetime!(2024-01-10 00:00:00)),
    }
}

/// Points `[5, 10]`, max 15. Question 0 is answered by option 0, question 1 by option 1.
pub(crate) fn two_question_quiz() -> Quiz {
    let option = |text: &str, is_correct: bool| QuizOption { text: text.to_string(), is_correct };

    Quiz {
        id: QUIZ_ID.to_string(),
        content_unit_id: "unit-algorithms-quiz".to_string(),
        title: "Sorting basics".to_string(),
        questions: Json(vec![
            QuizQuestion {
                text: "Worst case of quicksort?".to_string(),
                options: vec![option("O(n^2)", true), option("O(n log n)", false)],
                points: 5.0,
            },
            QuizQuestion {
                text: "Which sort is stable?".to_string(),
                options: vec![
                    option("Heapsort", false),
                    option("Merge sort", true),
                    option("Selection sort", false),
                ],
                points: 10.0,
            },
        ]),
        max_score: 15.0,
    }
}

/// An unsaved, ungraded submission row authored by `user_id`.
pub(crate) fn assignment_submission(user_id: &str) -> AssignmentSubmission {
    AssignmentSubmission {
        id: "submission-fixture".to_string(),
        assignment_id: TEXT_ASSIGNMENT_ID.to_string(),
        user_id: user_id.to_string(),
        user_name: "Fixture Author".to_string(),
        enrollment_id: LEARNER_ENROLLMENT_ID.to_string(),
        submission_type: SubmissionType::Text,
        content: "Draft".to_string(),
        submitted_at: datetime!(2024-01-09 10:00:00),
        is_late: false,
        attempt_number: 1,
        status: AssignmentStatus::Submitted,
        score: None,
        feedback: None,
        graded_at: None,
        graded_by: None,
        version: 0,
    }
}

pub(crate) fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();

    seed_course(&store, COURSE_ID, MODULE_ID, &["unit-algorithms-essay", "unit-algorithms-quiz"]);
    seed_course(&store, OTHER_COURSE_ID, "module-physics-1", &["unit-physics-lab"]);

    store.put_assignment(text_assignment());
    store.put_assignment(Assignment {
        id: URL_ASSIGNMENT_ID.to_string(),
        content_unit_id: "unit-algorithms-essay".to_string(),
        title: "Link your repository".to_string(),
        submission_type: SubmissionType::Url,
        max_score: 10.0,
        due_date: None,
    });
    store.put_assignment(Assignment {
        id: FILE_ASSIGNMENT_ID.to_string(),
        content_unit_id: "unit-physics-lab".to_string(),
        title: "Pendulum lab report".to_string(),
        submission_type: SubmissionType::File,
        max_score: 20.0,
        due_date: None,
    });
    store.put_quiz(two_question_quiz());

    let enrolled_at = datetime!(2023-12-01 09:00:00);
    for (id, user_id, course_id) in [
        (LEARNER_ENROLLMENT_ID, LEARNER_ID, COURSE_ID),
        ("enrollment-ada-physics", LEARNER_ID, OTHER_COURSE_ID),
        ("enrollment-grace-algorithms", OTHER_LEARNER_ID, COURSE_ID),
    ] {
        store.put_enrollment(Enrollment {
            id: id.to_string(),
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
            enrolled_at,
        });
    }

    store
}

fn seed_course(store: &MemoryStore, course_id: &str, module_id: &str, unit_ids: &[&str]) {
    let version_id = format!("{course_id}-v1");
    store.put_course_version(CourseVersion { id: version_id.clone(), course_id: course_id.to_string() });
    store.put_course_module(CourseModule {
        id: module_id.to_string(),
        course_version_id: version_id,
    });
    for unit_id in unit_ids {
        store.put_content_unit(ContentUnit {
            id: unit_id.to_string(),
            module_id: module_id.to_string(),
        });
    }
}
