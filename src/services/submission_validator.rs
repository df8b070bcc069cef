use std::collections::HashSet;

use url::Url;

use crate::db::models::{QuizAnswer, QuizQuestion};
use crate::db::types::SubmissionType;
use crate::services::EngineError;

pub(crate) fn validate_assignment_content(
    required: SubmissionType,
    submitted: SubmissionType,
    content: &str,
) -> Result<(), EngineError> {
    if required != submitted {
        return Err(EngineError::TypeMismatch { expected: required, actual: submitted });
    }

    match submitted {
        SubmissionType::Url => {
            let parsed = Url::parse(content.trim()).map_err(|_| EngineError::InvalidFormat)?;
            // `mailto:` and friends parse, but are not something a grader can open.
            if !parsed.has_host() {
                return Err(EngineError::InvalidFormat);
            }
        }
        SubmissionType::Text => {
            if content.trim().is_empty() {
                return Err(EngineError::EmptyContent);
            }
        }
        SubmissionType::File => {
            if content.trim().is_empty() {
                return Err(EngineError::MissingFile);
            }
        }
    }

    Ok(())
}

/// Checks run in a fixed order: count, question range, option range, duplicates.
pub(crate) fn validate_quiz_answers(
    questions: &[QuizQuestion],
    answers: &[QuizAnswer],
) -> Result<(), EngineError> {
    if answers.len() != questions.len() {
        return Err(EngineError::AnswerCountMismatch {
            expected: questions.len(),
            actual: answers.len(),
        });
    }

    for answer in answers {
        if question_at(questions, answer.question_index).is_none() {
            return Err(EngineError::InvalidQuestionIndex(answer.question_index));
        }
    }

    for answer in answers {
        let options = question_at(questions, answer.question_index)
            .map(|question| question.options.len())
            .unwrap_or_default();
        let in_range = usize::try_from(answer.selected_option_index)
            .map(|index| index < options)
            .unwrap_or(false);
        if !in_range {
            return Err(EngineError::InvalidOptionIndex {
                question_index: answer.question_index,
                option_index: answer.selected_option_index,
            });
        }
    }

    let mut seen = HashSet::with_capacity(answers.len());
    for answer in answers {
        if !seen.insert(answer.question_index) {
            return Err(EngineError::DuplicateQuestionIndex(answer.question_index));
        }
    }

    Ok(())
}

pub(crate) fn question_at(questions: &[QuizQuestion], index: i64) -> Option<&QuizQuestion> {
    usize::try_from(index).ok().and_then(|index| questions.get(index))
}
