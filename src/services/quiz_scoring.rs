use crate::db::models::{QuizAnswer, QuizQuestion};
use crate::services::submission_validator::question_at;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct QuizScore {
    /// Sum of points before clamping to `[0, max_score]`.
    pub(crate) raw_score: f64,
    pub(crate) score: f64,
    pub(crate) max_score: f64,
    pub(crate) percentage: i32,
}

/// Adds the points of every question whose selected option is correct. Answers pointing at a
/// missing question or option contribute nothing.
pub(crate) fn score_quiz(
    questions: &[QuizQuestion],
    max_score: f64,
    answers: &[QuizAnswer],
) -> QuizScore {
    let raw_score: f64 = answers
        .iter()
        .filter_map(|answer| {
            let question = question_at(questions, answer.question_index)?;
            let option = usize::try_from(answer.selected_option_index)
                .ok()
                .and_then(|index| question.options.get(index))?;
            option.is_correct.then_some(question.points)
        })
        .sum();

    let ceiling = max_score.max(0.0);
    let score = raw_score.clamp(0.0, ceiling);

    QuizScore { raw_score, score, max_score, percentage: percentage(score, max_score) }
}

pub(crate) fn percentage(score: f64, max_score: f64) -> i32 {
    if max_score > 0.0 {
        (score / max_score * 100.0).round() as i32
    } else {
        0
    }
}
