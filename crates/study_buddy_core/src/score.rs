//! crates/study_buddy_core/src/score.rs
//!
//! Pure scoring for completed quizzes.

use std::collections::HashMap;

use crate::domain::{AnswerReview, QuizQuestion, ScoreReport};

/// Scores a completed quiz against submitted answers keyed by question index.
///
/// Unanswered questions count as an empty submission and are always wrong.
/// Matching trims surrounding whitespace on both sides and is otherwise
/// exact, including case. The percentage is rounded to one decimal place and
/// is 0.0 for an empty quiz.
pub fn score_quiz(questions: &[QuizQuestion], answers: &HashMap<usize, String>) -> ScoreReport {
    let total = questions.len();
    let mut score = 0;
    let mut results = Vec::with_capacity(total);

    for (i, question) in questions.iter().enumerate() {
        let submitted = answers.get(&i).map(String::as_str).unwrap_or("");
        let correct = submitted.trim() == question.answer.trim();
        if correct {
            score += 1;
        }
        results.push(AnswerReview {
            question: question.question.clone(),
            correct,
            correct_answer: question.answer.clone(),
            your_answer: submitted.to_string(),
            explanation: question.explanation.clone(),
        });
    }

    let percentage = if total > 0 {
        ((score as f64 / total as f64) * 100.0 * 10.0).round() / 10.0
    } else {
        0.0
    };

    ScoreReport { score, total, percentage, results }
}
