use std::collections::HashMap;

use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// A single multiple choice question of the self assessment.
#[derive(Debug, Clone, PartialEq, Eq, Object, Serialize, Deserialize)]
pub struct Question {
    /// The unique identifier of the question.
    pub id: String,
    /// The question text.
    pub text: String,
    /// The possible answers, in presentation order.
    pub options: Vec<String>,
    /// The option that counts towards the score.
    pub correct_answer: String,
}

/// The fixed, ordered list of questions. Built once at process start and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The built-in self assessment questions.
    pub fn builtin() -> Self {
        Self::new(vec![
            question(
                "q1",
                "When I feel stressed or angry, I usually:",
                &[
                    "React immediately",
                    "Pause and think before reacting",
                    "Ignore the feeling",
                ],
                1,
            ),
            question(
                "q2",
                "During disagreements, I:",
                &[
                    "Get defensive or upset",
                    "Stay calm and listen",
                    "Avoid the situation",
                ],
                1,
            ),
            question(
                "q3",
                "When someone is upset, I:",
                &[
                    "Focus only on my point",
                    "Try to understand their feelings",
                    "Feel uncomfortable and change the topic",
                ],
                1,
            ),
            question(
                "q4",
                "After failure or criticism, I:",
                &[
                    "Feel demotivated for a long time",
                    "Reflect and try to improve",
                    "Blame external factors",
                ],
                1,
            ),
            question(
                "q5",
                "When expressing my emotions, I:",
                &[
                    "Keep everything inside",
                    "Communicate clearly and respectfully",
                    "Express emotions without filtering",
                ],
                1,
            ),
        ])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Count the questions whose stored answer equals the correct option.
    /// Unanswered questions never count as correct.
    pub fn score(&self, answers: &HashMap<String, String>) -> usize {
        self.questions
            .iter()
            .filter(|question| answers.get(&question.id) == Some(&question.correct_answer))
            .count()
    }
}

fn question(id: &str, text: &str, options: &[&str], correct: usize) -> Question {
    Question {
        id: id.into(),
        text: text.into(),
        options: options.iter().map(|&option| option.into()).collect(),
        correct_answer: options[correct].into(),
    }
}
