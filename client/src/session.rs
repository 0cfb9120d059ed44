use std::{collections::HashMap, mem};

use lib::questions::{Question, QuestionBank};
use uuid::Uuid;

/// Default per-question countdown of the timed variant, in seconds.
pub const DEFAULT_TIMER_SECONDS: u32 = 30;

/// What the driver has to do after feeding an event into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    None,
    /// Perform the submission and report the outcome back via
    /// [`QuizSession::submission_succeeded`] or
    /// [`QuizSession::submission_failed`].
    Submit {
        name: String,
        answers: HashMap<String, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No name has been entered yet; drivers redirect to name entry.
    AwaitingName,
    InProgress {
        name: String,
        question_index: usize,
        answers: HashMap<String, String>,
        selected: Option<String>,
        /// Seconds left on the current question, `None` in the untimed
        /// variant. The countdown only exists in this state, so every
        /// transition out of it cancels the timer.
        time_remaining: Option<u32>,
    },
    /// A submission is in flight. Entered at most once per run through the
    /// questions; advance and tick are no-ops until the call resolves.
    Submitting {
        name: String,
        answers: HashMap<String, String>,
    },
    Completed {
        response_id: Uuid,
    },
}

/// Sequences a participant through the question bank: answer accumulation,
/// optional timed auto-advance and the final submission trigger. The machine
/// itself is synchronous; the network call is handed to the driver as a
/// [`SessionEffect`] and its outcome fed back in explicitly, which also
/// guards against a manual submit racing a timer expiry.
#[derive(Debug)]
pub struct QuizSession {
    bank: QuestionBank,
    timer: Option<u32>,
    state: SessionState,
}

impl QuizSession {
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            timer: None,
            state: SessionState::AwaitingName,
        }
    }

    /// A session with a per-question countdown, driven by [`Self::tick`].
    pub fn timed(bank: QuestionBank, seconds: u32) -> Self {
        Self {
            bank,
            timer: Some(seconds),
            state: SessionState::AwaitingName,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_question(&self) -> Option<&Question> {
        match &self.state {
            SessionState::InProgress { question_index, .. } => {
                self.bank.questions().get(*question_index)
            }
            _ => None,
        }
    }

    /// Begin the quiz. A blank name is refused and leaves the session in
    /// [`SessionState::AwaitingName`] so the driver can redirect to name
    /// entry; returns whether the first question was entered.
    pub fn start(&mut self, name: &str) -> bool {
        if !matches!(self.state, SessionState::AwaitingName)
            || name.trim().is_empty()
            || self.bank.is_empty()
        {
            return false;
        }
        self.state = SessionState::InProgress {
            name: name.to_owned(),
            question_index: 0,
            answers: HashMap::new(),
            selected: None,
            time_remaining: self.timer,
        };
        true
    }

    /// Record a selection for the current question. Never advances.
    pub fn select(&mut self, option: impl Into<String>) {
        if let SessionState::InProgress { selected, .. } = &mut self.state {
            *selected = Some(option.into());
        }
    }

    /// Merge the current selection (if any) into the answers and move on: to
    /// the next question with a fresh countdown, or into
    /// [`SessionState::Submitting`] on the last one.
    pub fn advance(&mut self) -> SessionEffect {
        let SessionState::InProgress {
            name,
            question_index,
            answers,
            selected,
            time_remaining,
        } = &mut self.state
        else {
            return SessionEffect::None;
        };
        let questions = self.bank.questions();
        if let Some(option) = selected.take() {
            answers.insert(questions[*question_index].id.clone(), option);
        }
        if *question_index + 1 < questions.len() {
            *question_index += 1;
            *selected = answers.get(&questions[*question_index].id).cloned();
            *time_remaining = self.timer;
            SessionEffect::None
        } else {
            let name = mem::take(name);
            let answers = mem::take(answers);
            self.state = SessionState::Submitting {
                name: name.clone(),
                answers: answers.clone(),
            };
            SessionEffect::Submit { name, answers }
        }
    }

    /// Count down one second. On expiry the current question is committed
    /// with whatever is selected at that moment (possibly nothing, recording
    /// the question as unanswered) via the same logic as [`Self::advance`].
    pub fn tick(&mut self) -> SessionEffect {
        let SessionState::InProgress {
            time_remaining: Some(remaining),
            ..
        } = &mut self.state
        else {
            return SessionEffect::None;
        };
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            self.advance()
        } else {
            SessionEffect::None
        }
    }

    /// The submission resolved successfully; the session is complete and the
    /// name state is dropped.
    pub fn submission_succeeded(&mut self, response_id: Uuid) {
        if matches!(self.state, SessionState::Submitting { .. }) {
            self.state = SessionState::Completed { response_id };
        }
    }

    /// The submission failed: return to the last question with all answers
    /// intact so the participant can retry.
    pub fn submission_failed(&mut self) {
        let SessionState::Submitting { name, answers } = &mut self.state else {
            return;
        };
        let name = mem::take(name);
        let answers = mem::take(answers);
        let question_index = self.bank.len() - 1;
        let selected = self
            .bank
            .questions()
            .get(question_index)
            .and_then(|question| answers.get(&question.id).cloned());
        self.state = SessionState::InProgress {
            name,
            question_index,
            answers,
            selected,
            time_remaining: self.timer,
        };
    }
}
