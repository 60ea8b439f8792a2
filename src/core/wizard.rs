//! Question wizard: one question at a time, with conditional skips.
//!
//! The cursor only moves forward. After construction and after every
//! accepted answer it is settled: questions whose condition fails are
//! passed over immediately, so the cursor always rests on a question that
//! will be presented or on the end of the set.

use std::sync::Arc;
use thiserror::Error;

use crate::core::question::{QuestionSet, QuestionSpec};
use crate::schema::answers::{AnswerError, AnswerMap};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Please enter something to continue.")]
    EmptyResponse,
    #[error("all questions have been answered")]
    AlreadyComplete,
    #[error(transparent)]
    Answer(#[from] AnswerError),
}

/// The wizard's only mutable cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WizardState {
    current_index: usize,
}

impl WizardState {
    pub fn current_index(&self) -> usize {
        self.current_index
    }
}

/// What the wizard wants next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    Ask(&'a QuestionSpec),
    Complete,
}

/// Result of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub key: String,
    /// Keys passed over while settling after this answer.
    pub skipped: Vec<String>,
    pub complete: bool,
}

/// A question wizard bound to one session.
#[derive(Debug, Clone)]
pub struct Wizard {
    questions: Arc<QuestionSet>,
    state: WizardState,
    answers: AnswerMap,
    skipped: Vec<String>,
}

impl Wizard {
    pub fn new(questions: Arc<QuestionSet>) -> Self {
        let mut wizard = Self {
            questions,
            state: WizardState::default(),
            answers: AnswerMap::new(),
            skipped: Vec::new(),
        };
        wizard.settle();
        wizard
    }

    /// The question to present, or `Complete`.
    pub fn current_question(&self) -> Step<'_> {
        match self.questions.get(self.state.current_index) {
            Some(q) => Step::Ask(q),
            None => Step::Complete,
        }
    }

    /// Prompt for the current question, or `None` once complete.
    pub fn current_prompt(&self) -> Option<String> {
        match self.current_question() {
            Step::Ask(q) => Some(render_prompt(q, &self.answers)),
            Step::Complete => None,
        }
    }

    /// Record `response` for the current question and advance.
    ///
    /// Empty or whitespace-only responses are rejected and leave the
    /// wizard untouched. The response is stored as given.
    pub fn submit_answer(&mut self, response: &str) -> Result<Submitted, WizardError> {
        let key = match self.current_question() {
            Step::Ask(q) => q.key.clone(),
            Step::Complete => return Err(WizardError::AlreadyComplete),
        };

        if response.trim().is_empty() {
            tracing::debug!(question = %key, "rejected empty response");
            return Err(WizardError::EmptyResponse);
        }

        self.answers.insert(key.clone(), response)?;
        self.state.current_index += 1;
        let skipped_before = self.skipped.len();
        self.settle();

        let submitted = Submitted {
            key,
            skipped: self.skipped[skipped_before..].to_vec(),
            complete: self.is_complete(),
        };
        tracing::debug!(
            question = %submitted.key,
            index = self.state.current_index,
            skipped = ?submitted.skipped,
            "answer recorded"
        );
        Ok(submitted)
    }

    pub fn is_complete(&self) -> bool {
        self.state.current_index >= self.questions.len()
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn into_answers(self) -> AnswerMap {
        self.answers
    }

    /// Keys skipped so far, in order.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    /// `(position, expected total)` for display, counting from 1.
    ///
    /// Conditional questions whose gate is still unanswered count towards
    /// the total.
    pub fn progress(&self) -> (usize, usize) {
        let asked = self.answers.len();
        let remaining = self
            .questions
            .iter()
            .skip(self.state.current_index)
            .filter(|q| match &q.condition {
                None => true,
                Some(c) => {
                    !self.answers.contains_key(&c.depends_on) || c.is_satisfied(&self.answers)
                }
            })
            .count();
        (asked + 1, asked + remaining)
    }

    /// Drive a fresh wizard with `responses` in order.
    ///
    /// Empty responses are rejected exactly as interactive ones are and do
    /// not consume a question. Stops early once the wizard completes.
    pub fn replay<I, S>(questions: Arc<QuestionSet>, responses: I) -> AnswerMap
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut wizard = Wizard::new(questions);
        for response in responses {
            if wizard.is_complete() {
                break;
            }
            match wizard.submit_answer(response.as_ref()) {
                Ok(_) | Err(WizardError::EmptyResponse) => {}
                Err(e) => tracing::warn!(error = %e, "replayed response rejected"),
            }
        }
        wizard.into_answers()
    }

    fn settle(&mut self) {
        while let Some(q) = self.questions.get(self.state.current_index) {
            if q.is_presented(&self.answers) {
                break;
            }
            tracing::debug!(question = %q.key, "skipping conditional question");
            self.skipped.push(q.key.clone());
            self.state.current_index += 1;
        }
    }
}

/// Prompt text for `question`, substituting placeholders from `answers`.
pub fn render_prompt(question: &QuestionSpec, answers: &AnswerMap) -> String {
    question.render_prompt(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> Arc<QuestionSet> {
        Arc::new(QuestionSet::builtin().unwrap())
    }

    fn current_key(wizard: &Wizard) -> Option<&str> {
        match wizard.current_question() {
            Step::Ask(q) => Some(q.key.as_str()),
            Step::Complete => None,
        }
    }

    #[test]
    fn starts_at_first_question() {
        let wizard = Wizard::new(builtin());
        assert_eq!(wizard.state().current_index(), 0);
        assert_eq!(current_key(&wizard), Some("user_name"));
        assert!(!wizard.is_complete());
    }

    #[test]
    fn second_prompt_greets_by_name() {
        let mut wizard = Wizard::new(builtin());
        wizard.submit_answer("Sam").unwrap();
        assert_eq!(
            wizard.current_prompt().as_deref(),
            Some("Nice to meet you, Sam! What's your mom's name?")
        );
    }

    #[test]
    fn empty_and_whitespace_are_rejected() {
        let mut wizard = Wizard::new(builtin());
        for response in ["", "   ", "\t\n"] {
            assert_eq!(
                wizard.submit_answer(response),
                Err(WizardError::EmptyResponse)
            );
        }
        assert_eq!(wizard.state().current_index(), 0);
        assert!(wizard.answers().is_empty());
    }

    #[test]
    fn no_sibling_skips_both_sibling_questions() {
        let mut wizard = Wizard::new(builtin());
        for r in ["Sam", "Ana", "Ben"] {
            wizard.submit_answer(r).unwrap();
        }
        let submitted = wizard.submit_answer("No").unwrap();
        assert_eq!(
            submitted.skipped,
            vec!["older_sibling".to_string(), "younger_sibling".to_string()]
        );
        assert_eq!(current_key(&wizard), Some("uncle_name"));
        assert_eq!(wizard.state().current_index(), 6);
    }

    #[test]
    fn lowercase_yes_still_skips() {
        let mut wizard = Wizard::new(builtin());
        for r in ["Sam", "Ana", "Ben", "yes"] {
            wizard.submit_answer(r).unwrap();
        }
        assert_eq!(current_key(&wizard), Some("uncle_name"));
    }

    #[test]
    fn submit_after_complete_fails() {
        let questions = Arc::new(
            QuestionSet::parse_ron(r#"[(key: "only", prompt: "One?")]"#).unwrap(),
        );
        let mut wizard = Wizard::new(questions);
        let submitted = wizard.submit_answer("yes").unwrap();
        assert!(submitted.complete);
        assert_eq!(
            wizard.submit_answer("again"),
            Err(WizardError::AlreadyComplete)
        );
        assert_eq!(wizard.current_question(), Step::Complete);
        assert_eq!(wizard.current_prompt(), None);
    }

    #[test]
    fn trailing_conditional_questions_complete_eagerly() {
        let questions = Arc::new(
            QuestionSet::parse_ron(
                r#"[
                    (key: "has_pet", prompt: "Pet?"),
                    (key: "pet_name", prompt: "Name?", when: Some((key: "has_pet", equals: "Yes"))),
                ]"#,
            )
            .unwrap(),
        );
        let mut wizard = Wizard::new(questions);
        let submitted = wizard.submit_answer("No").unwrap();
        assert!(submitted.complete);
        assert!(wizard.is_complete());
        assert_eq!(wizard.state().current_index(), 2);
    }

    #[test]
    fn progress_counts_only_presented_questions() {
        let mut wizard = Wizard::new(builtin());
        assert_eq!(wizard.progress(), (1, 10));
        for r in ["Sam", "Ana", "Ben", "No"] {
            wizard.submit_answer(r).unwrap();
        }
        assert_eq!(wizard.progress(), (5, 8));
    }

    #[test]
    fn replay_passes_over_blank_responses() {
        let answers = Wizard::replay(builtin(), ["", "  ", "Sam", "\t", "Ana"]);
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.get("user_name"), Some("Sam"));
        assert_eq!(answers.get("mother_name"), Some("Ana"));
    }
}
