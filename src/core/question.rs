//! Question sets: the ordered prompts the wizard walks through.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::template::{Template, TemplateError};
use crate::schema::answers::AnswerMap;

const BUILTIN_QUESTIONS: &str = include_str!("../../story_data/questions.ron");

#[derive(Debug, Error)]
pub enum QuestionError {
    #[error("question '{key}': {source}")]
    Prompt {
        key: String,
        #[source]
        source: TemplateError,
    },
    #[error("invalid question key '{0}'")]
    InvalidKey(String),
    #[error("duplicate question key '{0}'")]
    DuplicateKey(String),
    #[error("question '{key}' is gated on '{depends_on}', which is not asked before it")]
    ForwardCondition { key: String, depends_on: String },
    #[error("question '{key}' prompt uses '{placeholder}', which is not asked before it")]
    ForwardPlaceholder { key: String, placeholder: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Gate on a previous answer: the question is asked only when
/// `answers[depends_on]` is exactly `equals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub depends_on: String,
    pub equals: String,
}

impl Condition {
    /// Case-sensitive comparison; an unanswered key never matches.
    pub fn is_satisfied(&self, answers: &AnswerMap) -> bool {
        answers.get(&self.depends_on) == Some(self.equals.as_str())
    }
}

/// One wizard question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub key: String,
    pub prompt: Template,
    pub condition: Option<Condition>,
}

impl QuestionSpec {
    /// Whether the wizard should present this question given `answers`.
    pub fn is_presented(&self, answers: &AnswerMap) -> bool {
        self.condition
            .as_ref()
            .map_or(true, |c| c.is_satisfied(answers))
    }

    /// Prompt text with placeholders filled from `answers`.
    pub fn render_prompt(&self, answers: &AnswerMap) -> String {
        self.prompt.render(answers, "")
    }
}

/// An ordered, validated list of questions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct QuestionSet {
    questions: Vec<QuestionSpec>,
}

// RON shape of a question file: a list of `(key:, prompt:, when:)` records.

#[derive(Debug, Deserialize)]
struct RonCondition {
    key: String,
    equals: String,
}

#[derive(Debug, Deserialize)]
struct RonQuestion {
    key: String,
    prompt: String,
    #[serde(default)]
    when: Option<RonCondition>,
}

impl QuestionSet {
    /// The question flow shipped with the crate.
    pub fn builtin() -> Result<QuestionSet, QuestionError> {
        Self::parse_ron(BUILTIN_QUESTIONS)
    }

    /// Load a question set from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<QuestionSet, QuestionError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a question set from a RON string.
    pub fn parse_ron(input: &str) -> Result<QuestionSet, QuestionError> {
        let raw: Vec<RonQuestion> = ron::from_str(input)?;
        let mut questions = Vec::with_capacity(raw.len());
        for q in raw {
            let prompt = Template::parse(&q.prompt).map_err(|source| QuestionError::Prompt {
                key: q.key.clone(),
                source,
            })?;
            questions.push(QuestionSpec {
                key: q.key,
                prompt,
                condition: q.when.map(|c| Condition {
                    depends_on: c.key,
                    equals: c.equals,
                }),
            });
        }
        Self::new(questions)
    }

    /// Validate and wrap an ordered list of questions.
    ///
    /// Conditions and prompt placeholders may only refer to keys asked
    /// earlier in the list.
    pub fn new(questions: Vec<QuestionSpec>) -> Result<QuestionSet, QuestionError> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for q in &questions {
            let valid = !q.key.is_empty()
                && q.key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !valid {
                return Err(QuestionError::InvalidKey(q.key.clone()));
            }
            if seen.contains(q.key.as_str()) {
                return Err(QuestionError::DuplicateKey(q.key.clone()));
            }
            if let Some(cond) = &q.condition {
                if !seen.contains(cond.depends_on.as_str()) {
                    return Err(QuestionError::ForwardCondition {
                        key: q.key.clone(),
                        depends_on: cond.depends_on.clone(),
                    });
                }
            }
            if let Some(placeholder) = q.prompt.placeholders().find(|p| !seen.contains(p)) {
                return Err(QuestionError::ForwardPlaceholder {
                    key: q.key.clone(),
                    placeholder: placeholder.to_string(),
                });
            }
            seen.insert(q.key.as_str());
        }
        Ok(QuestionSet { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionSpec> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionSpec> {
        self.questions.iter()
    }

    pub fn find(&self, key: &str) -> Option<&QuestionSpec> {
        self.questions.iter().find(|q| q.key == key)
    }
}
