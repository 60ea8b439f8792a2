//! Content checks run over a question set and a story library together.

use rustc_hash::FxHashMap;
use std::fmt;

use crate::core::question::QuestionSet;
use crate::core::story::StoryLibrary;
use crate::core::template::{Segment, Template};
use crate::schema::story_kind::StoryKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("WARNING"),
            Self::Error => f.write_str("ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    pub findings: Vec<Finding>,
}

impl LintReport {
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    fn push(&mut self, severity: Severity, message: String) {
        self.findings.push(Finding { severity, message });
    }
}

/// Lint `stories` against the answers `questions` can collect.
///
/// - a story kind with no template is an error
/// - a slot no question collects is a warning, unless it has an inline default
/// - a slot bound to a conditional question with no inline default is a
///   warning, since the library fallback will show instead
pub fn lint(questions: &QuestionSet, stories: &StoryLibrary) -> LintReport {
    let mut report = LintReport::default();

    let conditional: FxHashMap<&str, bool> = questions
        .iter()
        .map(|q| (q.key.as_str(), q.condition.is_some()))
        .collect();

    for kind in StoryKind::ALL {
        if stories.get(kind).is_none() {
            report.push(Severity::Error, format!("no story template for '{kind}'"));
        }
    }

    for story in stories.iter() {
        for (part, template) in [("title", &story.title), ("body", &story.body)] {
            for (key, default) in slots(template) {
                match (conditional.get(key), default) {
                    (None, None) => report.push(
                        Severity::Warning,
                        format!(
                            "'{}' {part} uses '{{{key}}}', which no question collects",
                            story.kind
                        ),
                    ),
                    (Some(true), None) => report.push(
                        Severity::Warning,
                        format!(
                            "'{}' {part} uses conditional '{{{key}}}' without a default",
                            story.kind
                        ),
                    ),
                    _ => {}
                }
            }
        }
    }

    tracing::debug!(
        findings = report.findings.len(),
        errors = report.errors().count(),
        "lint finished"
    );
    report
}

fn slots(template: &Template) -> impl Iterator<Item = (&str, Option<&str>)> {
    template.segments.iter().filter_map(|segment| match segment {
        Segment::Slot { key, default } => Some((key.as_str(), default.as_deref())),
        Segment::Literal(_) => None,
    })
}
