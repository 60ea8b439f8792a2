//! Application configuration, read from a RON file.
//!
//! Every field is optional in the file; missing fields take their
//! defaults.
//!
//! ```ron
//! (
//!     questions_path: Some("my_questions.ron"),
//!     stories_dir: Some("my_stories/"),
//!     missing_answer_fallback: "a friend",
//!     seed: Some(7),
//!     log_filter: Some("warn,metime=info"),
//! )
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::question::{QuestionError, QuestionSet};
use crate::core::story::{StoryError, StoryLibrary, DEFAULT_FALLBACK};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error(transparent)]
    Questions(#[from] QuestionError),
    #[error(transparent)]
    Stories(#[from] StoryError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Question file replacing the built-in flow.
    pub questions_path: Option<PathBuf>,
    /// Directory of story `.ron` files overriding built-in stories.
    pub stories_dir: Option<PathBuf>,
    /// Shown for story slots with no answer and no inline default.
    pub missing_answer_fallback: String,
    /// Seed for the "surprise me" pick. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            questions_path: None,
            stories_dir: None,
            missing_answer_fallback: DEFAULT_FALLBACK.to_string(),
            seed: None,
            log_filter: None,
        }
    }
}

impl AppConfig {
    pub fn parse_ron(input: &str) -> Result<AppConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse_ron(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// The configured question file, or the built-in flow.
    pub fn question_set(&self) -> Result<QuestionSet, ConfigError> {
        let questions = match &self.questions_path {
            Some(path) => QuestionSet::load_from_ron(path)?,
            None => QuestionSet::builtin()?,
        };
        Ok(questions)
    }

    /// Built-in stories, overridden by `stories_dir` if set.
    pub fn story_library(&self) -> Result<StoryLibrary, ConfigError> {
        let mut library =
            StoryLibrary::builtin()?.with_fallback(self.missing_answer_fallback.as_str());
        if let Some(dir) = &self.stories_dir {
            let loaded = library.load_from_dir(dir)?;
            tracing::info!(dir = %dir.display(), loaded, "loaded story overrides");
        }
        Ok(library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::answers::AnswerMap;
    use crate::schema::story_kind::StoryKind;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(AppConfig::parse_ron("()").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::parse_ron(r#"(seed: Some(7), missing_answer_fallback: "a friend")"#)
            .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.missing_answer_fallback, "a friend");
        assert_eq!(config.questions_path, None);
    }

    #[test]
    fn unknown_field_is_an_error() {
        assert!(matches!(
            AppConfig::parse_ron("(colour: true)"),
            Err(ConfigError::Ron(_))
        ));
    }

    #[test]
    fn fallback_flows_into_library() {
        let config = AppConfig {
            missing_answer_fallback: "a friend".to_string(),
            ..AppConfig::default()
        };
        let library = config.story_library().unwrap();
        let story = library.render(StoryKind::Tractor, &AnswerMap::new()).unwrap();
        assert_eq!(story.title, "a friend & The Time-Travelling Tractor");
    }

    #[test]
    fn fixture_paths_load() {
        let config = AppConfig {
            questions_path: Some("tests/fixtures/pet_questions.ron".into()),
            stories_dir: Some("tests/fixtures/stories".into()),
            ..AppConfig::default()
        };
        assert_eq!(config.question_set().unwrap().len(), 4);
        assert_eq!(config.story_library().unwrap().len(), 5);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::load(Path::new("tests/fixtures/nope.ron")).unwrap_err();
        assert!(err.to_string().contains("nope.ron"));
    }
}
