//! Story library: the five personalized story templates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::core::template::{Template, TemplateError};
use crate::schema::answers::AnswerMap;
use crate::schema::story_kind::{StoryCategory, StoryKind};

/// Used when a story slot has no answer and no inline default.
pub const DEFAULT_FALLBACK: &str = "someone";

mod data {
    pub const MOSES: &str = include_str!("../../story_data/stories/moses.ron");
    pub const WIMPY_KID: &str = include_str!("../../story_data/stories/wimpy_kid.ron");
    pub const TRACTOR: &str = include_str!("../../story_data/stories/tractor.ron");
    pub const ROMEO_JULIET: &str = include_str!("../../story_data/stories/romeo_juliet.ron");
    pub const TREEHOUSE: &str = include_str!("../../story_data/stories/treehouse.ron");
}

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("story {kind:?}: {source}")]
    Template {
        kind: StoryKind,
        #[source]
        source: TemplateError,
    },
    #[error("no template loaded for story '{0}'")]
    Missing(StoryKind),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// A parsed story: title and body templates plus its reading category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryTemplate {
    pub kind: StoryKind,
    pub category: StoryCategory,
    pub title: Template,
    pub body: Template,
}

/// A story with the child's answers filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedStory {
    pub kind: StoryKind,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct RonStory {
    kind: StoryKind,
    category: StoryCategory,
    title: String,
    body: String,
}

impl StoryTemplate {
    /// Parse one story definition from a RON string.
    pub fn parse_ron(input: &str) -> Result<StoryTemplate, StoryError> {
        let raw: RonStory = ron::from_str(input)?;
        let kind = raw.kind;
        let to_err = |source: TemplateError| StoryError::Template { kind, source };
        Ok(StoryTemplate {
            kind,
            category: raw.category,
            title: Template::parse(raw.title.trim()).map_err(to_err)?,
            body: Template::parse(raw.body.trim_matches('\n')).map_err(to_err)?,
        })
    }

    pub fn load_from_ron(path: &Path) -> Result<StoryTemplate, StoryError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn render(&self, answers: &AnswerMap, fallback: &str) -> RenderedStory {
        RenderedStory {
            kind: self.kind,
            title: self.title.render(answers, fallback),
            body: self.body.render(answers, fallback),
        }
    }

    /// Every key the title and body look up.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.title.placeholders().chain(self.body.placeholders())
    }
}

/// All loaded story templates, keyed by kind.
#[derive(Debug, Clone)]
pub struct StoryLibrary {
    stories: BTreeMap<StoryKind, StoryTemplate>,
    fallback: String,
}

impl Default for StoryLibrary {
    fn default() -> Self {
        Self {
            stories: BTreeMap::new(),
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

impl StoryLibrary {
    /// The five stories shipped with the crate.
    pub fn builtin() -> Result<StoryLibrary, StoryError> {
        let mut library = StoryLibrary::default();
        for source in [
            data::MOSES,
            data::WIMPY_KID,
            data::TRACTOR,
            data::ROMEO_JULIET,
            data::TREEHOUSE,
        ] {
            library.insert(StoryTemplate::parse_ron(source)?);
        }
        Ok(library)
    }

    /// Load every `.ron` file in `dir`, replacing stories of the same kind.
    pub fn load_from_dir(&mut self, dir: &Path) -> Result<usize, StoryError> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("ron"))
            .collect();
        paths.sort();

        for path in &paths {
            let story = StoryTemplate::load_from_ron(path)?;
            tracing::debug!(story = ?story.kind, path = %path.display(), "loaded story template");
            self.insert(story);
        }
        Ok(paths.len())
    }

    pub fn insert(&mut self, story: StoryTemplate) {
        self.stories.insert(story.kind, story);
    }

    /// Merge another library into this one. Stories from `other`
    /// override stories of the same kind.
    pub fn merge(&mut self, other: StoryLibrary) {
        self.stories.extend(other.stories);
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn get(&self, kind: StoryKind) -> Option<&StoryTemplate> {
        self.stories.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoryTemplate> {
        self.stories.values()
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Render `kind` with `answers`, using the library fallback for
    /// unanswered slots without an inline default.
    pub fn render(&self, kind: StoryKind, answers: &AnswerMap) -> Result<RenderedStory, StoryError> {
        let story = self.get(kind).ok_or(StoryError::Missing(kind))?;
        Ok(story.render(answers, &self.fallback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sam_answers() -> AnswerMap {
        AnswerMap::from(
            [
                ("user_name", "Sam"),
                ("mother_name", "Ana"),
                ("father_name", "Ben"),
                ("has_sibling", "No"),
                ("uncle_name", "Joe"),
                ("grandparent_name", "Nana Rose"),
                ("friend_home", "Lee"),
                ("villain_name", "Max"),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn builtin_has_every_story() {
        let library = StoryLibrary::builtin().unwrap();
        assert_eq!(library.len(), StoryKind::ALL.len());
        for kind in StoryKind::ALL {
            assert_eq!(library.get(kind).unwrap().kind, kind);
        }
    }

    #[test]
    fn romeo_and_juliet_renders_its_own_story() {
        let library = StoryLibrary::builtin().unwrap();
        let story = library.render(StoryKind::RomeoJuliet, &sam_answers()).unwrap();
        assert_eq!(story.title, "The Tale of Sam & Lee");
        assert!(story.body.contains("Verona"));
    }

    #[test]
    fn title_defaults_apply_without_answers() {
        let library = StoryLibrary::builtin().unwrap();
        let story = library.render(StoryKind::Moses, &AnswerMap::new()).unwrap();
        assert_eq!(story.title, "Moses & The Tyranny of Pharaoh Pharaoh");
        let diary = library.render(StoryKind::WimpyKid, &AnswerMap::new()).unwrap();
        assert_eq!(diary.title, "Diary of Greg");
    }

    #[test]
    fn skipped_siblings_use_defaults_not_raw_tokens() {
        let library = StoryLibrary::builtin().unwrap();
        for kind in StoryKind::ALL {
            let story = library.render(kind, &sam_answers()).unwrap();
            assert!(!story.body.contains('{'), "{kind:?} left a raw slot");
            assert!(!story.body.contains("None"));
        }
        let moses = library.render(StoryKind::Moses, &sam_answers()).unwrap();
        assert!(moses.body.contains("the support of Aaron"));
    }

    #[test]
    fn library_fallback_fills_missing_answers() {
        let library = StoryLibrary::builtin().unwrap().with_fallback("a mystery guest");
        let story = library.render(StoryKind::Tractor, &AnswerMap::new()).unwrap();
        assert_eq!(story.title, "a mystery guest & The Time-Travelling Tractor");
    }

    #[test]
    fn body_is_trimmed_of_surrounding_newlines() {
        let library = StoryLibrary::builtin().unwrap();
        let story = library.render(StoryKind::Treehouse, &sam_answers()).unwrap();
        assert!(story.body.starts_with("Sam had always known"));
        assert!(story.body.ends_with("The End"));
    }

    #[test]
    fn missing_story_is_an_error() {
        let library = StoryLibrary::default();
        assert!(matches!(
            library.render(StoryKind::Moses, &AnswerMap::new()),
            Err(StoryError::Missing(StoryKind::Moses))
        ));
    }

    #[test]
    fn merge_overrides_same_kind() {
        let mut library = StoryLibrary::builtin().unwrap();
        let mut custom = StoryLibrary::default();
        custom.insert(
            StoryTemplate::parse_ron(
                r#"(kind: Moses, category: Historical, title: "Short", body: "Hi {user_name}.")"#,
            )
            .unwrap(),
        );
        library.merge(custom);
        let story = library.render(StoryKind::Moses, &sam_answers()).unwrap();
        assert_eq!(story.title, "Short");
        assert_eq!(story.body, "Hi Sam.");
        assert_eq!(library.len(), 5);
    }

    #[test]
    fn load_overrides_from_fixture_dir() {
        let mut library = StoryLibrary::builtin().unwrap();
        let loaded = library
            .load_from_dir(Path::new("tests/fixtures/stories"))
            .unwrap();
        assert_eq!(loaded, 1);
        let story = library.render(StoryKind::Treehouse, &sam_answers()).unwrap();
        assert_eq!(story.title, "Sam's Short Treehouse Tale");
    }
}
