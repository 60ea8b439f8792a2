//! WASM bindings for metime: drives a story session from a web page.
//!
//! Actions go in and page state comes out as JSON strings. Actions use
//! serde's externally tagged enum form:
//!
//! ```json
//! {"Login": "Student"}
//! {"Answer": "Sam"}
//! {"ChooseStory": "Tractor"}
//! "SurpriseMe"
//! {"FinishReading": {"minutes": 12}}
//! {"CreateStoryDraft": {"title": "Dragon Picnic", "genre": "Fantasy",
//!   "age_range": "FourToSix", "elements": ["CharacterNames"], "features":
//!   {"ai_writing_assistant": false, "interactive_elements": true,
//!    "educational_content": false, "multi_language": false}}}
//! ```

use std::sync::Arc;
use thiserror::Error;
use wasm_bindgen::prelude::*;

use metime::core::question::QuestionSet;
use metime::core::story::{RenderedStory, StoryLibrary};
use metime::schema::page::{Action, Page, Role};
use metime::schema::planning::Subject;
use metime::schema::story_kind::{StoryCategory, StoryKind};
use metime::{Session, SessionError};

#[derive(Debug, Error)]
enum WebError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("could not load story data: {0}")]
    Setup(String),
}

// ---------------------------------------------------------------------------
// JSON shapes sent back to the page
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct PageState {
    page: Page,
    role: Option<Role>,
    prompt: Option<String>,
    /// `[position, total]` while collecting answers.
    progress: Option<(usize, usize)>,
    story: Option<RenderedStory>,
    /// Same-page warning such as an empty answer.
    warning: Option<String>,
}

#[derive(serde::Serialize)]
struct MenuEntry {
    kind: StoryKind,
    label: &'static str,
    category: Option<StoryCategory>,
}

#[derive(serde::Serialize)]
struct SubjectEntry {
    subject: Subject,
    topic_heading: &'static str,
    topics: &'static [&'static str],
    tools: &'static [&'static str],
    scale: Option<(&'static str, &'static [&'static str])>,
}

#[derive(serde::Serialize)]
struct Summary {
    answers: Vec<(String, String)>,
    stories_read: Vec<StoryKind>,
    reading_minutes: u32,
}

// ---------------------------------------------------------------------------
// WebSession, the exported session handle
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct WebSession {
    session: Session,
}

#[wasm_bindgen]
impl WebSession {
    /// Start a session over the built-in questions and stories.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<WebSession, JsError> {
        Ok(Self::create(seed)?)
    }

    /// Apply one JSON-encoded action and return the resulting page state.
    ///
    /// An empty answer is not an error: the state comes back unchanged
    /// with `warning` set.
    pub fn apply(&mut self, action_json: &str) -> Result<String, JsError> {
        Ok(self.apply_json(action_json)?)
    }

    /// Current page state as JSON.
    pub fn state(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.page_state(None))?)
    }

    /// All dashboards as JSON.
    pub fn dashboards(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.session.dashboards())?)
    }

    /// The story menu as JSON, in menu order.
    pub fn story_menu(&self) -> Result<String, JsError> {
        let entries: Vec<MenuEntry> = StoryKind::ALL
            .iter()
            .map(|&kind| MenuEntry {
                kind,
                label: kind.label(),
                category: self.session.stories().get(kind).map(|s| s.category),
            })
            .collect();
        Ok(serde_json::to_string(&entries)?)
    }

    /// JSON array of role names accepted by `Login`.
    pub fn roles() -> String {
        serde_json::to_string(&Role::ALL).unwrap_or_else(|_| "[]".to_string())
    }

    /// JSON array of lesson-planner subjects with their topics, tools
    /// and complexity scale.
    pub fn planner_catalogue() -> String {
        let entries: Vec<SubjectEntry> = Subject::ALL
            .iter()
            .map(|&subject| SubjectEntry {
                subject,
                topic_heading: subject.topic_heading(),
                topics: subject.topics(),
                tools: subject.tools(),
                scale: subject.scale(),
            })
            .collect();
        serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// End the session and return what it collected as JSON.
    pub fn end(self) -> Result<String, JsError> {
        let summary = self.session.end();
        let summary = Summary {
            answers: summary.answers.into(),
            stories_read: summary.stories_read,
            reading_minutes: summary.reading_minutes,
        };
        Ok(serde_json::to_string(&summary)?)
    }
}

// Private helpers
impl WebSession {
    fn create(seed: u64) -> Result<WebSession, WebError> {
        let questions = QuestionSet::builtin().map_err(|e| WebError::Setup(e.to_string()))?;
        let stories = StoryLibrary::builtin().map_err(|e| WebError::Setup(e.to_string()))?;
        let session = Session::new(Arc::new(questions), Arc::new(stories)).with_seed(seed);
        Ok(WebSession { session })
    }

    fn apply_json(&mut self, action_json: &str) -> Result<String, WebError> {
        let action: Action = serde_json::from_str(action_json)?;
        let warning = match self.session.apply(action) {
            Ok(_) => None,
            Err(e) if e.is_warning() => Some(e.to_string()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::to_string(&self.page_state(warning))?)
    }

    fn page_state(&self, warning: Option<String>) -> PageState {
        let collecting = self.session.page() == Page::Collecting;
        PageState {
            page: self.session.page(),
            role: self.session.role(),
            prompt: self.session.prompt(),
            progress: collecting.then(|| self.session.wizard().progress()),
            story: self.session.current_story(),
            warning,
        }
    }
}
