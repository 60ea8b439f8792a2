//! Session state machine: one child's (or adult's) visit, from landing
//! page to dashboards.
//!
//! A `Session` owns its wizard, answers and dashboards. It is created at
//! session start with `Session::new`, driven only through `apply`, and
//! torn down with `end` (or by dropping it). Question and story data are
//! immutable and shared.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use crate::core::question::QuestionSet;
use crate::core::story::{RenderedStory, StoryError, StoryLibrary};
use crate::core::wizard::{Wizard, WizardError};
use crate::schema::answers::AnswerMap;
use crate::schema::dashboard::{AchievementKind, Dashboards, BOOKWORM_MINUTES};
use crate::schema::page::{Action, DashboardKind, Page, Role};
use crate::schema::planning::{DraftError, LessonPlanError};
use crate::schema::story_kind::StoryKind;

/// Finishing the same story this many times makes it a favorite.
const FAVORITE_AFTER_READS: u32 = 2;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Story(#[from] StoryError),
    #[error(transparent)]
    LessonPlan(#[from] LessonPlanError),
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error("cannot {action} while on the {page} page")]
    InvalidTransition { page: Page, action: &'static str },
}

impl SessionError {
    /// Non-fatal input problems to show next to the current question
    /// or form.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::Wizard(WizardError::EmptyResponse) | Self::LessonPlan(_) | Self::Draft(_)
        )
    }
}

/// What a session leaves behind when it ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub answers: AnswerMap,
    pub stories_read: Vec<StoryKind>,
    pub reading_minutes: u32,
}

#[derive(Debug, Clone)]
pub struct Session {
    page: Page,
    role: Option<Role>,
    wizard: Wizard,
    stories: Arc<StoryLibrary>,
    story_choice: Option<StoryKind>,
    reads: BTreeMap<StoryKind, u32>,
    dashboards: Dashboards,
    rng: StdRng,
}

impl Session {
    pub fn new(questions: Arc<QuestionSet>, stories: Arc<StoryLibrary>) -> Self {
        tracing::info!(questions = questions.len(), stories = stories.len(), "session started");
        Self {
            page: Page::Landing,
            role: None,
            wizard: Wizard::new(questions),
            stories,
            story_choice: None,
            reads: BTreeMap::new(),
            dashboards: Dashboards::sample(),
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Seed for the "surprise me" story pick.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Apply one user action and return the page it leads to.
    ///
    /// On error the session is unchanged.
    pub fn apply(&mut self, action: Action) -> Result<Page, SessionError> {
        let from = self.page;
        let to = match (from, action) {
            (_, Action::Logout) => {
                self.role = None;
                Page::Landing
            }

            (Page::Landing, Action::Login(role)) => {
                self.role = Some(role);
                match role {
                    Role::Teacher => Page::Dashboard(DashboardKind::Teacher),
                    Role::Parent => Page::Dashboard(DashboardKind::Parent),
                    Role::Author => Page::Dashboard(DashboardKind::Author),
                    Role::Student => self.story_entry_page(),
                }
            }

            (Page::Collecting, Action::Answer(response)) => {
                let submitted = self.wizard.submit_answer(&response).map_err(|e| {
                    tracing::warn!(error = %e, "answer rejected");
                    e
                })?;
                if submitted.complete {
                    tracing::info!(answers = self.wizard.answers().len(), "question wizard complete");
                    Page::SelectingStory
                } else {
                    Page::Collecting
                }
            }

            (Page::SelectingStory, Action::ChooseStory(kind)) => self.begin_reading(kind)?,
            (Page::SelectingStory, Action::SurpriseMe) => {
                let kind = StoryKind::pick(&mut self.rng);
                self.begin_reading(kind)?
            }
            (Page::SelectingStory, Action::OpenDashboard(DashboardKind::Child)) => {
                Page::Dashboard(DashboardKind::Child)
            }

            (Page::ReadingStory(kind), Action::FinishReading { minutes }) => {
                self.record_reading(kind, minutes);
                Page::SelectingStory
            }
            (Page::ReadingStory(_), Action::Back) => Page::SelectingStory,

            (Page::Dashboard(DashboardKind::Child), Action::StartNewStory) => {
                self.story_entry_page()
            }

            (Page::Dashboard(DashboardKind::Parent), Action::SavePreferences(prefs)) => {
                self.dashboards.parent.preferences = prefs;
                tracing::info!(?prefs, "reading preferences saved");
                Page::Dashboard(DashboardKind::Parent)
            }
            (Page::Dashboard(DashboardKind::Parent), Action::ViewPlans) => Page::Plans,
            (Page::Plans, Action::Back) => Page::Dashboard(DashboardKind::Parent),

            (Page::Dashboard(DashboardKind::Teacher), Action::OpenLessonPlanner) => {
                Page::LessonPlanner
            }
            (Page::LessonPlanner, Action::GenerateLessonPlan(request)) => {
                let teacher = &mut self.dashboards.teacher;
                request.validate(&teacher.classes).map_err(|e| {
                    tracing::warn!(error = %e, "lesson plan rejected");
                    e
                })?;
                tracing::info!(
                    subject = %request.subject,
                    key_stage = %request.key_stage,
                    class = %request.class,
                    "lesson plan generated"
                );
                teacher.lesson_plans.push(request);
                Page::LessonPlanner
            }
            (Page::LessonPlanner, Action::Back) => Page::Dashboard(DashboardKind::Teacher),

            (Page::Dashboard(DashboardKind::Author), Action::CreateStoryDraft(draft)) => {
                draft.validate().map_err(|e| {
                    tracing::warn!(error = %e, "story draft rejected");
                    e
                })?;
                tracing::info!(title = %draft.title, genre = %draft.genre, "story draft created");
                self.dashboards.author.drafts.push(draft);
                Page::Dashboard(DashboardKind::Author)
            }

            (page, action) => {
                return Err(SessionError::InvalidTransition {
                    page,
                    action: action.name(),
                })
            }
        };

        if from != to {
            tracing::debug!(%from, %to, "page transition");
        }
        self.page = to;
        Ok(to)
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn answers(&self) -> &AnswerMap {
        self.wizard.answers()
    }

    pub fn dashboards(&self) -> &Dashboards {
        &self.dashboards
    }

    pub fn stories(&self) -> &StoryLibrary {
        &self.stories
    }

    pub fn story_choice(&self) -> Option<StoryKind> {
        self.story_choice
    }

    /// The wizard prompt while collecting answers.
    pub fn prompt(&self) -> Option<String> {
        match self.page {
            Page::Collecting => self.wizard.current_prompt(),
            _ => None,
        }
    }

    /// The personalized story while reading.
    pub fn current_story(&self) -> Option<RenderedStory> {
        match self.page {
            Page::ReadingStory(kind) => self.stories.render(kind, self.wizard.answers()).ok(),
            _ => None,
        }
    }

    /// End the session, keeping only what was collected and read.
    pub fn end(self) -> SessionSummary {
        let summary = SessionSummary {
            answers: self.wizard.into_answers(),
            stories_read: self.dashboards.parent.completed_stories,
            reading_minutes: self.dashboards.parent.reading_minutes,
        };
        tracing::info!(
            answers = summary.answers.len(),
            stories = summary.stories_read.len(),
            minutes = summary.reading_minutes,
            "session ended"
        );
        summary
    }

    fn story_entry_page(&self) -> Page {
        if self.wizard.is_complete() {
            Page::SelectingStory
        } else {
            Page::Collecting
        }
    }

    fn begin_reading(&mut self, kind: StoryKind) -> Result<Page, SessionError> {
        if self.stories.get(kind).is_none() {
            return Err(StoryError::Missing(kind).into());
        }
        self.story_choice = Some(kind);
        tracing::info!(story = %kind, "story selected");
        Ok(Page::ReadingStory(kind))
    }

    fn record_reading(&mut self, kind: StoryKind, minutes: u32) {
        let parent = &mut self.dashboards.parent;
        parent.reading_minutes = parent.reading_minutes.saturating_add(minutes);
        if !parent.completed_stories.contains(&kind) {
            parent.completed_stories.push(kind);
        }

        let reads = self.reads.entry(kind).or_insert(0);
        *reads += 1;

        let child = &mut self.dashboards.child;
        if let Some(story) = self.stories.get(kind) {
            *child.stories_by_category.entry(story.category).or_insert(0) += 1;
        }
        child.weekly_minutes[6] = child.weekly_minutes[6].saturating_add(minutes);
        child.current_streak_days = child.current_streak_days.max(1);
        if *reads >= FAVORITE_AFTER_READS && !child.favorite_stories.contains(&kind) {
            child.favorite_stories.push(kind);
        }

        let total_minutes = parent.reading_minutes;
        let distinct = parent.completed_stories.len();
        let stories_read = child.stories_read();
        for achievement in &mut child.achievements {
            let earned = match achievement.kind {
                AchievementKind::FirstStory => stories_read >= 1,
                AchievementKind::Bookworm => total_minutes >= BOOKWORM_MINUTES,
                AchievementKind::StoryExplorer => distinct >= StoryKind::ALL.len(),
            };
            if earned && !achievement.earned {
                tracing::info!(achievement = %achievement.title, "achievement earned");
            }
            achievement.earned |= earned;
        }

        tracing::info!(story = %kind, minutes, total_minutes, "reading recorded");
    }
}
