use serde::{Deserialize, Serialize};
use std::fmt;

use super::dashboard::ReadingPreferences;
use super::planning::{LessonPlanRequest, StoryDraft};
use super::story_kind::StoryKind;

/// Who logged in on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Teacher,
    Student,
    Parent,
    Author,
}

impl Role {
    pub const ALL: [Role; 4] = [Self::Teacher, Self::Student, Self::Parent, Self::Author];

    pub fn parse(input: &str) -> Option<Role> {
        match input.trim().to_lowercase().as_str() {
            "teacher" => Some(Self::Teacher),
            "student" | "child" => Some(Self::Student),
            "parent" => Some(Self::Parent),
            "author" => Some(Self::Author),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Parent => "parent",
            Self::Author => "author",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DashboardKind {
    Teacher,
    Parent,
    Child,
    Author,
}

/// Every screen a session can be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    Landing,
    Collecting,
    SelectingStory,
    ReadingStory(StoryKind),
    Dashboard(DashboardKind),
    Plans,
    LessonPlanner,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Landing => f.write_str("landing"),
            Self::Collecting => f.write_str("collecting"),
            Self::SelectingStory => f.write_str("selecting story"),
            Self::ReadingStory(kind) => write!(f, "reading '{kind}'"),
            Self::Dashboard(kind) => write!(f, "{kind:?} dashboard"),
            Self::Plans => f.write_str("subscription plans"),
            Self::LessonPlanner => f.write_str("lesson planner"),
        }
    }
}

/// A user interaction. `Session::apply` is the only consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Login(Role),
    Answer(String),
    ChooseStory(StoryKind),
    SurpriseMe,
    FinishReading { minutes: u32 },
    OpenDashboard(DashboardKind),
    StartNewStory,
    SavePreferences(ReadingPreferences),
    ViewPlans,
    OpenLessonPlanner,
    GenerateLessonPlan(LessonPlanRequest),
    CreateStoryDraft(StoryDraft),
    Back,
    Logout,
}

impl Action {
    /// Short name for logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Answer(_) => "answer",
            Self::ChooseStory(_) => "choose_story",
            Self::SurpriseMe => "surprise_me",
            Self::FinishReading { .. } => "finish_reading",
            Self::OpenDashboard(_) => "open_dashboard",
            Self::StartNewStory => "start_new_story",
            Self::SavePreferences(_) => "save_preferences",
            Self::ViewPlans => "view_plans",
            Self::OpenLessonPlanner => "open_lesson_planner",
            Self::GenerateLessonPlan(_) => "generate_lesson_plan",
            Self::CreateStoryDraft(_) => "create_story_draft",
            Self::Back => "back",
            Self::Logout => "logout",
        }
    }
}
