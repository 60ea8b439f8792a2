//! Dashboard records. Everything here is sample data; nothing is measured
//! except what a session records through `FinishReading`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::planning::{LessonPlanRequest, StoryDraft};
use super::story_kind::{StoryCategory, StoryKind};

/// Reading minutes needed for the Bookworm achievement.
pub const BOOKWORM_MINUTES: u32 = 30;

pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

// ---------------------------------------------------------------------------
// Teacher
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub name: String,
    pub reading_minutes: u32,
    pub stories_completed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    pub total_reading_minutes: u32,
    pub total_stories_completed: u32,
    pub average_reading_minutes: u32,
}

impl ClassStats {
    pub fn from_students(students: &[StudentSummary]) -> Self {
        let total_reading_minutes: u32 = students.iter().map(|s| s.reading_minutes).sum();
        let total_stories_completed = students.iter().map(|s| s.stories_completed).sum();
        let average_reading_minutes = match students.len() as u32 {
            0 => 0,
            n => total_reading_minutes / n,
        };
        Self {
            total_reading_minutes,
            total_stories_completed,
            average_reading_minutes,
        }
    }
}

/// Follow-up suggested for a student from their accuracy score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    ReduceDifficulty,
    MixedExercises,
    MoreChallenging,
}

impl Recommendation {
    /// Accuracy below 60 eases off, 60..80 mixes, 80 and above pushes on.
    pub fn for_accuracy(accuracy: u8) -> Self {
        match accuracy {
            0..=59 => Self::ReduceDifficulty,
            60..=79 => Self::MixedExercises,
            _ => Self::MoreChallenging,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::ReduceDifficulty => "Reduce difficulty, add extra practice.",
            Self::MixedExercises => "Assign more mixed exercises.",
            Self::MoreChallenging => "Move to more challenging tasks.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProgress {
    pub name: String,
    /// Percent, 0..=100.
    pub completion: u8,
    /// Percent, 0..=100.
    pub accuracy: u8,
    pub current_task: String,
}

impl StudentProgress {
    pub fn recommendation(&self) -> Recommendation {
        Recommendation::for_accuracy(self.accuracy)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassGroup {
    pub name: String,
    pub students: u32,
    pub average_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherDashboard {
    pub students: Vec<StudentSummary>,
    pub class_stats: ClassStats,
    pub recommendations: BTreeMap<String, Vec<StoryKind>>,
    pub progress: Vec<StudentProgress>,
    pub classes: Vec<ClassGroup>,
    pub resource_categories: Vec<String>,
    /// Accepted lesson plans, oldest first.
    pub lesson_plans: Vec<LessonPlanRequest>,
}

impl TeacherDashboard {
    pub fn sample() -> Self {
        let students = vec![
            student("Alice", 120, 5),
            student("Bob", 90, 3),
            student("Charlie", 150, 7),
        ];
        let class_stats = ClassStats::from_students(&students);
        let recommendations = BTreeMap::from([
            (
                "Alice".to_string(),
                vec![StoryKind::Tractor, StoryKind::RomeoJuliet],
            ),
            (
                "Bob".to_string(),
                vec![StoryKind::Moses, StoryKind::WimpyKid],
            ),
            (
                "Charlie".to_string(),
                vec![StoryKind::Treehouse, StoryKind::Tractor],
            ),
        ]);
        let progress = vec![
            student_progress("Alice", 90, 85, "Comprehension Practice"),
            student_progress("Bob", 65, 70, "Word Problems"),
            student_progress("Charlie", 40, 50, "Basic Addition"),
        ];
        let classes = vec![
            class_group("Class 7A", 25, "Intermediate"),
            class_group("Class 8B", 28, "Advanced"),
            class_group("Class 9C", 22, "Basic"),
        ];
        let resource_categories = ["Lesson Plans", "Interactive Materials", "Assessments", "Visual Aids"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        Self {
            students,
            class_stats,
            recommendations,
            progress,
            classes,
            resource_categories,
            lesson_plans: Vec::new(),
        }
    }
}

fn student(name: &str, reading_minutes: u32, stories_completed: u32) -> StudentSummary {
    StudentSummary {
        name: name.to_string(),
        reading_minutes,
        stories_completed,
    }
}

fn student_progress(name: &str, completion: u8, accuracy: u8, task: &str) -> StudentProgress {
    StudentProgress {
        name: name.to_string(),
        completion,
        accuracy,
        current_task: task.to_string(),
    }
}

fn class_group(name: &str, students: u32, level: &str) -> ClassGroup {
    ClassGroup {
        name: name.to_string(),
        students,
        average_level: level.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReadingLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ReadingLevel {
    pub const ALL: [ReadingLevel; 4] = [
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
        Self::Expert,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }

    pub fn parse(input: &str) -> Option<ReadingLevel> {
        let input = input.trim();
        Self::ALL.into_iter().find(|l| l.label().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingPreferences {
    pub level: ReadingLevel,
    pub educational: bool,
    pub bedtime_mode: bool,
    pub sound_effects: bool,
    pub read_aloud: bool,
}

impl Default for ReadingPreferences {
    fn default() -> Self {
        Self {
            level: ReadingLevel::Advanced,
            educational: true,
            bedtime_mode: false,
            sound_effects: true,
            read_aloud: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    pub plan: String,
    pub next_billing: String,
    pub remaining_tokens: u32,
    pub books_printed: u32,
    pub books_allowance: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentDashboard {
    pub child_name: String,
    pub reading_minutes: u32,
    /// Each story appears once, in first-completion order.
    pub completed_stories: Vec<StoryKind>,
    pub preferences: ReadingPreferences,
    pub weekly_minutes: [u32; 7],
    pub subscription: SubscriptionStatus,
}

impl ParentDashboard {
    pub fn sample() -> Self {
        Self {
            child_name: "Default".to_string(),
            reading_minutes: 0,
            completed_stories: Vec::new(),
            preferences: ReadingPreferences::default(),
            weekly_minutes: [30, 45, 20, 60, 30, 45, 15],
            subscription: SubscriptionStatus {
                plan: "Premium".to_string(),
                next_billing: "March 23, 2024".to_string(),
                remaining_tokens: 85,
                books_printed: 3,
                books_allowance: Some(6),
            },
        }
    }

    /// Most recent completions first, at most `n`.
    pub fn recent_stories(&self, n: usize) -> impl Iterator<Item = &StoryKind> {
        self.completed_stories.iter().rev().take(n)
    }
}

// ---------------------------------------------------------------------------
// Child
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementKind {
    FirstStory,
    Bookworm,
    StoryExplorer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub kind: AchievementKind,
    pub title: String,
    pub description: String,
    pub earned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildDashboard {
    pub achievements: Vec<Achievement>,
    pub favorite_stories: Vec<StoryKind>,
    /// Last seven days, today last.
    pub weekly_minutes: [u32; 7],
    pub stories_by_category: BTreeMap<StoryCategory, u32>,
    pub current_streak_days: u32,
}

impl ChildDashboard {
    pub fn sample() -> Self {
        let achievements = vec![
            achievement(
                AchievementKind::FirstStory,
                "First Story",
                "Completed your first story",
            ),
            achievement(AchievementKind::Bookworm, "Bookworm", "Read for 30 minutes"),
            achievement(
                AchievementKind::StoryExplorer,
                "Story Explorer",
                "Try all story types",
            ),
        ];
        Self {
            achievements,
            favorite_stories: Vec::new(),
            weekly_minutes: [0; 7],
            stories_by_category: StoryCategory::ALL.iter().map(|&c| (c, 0)).collect(),
            current_streak_days: 0,
        }
    }

    pub fn stories_read(&self) -> u32 {
        self.stories_by_category.values().sum()
    }

    pub fn is_earned(&self, kind: AchievementKind) -> bool {
        self.achievements
            .iter()
            .any(|a| a.kind == kind && a.earned)
    }
}

fn achievement(kind: AchievementKind, title: &str, description: &str) -> Achievement {
    Achievement {
        kind,
        title: title.to_string(),
        description: description.to_string(),
        earned: false,
    }
}

// ---------------------------------------------------------------------------
// Author
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoredStory {
    pub title: String,
    pub reads: u32,
    pub rating: f32,
    pub revenue_pence: u64,
}

impl AuthoredStory {
    /// Rating as a percentage of five stars.
    pub fn rating_percent(&self) -> u8 {
        (self.rating / 5.0 * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseTerm {
    pub license: String,
    pub revenue_share_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorPortal {
    pub total_reads: String,
    pub active_licenses: u32,
    pub revenue_this_month_pence: u64,
    pub stories: Vec<AuthoredStory>,
    pub license_terms: Vec<LicenseTerm>,
    pub monthly_revenue: Vec<(String, u64)>,
    /// Stories started from the portal, oldest first.
    pub drafts: Vec<StoryDraft>,
}

impl AuthorPortal {
    pub fn sample() -> Self {
        let stories = vec![
            authored("The Magic Garden", 5200, 4.8, 850_00),
            authored("Space Adventures", 3800, 4.6, 620_00),
            authored("Math with Dragons", 3500, 4.7, 580_00),
        ];
        let license_terms = vec![
            license("School License", 60),
            license("Individual License", 70),
            license("Bulk Purchase", 65),
        ];
        let monthly_revenue = [("Jan", 1200), ("Feb", 1500), ("Mar", 1800), ("Apr", 2200), ("May", 2450)]
            .iter()
            .map(|(m, pounds)| (m.to_string(), pounds * 100))
            .collect();
        Self {
            total_reads: "12.5K".to_string(),
            active_licenses: 45,
            revenue_this_month_pence: 2450_00,
            stories,
            license_terms,
            monthly_revenue,
            drafts: Vec::new(),
        }
    }
}

fn authored(title: &str, reads: u32, rating: f32, revenue_pence: u64) -> AuthoredStory {
    AuthoredStory {
        title: title.to_string(),
        reads,
        rating,
        revenue_pence,
    }
}

fn license(name: &str, share: u8) -> LicenseTerm {
    LicenseTerm {
        license: name.to_string(),
        revenue_share_percent: share,
    }
}

/// `£1,234.56`-style formatting for pence amounts.
pub fn format_pounds(pence: u64) -> String {
    let pounds = (pence / 100).to_string();
    let mut grouped = String::new();
    for (i, c) in pounds.chars().enumerate() {
        if i > 0 && (pounds.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    match pence % 100 {
        0 => format!("£{grouped}"),
        p => format!("£{grouped}.{p:02}"),
    }
}

// ---------------------------------------------------------------------------
// Subscription plans
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub name: String,
    pub price_pence_per_month: u64,
    /// Printed books per month; `None` is unlimited.
    pub books_per_month: Option<u32>,
    pub tokens: u32,
    pub features: Vec<String>,
}

impl SubscriptionPlan {
    pub fn catalogue() -> Vec<SubscriptionPlan> {
        vec![
            plan(
                "Basic",
                9_99,
                Some(3),
                50,
                &[
                    "3 printed books/month",
                    "50 customization tokens",
                    "Basic story templates",
                    "Digital reading unlimited",
                ],
            ),
            plan(
                "Premium",
                14_99,
                Some(6),
                100,
                &[
                    "6 printed books/month",
                    "100 customization tokens",
                    "Advanced story templates",
                    "Priority support",
                    "Digital reading unlimited",
                ],
            ),
            plan(
                "Unlimited",
                19_99,
                None,
                200,
                &[
                    "Unlimited printed books",
                    "200 customization tokens",
                    "All story templates",
                    "Priority support",
                    "Digital reading unlimited",
                    "Exclusive content",
                ],
            ),
        ]
    }
}

fn plan(
    name: &str,
    price_pence_per_month: u64,
    books_per_month: Option<u32>,
    tokens: u32,
    features: &[&str],
) -> SubscriptionPlan {
    SubscriptionPlan {
        name: name.to_string(),
        price_pence_per_month,
        books_per_month,
        tokens,
        features: features.iter().map(|f| f.to_string()).collect(),
    }
}

// ---------------------------------------------------------------------------
// All dashboards for one session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboards {
    pub teacher: TeacherDashboard,
    pub parent: ParentDashboard,
    pub child: ChildDashboard,
    pub author: AuthorPortal,
    pub plans: Vec<SubscriptionPlan>,
}

impl Dashboards {
    pub fn sample() -> Self {
        Self {
            teacher: TeacherDashboard::sample(),
            parent: ParentDashboard::sample(),
            child: ChildDashboard::sample(),
            author: AuthorPortal::sample(),
            plans: SubscriptionPlan::catalogue(),
        }
    }
}
