//! Plain-text views of every page, for terminal front ends.
//!
//! Each view borrows the data it shows and implements `Display`.

use std::fmt;

use crate::core::session::Session;
use crate::core::story::{RenderedStory, StoryLibrary};
use crate::core::wizard::Wizard;
use crate::schema::dashboard::{
    format_pounds, AuthorPortal, ChildDashboard, ParentDashboard, SubscriptionPlan,
    TeacherDashboard, WEEKDAYS,
};
use crate::schema::page::{DashboardKind, Page};
use crate::schema::planning::{
    AgeRange, CustomElement, DraftFeatures, Genre, KeyStage, Subject, DRAFT_CONFIRMATION,
    LESSON_MINUTES, SETTING_SCALE,
};
use crate::schema::story_kind::StoryKind;

/// Widest bar in a weekly chart, in characters.
const BAR_WIDTH: u32 = 30;

/// Whatever page the session is on.
pub struct PageView<'a>(pub &'a Session);

impl fmt::Display for PageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;
        let dashboards = session.dashboards();
        match session.page() {
            Page::Landing => write!(f, "{}", LandingView),
            Page::Collecting => write!(f, "{}", PromptView(session.wizard())),
            Page::SelectingStory => write!(f, "{}", StoryMenuView(session.stories())),
            Page::ReadingStory(kind) => match session.current_story() {
                Some(story) => write!(f, "{}", StoryView(&story)),
                None => writeln!(f, "'{kind}' is not available."),
            },
            Page::Dashboard(DashboardKind::Teacher) => write!(f, "{}", TeacherView(&dashboards.teacher)),
            Page::Dashboard(DashboardKind::Parent) => write!(f, "{}", ParentView(&dashboards.parent)),
            Page::Dashboard(DashboardKind::Child) => write!(f, "{}", ChildView(&dashboards.child)),
            Page::Dashboard(DashboardKind::Author) => write!(f, "{}", AuthorView(&dashboards.author)),
            Page::Plans => write!(f, "{}", PlansView(&dashboards.plans)),
            Page::LessonPlanner => write!(f, "{}", LessonPlannerView(&dashboards.teacher)),
        }
    }
}

pub struct LandingView;

impl fmt::Display for LandingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Me Time Stories")?;
        writeln!(f, "Where You are the center of every Story")?;
        writeln!(f)?;
        writeln!(f, "  teacher  Create lessons and track student progress")?;
        writeln!(f, "  student  Start your personalized reading adventure")?;
        writeln!(f, "  parent   Follow your child's reading journey")?;
        writeln!(f, "  author   Publish stories for the community")
    }
}

/// The current wizard question with a progress counter.
pub struct PromptView<'a>(pub &'a Wizard);

impl fmt::Display for PromptView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.current_prompt() {
            Some(prompt) => {
                let (position, total) = self.0.progress();
                writeln!(f, "[{position}/{total}] {prompt}")
            }
            None => writeln!(f, "All done! Time to pick a story."),
        }
    }
}

pub struct StoryMenuView<'a>(pub &'a StoryLibrary);

impl fmt::Display for StoryMenuView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Choose Your Story")?;
        for (i, kind) in StoryKind::ALL.iter().enumerate() {
            match self.0.get(*kind) {
                Some(story) => writeln!(f, "  {}. {kind} ({})", i + 1, story.category)?,
                None => writeln!(f, "  {}. {kind} (unavailable)", i + 1)?,
            }
        }
        writeln!(f, "  ?. Surprise me")
    }
}

pub struct StoryView<'a>(pub &'a RenderedStory);

impl fmt::Display for StoryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.0.title)?;
        writeln!(f, "{}", "=".repeat(self.0.title.chars().count()))?;
        writeln!(f)?;
        writeln!(f, "{}", self.0.body)
    }
}

pub struct TeacherView<'a>(pub &'a TeacherDashboard);

impl fmt::Display for TeacherView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.0;
        writeln!(f, "Teacher Dashboard")?;
        writeln!(f)?;
        writeln!(f, "Class overview")?;
        for s in &d.students {
            writeln!(
                f,
                "  {:<10} {:>4} mins  {:>2} stories",
                s.name, s.reading_minutes, s.stories_completed
            )?;
        }
        let stats = &d.class_stats;
        writeln!(
            f,
            "  total {} mins, {} stories, average {} mins",
            stats.total_reading_minutes, stats.total_stories_completed, stats.average_reading_minutes
        )?;

        writeln!(f)?;
        writeln!(f, "Story recommendations")?;
        for (name, stories) in &d.recommendations {
            let labels: Vec<&str> = stories.iter().map(|k| k.label()).collect();
            writeln!(f, "  {name}: {}", labels.join(", "))?;
        }

        writeln!(f)?;
        writeln!(f, "Live progress")?;
        for p in &d.progress {
            writeln!(
                f,
                "  {:<10} {:>3}% done  {:>3}% accuracy  {}",
                p.name, p.completion, p.accuracy, p.current_task
            )?;
            writeln!(f, "             {}", p.recommendation().message())?;
        }

        writeln!(f)?;
        writeln!(f, "Classes")?;
        for c in &d.classes {
            writeln!(f, "  {} ({} students, {})", c.name, c.students, c.average_level)?;
        }
        writeln!(f, "Resources: {}", d.resource_categories.join(", "))?;
        writeln!(f, "Lesson plans: {} generated", d.lesson_plans.len())
    }
}

/// Planner choices for every subject, then the plans made so far.
pub struct LessonPlannerView<'a>(pub &'a TeacherDashboard);

impl fmt::Display for LessonPlannerView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.0;
        writeln!(f, "Lesson Planning")?;
        let stages: Vec<&str> = KeyStage::ALL.iter().map(|k| k.label()).collect();
        let classes: Vec<&str> = d.classes.iter().map(|c| c.name.as_str()).collect();
        writeln!(f, "Key stages: {}", stages.join(", "))?;
        writeln!(f, "Classes: {}", classes.join(", "))?;
        writeln!(
            f,
            "Difficulty, comprehension, interactivity {}-{}; duration {}-{} minutes",
            SETTING_SCALE.start(),
            SETTING_SCALE.end(),
            LESSON_MINUTES.start(),
            LESSON_MINUTES.end()
        )?;

        for subject in Subject::ALL {
            writeln!(f)?;
            writeln!(f, "{subject}")?;
            writeln!(f, "  {}: {}", subject.topic_heading(), subject.topics().join(", "))?;
            writeln!(f, "  Tools: {}", subject.tools().join(", "))?;
            if let Some((name, steps)) = subject.scale() {
                writeln!(f, "  {name}: {}", steps.join(" < "))?;
            }
        }

        if let Some(latest) = d.lesson_plans.last() {
            writeln!(f)?;
            writeln!(f, "Generated plans")?;
            for p in &d.lesson_plans {
                writeln!(
                    f,
                    "  {} {} {}: {}, {} mins, difficulty {}",
                    p.subject, p.key_stage, p.class, p.topic, p.duration_minutes, p.difficulty
                )?;
            }
            writeln!(f, "{}", latest.subject.confirmation())?;
        }
        Ok(())
    }
}

pub struct ParentView<'a>(pub &'a ParentDashboard);

impl fmt::Display for ParentView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.0;
        writeln!(f, "Parent Dashboard: {}", d.child_name)?;
        writeln!(
            f,
            "Reading time {} mins | Stories completed {} | Level {}",
            d.reading_minutes,
            d.completed_stories.len(),
            d.preferences.level
        )?;
        writeln!(f)?;
        writeln!(f, "Weekly reading activity")?;
        write_weekly(f, &d.weekly_minutes)?;

        writeln!(f)?;
        writeln!(f, "Reading preferences")?;
        let p = &d.preferences;
        writeln!(f, "  Reading level: {}", p.level)?;
        for (label, on) in [
            ("Educational focus", p.educational),
            ("Bedtime mode", p.bedtime_mode),
            ("Sound effects", p.sound_effects),
            ("Read aloud", p.read_aloud),
        ] {
            writeln!(f, "  [{}] {label}", if on { 'x' } else { ' ' })?;
        }

        writeln!(f)?;
        writeln!(f, "Recent activity")?;
        if d.completed_stories.is_empty() {
            writeln!(f, "  No stories completed yet.")?;
        }
        for kind in d.recent_stories(3) {
            writeln!(f, "  {kind}")?;
        }

        let s = &d.subscription;
        writeln!(f)?;
        writeln!(f, "Subscription: {} (next billing {})", s.plan, s.next_billing)?;
        let allowance = match s.books_allowance {
            Some(n) => n.to_string(),
            None => "unlimited".to_string(),
        };
        writeln!(
            f,
            "  {} tokens left, {}/{allowance} books printed this month",
            s.remaining_tokens, s.books_printed
        )
    }
}

pub struct ChildView<'a>(pub &'a ChildDashboard);

impl fmt::Display for ChildView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.0;
        writeln!(f, "Student Dashboard")?;
        writeln!(f)?;
        writeln!(f, "Your achievements")?;
        for a in &d.achievements {
            let mark = if a.earned { "✅" } else { "⭕" };
            writeln!(f, "  {mark} {}: {}", a.title, a.description)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Current streak {} days | Stories read {}",
            d.current_streak_days,
            d.stories_read()
        )?;
        write_weekly(f, &d.weekly_minutes)?;
        if !d.favorite_stories.is_empty() {
            let labels: Vec<&str> = d.favorite_stories.iter().map(|k| k.label()).collect();
            writeln!(f, "Favorites: {}", labels.join(", "))?;
        }
        writeln!(f)?;
        writeln!(f, "Stories by category")?;
        for (category, count) in &d.stories_by_category {
            writeln!(f, "  {category}: {count} stories")?;
        }
        Ok(())
    }
}

pub struct AuthorView<'a>(pub &'a AuthorPortal);

impl fmt::Display for AuthorView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.0;
        writeln!(f, "Author Portal")?;
        writeln!(
            f,
            "Total reads {} | Active licenses {} | Revenue this month {}",
            d.total_reads,
            d.active_licenses,
            format_pounds(d.revenue_this_month_pence)
        )?;
        writeln!(f)?;
        writeln!(f, "Story performance")?;
        for s in &d.stories {
            writeln!(
                f,
                "  {:<18} {:>5} reads  {:.1}/5 ({}%)  {}",
                s.title,
                s.reads,
                s.rating,
                s.rating_percent(),
                format_pounds(s.revenue_pence)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "License terms")?;
        for t in &d.license_terms {
            writeln!(f, "  {}: {}% revenue share", t.license, t.revenue_share_percent)?;
        }
        writeln!(f)?;
        writeln!(f, "Monthly revenue")?;
        for (month, pence) in &d.monthly_revenue {
            writeln!(f, "  {month}  {}", format_pounds(*pence))?;
        }

        writeln!(f)?;
        writeln!(f, "Create new story")?;
        let genres: Vec<&str> = Genre::ALL.iter().map(|g| g.label()).collect();
        let ages: Vec<&str> = AgeRange::ALL.iter().map(|a| a.label()).collect();
        let elements: Vec<&str> = CustomElement::ALL.iter().map(|e| e.label()).collect();
        let features: Vec<&str> = DraftFeatures::default()
            .labelled()
            .iter()
            .map(|(label, _)| *label)
            .collect();
        writeln!(f, "  Genres: {}", genres.join(", "))?;
        writeln!(f, "  Age ranges: {}", ages.join(", "))?;
        writeln!(f, "  Customizable: {}", elements.join(", "))?;
        writeln!(f, "  Features: {}", features.join(", "))?;

        if !d.drafts.is_empty() {
            writeln!(f)?;
            writeln!(f, "Drafts")?;
            for draft in &d.drafts {
                let elements: Vec<&str> = draft.elements.iter().map(|e| e.label()).collect();
                writeln!(
                    f,
                    "  {} ({}, ages {}) personalizes {}",
                    draft.title,
                    draft.genre,
                    draft.age_range,
                    elements.join(", ")
                )?;
            }
            writeln!(f, "{DRAFT_CONFIRMATION}")?;
        }
        Ok(())
    }
}

pub struct PlansView<'a>(pub &'a [SubscriptionPlan]);

impl fmt::Display for PlansView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Subscription Plans")?;
        for plan in self.0 {
            writeln!(f)?;
            writeln!(
                f,
                "{} {}/month",
                plan.name,
                format_pounds(plan.price_pence_per_month)
            )?;
            for feature in &plan.features {
                writeln!(f, "  • {feature}")?;
            }
        }
        Ok(())
    }
}

fn write_weekly(f: &mut fmt::Formatter<'_>, minutes: &[u32; 7]) -> fmt::Result {
    let max = minutes.iter().copied().max().unwrap_or(0).max(1);
    for (day, &m) in WEEKDAYS.iter().zip(minutes) {
        let width = (u64::from(m) * u64::from(BAR_WIDTH) / u64::from(max)) as usize;
        writeln!(f, "  {day} {:<w$} {m}", "█".repeat(width), w = BAR_WIDTH as usize)?;
    }
    Ok(())
}
