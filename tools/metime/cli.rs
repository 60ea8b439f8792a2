//! Interactive terminal session.
//!
//! Commands available on every page:
//!   :help    list what can be typed on the current page
//!   :logout  back to the landing page
//!   :quit    end the session
//!
//! Anything else is read according to the current page.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use metime::core::view::PageView;
use metime::schema::dashboard::{ReadingLevel, ReadingPreferences};
use metime::schema::page::{Action, DashboardKind, Page, Role};
use metime::schema::planning::{
    AgeRange, Genre, KeyStage, LessonPlanRequest, StoryDraft, Subject, DRAFT_CONFIRMATION,
};
use metime::schema::story_kind::StoryKind;
use metime::Session;

/// One line of input, read against the page it was typed on.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Act(Action),
    Help,
    Quit,
    Unknown(String),
}

pub fn run(mut session: Session) -> Result<Session> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut reading_since: Option<Instant> = None;
    let mut shown: Option<Page> = None;

    loop {
        let page = session.page();
        if shown != Some(page) || page == Page::Collecting {
            println!("\n{}", PageView(&session));
            shown = Some(page);
        }
        if matches!(page, Page::ReadingStory(_)) && reading_since.is_none() {
            reading_since = Some(Instant::now());
        }

        print!("{}> ", prompt_label(page));
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        let elapsed = reading_since.map(|t| elapsed_minutes(t.elapsed().as_secs()));
        match parse_input(page, line, &session, elapsed) {
            Input::Quit => break,
            Input::Help => println!("{}", help_text(page)),
            Input::Unknown(msg) => println!("{msg}"),
            Input::Act(action) => {
                let note = confirmation(&action);
                match session.apply(action) {
                    Ok(next) => {
                        if !matches!(next, Page::ReadingStory(_)) {
                            reading_since = None;
                        }
                        if next == page && !matches!(page, Page::Collecting) {
                            println!("{note}");
                        }
                    }
                    Err(e) if e.is_warning() => println!("⚠ {e}"),
                    Err(e) => println!("{e}"),
                }
            }
        }
    }

    println!("Goodbye.");
    Ok(session)
}

/// Turn a typed line into an action for `page`.
///
/// `elapsed_minutes` is the time spent on the current story, used when
/// the reader types `done` without a minute count.
pub fn parse_input(
    page: Page,
    line: &str,
    session: &Session,
    elapsed_minutes: Option<u32>,
) -> Input {
    let trimmed = line.trim();
    match trimmed {
        ":quit" | ":q" => return Input::Quit,
        ":help" | ":h" => return Input::Help,
        ":logout" => return Input::Act(Action::Logout),
        _ => {}
    }

    // Answers are passed through untouched so the wizard can judge them.
    if page == Page::Collecting {
        return Input::Act(Action::Answer(line.to_string()));
    }

    let words: Vec<&str> = trimmed.split_whitespace().collect();
    let command = words.first().copied().unwrap_or("").to_lowercase();
    let arg = words.get(1).copied();
    let rest = words.get(1..).unwrap_or(&[]);

    match page {
        Page::Landing => match Role::parse(trimmed) {
            Some(role) => Input::Act(Action::Login(role)),
            None => Input::Unknown(format!("Unknown role '{trimmed}'. Try teacher, student, parent or author.")),
        },
        Page::SelectingStory => match command.as_str() {
            "?" | "surprise" => Input::Act(Action::SurpriseMe),
            "dashboard" | "stats" => Input::Act(Action::OpenDashboard(DashboardKind::Child)),
            _ => match StoryKind::parse(trimmed) {
                Some(kind) => Input::Act(Action::ChooseStory(kind)),
                None => Input::Unknown(format!("No story called '{trimmed}'. Pick 1-5 or '?'.")),
            },
        },
        Page::ReadingStory(_) => match command.as_str() {
            "done" | "finish" => match arg.map(str::parse::<u32>) {
                Some(Ok(minutes)) => Input::Act(Action::FinishReading { minutes }),
                Some(Err(_)) => Input::Unknown("Minutes must be a whole number.".to_string()),
                None => Input::Act(Action::FinishReading {
                    minutes: elapsed_minutes.unwrap_or(1),
                }),
            },
            "back" => Input::Act(Action::Back),
            _ => Input::Unknown("Type 'done' when you have finished reading.".to_string()),
        },
        Page::Dashboard(DashboardKind::Child) => match command.as_str() {
            "new" | "story" => Input::Act(Action::StartNewStory),
            _ => Input::Unknown("Type 'new' to start a new story.".to_string()),
        },
        Page::Dashboard(DashboardKind::Parent) => match command.as_str() {
            "plans" => Input::Act(Action::ViewPlans),
            "level" => match arg.and_then(ReadingLevel::parse) {
                Some(level) => Input::Act(Action::SavePreferences(ReadingPreferences {
                    level,
                    ..session.dashboards().parent.preferences
                })),
                None => Input::Unknown(
                    "Reading level is one of: beginner, intermediate, advanced, expert.".to_string(),
                ),
            },
            "toggle" => {
                let current = session.dashboards().parent.preferences;
                match arg.and_then(|name| toggle(current, name)) {
                    Some(prefs) => Input::Act(Action::SavePreferences(prefs)),
                    None => Input::Unknown(
                        "Toggle one of: educational, bedtime, sound, read_aloud.".to_string(),
                    ),
                }
            }
            _ => Input::Unknown("Type 'plans', 'level <level>' or 'toggle <preference>'.".to_string()),
        },
        Page::Plans => match command.as_str() {
            "back" => Input::Act(Action::Back),
            _ => Input::Unknown("Type 'back' to return to the dashboard.".to_string()),
        },
        Page::Dashboard(DashboardKind::Teacher) => match command.as_str() {
            "planner" | "lessons" => Input::Act(Action::OpenLessonPlanner),
            _ => Input::Unknown("Type 'planner' to plan a lesson.".to_string()),
        },
        Page::LessonPlanner => match command.as_str() {
            "plan" => match lesson_request(rest, session) {
                Ok(request) => Input::Act(Action::GenerateLessonPlan(request)),
                Err(msg) => Input::Unknown(msg),
            },
            "back" => Input::Act(Action::Back),
            _ => Input::Unknown("Type 'plan <subject> <key stage> <class> [minutes]' or 'back'.".to_string()),
        },
        Page::Dashboard(DashboardKind::Author) => match command.as_str() {
            "draft" | "new" => match story_draft(rest) {
                Ok(draft) => Input::Act(Action::CreateStoryDraft(draft)),
                Err(msg) => Input::Unknown(msg),
            },
            _ => Input::Unknown("Type 'draft <genre> <age range> <title>' to start a story.".to_string()),
        },
        Page::Collecting => Input::Act(Action::Answer(line.to_string())),
    }
}

/// `plan english ks2 7a 45`: subject, key stage, class, then optional
/// minutes. The class may be given by its short name.
fn lesson_request(args: &[&str], session: &Session) -> Result<LessonPlanRequest, String> {
    let [subject, stage, class, more @ ..] = args else {
        return Err("Usage: plan <subject> <key stage> <class> [minutes]".to_string());
    };
    let subject = Subject::parse(subject)
        .ok_or_else(|| format!("No subject called '{subject}'. Try english, maths, science or biology."))?;
    let key_stage =
        KeyStage::parse(stage).ok_or_else(|| format!("No key stage called '{stage}'. Try KS1 to KS4."))?;
    let class = session
        .dashboards()
        .teacher
        .classes
        .iter()
        .map(|c| c.name.as_str())
        .find(|name| {
            name.eq_ignore_ascii_case(class)
                || name.to_lowercase().strip_prefix("class ") == Some(class.to_lowercase().as_str())
        })
        .unwrap_or(*class);

    let mut request = LessonPlanRequest::new(subject, key_stage, class);
    if let Some(minutes) = more.first() {
        request.duration_minutes = minutes
            .parse()
            .map_err(|_| "Minutes must be a whole number.".to_string())?;
    }
    Ok(request)
}

/// `draft fantasy 7-9 The Dragon Picnic`: genre, age range, then the title.
fn story_draft(args: &[&str]) -> Result<StoryDraft, String> {
    let [genre, age, title @ ..] = args else {
        return Err("Usage: draft <genre> <age range> <title>".to_string());
    };
    let genre = Genre::parse(genre)
        .ok_or_else(|| format!("No genre called '{genre}'. Try adventure, educational, fantasy or historical."))?;
    let age_range =
        AgeRange::parse(age).ok_or_else(|| format!("No age range '{age}'. Try 4-6, 7-9, 10-12 or 13+."))?;
    Ok(StoryDraft::new(title.join(" "), genre, age_range))
}

/// What to print when an action leaves the page unchanged.
fn confirmation(action: &Action) -> &'static str {
    match action {
        Action::GenerateLessonPlan(request) => request.subject.confirmation(),
        Action::CreateStoryDraft(_) => DRAFT_CONFIRMATION,
        _ => "Saved.",
    }
}

fn toggle(mut prefs: ReadingPreferences, name: &str) -> Option<ReadingPreferences> {
    match name.to_lowercase().as_str() {
        "educational" => prefs.educational = !prefs.educational,
        "bedtime" => prefs.bedtime_mode = !prefs.bedtime_mode,
        "sound" => prefs.sound_effects = !prefs.sound_effects,
        "read_aloud" | "aloud" => prefs.read_aloud = !prefs.read_aloud,
        _ => return None,
    }
    Some(prefs)
}

/// Whole minutes, rounded up, never less than one.
fn elapsed_minutes(secs: u64) -> u32 {
    u32::try_from(secs.div_ceil(60)).unwrap_or(u32::MAX).max(1)
}

fn prompt_label(page: Page) -> &'static str {
    match page {
        Page::Landing => "role",
        Page::Collecting => "answer",
        Page::SelectingStory => "story",
        Page::ReadingStory(_) => "reading",
        Page::Dashboard(_) | Page::Plans => "dashboard",
        Page::LessonPlanner => "planner",
    }
}

fn help_text(page: Page) -> &'static str {
    match page {
        Page::Landing => "teacher | student | parent | author",
        Page::Collecting => "Type your answer and press enter.",
        Page::SelectingStory => "1-5 or a story name | ? (surprise me) | dashboard",
        Page::ReadingStory(_) => "done [minutes] | back",
        Page::Dashboard(DashboardKind::Child) => "new",
        Page::Dashboard(DashboardKind::Parent) => {
            "plans | level beginner|intermediate|advanced|expert | toggle educational|bedtime|sound|read_aloud"
        }
        Page::Plans => "back",
        Page::Dashboard(DashboardKind::Teacher) => "planner",
        Page::LessonPlanner => "plan <subject> <KS1-KS4> <class> [30-120 minutes] | back",
        Page::Dashboard(DashboardKind::Author) => "draft <genre> <4-6|7-9|10-12|13+> <title>",
    }
}
