//! Scripted session: one child's visit from landing page to dashboard.
//!
//! Sam has a big sister, so both sibling questions are asked. After the
//! wizard, Sam reads two stories and checks the dashboard, then a parent
//! logs in and looks at the subscription plans, and a teacher plans a
//! science lesson (the first try is too long).
//!
//! Run with: cargo run --example scripted_session

use std::sync::Arc;

use metime::core::question::QuestionSet;
use metime::core::story::StoryLibrary;
use metime::core::view::PageView;
use metime::schema::page::{Action, DashboardKind, Role};
use metime::schema::planning::{KeyStage, LessonPlanRequest, Subject};
use metime::schema::story_kind::StoryKind;
use metime::Session;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("warn,metime=info")
        .with_writer(std::io::stderr)
        .init();

    let questions = Arc::new(QuestionSet::builtin().expect("Failed to load questions"));
    let stories = Arc::new(StoryLibrary::builtin().expect("Failed to load stories"));
    let mut session = Session::new(questions, stories).with_seed(2026);

    // --- Wizard ---
    step(&mut session, Action::Login(Role::Student));
    for response in [
        "Sam", "Ana", "Ben", "Yes", "Mia", "Leo", "Joe", "Nana Rose", "Lee", "",
        "Max",
    ] {
        step(&mut session, Action::Answer(response.to_string()));
    }

    // --- Reading ---
    step(&mut session, Action::ChooseStory(StoryKind::Treehouse));
    step(&mut session, Action::FinishReading { minutes: 18 });
    step(&mut session, Action::SurpriseMe);
    step(&mut session, Action::FinishReading { minutes: 14 });

    // Not allowed from the story menu
    step(&mut session, Action::ViewPlans);

    step(&mut session, Action::OpenDashboard(DashboardKind::Child));

    // --- Parent ---
    step(&mut session, Action::Logout);
    step(&mut session, Action::Login(Role::Parent));
    step(&mut session, Action::ViewPlans);
    step(&mut session, Action::Back);

    // --- Teacher ---
    step(&mut session, Action::Logout);
    step(&mut session, Action::Login(Role::Teacher));
    step(&mut session, Action::OpenLessonPlanner);
    let mut lesson = LessonPlanRequest::new(Subject::Science, KeyStage::Ks2, "Class 7A");
    lesson.duration_minutes = 150;
    step(&mut session, Action::GenerateLessonPlan(lesson.clone()));
    lesson.duration_minutes = 45;
    lesson.topic = "Forces".to_string();
    step(&mut session, Action::GenerateLessonPlan(lesson));

    let summary = session.end();
    println!(
        "Session over: {} answers, {} stories, {} minutes",
        summary.answers.len(),
        summary.stories_read.len(),
        summary.reading_minutes
    );
}

fn step(session: &mut Session, action: Action) {
    println!(">>> {}", action.name());
    match session.apply(action) {
        Ok(_) => println!("{}", PageView(session)),
        Err(e) => println!("!!! {e}\n"),
    }
}
