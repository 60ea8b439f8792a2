//! Story integration tests: wizard answers flowing into rendered stories.

use metime::core::lint::lint;
use metime::core::question::QuestionSet;
use metime::core::story::{StoryLibrary, StoryTemplate};
use metime::core::wizard::Wizard;
use metime::schema::story_kind::StoryKind;
use std::path::Path;
use std::sync::Arc;

fn answers_with_siblings() -> metime::schema::answers::AnswerMap {
    Wizard::replay(
        Arc::new(QuestionSet::builtin().unwrap()),
        ["Sam", "Ana", "Ben", "Yes", "Mia", "Leo", "Joe", "Nana Rose", "Lee", "Max"],
    )
}

#[test]
fn every_story_renders_without_raw_slots() {
    let library = StoryLibrary::builtin().unwrap().with_fallback("<missing>");
    let answers = answers_with_siblings();
    for kind in StoryKind::ALL {
        let story = library.render(kind, &answers).unwrap();
        assert_eq!(story.kind, kind);
        assert!(!story.title.is_empty());
        assert!(story.body.contains("Sam"), "{kind:?} never names the child");
        assert!(!story.body.contains('{') && !story.body.contains('}'));
        assert!(!story.body.contains("<missing>"), "{kind:?} used the fallback");
    }
}

#[test]
fn sibling_answers_replace_defaults() {
    let library = StoryLibrary::builtin().unwrap();
    let moses = library.render(StoryKind::Moses, &answers_with_siblings()).unwrap();
    assert!(moses.body.contains("the support of Mia"));
    assert!(!moses.body.contains("Aaron"));
}

#[test]
fn each_kind_has_a_distinct_body() {
    let library = StoryLibrary::builtin().unwrap();
    let answers = answers_with_siblings();
    let bodies: std::collections::HashSet<String> = StoryKind::ALL
        .iter()
        .map(|&k| library.render(k, &answers).unwrap().body)
        .collect();
    assert_eq!(bodies.len(), 5);
}

#[test]
fn fixture_story_overrides_builtin() {
    let mut library = StoryLibrary::builtin().unwrap();
    library.load_from_dir(Path::new("tests/fixtures/stories")).unwrap();
    let story = library.render(StoryKind::Treehouse, &answers_with_siblings()).unwrap();
    assert_eq!(story.title, "Sam's Short Treehouse Tale");
    assert_eq!(
        story.body,
        "Sam and Lee climbed the old oak and found a note from Nana Rose.\n\nThe End"
    );
}

#[test]
fn fixture_story_alone_fails_lint_for_missing_kinds() {
    let mut library = StoryLibrary::default();
    library.load_from_dir(Path::new("tests/fixtures/stories")).unwrap();
    let report = lint(&QuestionSet::builtin().unwrap(), &library);
    assert_eq!(report.errors().count(), 4);
    assert_eq!(report.warnings().count(), 0);
}

#[test]
fn fixture_story_against_pet_questions_warns() {
    let questions =
        QuestionSet::load_from_ron(Path::new("tests/fixtures/pet_questions.ron")).unwrap();
    let story =
        StoryTemplate::load_from_ron(Path::new("tests/fixtures/stories/treehouse.ron")).unwrap();
    let mut library = StoryLibrary::builtin().unwrap();
    library.insert(story);
    let report = lint(&questions, &library);
    assert!(report
        .warnings()
        .any(|f| f.message.contains("'{friend_home}', which no question collects")));
}

#[test]
fn malformed_story_file_is_rejected() {
    let err = StoryTemplate::parse_ron(
        r#"(kind: Moses, category: Historical, title: "{user_name", body: "x")"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("unclosed brace"));
}
