//! Wizard integration tests: whole flows over the built-in and fixture question sets.

use metime::core::question::QuestionSet;
use metime::core::wizard::{Step, Wizard, WizardError};
use metime::schema::answers::AnswerMap;
use std::path::Path;
use std::sync::Arc;

fn builtin() -> Arc<QuestionSet> {
    Arc::new(QuestionSet::builtin().unwrap())
}

fn pets() -> Arc<QuestionSet> {
    Arc::new(QuestionSet::load_from_ron(Path::new("tests/fixtures/pet_questions.ron")).unwrap())
}

const WITH_SIBLINGS: [&str; 10] = [
    "Sam", "Ana", "Ben", "Yes", "Mia", "Leo", "Joe", "Nana Rose", "Lee", "Max",
];
const WITHOUT_SIBLINGS: [&str; 8] = ["Sam", "Ana", "Ben", "No", "Joe", "Nana Rose", "Lee", "Max"];

/// Submit responses one by one, returning how many were accepted
/// before the wizard completed.
fn accepted_until_complete(wizard: &mut Wizard, responses: &[&str]) -> usize {
    let mut accepted = 0;
    for r in responses {
        assert!(!wizard.is_complete(), "completed early after {accepted}");
        wizard.submit_answer(r).unwrap();
        accepted += 1;
    }
    accepted
}

#[test]
fn completes_after_every_question_when_nothing_is_skipped() {
    let mut wizard = Wizard::new(builtin());
    assert_eq!(accepted_until_complete(&mut wizard, &WITH_SIBLINGS), 10);
    assert!(wizard.is_complete());
    assert!(wizard.skipped().is_empty());
    assert_eq!(wizard.answers().get("older_sibling"), Some("Mia"));
    assert_eq!(wizard.answers().get("younger_sibling"), Some("Leo"));
}

#[test]
fn completes_after_n_minus_skipped_when_no_siblings() {
    let mut wizard = Wizard::new(builtin());
    assert_eq!(accepted_until_complete(&mut wizard, &WITHOUT_SIBLINGS), 8);
    assert!(wizard.is_complete());
    assert_eq!(wizard.skipped(), ["older_sibling", "younger_sibling"]);
    assert!(!wizard.answers().contains_key("older_sibling"));
    assert!(!wizard.answers().contains_key("younger_sibling"));
    assert_eq!(wizard.answers().len(), 8);
}

#[test]
fn empty_submission_changes_nothing_mid_flow() {
    let mut wizard = Wizard::new(builtin());
    for r in ["Sam", "Ana", "Ben"] {
        wizard.submit_answer(r).unwrap();
    }
    let before = wizard.state();
    let answers_before = wizard.answers().clone();

    assert_eq!(wizard.submit_answer(" \t "), Err(WizardError::EmptyResponse));
    assert_eq!(wizard.state(), before);
    assert_eq!(wizard.answers(), &answers_before);
    match wizard.current_question() {
        Step::Ask(q) => assert_eq!(q.key, "has_sibling"),
        Step::Complete => panic!("wizard should still be asking"),
    }
}

#[test]
fn second_prompt_uses_the_childs_name() {
    let mut wizard = Wizard::new(builtin());
    wizard.submit_answer("Sam").unwrap();
    assert_eq!(
        wizard.current_prompt().unwrap(),
        "Nice to meet you, Sam! What's your mom's name?"
    );
}

#[test]
fn responses_are_stored_verbatim() {
    let mut wizard = Wizard::new(builtin());
    wizard.submit_answer("  Sam  ").unwrap();
    assert_eq!(wizard.answers().get("user_name"), Some("  Sam  "));
}

#[test]
fn answers_are_write_once() {
    let mut answers = AnswerMap::new();
    answers.insert("user_name", "Sam").unwrap();
    assert!(answers.insert("user_name", "Alex").is_err());
    assert_eq!(answers.get("user_name"), Some("Sam"));
}

#[test]
fn replay_is_deterministic() {
    let a = Wizard::replay(builtin(), WITH_SIBLINGS);
    let b = Wizard::replay(builtin(), WITH_SIBLINGS);
    assert_eq!(a, b);
    assert_eq!(a.len(), 10);
}

#[test]
fn replay_skips_empty_lines_like_interactive_input() {
    let responses = ["Sam", "", "Ana", "   ", "Ben", "No", "Joe", "Nana Rose", "Lee", "Max"];
    let replayed = Wizard::replay(builtin(), responses);
    assert_eq!(replayed, Wizard::replay(builtin(), WITHOUT_SIBLINGS));
}

#[test]
fn replay_ignores_extra_responses() {
    let mut responses = WITHOUT_SIBLINGS.to_vec();
    responses.push("extra");
    let replayed = Wizard::replay(builtin(), responses);
    assert_eq!(replayed.len(), 8);
    assert!(replayed.iter().all(|(_, v)| v != "extra"));
}

#[test]
fn fixture_flow_greets_by_name_and_skips_pet() {
    let mut wizard = Wizard::new(pets());
    wizard.submit_answer("Ola").unwrap();
    assert_eq!(
        wizard.current_prompt().unwrap(),
        "Hi Ola, do you have a pet? (Yes/No)"
    );
    let submitted = wizard.submit_answer("No").unwrap();
    assert_eq!(submitted.skipped, vec!["pet_name".to_string()]);
    assert!(!submitted.complete);
    wizard.submit_answer("Pizza").unwrap();
    assert!(wizard.is_complete());
}

#[test]
fn fixture_flow_asks_pet_name_on_yes() {
    let mut wizard = Wizard::new(pets());
    wizard.submit_answer("Ola").unwrap();
    wizard.submit_answer("Yes").unwrap();
    assert_eq!(
        wizard.current_prompt().unwrap(),
        "What is your pet called, Ola?"
    );
    assert_eq!(wizard.progress(), (3, 4));
}
