pub mod answers;
pub mod dashboard;
pub mod page;
pub mod planning;
pub mod story_kind;
