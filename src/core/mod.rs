pub mod lint;
pub mod question;
pub mod session;
pub mod story;
pub mod template;
pub mod view;
pub mod wizard;
