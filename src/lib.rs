//! MeTime Stories: personalized children's stories.
//!
//! A child answers a short question wizard (name, family, best friend,
//! arch-nemesis), then picks one of five story templates that is rendered
//! with those answers. Sessions move between pages through a single
//! transition function, and teacher, parent, child and author dashboards
//! are served from typed sample records.

pub mod config;
pub mod core;
pub mod schema;

pub use crate::config::AppConfig;
pub use crate::core::session::{Session, SessionError};
pub use crate::schema::page::{Action, Page};
