//! Single-user gradebook: students, subjects, weighted grades, averages,
//! text reports and JSON persistence.
//!
//! The [`domain::Gradebook`] holds all state in memory;
//! [`application::services::GradebookService`] loads and saves it.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
