//! Search Tracker Core — shared domain types and abstractions.
//!
//! This crate defines the data model, error taxonomy, and the repository
//! trait seams that the storage and HTTP layers depend on. It contains no
//! infrastructure code.

pub mod analytics;
pub mod clock;
pub mod error;
pub mod event;
pub mod notifier;
pub mod report;
pub mod repository;
pub mod rollup;
pub mod settings;
