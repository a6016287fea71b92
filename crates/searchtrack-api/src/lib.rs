//! Search Tracker — HTTP API.
//!
//! Serves the ingestion endpoint for the search-serving collaborator, the
//! token-guarded analytics query API for the dashboard, the CSV export, and
//! per-tenant settings.

pub mod auth;
pub mod error;
pub mod response;
pub mod routes;
pub mod state;
