//! Core of the agency portal: clients open service requests, staff and
//! clients discuss them in comments.
//!
//! This crate owns the relational schema (see `migrations/`), the row
//! models, password hashing, and the [`database::Database`] handle.

pub mod auth;
pub mod database;
pub mod errors;
pub mod models;
