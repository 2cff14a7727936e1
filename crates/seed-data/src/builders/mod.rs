//! Builders for complete seed runs.
//!
//! The [`SeedPlan`] ties fixtures, timestamp generation, and the
//! [`Seeder`](crate::db::Seeder) phases together.

pub mod plan;

pub use plan::{SeedPlan, SeedReport};
