//! Demo data seeding for the agency portal.
//!
//! This crate resets the portal database to a known state: one administrator,
//! a few client accounts, their service requests, and comments on those
//! requests. It is meant for local development and demo environments.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let db = Database::connect(&database_url).await?;
//! let report = SeedPlan::agency_demo()
//!     .build_and_release(Seeder::new(db), &mut rand::thread_rng())
//!     .await?;
//! report.log_summary();
//! ```

pub mod builders;
pub mod config;
pub mod db;
pub mod generators;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{SeedPlan, SeedReport};
    pub use crate::config::{Author, CommentFixture, RequestFixture, SeedFixtures, UserFixture};
    pub use crate::db::{PurgeCounts, SeedError, SeedStore, Seeder};
    pub use crate::generators::{backdate, backdate_batch};
    pub use agency::database::Database;
    pub use agency::models::{Comment, Request, RequestStatus, Role, User};
}
