//! Database integration for seeding.
//!
//! The [`Seeder`] runs each seeding phase against a [`SeedStore`]. The
//! production store is [`agency::database::Database`]; tests substitute an
//! in-memory store.

mod seeder;
mod store;

pub use seeder::{PurgeCounts, SeedError, Seeder};
pub use store::SeedStore;
