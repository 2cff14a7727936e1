//! Value generators for seeded records.
//!
//! - [`backdate`]: random creation timestamps inside a trailing window

pub mod timestamps;

pub use timestamps::{backdate, backdate_batch};
