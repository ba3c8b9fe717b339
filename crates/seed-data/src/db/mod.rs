//! Database integration for seeding customers.
//!
//! The [`Seeder`] reads the identifiers already in use, generates a batch
//! around them, and inserts it in a single transaction.

mod seeder;

pub use seeder::{SeedError, SeedReport, Seeder};
