//! Entity generators for seed data.
//!
//! - [`CustomerGenerator`]: customers with unique identifiers, random names,
//!   opening balances and passwords

pub mod customer;

pub use customer::{CustomerGenConfig, CustomerGenerator, GeneratedBatch, GeneratedCustomer};
