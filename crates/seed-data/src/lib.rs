//! Database tooling for Testudo Bank.
//!
//! Creates and drops the bank database and seeds it with randomized customers.
//! Seeding reads the identifiers already in use once, then generates a batch
//! that avoids them and inserts every customer with its password in one
//! transaction.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let db = Database::connect(&ConnectionSettings::from_env()?).await?;
//! db.create_tables().await?;
//!
//! let report = Seeder::new(&db)
//!     .run(&SeedConfig::default(), &mut rand::thread_rng())
//!     .await?;
//! db.close().await;
//! ```

pub mod config;
pub mod db;
pub mod generators;
pub mod setup;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::SeedConfig;
    pub use crate::db::{SeedError, SeedReport, Seeder};
    pub use crate::generators::{
        CustomerGenConfig, CustomerGenerator, GeneratedBatch, GeneratedCustomer,
    };
    pub use bank::models::{Credential, Customer, CustomerId};
    pub use bank::{ConnectionSettings, Database};
}
