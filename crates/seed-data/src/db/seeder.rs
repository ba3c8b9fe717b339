//! Database seeding utilities.

use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;
use tracing::info;

use bank::models::CustomerId;
use bank::{AppError, Database};

use crate::config::SeedConfig;
use crate::generators::{CustomerGenerator, GeneratedCustomer};

/// Customers inserted between progress log lines.
const PROGRESS_INTERVAL: usize = 50;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    App(#[from] AppError),
    #[error("Invalid seed configuration: {0}")]
    InvalidConfig(String),
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Customers asked for.
    pub requested: usize,
    /// Customers inserted (each with one credential).
    pub created: usize,
    /// Candidates dropped because their identifier was taken.
    pub collisions: usize,
    /// Identifiers already in the table before the run.
    pub pre_existing: usize,
    /// Identifiers inserted by this run.
    pub created_ids: HashSet<CustomerId>,
}

/// Database seeder for inserting generated customers.
pub struct Seeder<'a> {
    db: &'a Database,
    generator: CustomerGenerator,
}

impl<'a> Seeder<'a> {
    /// Creates a new seeder on an open database handle.
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            generator: CustomerGenerator::new(),
        }
    }

    /// Replaces the default generator, e.g. to change the identifier width.
    pub fn with_generator(mut self, generator: CustomerGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Runs one seeding pass: snapshot existing IDs, generate, insert, commit.
    pub async fn run(
        &self,
        config: &SeedConfig,
        rng: &mut impl Rng,
    ) -> Result<SeedReport, SeedError> {
        let existing = self.existing_ids().await?;

        let batch = self
            .generator
            .generate_batch(config.customer_count, &existing, rng);

        if batch.collisions > 0 {
            info!(
                "Discarded {} of {} candidates with identifiers already in use",
                batch.collisions, config.customer_count
            );
        }

        self.seed_customers(&batch.customers).await?;

        Ok(SeedReport {
            requested: config.customer_count,
            created: batch.customers.len(),
            collisions: batch.collisions,
            pre_existing: existing.len(),
            created_ids: batch.created_ids,
        })
    }

    /// Snapshot of every identifier currently stored.
    pub async fn existing_ids(&self) -> Result<HashSet<CustomerId>, SeedError> {
        let ids: HashSet<CustomerId> = self.db.customer_ids().await?.into_iter().collect();
        info!("Found {} existing customers", ids.len());
        Ok(ids)
    }

    /// Inserts each customer and its credential, committing once at the end.
    ///
    /// On any failure the transaction is dropped uncommitted, so none of the
    /// batch is persisted.
    pub async fn seed_customers(&self, customers: &[GeneratedCustomer]) -> Result<(), SeedError> {
        info!("Seeding {} customers...", customers.len());

        let mut tx = self.db.begin().await?;

        for (i, generated) in customers.iter().enumerate() {
            Database::insert_customer(&mut tx, &generated.customer).await?;
            Database::insert_credential(&mut tx, &generated.credential).await?;

            if (i + 1) % PROGRESS_INTERVAL == 0 {
                info!("  Seeded {}/{} customers", i + 1, customers.len());
            }
        }

        tx.commit().await?;

        info!("Seeded {} customers", customers.len());
        Ok(())
    }
}
