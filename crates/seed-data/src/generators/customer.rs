//! Customer generation with collision-checked identifiers.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use fake::{
    Fake,
    faker::name::en::{FirstName, LastName},
};
use rand::{Rng, distributions::Alphanumeric};
use tracing::debug;

use bank::models::{
    CUSTOMER_ID_DIGITS, Credential, Customer, CustomerId, MAX_OPENING_BALANCE,
    MIN_OPENING_BALANCE, PASSWORD_LENGTH,
};

use crate::db::SeedError;

/// Generated customer and matching credential, ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedCustomer {
    pub customer: Customer,
    pub credential: Credential,
}

impl GeneratedCustomer {
    pub fn id(&self) -> &CustomerId {
        &self.customer.id
    }
}

/// Output of [`CustomerGenerator::generate_batch`].
#[derive(Debug, Clone, Default)]
pub struct GeneratedBatch {
    /// Customers whose identifiers were free, in generation order.
    pub customers: Vec<GeneratedCustomer>,
    /// Identifiers handed out in this batch.
    pub created_ids: HashSet<CustomerId>,
    /// Candidates discarded because their identifier was already taken.
    pub collisions: usize,
}

/// Configuration for customer generation.
#[derive(Debug, Clone)]
pub struct CustomerGenConfig {
    /// Digits per identifier. Leading zeros are kept.
    pub id_digits: usize,
    /// Opening balance range (inclusive).
    pub balance_range: RangeInclusive<i32>,
    /// Password length in alphanumeric characters.
    pub password_length: usize,
}

impl Default for CustomerGenConfig {
    fn default() -> Self {
        Self {
            id_digits: CUSTOMER_ID_DIGITS,
            balance_range: MIN_OPENING_BALANCE..=MAX_OPENING_BALANCE,
            password_length: PASSWORD_LENGTH,
        }
    }
}

/// Generates random bank customers.
pub struct CustomerGenerator {
    config: CustomerGenConfig,
}

impl CustomerGenerator {
    /// Creates a new customer generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: CustomerGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: CustomerGenConfig) -> Result<Self, SeedError> {
        if config.id_digits == 0 {
            return Err(SeedError::InvalidConfig(
                "identifier width must be at least one digit".to_string(),
            ));
        }
        if config.balance_range.is_empty() {
            return Err(SeedError::InvalidConfig(format!(
                "empty balance range {:?}",
                config.balance_range
            )));
        }
        if config.password_length == 0 {
            return Err(SeedError::InvalidConfig(
                "password length must be at least one".to_string(),
            ));
        }

        Ok(Self { config })
    }

    /// Generates a fixed-width numeric identifier, each digit uniform over 0-9.
    pub fn generate_id(&self, rng: &mut impl Rng) -> CustomerId {
        let id: String = (0..self.config.id_digits)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();
        CustomerId::new(id)
    }

    /// Generates a password drawn uniformly, with replacement, from `[a-zA-Z0-9]`.
    pub fn generate_password(&self, rng: &mut impl Rng) -> String {
        (0..self.config.password_length)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect()
    }

    /// Generates a customer and credential for an identifier already known to be free.
    pub fn generate(&self, id: CustomerId, rng: &mut impl Rng) -> GeneratedCustomer {
        let first_name: String = FirstName().fake_with_rng(rng);
        let last_name: String = LastName().fake_with_rng(rng);
        let balance = rng.gen_range(self.config.balance_range.clone());
        let password = self.generate_password(rng);

        GeneratedCustomer {
            customer: Customer {
                id: id.clone(),
                first_name,
                last_name,
                balance,
                // Every account opens with no overdraft.
                overdraft_balance: 0,
            },
            credential: Credential {
                customer_id: id,
                password,
            },
        }
    }

    /// Number of distinct identifiers at the configured width, saturating.
    fn id_space(&self) -> usize {
        u32::try_from(self.config.id_digits)
            .ok()
            .and_then(|digits| 10usize.checked_pow(digits))
            .unwrap_or(usize::MAX)
    }

    /// Makes `count` attempts at a new customer.
    ///
    /// An attempt whose identifier is in `existing` or was already produced by
    /// this batch is discarded, not retried, so the batch can hold fewer than
    /// `count` customers.
    pub fn generate_batch(
        &self,
        count: usize,
        existing: &HashSet<CustomerId>,
        rng: &mut impl Rng,
    ) -> GeneratedBatch {
        let mut batch = GeneratedBatch {
            customers: Vec::with_capacity(count.min(self.id_space())),
            ..Default::default()
        };

        for _ in 0..count {
            let id = self.generate_id(rng);

            if existing.contains(&id) || batch.created_ids.contains(&id) {
                debug!("Discarding colliding customer ID {id}");
                batch.collisions += 1;
                continue;
            }

            batch.created_ids.insert(id.clone());
            batch.customers.push(self.generate(id, rng));
        }

        batch
    }
}

impl Default for CustomerGenerator {
    fn default() -> Self {
        Self::new()
    }
}
