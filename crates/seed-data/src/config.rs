//! Configuration types for customer seeding.

use std::env;

use serde::{Deserialize, Serialize};

use crate::db::SeedError;

/// Configuration for a seeding run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Number of candidate customers to generate. Collisions are discarded,
    /// so the run may create fewer.
    pub customer_count: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            customer_count: 100,
        }
    }
}

impl SeedConfig {
    /// Reads `SEED_CUSTOMER_COUNT` from the process environment.
    pub fn from_env() -> Result<Self, SeedError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SeedError> {
        let customer_count = match lookup("SEED_CUSTOMER_COUNT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                SeedError::InvalidConfig(format!("SEED_CUSTOMER_COUNT={raw:?}: {e}"))
            })?,
            None => Self::default().customer_count,
        };

        Ok(Self { customer_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_count() {
        let config = SeedConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.customer_count, 100);
    }

    #[test]
    fn test_count_from_environment() {
        let config = SeedConfig::from_lookup(|key| {
            (key == "SEED_CUSTOMER_COUNT").then(|| " 250 ".to_string())
        })
        .unwrap();
        assert_eq!(config.customer_count, 250);
    }

    #[test]
    fn test_negative_count_rejected() {
        let err = SeedConfig::from_lookup(|_| Some("-5".to_string())).unwrap_err();
        assert!(matches!(err, SeedError::InvalidConfig(_)));
    }
}
