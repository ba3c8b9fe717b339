use std::fmt;

use serde::{Deserialize, Serialize};

/// Balance bounds a freshly opened account is seeded with (inclusive).
pub const MIN_OPENING_BALANCE: i32 = 100;
pub const MAX_OPENING_BALANCE: i32 = 10_000;

/// Number of digits in a customer identifier.
pub const CUSTOMER_ID_DIGITS: usize = 9;

/// Number of characters in a customer password.
pub const PASSWORD_LENGTH: usize = 9;

/// Customer identifier as stored in the `CustomerID` column.
///
/// Generated identifiers are fixed-width digit strings with leading zeros
/// kept, so they are carried as text rather than as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Wraps a raw identifier without validation, e.g. one read back from storage.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier is exactly `width` ASCII digits.
    pub fn is_numeric_of_width(&self, width: usize) -> bool {
        self.0.len() == width && self.0.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CustomerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A row of the `Customers` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    #[sqlx(rename = "CustomerID")]
    pub id: CustomerId,
    #[sqlx(rename = "FirstName")]
    pub first_name: String,
    #[sqlx(rename = "LastName")]
    pub last_name: String,
    #[sqlx(rename = "Balance")]
    pub balance: i32,
    #[sqlx(rename = "OverdraftBalance")]
    pub overdraft_balance: i32,
}

impl Customer {
    pub fn has_opening_balance(&self) -> bool {
        (MIN_OPENING_BALANCE..=MAX_OPENING_BALANCE).contains(&self.balance)
    }
}

/// A row of the `Passwords` table, 1:1 with [`Customer`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Credential {
    #[sqlx(rename = "CustomerID")]
    pub customer_id: CustomerId,
    #[sqlx(rename = "Password")]
    pub password: String,
}

// Keep passwords out of log output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("customer_id", &self.customer_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_id_width_check() {
        assert!(CustomerId::new("012345678").is_numeric_of_width(9));
        assert!(!CustomerId::new("12345678").is_numeric_of_width(9));
        assert!(!CustomerId::new("12345678a").is_numeric_of_width(9));
    }

    #[test]
    fn test_opening_balance_bounds() {
        let mut customer = Customer {
            id: CustomerId::new("000000001"),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            balance: MIN_OPENING_BALANCE,
            overdraft_balance: 0,
        };
        assert!(customer.has_opening_balance());

        customer.balance = MAX_OPENING_BALANCE + 1;
        assert!(!customer.has_opening_balance());
    }

    #[test]
    fn test_credential_debug_hides_password() {
        let credential = Credential {
            customer_id: CustomerId::new("123456789"),
            password: "s3cretPwd".to_string(),
        };
        let rendered = format!("{credential:?}");
        assert!(rendered.contains("123456789"));
        assert!(!rendered.contains("s3cretPwd"));
    }
}
