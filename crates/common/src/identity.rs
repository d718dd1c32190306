//! Static test identities.
//!
//! An identity is a recoverable account: a 12/24-word passphrase it can be
//! re-derived from on a fresh install, the password protecting it on the
//! device, and the chain address and public key the wallet scenarios assert
//! against. The fixture tables are embedded at compile time and loaded once;
//! scenarios receive them by reference rather than reaching for globals.

use std::fmt;

use serde::Deserialize;

use crate::error::{Error, Result};

const FIXTURES_TOML: &str = include_str!("../fixtures/users.toml");

/// A recoverable test account.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    pub username: String,
    pub passphrase: String,
    pub password: String,
    pub address: String,
    pub public_key: String,
}

// Secrets stay out of logs even at debug verbosity.
impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("username", &self.username)
            .field("passphrase", &"<redacted>")
            .field("password", &"<redacted>")
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .finish()
    }
}

impl Identity {
    fn validate(&self, label: &str) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::InvalidFixture(format!("{}: empty username", label)));
        }
        let words = self.passphrase.split_whitespace().count();
        if words != 12 && words != 24 {
            return Err(Error::InvalidFixture(format!(
                "{}: passphrase has {} words, expected 12 or 24",
                label, words
            )));
        }
        if self.password.chars().count() < 6 {
            return Err(Error::InvalidFixture(format!(
                "{}: password shorter than 6 symbols",
                label
            )));
        }
        if !is_hex_with_prefix(&self.address, "0x", 40) {
            return Err(Error::InvalidFixture(format!(
                "{}: address is not a 0x-prefixed 20-byte hex string",
                label
            )));
        }
        if !is_hex_with_prefix(&self.public_key, "0x04", 128) {
            return Err(Error::InvalidFixture(format!(
                "{}: public key is not an uncompressed 0x04-prefixed hex string",
                label
            )));
        }
        Ok(())
    }
}

fn is_hex_with_prefix(s: &str, prefix: &str, digits: usize) -> bool {
    match s.strip_prefix(prefix) {
        Some(rest) => rest.len() == digits && rest.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Role an identity plays in a transfer scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionRole {
    UserA,
    UserB,
}

impl fmt::Display for TransactionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionRole::UserA => write!(f, "user_a"),
            TransactionRole::UserB => write!(f, "user_b"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TransactionUsers {
    user_a: Identity,
    user_b: Identity,
}

/// The fixture tables every scenario draws its identities from.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixtures {
    pub basic_user: Identity,
    transaction_users: TransactionUsers,
}

impl Fixtures {
    /// Load and validate the embedded fixture tables.
    pub fn load() -> Result<Self> {
        Self::from_toml(FIXTURES_TOML)
    }

    /// Parse fixtures from a TOML document.
    pub fn from_toml(doc: &str) -> Result<Self> {
        let fixtures: Fixtures = toml::from_str(doc)?;
        fixtures.validate()?;
        Ok(fixtures)
    }

    pub fn transaction_user(&self, role: TransactionRole) -> &Identity {
        match role {
            TransactionRole::UserA => &self.transaction_users.user_a,
            TransactionRole::UserB => &self.transaction_users.user_b,
        }
    }

    fn validate(&self) -> Result<()> {
        self.basic_user.validate("basic_user")?;
        self.transaction_users.user_a.validate("transaction_users.user_a")?;
        self.transaction_users.user_b.validate("transaction_users.user_b")?;
        if self.transaction_users.user_a.address == self.transaction_users.user_b.address {
            return Err(Error::InvalidFixture(
                "transaction users share an address".into(),
            ));
        }
        Ok(())
    }
}
