//! Meridian E2E Common Library
//!
//! Shared building blocks for the Meridian mobile UI test suite: the static
//! identity fixtures the scenarios authenticate as, base-unit balance
//! arithmetic for the wallet assertions, and the suite configuration that
//! points the harness at an automation server and a chain node.

pub mod amount;
pub mod config;
pub mod error;
pub mod identity;

// Re-export commonly used types
pub use amount::{Balance, UNIT};
pub use config::{AutomationConfig, ChainConfig, SuiteConfig};
pub use error::{Error, Result};
pub use identity::{Fixtures, Identity, TransactionRole};

/// Suite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
