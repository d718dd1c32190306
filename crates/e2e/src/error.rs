//! Error types for the suite
//!
//! The taxonomy mirrors how scenarios actually fail: an element or text not
//! turning up within its bound, an explicit assertion mismatch, or a balance
//! that never moved. All of these are fatal for the running case; there are
//! no retries.

use meridian_common::Balance;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Automation session could not be established: {0}")]
    SessionStartup(String),

    /// Raw protocol-level miss. The bounded waits convert this into
    /// `ElementNotFound` / `TextNotFound`; scenarios never see it.
    #[error("no such element: {0}")]
    NoSuchElement(String),

    #[error("Element not found within {timeout_secs}s: {locator}")]
    ElementNotFound { locator: String, timeout_secs: u64 },

    #[error("Text \"{text}\" not visible within {timeout_secs}s")]
    TextNotFound { text: String, timeout_secs: u64 },

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Balance of {address} still {balance} after {timeout_secs}s")]
    BalanceUnchanged {
        address: String,
        balance: Balance,
        timeout_secs: u64,
    },

    #[error("Chain RPC error: {0}")]
    Chain(String),

    #[error("Automation server error: {0}")]
    Driver(String),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Scenario {scenario} has no case {case}")]
    UnknownCase { scenario: String, case: String },

    #[error("Unknown tag: {0} (expected all or transaction)")]
    UnknownTag(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] meridian_common::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_failures_name_the_bound() {
        let err = E2eError::ElementNotFound {
            locator: "accessibility id: sign-in-button".into(),
            timeout_secs: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("10s"));
        assert!(msg.contains("sign-in-button"));

        let err = E2eError::TextNotFound {
            text: "Wrong password".into(),
            timeout_secs: 20,
        };
        let msg = err.to_string();
        assert!(msg.contains("Wrong password"));
        assert!(msg.contains("20s"));
    }

    #[test]
    fn balance_failure_reports_last_seen_balance() {
        let err = E2eError::BalanceUnchanged {
            address: "0x1e42a7c90b8d5f3692c4e7a1d5b08f637c2e94ad".into(),
            balance: Balance::from_base_units(meridian_common::UNIT / 10),
            timeout_secs: 120,
        };
        let msg = err.to_string();
        assert!(msg.contains("0.1"));
        assert!(msg.contains("120s"));
    }
}
