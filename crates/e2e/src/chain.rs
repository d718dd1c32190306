//! Chain collaborators for the wallet scenarios.
//!
//! Transfers are asserted against the staging chain directly: the suite
//! reads balances over JSON-RPC, tops identities up through the faucet when
//! they run dry, and polls for the post-transaction balance movement with
//! the same bounded-wait discipline as the UI side.

use std::time::{Duration, Instant};

use meridian_common::{Balance, ChainConfig};
use serde_json::{json, Value};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::error::{E2eError, E2eResult};

/// Cadence for balance polling; block times on the staging chain are in
/// this range.
const BALANCE_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Bound on waiting for a transaction to be reflected in a balance.
const BALANCE_TIMEOUT: Duration = Duration::from_secs(120);

pub struct ChainClient {
    http: reqwest::Client,
    rpc_url: String,
    faucet_url: String,
}

impl ChainClient {
    pub fn new(config: &ChainConfig) -> E2eResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            rpc_url: config.rpc_url.clone(),
            faucet_url: config.faucet_url.trim_end_matches('/').to_string(),
        })
    }

    /// Current balance of `address` in base units.
    pub async fn get_balance(&self, address: &str) -> E2eResult<Balance> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_getBalance",
            "params": [address, "latest"],
        });
        let resp: Value = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let balance = parse_rpc_quantity(&resp)?;
        debug!(%address, %balance, "balance read");
        Ok(balance)
    }

    /// Ask the faucet to credit `address`. The credit lands asynchronously;
    /// callers poll for it.
    pub async fn request_donation(&self, address: &str) -> E2eResult<()> {
        info!(%address, "requesting faucet top-up");
        self.http
            .post(format!("{}/donate/{}", self.faucet_url, address))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Make sure `address` can fund a transfer: below the working threshold,
    /// request a donation and wait for it to land. Not an error path.
    pub async fn ensure_working_balance(&self, address: &str) -> E2eResult<Balance> {
        let balance = self.get_balance(address).await?;
        if balance >= Balance::MIN_WORKING {
            return Ok(balance);
        }
        self.request_donation(address).await?;
        self.poll_balance(address, |current| current >= Balance::MIN_WORKING, balance)
            .await
    }

    /// Poll until the balance of `address` strictly exceeds `old`.
    pub async fn verify_balance_is_updated(&self, old: Balance, address: &str) -> E2eResult<Balance> {
        self.poll_balance(address, |current| current > old, old).await
    }

    /// Poll until the balance of `address` drops strictly below `old`.
    pub async fn verify_balance_decreased(&self, old: Balance, address: &str) -> E2eResult<Balance> {
        self.poll_balance(address, |current| current < old, old).await
    }

    async fn poll_balance(
        &self,
        address: &str,
        done: impl Fn(Balance) -> bool,
        reference: Balance,
    ) -> E2eResult<Balance> {
        let deadline = Instant::now() + BALANCE_TIMEOUT;
        loop {
            let current = self.get_balance(address).await?;
            if done(current) {
                return Ok(current);
            }
            if Instant::now() >= deadline {
                return Err(E2eError::BalanceUnchanged {
                    address: address.to_string(),
                    balance: reference,
                    timeout_secs: BALANCE_TIMEOUT.as_secs(),
                });
            }
            sleep(BALANCE_POLL_INTERVAL).await;
        }
    }
}

fn parse_rpc_quantity(resp: &Value) -> E2eResult<Balance> {
    if let Some(err) = resp.get("error") {
        return Err(E2eError::Chain(err.to_string()));
    }
    let hex = resp
        .get("result")
        .and_then(Value::as_str)
        .ok_or_else(|| E2eError::Chain(format!("malformed RPC response: {}", resp)))?;
    Balance::from_hex_quantity(hex).map_err(|e| E2eError::Chain(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_common::UNIT;

    #[test]
    fn parses_rpc_balance_result() {
        let resp = json!({"jsonrpc": "2.0", "id": 1, "result": "0xde0b6b3a7640000"});
        assert_eq!(
            parse_rpc_quantity(&resp).unwrap(),
            Balance::from_base_units(UNIT)
        );
    }

    #[test]
    fn surfaces_rpc_errors() {
        let resp = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32602, "message": "invalid address"},
        });
        let err = parse_rpc_quantity(&resp).unwrap_err();
        assert!(matches!(err, E2eError::Chain(_)));
        assert!(err.to_string().contains("invalid address"));
    }

    #[test]
    fn rejects_shapeless_responses() {
        let resp = json!({"jsonrpc": "2.0", "id": 1, "result": 42});
        assert!(parse_rpc_quantity(&resp).is_err());
    }
}
