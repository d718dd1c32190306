//! The scenarios. Each is a strictly linear script: put the device into a
//! known state, act through the page objects, assert on what the app shows.

pub mod access;
pub mod transaction;

pub use access::{password, recover_access, sign_in};
pub use transaction::{send_transaction, send_transaction_from_dapp};
