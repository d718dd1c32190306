//! Meridian Mobile E2E Suite
//!
//! This crate drives the Meridian mobile messenger/wallet through its UI and
//! asserts on visible text and state:
//! - Talks to an Appium-compatible automation server over its HTTP/JSON
//!   protocol, one fresh app session per scenario case
//! - Wraps each screen in a typed page object exposing only the actions
//!   valid on that screen
//! - Runs strictly linear scenarios with bounded waits; the first unmet
//!   wait fails the case
//! - Checks wallet side effects against the staging chain's RPC node
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Suite Runner (Rust)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SuiteRunner                                                │
//! │    ├── DeviceSession::start() -> DriverSession              │
//! │    ├── dispatch(scenario, case)                             │
//! │    └── write_results() -> results.json                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenarios (linear scripts over typed views)                │
//! │    ├── preconditions: new-user onboarding, recovery         │
//! │    ├── views: Home / Chats / Login / Contacts / Auction     │
//! │    └── chain: balances, faucet top-ups, update polling      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  DriverSession (HTTP/JSON)        ChainClient (JSON-RPC)    │
//! │    automation server  ───────▶      staging node + faucet   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod chain;
pub mod driver;
pub mod element;
pub mod error;
pub mod preconditions;
pub mod runner;
pub mod scenario;
pub mod scenarios;
pub mod session;
pub mod views;

pub use driver::{AutomationClient, DriverSession, Locator};
pub use error::{E2eError, E2eResult};
pub use runner::SuiteRunner;
pub use scenario::Tag;
pub use session::DeviceSession;
