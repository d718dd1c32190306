//! Element handles and bounded waits.
//!
//! Every wait in the suite is a bounded poll: try, sleep, retry until the
//! deadline, then fail with the locator and the window that was exceeded.
//! There is no cancellation; a timeout is simply the error that aborts the
//! remaining steps of the case.

use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::debug;

use crate::driver::{DriverSession, Locator};
use crate::error::{E2eError, E2eResult};

/// Poll cadence for element waits.
const ELEMENT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Wait applied by page-object accessors that carry no explicit bound.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(10);

/// A located on-screen element, valid while its session lives.
pub struct Element<'d> {
    session: &'d DriverSession,
    id: String,
    locator: Locator,
}

impl<'d> Element<'d> {
    fn new(session: &'d DriverSession, id: String, locator: Locator) -> Self {
        Self { session, id, locator }
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub async fn click(&self) -> E2eResult<()> {
        debug!("click {}", self.locator);
        self.session.click_element(&self.id).await
    }

    pub async fn send_keys(&self, text: &str) -> E2eResult<()> {
        debug!("send keys to {}", self.locator);
        self.session.send_keys_to(&self.id, text).await
    }

    pub async fn clear(&self) -> E2eResult<()> {
        self.session.clear_element(&self.id).await
    }

    pub async fn text(&self) -> E2eResult<String> {
        self.session.element_text(&self.id).await
    }
}

impl DriverSession {
    /// Poll for an element until `timeout`; `ElementNotFound` at the bound.
    pub async fn wait_for_element(
        &self,
        locator: Locator,
        timeout: Duration,
    ) -> E2eResult<Element<'_>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(id) = self.find_element_id(&locator).await? {
                return Ok(Element::new(self, id, locator));
            }
            if Instant::now() >= deadline {
                return Err(E2eError::ElementNotFound {
                    locator: locator.to_string(),
                    timeout_secs: timeout.as_secs(),
                });
            }
            sleep(ELEMENT_POLL_INTERVAL).await;
        }
    }

    /// Poll until no element matches `locator`; used for progress
    /// indicators that must disappear before the flow can continue.
    pub async fn wait_for_absent(&self, locator: &Locator, timeout: Duration) -> E2eResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.find_element_id(locator).await?.is_none() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(E2eError::AssertionFailed(format!(
                    "still visible after {}s: {}",
                    timeout.as_secs(),
                    locator
                )));
            }
            sleep(ELEMENT_POLL_INTERVAL).await;
        }
    }

    /// Wait until an element whose full visible text equals `text` exists.
    pub async fn find_full_text(&self, text: &str, timeout: Duration) -> E2eResult<Element<'_>> {
        self.wait_for_element(Locator::text(text), timeout)
            .await
            .map_err(|e| match e {
                E2eError::ElementNotFound { timeout_secs, .. } => E2eError::TextNotFound {
                    text: text.to_string(),
                    timeout_secs,
                },
                other => other,
            })
    }

    /// Exact-text lookup with scrolling, for rows below the fold.
    pub async fn scroll_to_text(&self, text: &str, timeout: Duration) -> E2eResult<Element<'_>> {
        self.wait_for_element(Locator::scrollable_text(text), timeout).await
    }
}
