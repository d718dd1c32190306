//! The auction-house dapp: registers human-readable names against the
//! signed-in identity's address.

use std::time::Duration;

use crate::driver::{DriverSession, Locator};
use crate::element::{Element, DEFAULT_WAIT};
use crate::error::E2eResult;

const TOGGLE_NAVIGATION_BUTTON: &str = "toggle-navigation-button";
const NEW_AUCTION_BUTTON: &str = "new-auction-button";
const NAME_TO_RESERVE_INPUT: &str = "name-to-reserve-input";
const REGISTER_NAME_BUTTON: &str = "register-name-button";

pub struct AuctionHouseView<'d> {
    session: &'d DriverSession,
}

impl<'d> AuctionHouseView<'d> {
    pub fn new(session: &'d DriverSession) -> Self {
        Self { session }
    }

    pub async fn toggle_navigation_button(&self) -> E2eResult<Element<'d>> {
        self.element(TOGGLE_NAVIGATION_BUTTON).await
    }

    pub async fn new_auction_button(&self) -> E2eResult<Element<'d>> {
        self.element(NEW_AUCTION_BUTTON).await
    }

    pub async fn name_to_reserve_input(&self) -> E2eResult<Element<'d>> {
        self.element(NAME_TO_RESERVE_INPUT).await
    }

    pub async fn register_name_button(&self) -> E2eResult<Element<'d>> {
        self.element(REGISTER_NAME_BUTTON).await
    }

    /// The dapp's name field is a web view that drops programmatic input;
    /// names go in as key events.
    pub async fn send_as_keyevent(&self, text: &str) -> E2eResult<()> {
        self.session.send_as_keyevent(text).await
    }

    pub async fn find_full_text(&self, text: &str, timeout: Duration) -> E2eResult<Element<'d>> {
        self.session.find_full_text(text, timeout).await
    }

    async fn element(&self, id: &str) -> E2eResult<Element<'d>> {
        self.session
            .wait_for_element(Locator::accessibility_id(id), DEFAULT_WAIT)
            .await
    }
}
