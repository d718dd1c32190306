//! Contact list, the jumping-off point for in-app dapps.

use crate::driver::{DriverSession, Locator};
use crate::element::{Element, DEFAULT_WAIT};
use crate::error::E2eResult;
use crate::views::AuctionHouseView;

const AUCTION_HOUSE_BUTTON: &str = "auction-house-button";

pub struct ContactsView<'d> {
    session: &'d DriverSession,
}

impl<'d> ContactsView<'d> {
    pub fn new(session: &'d DriverSession) -> Self {
        Self { session }
    }

    pub async fn open_auction_house(&self) -> E2eResult<AuctionHouseView<'d>> {
        self.element(AUCTION_HOUSE_BUTTON).await?.click().await?;
        Ok(AuctionHouseView::new(self.session))
    }

    async fn element(&self, id: &str) -> E2eResult<Element<'d>> {
        self.session
            .wait_for_element(Locator::accessibility_id(id), DEFAULT_WAIT)
            .await
    }
}
