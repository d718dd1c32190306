//! The screen the app boots into on a fresh install.

use std::time::Duration;

use crate::driver::{DriverSession, Locator};
use crate::element::{Element, DEFAULT_WAIT};
use crate::error::E2eResult;
use crate::views::ChatsView;

const REQUEST_PASSWORD_ICON: &str = "request-password-icon";
const CHAT_REQUEST_INPUT: &str = "chat-request-input";
const CHATS_TAB: &str = "chats-tab";

pub struct HomeView<'d> {
    session: &'d DriverSession,
}

impl<'d> HomeView<'d> {
    pub fn new(session: &'d DriverSession) -> Self {
        Self { session }
    }

    /// The onboarding prompt that asks the new user to set a password.
    pub async fn request_password_icon(&self) -> E2eResult<Element<'d>> {
        self.element(REQUEST_PASSWORD_ICON).await
    }

    /// Input the onboarding conversation reads passwords from.
    pub async fn chat_request_input(&self) -> E2eResult<Element<'d>> {
        self.element(CHAT_REQUEST_INPUT).await
    }

    /// Submit the current input through the keyboard's confirm key.
    pub async fn confirm(&self) -> E2eResult<()> {
        self.session.press_enter().await
    }

    /// Open the chat list.
    pub async fn get_chats(&self) -> E2eResult<ChatsView<'d>> {
        self.element(CHATS_TAB).await?.click().await?;
        let chats = ChatsView::new(self.session);
        chats.wait_until_shown().await?;
        Ok(chats)
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
