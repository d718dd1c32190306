//! The chat list, where most flows start: contact management, group chats,
//! transfers and transaction signing all hang off this screen.

use std::time::Duration;

use crate::driver::{DriverSession, Locator};
use crate::element::{Element, DEFAULT_WAIT};
use crate::error::E2eResult;
use crate::views::{ContactsView, LoginView};

const CHAT_LIST: &str = "chat-list";
const BACK_BUTTON: &str = "back-button";
const PROFILE_BUTTON: &str = "profile-button";
const SWITCH_USERS_BUTTON: &str = "switch-users-button";
const PLUS_BUTTON: &str = "plus-button";
const ADD_NEW_CONTACT: &str = "add-new-contact-button";
const PUBLIC_KEY_EDIT_BOX: &str = "public-key-input";
const CONFIRM_PUBLIC_KEY_BUTTON: &str = "confirm-public-key-button";
const USER_NAME_TEXT: &str = "contact-name-text";
const NEW_GROUP_CHAT_BUTTON: &str = "new-group-chat-button";
const NEXT_BUTTON: &str = "next-button";
const NAME_EDIT_BOX: &str = "chat-name-input";
const SAVE_BUTTON: &str = "save-button";
const SEND_FUNDS_BUTTON: &str = "send-funds-button";
const FIRST_RECIPIENT_BUTTON: &str = "recipient-item-0";
const SEND_MESSAGE_BUTTON: &str = "send-message-button";
const SIGN_TRANSACTION_BUTTON: &str = "sign-transaction-button";
const ENTER_PASSWORD_INPUT: &str = "enter-password-input";
const SYNCING_INDICATOR: &str = "syncing-in-progress";
const CONTACTS_BUTTON: &str = "contacts-button";

/// Bound on history sync after recovering an identity on a fresh install.
const SYNC_TIMEOUT: Duration = Duration::from_secs(60);

pub struct ChatsView<'d> {
    session: &'d DriverSession,
}

impl<'d> ChatsView<'d> {
    pub fn new(session: &'d DriverSession) -> Self {
        Self { session }
    }

    pub(crate) async fn wait_until_shown(&self) -> E2eResult<()> {
        self.element(CHAT_LIST).await?;
        Ok(())
    }

    pub async fn back_button(&self) -> E2eResult<Element<'d>> {
        self.element(BACK_BUTTON).await
    }

    pub async fn profile_button(&self) -> E2eResult<Element<'d>> {
        self.element(PROFILE_BUTTON).await
    }

    /// Leave this identity and go to account selection.
    pub async fn switch_users(&self) -> E2eResult<LoginView<'d>> {
        self.element(SWITCH_USERS_BUTTON).await?.click().await?;
        Ok(LoginView::new(self.session))
    }

    pub async fn plus_button(&self) -> E2eResult<Element<'d>> {
        self.element(PLUS_BUTTON).await
    }

    pub async fn add_new_contact(&self) -> E2eResult<Element<'d>> {
        self.element(ADD_NEW_CONTACT).await
    }

    pub async fn public_key_edit_box(&self) -> E2eResult<Element<'d>> {
        self.element(PUBLIC_KEY_EDIT_BOX).await
    }

    pub async fn confirm_public_key_button(&self) -> E2eResult<Element<'d>> {
        self.element(CONFIRM_PUBLIC_KEY_BUTTON).await
    }

    /// Display name of the contact currently open.
    pub async fn user_name_text(&self) -> E2eResult<String> {
        self.element(USER_NAME_TEXT).await?.text().await
    }

    pub async fn new_group_chat_button(&self) -> E2eResult<Element<'d>> {
        self.element(NEW_GROUP_CHAT_BUTTON).await
    }

    /// Contact row in the group-chat member picker; the list scrolls.
    pub async fn contact_by_name(&self, name: &str) -> E2eResult<Element<'d>> {
        self.session.scroll_to_text(name, DEFAULT_WAIT).await
    }

    pub async fn next_button(&self) -> E2eResult<Element<'d>> {
        self.element(NEXT_BUTTON).await
    }

    pub async fn name_edit_box(&self) -> E2eResult<Element<'d>> {
        self.element(NAME_EDIT_BOX).await
    }

    pub async fn save_button(&self) -> E2eResult<Element<'d>> {
        self.element(SAVE_BUTTON).await
    }

    pub async fn send_funds_button(&self) -> E2eResult<Element<'d>> {
        self.element(SEND_FUNDS_BUTTON).await
    }

    pub async fn first_recipient_button(&self) -> E2eResult<Element<'d>> {
        self.element(FIRST_RECIPIENT_BUTTON).await
    }

    pub async fn send_message_button(&self) -> E2eResult<Element<'d>> {
        self.element(SEND_MESSAGE_BUTTON).await
    }

    /// The sign button carries its own bound: it only appears once the app
    /// has assembled the transaction.
    pub async fn sign_transaction_button(&self, timeout: Duration) -> E2eResult<Element<'d>> {
        self.session
            .wait_for_element(Locator::accessibility_id(SIGN_TRANSACTION_BUTTON), timeout)
            .await
    }

    pub async fn enter_password_input(&self) -> E2eResult<Element<'d>> {
        self.element(ENTER_PASSWORD_INPUT).await
    }

    /// Block until history sync for a recovered identity finishes.
    pub async fn wait_for_syncing_complete(&self) -> E2eResult<()> {
        self.session
            .wait_for_absent(&Locator::accessibility_id(SYNCING_INDICATOR), SYNC_TIMEOUT)
            .await
    }

    pub async fn open_contacts(&self) -> E2eResult<ContactsView<'d>> {
        self.element(CONTACTS_BUTTON).await?.click().await?;
        Ok(ContactsView::new(self.session))
    }

    pub async fn send_as_keyevent(&self, text: &str) -> E2eResult<()> {
        self.session.send_as_keyevent(text).await
    }

    pub async fn confirm(&self) -> E2eResult<()> {
        self.session.press_enter().await
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
