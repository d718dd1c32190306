//! Account selection and authentication.

use crate::driver::{DriverSession, Locator};
use crate::element::{Element, DEFAULT_WAIT};
use crate::error::E2eResult;

const RECOVER_ACCESS_BUTTON: &str = "recover-access-button";
const PASSPHRASE_INPUT: &str = "passphrase-input";
const PASSWORD_INPUT: &str = "password-input";
const CONFIRM_RECOVER_ACCESS: &str = "confirm-recover-button";
const FIRST_ACCOUNT_BUTTON: &str = "account-item-0";
const SIGN_IN_BUTTON: &str = "sign-in-button";

pub struct LoginView<'d> {
    session: &'d DriverSession,
}

impl<'d> LoginView<'d> {
    pub fn new(session: &'d DriverSession) -> Self {
        Self { session }
    }

    pub async fn recover_access_button(&self) -> E2eResult<Element<'d>> {
        self.element(RECOVER_ACCESS_BUTTON).await
    }

    pub async fn passphrase_input(&self) -> E2eResult<Element<'d>> {
        self.element(PASSPHRASE_INPUT).await
    }

    pub async fn password_input(&self) -> E2eResult<Element<'d>> {
        self.element(PASSWORD_INPUT).await
    }

    pub async fn confirm_recover_access(&self) -> E2eResult<Element<'d>> {
        self.element(CONFIRM_RECOVER_ACCESS).await
    }

    /// Topmost account in the selection list.
    pub async fn first_account_button(&self) -> E2eResult<Element<'d>> {
        self.element(FIRST_ACCOUNT_BUTTON).await
    }

    /// Recovery can surface several candidates; the row showing `username`
    /// disambiguates.
    pub async fn account_by_username(&self, username: &str) -> E2eResult<Element<'d>> {
        self.session
            .wait_for_element(Locator::text(username), DEFAULT_WAIT)
            .await
    }

    pub async fn sign_in_button(&self) -> E2eResult<Element<'d>> {
        self.element(SIGN_IN_BUTTON).await
    }

    async fn element(&self, id: &str) -> E2eResult<Element<'d>> {
        self.session
            .wait_for_element(Locator::accessibility_id(id), DEFAULT_WAIT)
            .await
    }
}
