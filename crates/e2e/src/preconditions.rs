//! Precondition operations: put the device into a known authenticated state
//! before the steps under test run.
//!
//! Failures here are not caught — a driver timeout during setup fails the
//! case the same way a failed step would.

use std::time::Duration;

use crate::error::E2eResult;
use crate::views::{ChatsView, HomeView};

/// Password every brand-new onboarded identity is given.
pub const NEW_USER_PASSWORD: &str = "qwerty1234";

/// Bound on the identity generation that follows onboarding.
const ONBOARDING_TIMEOUT: Duration = Duration::from_secs(60);

/// Drive onboarding as a brand-new identity: set a password, confirm it,
/// and return once the home screen signals completion. Afterwards the
/// device is authenticated as a fresh identity.
pub async fn set_password_as_new_user(home: &HomeView<'_>) -> E2eResult<()> {
    home.request_password_icon().await?.click().await?;
    home.chat_request_input().await?.send_keys(NEW_USER_PASSWORD).await?;
    home.confirm().await?;
    home.chat_request_input().await?.send_keys(NEW_USER_PASSWORD).await?;
    home.confirm().await?;
    home.find_full_text("Chats", ONBOARDING_TIMEOUT).await?;
    Ok(())
}

/// Recover an existing identity from its passphrase and sign back in.
/// Recovery can surface several candidate accounts; `username`
/// disambiguates. Afterwards the device is authenticated as that identity.
pub async fn recover_access(
    chats: &ChatsView<'_>,
    passphrase: &str,
    password: &str,
    username: &str,
) -> E2eResult<()> {
    chats.back_button().await?.click().await?;
    chats.profile_button().await?.click().await?;
    let login = chats.switch_users().await?;
    login.recover_access_button().await?.click().await?;
    login.passphrase_input().await?.send_keys(passphrase).await?;
    login.password_input().await?.send_keys(password).await?;
    login.confirm_recover_access().await?.click().await?;
    login.account_by_username(username).await?.click().await?;
    login.password_input().await?.send_keys(password).await?;
    login.sign_in_button().await?.click().await?;
    Ok(())
}
