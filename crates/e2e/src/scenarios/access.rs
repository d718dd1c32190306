//! Onboarding, recovery and sign-in scenarios.

use std::time::Duration;

use meridian_common::Fixtures;

use crate::driver::DriverSession;
use crate::element::DEFAULT_WAIT;
use crate::error::E2eResult;
use crate::preconditions::set_password_as_new_user;
use crate::scenario::{PasswordCase, SignInCase};
use crate::views::HomeView;

/// Recovering on a fresh install pulls the identity's history; give it the
/// long bound.
const RECOVERY_TIMEOUT: Duration = Duration::from_secs(60);

/// Sign-in resolves locally, so both outcomes must show quickly.
const SIGN_IN_OUTCOME_TIMEOUT: Duration = Duration::from_secs(10);

/// Onboard a new identity, back out, recover the fixture identity from its
/// passphrase, pick it from the candidate list by username, re-authenticate
/// and land on the chat list.
pub async fn recover_access(session: &DriverSession, fixtures: &Fixtures) -> E2eResult<()> {
    let user = &fixtures.basic_user;

    let home = HomeView::new(session);
    set_password_as_new_user(&home).await?;
    let chats = home.get_chats().await?;
    chats.back_button().await?.click().await?;
    chats.profile_button().await?.click().await?;
    let login = chats.switch_users().await?;
    login.recover_access_button().await?.click().await?;
    login.passphrase_input().await?.send_keys(&user.passphrase).await?;
    login.password_input().await?.send_keys(&user.password).await?;
    login.confirm_recover_access().await?.click().await?;
    login.account_by_username(&user.username).await?.click().await?;
    login.password_input().await?.send_keys(&user.password).await?;
    login.sign_in_button().await?.click().await?;
    home.find_full_text("Chats", RECOVERY_TIMEOUT).await?;
    Ok(())
}

/// Select the first listed account and sign in with the case's password;
/// the outcome text is either the chat list or the rejection message.
pub async fn sign_in(session: &DriverSession, case: &SignInCase) -> E2eResult<()> {
    let home = HomeView::new(session);
    set_password_as_new_user(&home).await?;
    let chats = home.get_chats().await?;
    chats.back_button().await?.click().await?;
    chats.profile_button().await?.click().await?;
    let login = chats.switch_users().await?;
    login.first_account_button().await?.click().await?;
    login.password_input().await?.send_keys(case.input).await?;
    login.sign_in_button().await?.click().await?;
    home.find_full_text(case.outcome, SIGN_IN_OUTCOME_TIMEOUT).await?;
    Ok(())
}

/// Feed the onboarding password prompt the case's input. A too-short
/// password is rejected straight away; a mismatching confirmation is
/// rejected after the second entry.
pub async fn password(session: &DriverSession, case: &PasswordCase) -> E2eResult<()> {
    let home = HomeView::new(session);
    home.request_password_icon().await?.click().await?;
    home.chat_request_input().await?.send_keys(case.input).await?;
    home.confirm().await?;
    if let Some(confirmation) = case.confirmation {
        home.chat_request_input().await?.send_keys(confirmation).await?;
        home.confirm().await?;
    }
    home.find_full_text(case.outcome, DEFAULT_WAIT).await?;
    Ok(())
}
