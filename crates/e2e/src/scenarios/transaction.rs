//! Wallet scenarios: in-chat transfers and a dapp-initiated transaction.

use std::time::Duration;

use chrono::Local;
use meridian_common::{amount::UNIT, Balance, Fixtures, TransactionRole};

use crate::chain::ChainClient;
use crate::driver::DriverSession;
use crate::element::DEFAULT_WAIT;
use crate::error::E2eResult;
use crate::preconditions::{recover_access, set_password_as_new_user};
use crate::scenario::TransferCase;
use crate::views::HomeView;

/// Amount every transfer scenario sends.
const TRANSFER_AMOUNT: Balance = Balance::from_base_units(UNIT / 10);

/// Name the group-chat case gives its chat.
const GROUP_CHAT_NAME: &str = "chat_send_transaction";

/// Assembling the unsigned transaction takes a network round-trip.
const SIGN_BUTTON_TIMEOUT: Duration = Duration::from_secs(20);

/// Rejection of a bad signing password is local but the dialog re-renders.
const WRONG_PASSWORD_TIMEOUT: Duration = Duration::from_secs(20);

/// "Sent" waits on chain confirmation.
const SENT_TIMEOUT: Duration = Duration::from_secs(60);

/// Name registration confirms on chain before the dapp shows ownership.
const OWNERSHIP_TIMEOUT: Duration = Duration::from_secs(120);

/// Recover the sender, make sure it can fund the transfer, add the
/// recipient as a contact by public key, optionally gather both into a
/// group chat, then send 0.1 and sign. The wrong-password case asserts the
/// rejection; the others assert the receipt and the recipient's balance.
pub async fn send_transaction(
    session: &DriverSession,
    fixtures: &Fixtures,
    chain: &ChainClient,
    case: &TransferCase,
) -> E2eResult<()> {
    let sender = fixtures.transaction_user(case.sender);
    let recipient = fixtures.transaction_user(case.recipient);

    let home = HomeView::new(session);
    set_password_as_new_user(&home).await?;
    let chats = home.get_chats().await?;
    recover_access(&chats, &sender.passphrase, &sender.password, &sender.username).await?;
    chats.wait_for_syncing_complete().await?;

    let initial_balance_recipient = chain.get_balance(&recipient.address).await?;
    chain.ensure_working_balance(&sender.address).await?;

    chats.plus_button().await?.click().await?;
    chats.add_new_contact().await?.click().await?;
    chats.public_key_edit_box().await?.send_keys(&recipient.public_key).await?;
    chats.confirm().await?;
    chats.confirm_public_key_button().await?.click().await?;

    if case.group_chat {
        // the app derives the display name from the public key; read it
        // back rather than assuming the fixture username
        let contact_name = chats.user_name_text().await?;
        chats.back_button().await?.click().await?;
        chats.new_group_chat_button().await?.click().await?;
        chats.contact_by_name(&contact_name).await?.click().await?;
        chats.next_button().await?.click().await?;
        chats.name_edit_box().await?.send_keys(GROUP_CHAT_NAME).await?;
        chats.save_button().await?.click().await?;
    }

    chats.send_funds_button().await?.click().await?;
    chats.first_recipient_button().await?.click().await?;
    chats.send_as_keyevent(&TRANSFER_AMOUNT.keystrokes()).await?;
    chats.send_message_button().await?.click().await?;
    chats.sign_transaction_button(SIGN_BUTTON_TIMEOUT).await?.click().await?;

    if case.wrong_password {
        chats.enter_password_input().await?.send_keys("invalid").await?;
        chats.sign_transaction_button(SIGN_BUTTON_TIMEOUT).await?.click().await?;
        chats.find_full_text("Wrong password", WRONG_PASSWORD_TIMEOUT).await?;
        return Ok(());
    }

    chats.enter_password_input().await?.send_keys(&sender.password).await?;
    chats.sign_transaction_button(SIGN_BUTTON_TIMEOUT).await?.click().await?;
    chats.find_full_text(&TRANSFER_AMOUNT.to_string(), DEFAULT_WAIT).await?;
    chats.find_full_text("Sent", SENT_TIMEOUT).await?;
    if case.group_chat {
        // the receipt line renders a non-breaking space, hence the double
        // space before the username
        let receipt = format!("to  {}", recipient.username);
        chats.find_full_text(&receipt, SENT_TIMEOUT).await?;
    }
    chain
        .verify_balance_is_updated(initial_balance_recipient, &recipient.address)
        .await?;
    Ok(())
}

/// Register a timestamp-derived name in the auction-house dapp, sign the
/// transaction, and check the ownership confirmation plus the fee leaving
/// the sender's balance.
pub async fn send_transaction_from_dapp(
    session: &DriverSession,
    fixtures: &Fixtures,
    chain: &ChainClient,
) -> E2eResult<()> {
    let user = fixtures.transaction_user(TransactionRole::UserB);

    let home = HomeView::new(session);
    set_password_as_new_user(&home).await?;
    let chats = home.get_chats().await?;

    let initial_balance = chain.get_balance(&user.address).await?;
    recover_access(&chats, &user.passphrase, &user.password, &user.username).await?;
    chain.ensure_working_balance(&user.address).await?;

    let contacts = chats.open_contacts().await?;
    let auction_house = contacts.open_auction_house().await?;

    auction_house.toggle_navigation_button().await?.click().await?;
    auction_house.new_auction_button().await?.click().await?;
    auction_house.name_to_reserve_input().await?.click().await?;
    let auction_name = auction_name_now();
    auction_house.send_as_keyevent(&auction_name).await?;
    auction_house.register_name_button().await?.click().await?;

    chats.sign_transaction_button(SIGN_BUTTON_TIMEOUT).await?.click().await?;
    chats.enter_password_input().await?.send_keys(&user.password).await?;
    chats.sign_transaction_button(SIGN_BUTTON_TIMEOUT).await?.click().await?;

    let confirmation = format!("You are the proud owner of the name: {}", auction_name);
    auction_house.find_full_text(&confirmation, OWNERSHIP_TIMEOUT).await?;
    chain.verify_balance_decreased(initial_balance, &user.address).await?;
    Ok(())
}

/// Minute-resolution timestamp, unique per run and typeable as key events.
fn auction_name_now() -> String {
    Local::now().format("%Y-%m-%d-%H-%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_amount_renders_and_types_consistently() {
        // the chat shows "0.1" while the amount field receives "0,1"
        assert_eq!(TRANSFER_AMOUNT.to_string(), "0.1");
        assert_eq!(TRANSFER_AMOUNT.keystrokes(), "0,1");
        assert!(TRANSFER_AMOUNT < Balance::MIN_WORKING);
    }

    #[test]
    fn auction_names_only_use_key_event_characters() {
        let name = auction_name_now();
        assert!(name.chars().all(|c| c.is_ascii_digit() || c == '-'));
        // e.g. 2026-08-06-14-05
        assert_eq!(name.len(), 16);
    }
}
