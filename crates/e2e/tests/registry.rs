//! Checks over the suite's pure surface: the scenario registry, the case
//! matrices and the fixture tables they draw identities from. These run
//! without a device.

use meridian_common::{Balance, Fixtures, UNIT};
use meridian_e2e::scenario::{self, Tag, SCENARIOS, TRANSFER_CASES};

#[test]
fn registry_lists_the_suite_in_execution_order() {
    let names: Vec<_> = SCENARIOS.iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        [
            "recover_access",
            "sign_in",
            "password",
            "send_transaction",
            "send_transaction_from_dapp",
        ]
    );
}

#[test]
fn tag_selection_matches_the_runner_surface() {
    assert_eq!(scenario::tagged(Tag::All).len(), SCENARIOS.len());

    let transaction: Vec<_> = scenario::tagged(Tag::Transaction)
        .iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(transaction, ["send_transaction", "send_transaction_from_dapp"]);
}

#[test]
fn case_labels_enumerate_the_full_matrix() {
    let labels: Vec<String> = SCENARIOS.iter().flat_map(|s| s.case_labels()).collect();
    assert_eq!(labels.len(), 8);
    assert!(labels.contains(&"send_transaction[one_to_one_chat]".to_string()));
    assert!(labels.contains(&"password[mismatch]".to_string()));
}

#[test]
fn transfer_cases_resolve_against_the_fixture_tables() {
    let fixtures = Fixtures::load().unwrap();
    for case in TRANSFER_CASES {
        let sender = fixtures.transaction_user(case.sender);
        let recipient = fixtures.transaction_user(case.recipient);
        assert_ne!(sender.address, recipient.address, "case {}", case.id);
        // the contact is added by public key; it must be present and well
        // formed for every case
        assert!(recipient.public_key.starts_with("0x04"), "case {}", case.id);
    }
}

#[test]
fn transfer_amount_is_a_tenth_of_the_working_threshold() {
    let amount = Balance::from_decimal_str("0.1").unwrap();
    assert_eq!(amount.base_units(), UNIT / 10);
    assert_eq!(amount.keystrokes(), "0,1");
    assert!(amount < Balance::MIN_WORKING);
}
