//! Scenario metadata: names, tags and the literal case matrices.
//!
//! The matrices are data, not control flow — each entry pins the exact
//! input and the exact text the app must answer with, so a reviewer can
//! read the whole behavior table in one place.

use std::fmt;
use std::str::FromStr;

use meridian_common::TransactionRole;
use serde::{Deserialize, Serialize};

use crate::error::E2eError;

/// Category tags the runner filters by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    All,
    Transaction,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::All => write!(f, "all"),
            Tag::Transaction => write!(f, "transaction"),
        }
    }
}

impl FromStr for Tag {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Tag::All),
            "transaction" => Ok(Tag::Transaction),
            other => Err(E2eError::UnknownTag(other.to_string())),
        }
    }
}

/// A scenario as the runner sees it: a name, its tags, and the case ids it
/// is parameterized over (empty for single-shot scenarios).
#[derive(Debug, Clone, Copy)]
pub struct ScenarioInfo {
    pub name: &'static str,
    pub tags: &'static [Tag],
    pub cases: &'static [&'static str],
}

impl ScenarioInfo {
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Display labels, `name[case]` per case or just `name`.
    pub fn case_labels(&self) -> Vec<String> {
        if self.cases.is_empty() {
            vec![self.name.to_string()]
        } else {
            self.cases
                .iter()
                .map(|case| format!("{}[{}]", self.name, case))
                .collect()
        }
    }
}

/// Every scenario the suite knows, in execution order.
pub const SCENARIOS: &[ScenarioInfo] = &[
    ScenarioInfo {
        name: "recover_access",
        tags: &[Tag::All],
        cases: &[],
    },
    ScenarioInfo {
        name: "sign_in",
        tags: &[Tag::All],
        cases: &["valid", "invalid"],
    },
    ScenarioInfo {
        name: "password",
        tags: &[Tag::All],
        cases: &["short", "mismatch"],
    },
    ScenarioInfo {
        name: "send_transaction",
        tags: &[Tag::All, Tag::Transaction],
        cases: &["group_chat", "one_to_one_chat", "wrong_password"],
    },
    ScenarioInfo {
        name: "send_transaction_from_dapp",
        tags: &[Tag::All, Tag::Transaction],
        cases: &[],
    },
];

pub fn find(name: &str) -> Option<&'static ScenarioInfo> {
    SCENARIOS.iter().find(|s| s.name == name)
}

pub fn tagged(tag: Tag) -> Vec<&'static ScenarioInfo> {
    SCENARIOS.iter().filter(|s| s.has_tag(tag)).collect()
}

/// Sign-in outcomes are mutually exclusive and exhaustive: the right
/// password reaches the chat list, anything else is rejected.
#[derive(Debug, Clone, Copy)]
pub struct SignInCase {
    pub id: &'static str,
    pub input: &'static str,
    pub outcome: &'static str,
}

pub const SIGN_IN_CASES: &[SignInCase] = &[
    SignInCase {
        id: "valid",
        input: "qwerty1234",
        outcome: "Chats",
    },
    SignInCase {
        id: "invalid",
        input: "12345ewq",
        outcome: "Wrong password",
    },
];

pub fn sign_in_case(id: &str) -> Option<&'static SignInCase> {
    SIGN_IN_CASES.iter().find(|c| c.id == id)
}

/// Password-validation cases. `short` must be rejected before any
/// confirmation step; `mismatch` gets a valid-length password and a
/// different confirmation.
#[derive(Debug, Clone, Copy)]
pub struct PasswordCase {
    pub id: &'static str,
    pub input: &'static str,
    pub confirmation: Option<&'static str>,
    pub outcome: &'static str,
}

pub const PASSWORD_CASES: &[PasswordCase] = &[
    PasswordCase {
        id: "short",
        input: "qwe1",
        confirmation: None,
        outcome: "Password should be not less then 6 symbols.",
    },
    PasswordCase {
        id: "mismatch",
        input: "mismatch1234",
        confirmation: Some("qwerty1234"),
        outcome: "Password confirmation doesn't match password.",
    },
];

pub fn password_case(id: &str) -> Option<&'static PasswordCase> {
    PASSWORD_CASES.iter().find(|c| c.id == id)
}

/// Transfer cases assign the two fixed identities to sender/recipient
/// roles and pick the chat shape and signing outcome.
#[derive(Debug, Clone, Copy)]
pub struct TransferCase {
    pub id: &'static str,
    pub recipient: TransactionRole,
    pub sender: TransactionRole,
    pub group_chat: bool,
    pub wrong_password: bool,
}

pub const TRANSFER_CASES: &[TransferCase] = &[
    TransferCase {
        id: "group_chat",
        recipient: TransactionRole::UserA,
        sender: TransactionRole::UserB,
        group_chat: true,
        wrong_password: false,
    },
    TransferCase {
        id: "one_to_one_chat",
        recipient: TransactionRole::UserB,
        sender: TransactionRole::UserA,
        group_chat: false,
        wrong_password: false,
    },
    TransferCase {
        id: "wrong_password",
        recipient: TransactionRole::UserA,
        sender: TransactionRole::UserB,
        group_chat: false,
        wrong_password: true,
    },
];

pub fn transfer_case(id: &str) -> Option<&'static TransferCase> {
    TRANSFER_CASES.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn registry_matches_case_matrices() {
        assert_eq!(SCENARIOS.len(), 5);

        let sign_in = find("sign_in").unwrap();
        assert_eq!(
            sign_in.cases,
            SIGN_IN_CASES.iter().map(|c| c.id).collect::<Vec<_>>().as_slice()
        );

        let password = find("password").unwrap();
        assert_eq!(
            password.cases,
            PASSWORD_CASES.iter().map(|c| c.id).collect::<Vec<_>>().as_slice()
        );

        let transfer = find("send_transaction").unwrap();
        assert_eq!(
            transfer.cases,
            TRANSFER_CASES.iter().map(|c| c.id).collect::<Vec<_>>().as_slice()
        );
    }

    #[test]
    fn every_scenario_is_tagged_all() {
        for scenario in SCENARIOS {
            assert!(scenario.has_tag(Tag::All), "{} missing all tag", scenario.name);
        }
    }

    #[test]
    fn transaction_tag_selects_the_wallet_scenarios() {
        let names: Vec<_> = tagged(Tag::Transaction).iter().map(|s| s.name).collect();
        assert_eq!(names, ["send_transaction", "send_transaction_from_dapp"]);
    }

    #[test]
    fn case_labels_follow_bracket_convention() {
        assert_eq!(find("recover_access").unwrap().case_labels(), ["recover_access"]);
        assert_eq!(
            find("sign_in").unwrap().case_labels(),
            ["sign_in[valid]", "sign_in[invalid]"]
        );
    }

    #[test_case("valid", "qwerty1234", "Chats")]
    #[test_case("invalid", "12345ewq", "Wrong password")]
    fn sign_in_matrix(id: &str, input: &str, outcome: &str) {
        let case = sign_in_case(id).unwrap();
        assert_eq!(case.input, input);
        assert_eq!(case.outcome, outcome);
    }

    #[test]
    fn short_password_case_skips_confirmation() {
        let case = password_case("short").unwrap();
        assert!(case.input.len() < 6);
        assert!(case.confirmation.is_none());
        assert_eq!(case.outcome, "Password should be not less then 6 symbols.");
    }

    #[test]
    fn mismatch_case_confirms_with_a_different_value() {
        let case = password_case("mismatch").unwrap();
        let confirmation = case.confirmation.unwrap();
        assert!(case.input.len() >= 6);
        assert!(confirmation.len() >= 6);
        assert_ne!(case.input, confirmation);
        assert_eq!(case.outcome, "Password confirmation doesn't match password.");
    }

    #[test_case("group_chat", TransactionRole::UserA, TransactionRole::UserB)]
    #[test_case("one_to_one_chat", TransactionRole::UserB, TransactionRole::UserA)]
    #[test_case("wrong_password", TransactionRole::UserA, TransactionRole::UserB)]
    fn transfer_roles(id: &str, recipient: TransactionRole, sender: TransactionRole) {
        let case = transfer_case(id).unwrap();
        assert_eq!(case.recipient, recipient);
        assert_eq!(case.sender, sender);
        assert_ne!(case.recipient, case.sender);
    }

    #[test]
    fn only_group_chat_builds_a_group() {
        for case in TRANSFER_CASES {
            assert_eq!(case.group_chat, case.id == "group_chat");
            assert_eq!(case.wrong_password, case.id == "wrong_password");
        }
    }

    #[test]
    fn tags_parse_from_cli_strings() {
        assert!(matches!("all".parse::<Tag>(), Ok(Tag::All)));
        assert!(matches!("transaction".parse::<Tag>(), Ok(Tag::Transaction)));
        assert!("smoke".parse::<Tag>().is_err());
    }
}
