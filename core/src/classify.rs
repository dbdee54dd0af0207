//! Map wallet-boundary failures onto the claim error taxonomy.
//!
//! Structured signals win: an EIP-1193 rejection code, then a decoded
//! `Error(string)` revert reason. Substring matching over free text is the
//! last resort.

use crate::contract::decode_revert_hex;
use crate::error::ClaimError;
use crate::network::{WriteFailure, USER_REJECTED_CODE};

const NOT_AUTHORISED: &str = "Not authorised";
const NAME_EXISTS: &str = "sub-domain already exists";
const USER_REJECTED: &str = "user rejected transaction";
const TOKEN_ALREADY_SET: &str = "Token has already been set";

const REASON_MARKER: &str = "(reason=\"";
const METHOD_MARKER: &str = "\", method=";

/// Names and labels the classified messages need.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyContext<'a> {
    pub label: &'a str,
    pub parent_domain: &'a str,
    pub token_label: &'a str,
}

pub fn classify(failure: &WriteFailure, ctx: &ClassifyContext<'_>) -> ClaimError {
    match failure {
        WriteFailure::Rejected => ClaimError::UserRejected,
        WriteFailure::Rpc { code, .. } if *code == USER_REJECTED_CODE => ClaimError::UserRejected,
        WriteFailure::Reverted { reason } => classify_text(Some(reason.as_str()), reason, ctx),
        WriteFailure::Rpc { message, data, .. } => {
            let reason = data.as_deref().and_then(decode_revert_hex);
            classify_text(reason.as_deref(), message, ctx)
        }
        WriteFailure::Transport(message) => classify_text(None, message, ctx),
    }
}

fn classify_text(revert_reason: Option<&str>, message: &str, ctx: &ClassifyContext<'_>) -> ClaimError {
    let mentions = |needle: &str| {
        revert_reason.is_some_and(|r| r.contains(needle)) || message.contains(needle)
    };

    if mentions(NOT_AUTHORISED) {
        ClaimError::Unauthorized {
            token_label: ctx.token_label.to_string(),
        }
    } else if mentions(NAME_EXISTS) {
        ClaimError::NameTaken {
            label: ctx.label.to_string(),
            parent: ctx.parent_domain.to_string(),
        }
    } else if mentions(USER_REJECTED) {
        ClaimError::UserRejected
    } else if mentions(TOKEN_ALREADY_SET) {
        // Holdings are filled in by the caller, which knows the account.
        ClaimError::TokenAlreadyUsed {
            token_label: ctx.token_label.to_string(),
            multiple_tokens: false,
        }
    } else {
        let reason = revert_reason
            .or_else(|| extract_reason(message))
            .unwrap_or(message)
            .trim();
        ClaimError::Unclassified {
            reason: if reason.is_empty() {
                "Transaction failed".to_string()
            } else {
                reason.to_string()
            },
        }
    }
}

/// Text between `(reason="` and `", method=` in an ethers-style error
/// message. `None` unless both markers are present.
pub fn extract_reason(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once(REASON_MARKER)?;
    let (reason, _) = rest.split_once(METHOD_MARKER)?;
    Some(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::hex;
    use alloy_sol_types::{Revert, SolError};

    fn ctx() -> ClassifyContext<'static> {
        ClassifyContext {
            label: "alice",
            parent_domain: "test.eth",
            token_label: "Lil Noun",
        }
    }

    fn rpc(code: i64, message: &str) -> WriteFailure {
        WriteFailure::Rpc {
            code,
            message: message.to_string(),
            data: None,
        }
    }

    #[test]
    fn rejection_code_wins_over_text() {
        let err = classify(&rpc(4001, "sub-domain already exists"), &ctx());
        assert_eq!(err, ClaimError::UserRejected);
        assert_eq!(classify(&WriteFailure::Rejected, &ctx()), ClaimError::UserRejected);
    }

    #[test]
    fn not_authorised_is_fixed_message() {
        let messages = [
            "execution reverted: Not authorised",
            "cannot estimate gas (reason=\"Not authorised\", method=\"estimateGas\")",
            "Not authorised sub-domain already exists",
        ];
        for message in messages {
            let err = classify(&rpc(-32000, message), &ctx());
            assert_eq!(err.to_string(), "You don't own a Lil Noun", "{message}");
        }
    }

    #[test]
    fn decoded_revert_reason_is_classified() {
        let failure = WriteFailure::Reverted {
            reason: "Not authorised".into(),
        };
        assert!(matches!(
            classify(&failure, &ctx()),
            ClaimError::Unauthorized { .. }
        ));
    }

    #[test]
    fn revert_data_inside_rpc_failure_is_decoded() {
        let data = Revert {
            reason: "Token has already been set".to_string(),
        }
        .abi_encode();
        let failure = WriteFailure::Rpc {
            code: -32603,
            message: "Internal JSON-RPC error.".into(),
            data: Some(hex::encode_prefixed(data)),
        };
        assert!(matches!(
            classify(&failure, &ctx()),
            ClaimError::TokenAlreadyUsed { .. }
        ));

        let paused = WriteFailure::Rpc {
            code: 3,
            message: "execution reverted".into(),
            data: Some(hex::encode_prefixed(
                Revert {
                    reason: "Paused".to_string(),
                }
                .abi_encode(),
            )),
        };
        assert_eq!(
            classify(&paused, &ctx()),
            ClaimError::Unclassified {
                reason: "Paused".into()
            }
        );
    }

    #[test]
    fn name_collision_names_the_subdomain() {
        let err = classify(&rpc(3, "execution reverted: sub-domain already exists"), &ctx());
        assert_eq!(err.to_string(), "alice.test.eth already exists");
    }

    #[test]
    fn legacy_rejection_text() {
        let err = classify(
            &WriteFailure::Transport("user rejected transaction (action=\"sendTransaction\")".into()),
            &ctx(),
        );
        assert_eq!(err, ClaimError::UserRejected);
    }

    #[test]
    fn token_already_set() {
        let err = classify(&rpc(-32603, "Token has already been set"), &ctx());
        assert_eq!(
            err,
            ClaimError::TokenAlreadyUsed {
                token_label: "Lil Noun".into(),
                multiple_tokens: false,
            }
        );
    }

    #[test]
    fn unclassified_extracts_reason() {
        let message =
            "cannot estimate gas (reason=\"Paused\", method=\"estimateGas\", transaction={})";
        let err = classify(&rpc(-32000, message), &ctx());
        assert_eq!(
            err,
            ClaimError::Unclassified {
                reason: "Paused".into()
            }
        );
    }

    #[test]
    fn unclassified_without_markers_keeps_message() {
        let err = classify(&rpc(-32000, "insufficient funds for gas"), &ctx());
        assert_eq!(err.to_string(), "insufficient funds for gas");

        let half = "cannot estimate gas (reason=\"Paused\"";
        assert_eq!(extract_reason(half), None);
        assert_eq!(classify(&rpc(-32000, half), &ctx()).to_string(), half);
    }

    #[test]
    fn unclassified_empty_message_has_fallback() {
        let err = classify(&WriteFailure::Transport(String::new()), &ctx());
        assert_eq!(err.to_string(), "Transaction failed");
    }
}
