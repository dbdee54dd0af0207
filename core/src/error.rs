//! Domain error types for claim operations.

use thiserror::Error;

/// Rejection reasons of the validation gate. Names are never corrected,
/// only rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a name")]
    Empty,

    #[error("Capital letters and spaces are not supported")]
    Unsupported,
}

/// Every way a claim can fail, one variant per notification the user sees.
///
/// Cloneable so it can travel inside UI messages and be compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    /// Name rejected before any network interaction.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The caller does not hold a qualifying token.
    #[error("You don't own a {token_label}")]
    Unauthorized { token_label: String },

    /// The subdomain is already claimed.
    #[error("{label}.{parent} already exists")]
    NameTaken { label: String, parent: String },

    /// The signature prompt (or chain switch) was declined in the wallet.
    #[error("Transaction rejected")]
    UserRejected,

    /// The holder's token has already been used for a claim.
    #[error(
        "A name has already been claimed with {}",
        claimed_with(.multiple_tokens, .token_label)
    )]
    TokenAlreadyUsed {
        token_label: String,
        multiple_tokens: bool,
    },

    /// Anything the classifier could not place; carries the best reason it found.
    #[error("{reason}")]
    Unclassified { reason: String },

    /// The transaction was mined but reverted.
    #[error("Registration failed")]
    ReceiptFailed,

    #[error("Wallet is on chain {actual}, switch to chain {expected} to claim")]
    WrongChain { expected: u64, actual: u64 },

    #[error("No wallet connected")]
    NotConnected,
}

fn claimed_with(multiple_tokens: &bool, token_label: &str) -> String {
    if *multiple_tokens {
        "this token".to_string()
    } else {
        format!("your {token_label}")
    }
}

impl ClaimError {
    /// Long messages are rendered in a wide toast.
    pub fn is_wide(&self) -> bool {
        matches!(
            self,
            ClaimError::Validation(ValidationError::Unsupported)
                | ClaimError::TokenAlreadyUsed { .. }
                | ClaimError::Unclassified { .. }
        )
    }
}

/// Crate-wide error for configuration, transport and RPC failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration.
    #[error("{0}")]
    Config(String),

    /// HTTP transport failure or malformed response.
    #[error("{0}")]
    Network(String),

    /// JSON-RPC error object returned by the endpoint.
    #[error("RPC error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        /// Hex-encoded revert data, when the endpoint supplied any.
        data: Option<String>,
    },

    /// Operation not valid in the current session state.
    #[error("{0}")]
    InvalidState(String),

    /// Unexpected error from internal subsystems.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Network(e.to_string())
    }
}

/// Alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_taken_message() {
        let err = ClaimError::NameTaken {
            label: "alice".into(),
            parent: "test.eth".into(),
        };
        assert_eq!(err.to_string(), "alice.test.eth already exists");
    }

    #[test]
    fn token_already_used_depends_on_holdings() {
        let single = ClaimError::TokenAlreadyUsed {
            token_label: "Lil Noun".into(),
            multiple_tokens: false,
        };
        let multiple = ClaimError::TokenAlreadyUsed {
            token_label: "Lil Noun".into(),
            multiple_tokens: true,
        };
        assert_eq!(
            single.to_string(),
            "A name has already been claimed with your Lil Noun"
        );
        assert_eq!(
            multiple.to_string(),
            "A name has already been claimed with this token"
        );
    }

    #[test]
    fn validation_messages_are_distinct() {
        let empty = ClaimError::from(ValidationError::Empty);
        let unsupported = ClaimError::from(ValidationError::Unsupported);
        assert_ne!(empty.to_string(), unsupported.to_string());
        assert!(!empty.is_wide());
        assert!(unsupported.is_wide());
    }
}
