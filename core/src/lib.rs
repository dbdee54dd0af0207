use std::path::PathBuf;

use anyhow::Context;

pub mod classify;
pub mod commands;
pub mod config;
pub mod contract;
pub mod display;
pub mod error;
pub mod network;
pub mod notify;
pub mod service;
pub mod session;
pub mod validate;
pub mod watcher;

pub use commands::Command;
pub use config::{ClaimConfig, TokenConfig};
pub use contract::ContractCall;
pub use error::{ClaimError, Error, Result, ValidationError};
pub use network::{ChainBackend, ChainStatus, Identity, Receipt, RpcBackend, WriteFailure};
pub use notify::{AnalyticsEvent, Level, Notification};
pub use service::ClaimService;
pub use session::{ClaimAttempt, ClaimSession, Phase, ReceiptStatus, SubmitOutcome};
pub use validate::{validate_label, MAX_LABEL_LEN};

pub use alloy_primitives::{Address, TxHash};

/// XDG-compliant config directory for subclaim.
/// Linux: `~/.config/subclaim/`, macOS: `~/Library/Application Support/subclaim/`
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let dir = dirs::config_dir()
        .context("Cannot determine config directory")?
        .join("subclaim");
    Ok(dir)
}
