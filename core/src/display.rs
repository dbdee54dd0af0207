/// Output formatting for the REPL and one-shot mode.
use alloy_primitives::{Address, TxHash};

use crate::network::{ChainStatus, Identity};
use crate::notify::Notification;

/// `0x1234…abcd`: first four and last four hex digits.
#[must_use]
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}

#[must_use]
pub fn format_identity(identity: &Identity) -> String {
    let mut out = format!("  Address: {}", identity.address.to_checksum(None));
    match &identity.ens_name {
        Some(name) => out.push_str(&format!("\n  ENS:     {name}")),
        None => out.push_str("\n  ENS:     (none)"),
    }
    if let Some(url) = &identity.avatar_url {
        out.push_str(&format!("\n  Avatar:  {url}"));
    }
    out
}

#[must_use]
pub fn format_identity_json(identity: &Identity) -> String {
    serde_json::json!({
        "address": identity.address.to_checksum(None),
        "ens_name": identity.ens_name,
        "avatar_url": identity.avatar_url,
    })
    .to_string()
}

#[must_use]
pub fn format_status(status: &ChainStatus) -> String {
    format!(
        "  Chain id: {}\n  Block:    {}\n  Wallet:   {}\n  Reads:    {}",
        status.chain_id, status.block_number, status.wallet_url, status.read_url,
    )
}

#[must_use]
pub fn format_status_json(status: &ChainStatus) -> String {
    serde_json::json!({
        "chain_id": status.chain_id,
        "block_number": status.block_number,
        "wallet_url": status.wallet_url,
        "read_url": status.read_url,
    })
    .to_string()
}

/// One line per notification, oldest first.
#[must_use]
pub fn format_notifications(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result of a `claim` command as JSON. `registered` is false for every
/// outcome short of a successful receipt.
#[must_use]
pub fn format_claim_json(
    name: &str,
    tx_hash: Option<TxHash>,
    registered: bool,
    notifications: &[Notification],
) -> String {
    serde_json::json!({
        "name": name,
        "tx_hash": tx_hash.map(|h| h.to_string()),
        "registered": registered,
        "notifications": notifications,
    })
    .to_string()
}
