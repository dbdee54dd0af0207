use std::time::Instant;

use subclaim_core::{ClaimError, Identity, Receipt, TxHash};

// -- Messages --

#[derive(Debug, Clone)]
pub(crate) enum Message {
    // Connection
    Connect,
    Connected(Result<Identity, String>),
    AvatarLoaded(Result<Vec<u8>, String>),
    Disconnect,
    Disconnected(Result<(), String>),
    CopyAddress,

    // Claim form
    InputChanged(String),
    Submit,
    Submitted(Result<TxHash, ClaimError>),
    ReceiptArrived(Receipt),
    OpenTransaction,

    // Toasts and animation
    DismissToast(u64),
    Tick(Instant),
}
