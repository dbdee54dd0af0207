use alloy_primitives::{Address, TxHash};
use serde::Serialize;

/// Mined transaction outcome. Status `0` means the call reverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: TxHash,
    pub status: u64,
    pub block_number: Option<u64>,
}

impl Receipt {
    pub fn succeeded(&self) -> bool {
        self.status != 0
    }
}

/// How a contract write failed at the wallet boundary, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteFailure {
    /// The wallet reported an explicit user rejection.
    Rejected,
    /// Execution reverted with a decoded reason.
    Reverted { reason: String },
    /// JSON-RPC error object, with hex revert data when supplied.
    Rpc {
        code: i64,
        message: String,
        data: Option<String>,
    },
    /// The request never produced an RPC answer.
    Transport(String),
}

/// Connected account as shown in the identity chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub address: Address,
    /// Primary ENS name, forward-verified. Empty display when `None`.
    pub ens_name: Option<String>,
    /// HTTP(S) avatar URL from the `avatar` text record.
    pub avatar_url: Option<String>,
}

impl Identity {
    pub fn anonymous(address: Address) -> Self {
        Self {
            address,
            ens_name: None,
            avatar_url: None,
        }
    }

    /// ENS name when known, else the empty string.
    pub fn display_name(&self) -> &str {
        self.ens_name.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChainStatus {
    pub chain_id: u64,
    pub block_number: u64,
    pub wallet_url: String,
    pub read_url: String,
}
