/// Chain access: the backend trait the service talks to, and its JSON-RPC implementation.
pub mod ens;
mod rpc;
mod types;

pub use types::*;

use std::future::Future;

use alloy_primitives::{hex, Address, Bytes, TxHash};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::ClaimConfig;
use crate::contract::{decode_revert_hex, ContractCall};
use crate::error::{Error, Result};
use rpc::{parse_quantity, RpcTransport};

/// EIP-1193 "user rejected the request".
pub const USER_REJECTED_CODE: i64 = 4001;

/// Everything the claim flow needs from a wallet and a node.
pub trait ChainBackend: Send + Sync {
    /// Connected account, asking the wallet for access when none is exposed yet.
    fn account(&self) -> impl Future<Output = Result<Address>> + Send;

    fn chain_id(&self) -> impl Future<Output = Result<u64>> + Send;

    /// Ask the wallet to move to `chain_id`.
    fn switch_chain(&self, chain_id: u64) -> impl Future<Output = Result<()>> + Send;

    fn block_number(&self) -> impl Future<Output = Result<u64>> + Send;

    /// Hand the call to the wallet for signing and broadcast.
    fn send_transaction(
        &self,
        from: Address,
        call: &ContractCall,
    ) -> impl Future<Output = std::result::Result<TxHash, WriteFailure>> + Send;

    /// `None` while the transaction is still pending.
    fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> impl Future<Output = Result<Option<Receipt>>> + Send;

    /// Read-only `eth_call` against the latest block.
    fn call(&self, to: Address, data: Bytes) -> impl Future<Output = Result<Bytes>> + Send;

    /// Drop the session and revoke account access where the wallet supports it.
    fn disconnect(&self) -> impl Future<Output = Result<()>> + Send;
}

/// Wallet endpoint for signing, optional separate node for reads.
pub struct RpcBackend {
    wallet: RpcTransport,
    reader: Option<RpcTransport>,
    session: Mutex<Option<Address>>,
}

impl RpcBackend {
    pub fn new(config: &ClaimConfig, allow_insecure: bool) -> Result<Self> {
        config.validate(allow_insecure)?;
        let wallet = RpcTransport::new(&config.wallet_url)?;
        let reader = match &config.rpc_url {
            Some(url) => Some(RpcTransport::new(url)?),
            None => None,
        };
        Ok(Self {
            wallet,
            reader,
            session: Mutex::new(None),
        })
    }

    pub fn wallet_url(&self) -> &str {
        self.wallet.url()
    }

    pub fn read_url(&self) -> &str {
        self.reads().url()
    }

    fn reads(&self) -> &RpcTransport {
        self.reader.as_ref().unwrap_or(&self.wallet)
    }

    async fn first_account(&self, method: &str) -> Result<Option<Address>> {
        let accounts = self.wallet.prompt(method, json!([])).await?;
        let first = accounts
            .as_array()
            .and_then(|a| a.first())
            .and_then(|v| v.as_str());
        match first {
            Some(s) => {
                let address = s
                    .parse::<Address>()
                    .map_err(|e| Error::Network(format!("Invalid account '{s}': {e}")))?;
                Ok(Some(address))
            }
            None => Ok(None),
        }
    }
}

impl ChainBackend for RpcBackend {
    async fn account(&self) -> Result<Address> {
        let mut session = self.session.lock().await;
        if let Some(address) = *session {
            return Ok(address);
        }

        let address = match self.first_account("eth_accounts").await? {
            Some(address) => address,
            None => self
                .first_account("eth_requestAccounts")
                .await?
                .ok_or_else(|| Error::InvalidState("Wallet exposed no accounts".into()))?,
        };
        info!(%address, wallet = %self.wallet.url(), "wallet connected");
        *session = Some(address);
        Ok(address)
    }

    async fn chain_id(&self) -> Result<u64> {
        let value = self.wallet.request("eth_chainId", json!([])).await?;
        parse_quantity(&value)
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<()> {
        self.wallet
            .prompt(
                "wallet_switchEthereumChain",
                json!([{ "chainId": format!("{chain_id:#x}") }]),
            )
            .await?;
        Ok(())
    }

    async fn block_number(&self) -> Result<u64> {
        let value = self.reads().request("eth_blockNumber", json!([])).await?;
        parse_quantity(&value)
    }

    async fn send_transaction(
        &self,
        from: Address,
        call: &ContractCall,
    ) -> std::result::Result<TxHash, WriteFailure> {
        let tx = json!({
            "from": from.to_string(),
            "to": call.to.to_string(),
            "data": hex::encode_prefixed(&call.data),
            "chainId": format!("{:#x}", call.chain_id),
        });
        debug!(method = call.method, to = %call.to, "sending transaction");

        match self.wallet.prompt("eth_sendTransaction", json!([tx])).await {
            Ok(value) => {
                let s = value.as_str().ok_or_else(|| {
                    WriteFailure::Transport(format!("Wallet returned no transaction hash: {value}"))
                })?;
                s.parse::<TxHash>().map_err(|e| {
                    WriteFailure::Transport(format!("Invalid transaction hash '{s}': {e}"))
                })
            }
            Err(e) => Err(write_failure(e)),
        }
    }

    async fn transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<Receipt>> {
        let value = self
            .reads()
            .request("eth_getTransactionReceipt", json!([tx_hash.to_string()]))
            .await?;
        parse_receipt(tx_hash, &value)
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let value = self
            .reads()
            .request(
                "eth_call",
                json!([{ "to": to.to_string(), "data": hex::encode_prefixed(&data) }, "latest"]),
            )
            .await?;
        let s = value
            .as_str()
            .ok_or_else(|| Error::Network(format!("eth_call returned {value}")))?;
        let bytes = hex::decode(s).map_err(|e| Error::Network(format!("Invalid call result: {e}")))?;
        Ok(bytes.into())
    }

    async fn disconnect(&self) -> Result<()> {
        let previous = self.session.lock().await.take();
        // Not every wallet implements EIP-2255 revocation; the local session is gone either way.
        if let Err(e) = self
            .wallet
            .request("wallet_revokePermissions", json!([{ "eth_accounts": {} }]))
            .await
        {
            debug!(error = %e, "wallet_revokePermissions unsupported");
        }
        if let Some(address) = previous {
            info!(%address, "wallet disconnected");
        }
        Ok(())
    }
}

/// Type a wallet error from `eth_sendTransaction` at the boundary.
fn write_failure(err: Error) -> WriteFailure {
    match err {
        Error::Rpc { code, .. } if code == USER_REJECTED_CODE => WriteFailure::Rejected,
        Error::Rpc {
            code,
            message,
            data,
        } => match data.as_deref().and_then(decode_revert_hex) {
            Some(reason) => WriteFailure::Reverted { reason },
            None => WriteFailure::Rpc {
                code,
                message,
                data,
            },
        },
        other => WriteFailure::Transport(other.to_string()),
    }
}

fn parse_receipt(tx_hash: TxHash, value: &Value) -> Result<Option<Receipt>> {
    if value.is_null() {
        return Ok(None);
    }
    let status = value
        .get("status")
        .ok_or_else(|| Error::Network("Receipt has no status field".into()))
        .and_then(parse_quantity)?;
    let block_number = value
        .get("blockNumber")
        .filter(|v| !v.is_null())
        .map(parse_quantity)
        .transpose()?;
    Ok(Some(Receipt {
        tx_hash,
        status,
        block_number,
    }))
}
