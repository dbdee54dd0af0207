use alloy_primitives::{Address, TxHash};
use alloy_sol_types::SolCall;
use tracing::{info, warn};

use crate::classify::{classify, ClassifyContext};
use crate::config::ClaimConfig;
use crate::contract::{ContractCall, IERC721};
use crate::error::{ClaimError, Error, Result};
use crate::network::{ens, ChainBackend, ChainStatus, Identity, Receipt, USER_REJECTED_CODE};
use crate::watcher;

/// Claim operations over a chain backend. Front ends hold one of these
/// behind an `Arc` and drive a [`crate::ClaimSession`] with its results.
pub struct ClaimService<B> {
    backend: B,
    config: ClaimConfig,
}

impl<B: ChainBackend> ClaimService<B> {
    pub fn new(backend: B, config: ClaimConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &ClaimConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Connect the wallet and resolve the identity shown in the chip.
    pub async fn connect(&self) -> Result<Identity> {
        let address = self.backend.account().await?;
        Ok(ens::resolve_identity(&self.backend, address).await)
    }

    pub async fn disconnect(&self) -> Result<()> {
        self.backend.disconnect().await
    }

    pub async fn status(&self) -> Result<ChainStatus> {
        let (chain_id, block_number) =
            futures::try_join!(self.backend.chain_id(), self.backend.block_number())?;
        Ok(ChainStatus {
            chain_id,
            block_number,
            wallet_url: self.config.wallet_url.clone(),
            read_url: self.config.read_url().to_string(),
        })
    }

    /// Number of qualifying tokens `owner` holds. `None` when no token
    /// contract is configured.
    pub async fn token_holdings(&self, owner: Address) -> Result<Option<u64>> {
        let Some(token) = self.config.token.contract else {
            return Ok(None);
        };
        let data = IERC721::balanceOfCall { owner }.abi_encode();
        let out = self.backend.call(token, data.into()).await?;
        let balance = IERC721::balanceOfCall::abi_decode_returns(&out, true)
            .map_err(|e| Error::Network(format!("Bad balanceOf() result: {e}")))?
            .balance;
        Ok(Some(u64::try_from(balance).unwrap_or(u64::MAX)))
    }

    /// Send a validated claim call through the wallet. One attempt, no retry.
    pub async fn submit(&self, call: &ContractCall, label: &str) -> std::result::Result<TxHash, ClaimError> {
        let from = self.backend.account().await.map_err(|e| {
            warn!(error = %e, "no wallet account for claim");
            ClaimError::NotConnected
        })?;
        self.ensure_chain(call.chain_id).await?;

        let failure = match self.backend.send_transaction(from, call).await {
            Ok(tx_hash) => {
                info!(%tx_hash, label, %from, "claim transaction broadcast");
                return Ok(tx_hash);
            }
            Err(failure) => failure,
        };

        let ctx = ClassifyContext {
            label,
            parent_domain: &self.config.parent_domain,
            token_label: &self.config.token.label,
        };
        let mut err = classify(&failure, &ctx);
        if let ClaimError::TokenAlreadyUsed {
            multiple_tokens, ..
        } = &mut err
        {
            *multiple_tokens = match self.token_holdings(from).await {
                Ok(holdings) => holdings.is_some_and(|n| n > 1),
                Err(e) => {
                    warn!(error = %e, "token holdings lookup failed");
                    false
                }
            };
        }
        warn!(label, ?failure, error = %err, "claim submission failed");
        Err(err)
    }

    /// Block (asynchronously) until the claim transaction is mined.
    pub async fn wait_for_receipt(&self, tx_hash: TxHash) -> Receipt {
        watcher::wait_for_receipt(&self.backend, tx_hash, self.config.poll_interval()).await
    }

    async fn ensure_chain(&self, expected: u64) -> std::result::Result<(), ClaimError> {
        let actual = self.current_chain().await?;
        if actual == expected {
            return Ok(());
        }

        info!(actual, expected, "asking wallet to switch chain");
        match self.backend.switch_chain(expected).await {
            Ok(()) => {}
            Err(Error::Rpc { code, .. }) if code == USER_REJECTED_CODE => {
                return Err(ClaimError::UserRejected)
            }
            Err(e) => {
                warn!(error = %e, "chain switch failed");
                return Err(ClaimError::WrongChain { expected, actual });
            }
        }

        let now = self.current_chain().await?;
        if now == expected {
            Ok(())
        } else {
            Err(ClaimError::WrongChain {
                expected,
                actual: now,
            })
        }
    }

    async fn current_chain(&self) -> std::result::Result<u64, ClaimError> {
        self.backend.chain_id().await.map_err(|e| {
            warn!(error = %e, "chain id lookup failed");
            ClaimError::Unclassified {
                reason: e.to_string(),
            }
        })
    }
}
