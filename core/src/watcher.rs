use std::time::Duration;

use alloy_primitives::TxHash;
use tracing::{debug, info, warn};

use crate::network::{ChainBackend, Receipt};

/// Poll until the transaction has a receipt. There is no timeout: RPC errors
/// are logged and polling continues. Drop the future to stop watching.
pub async fn wait_for_receipt<B: ChainBackend>(
    backend: &B,
    tx_hash: TxHash,
    poll_interval: Duration,
) -> Receipt {
    let mut polls: u64 = 0;
    loop {
        polls += 1;
        match backend.transaction_receipt(tx_hash).await {
            Ok(Some(receipt)) => {
                info!(
                    %tx_hash,
                    status = receipt.status,
                    block = ?receipt.block_number,
                    polls,
                    "receipt observed"
                );
                return receipt;
            }
            Ok(None) => debug!(%tx_hash, polls, "transaction pending"),
            Err(e) => warn!(%tx_hash, error = %e, "receipt poll failed, retrying"),
        }
        tokio::time::sleep(poll_interval).await;
    }
}
