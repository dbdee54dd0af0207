//! ENS identity lookups: primary name and avatar for the connected account.

use alloy_primitives::{address, hex, keccak256, Address, B256};
use alloy_sol_types::SolCall;
use tracing::debug;

use super::{ChainBackend, Identity};
use crate::contract::{IEnsRegistry, IEnsResolver};
use crate::error::{Error, Result};

/// ENS registry, same address on mainnet and the public testnets.
pub const ENS_REGISTRY: Address = address!("00000000000c2e074ec69a0dfb2997ba6c7d2e1e");

const IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// EIP-137 namehash.
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }
    for label in name.rsplit('.') {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(keccak256(label.as_bytes()).as_slice());
        node = keccak256(buf);
    }
    node
}

/// `<lowercase hex address>.addr.reverse`
pub fn reverse_name(address: &Address) -> String {
    format!("{}.addr.reverse", hex::encode(address))
}

async fn resolver_for<B: ChainBackend>(backend: &B, node: B256) -> Result<Option<Address>> {
    let data = IEnsRegistry::resolverCall { node }.abi_encode();
    let out = backend.call(ENS_REGISTRY, data.into()).await?;
    let resolver = IEnsRegistry::resolverCall::abi_decode_returns(&out, true)
        .map_err(|e| Error::Network(format!("Bad resolver() result: {e}")))?
        .resolver;
    Ok((resolver != Address::ZERO).then_some(resolver))
}

/// Primary ENS name of `address`, only if it resolves back to the same address.
pub async fn lookup_name<B: ChainBackend>(backend: &B, address: Address) -> Result<Option<String>> {
    let node = namehash(&reverse_name(&address));
    let Some(resolver) = resolver_for(backend, node).await? else {
        return Ok(None);
    };

    let out = backend
        .call(resolver, IEnsResolver::nameCall { node }.abi_encode().into())
        .await?;
    let name = IEnsResolver::nameCall::abi_decode_returns(&out, true)
        .map_err(|e| Error::Network(format!("Bad name() result: {e}")))?
        .name;
    if name.is_empty() {
        return Ok(None);
    }

    // Anyone can set a reverse record; trust it only when the forward record agrees.
    let forward = namehash(&name);
    let Some(forward_resolver) = resolver_for(backend, forward).await? else {
        return Ok(None);
    };
    let out = backend
        .call(
            forward_resolver,
            IEnsResolver::addrCall { node: forward }.abi_encode().into(),
        )
        .await?;
    let resolved = IEnsResolver::addrCall::abi_decode_returns(&out, true)
        .map_err(|e| Error::Network(format!("Bad addr() result: {e}")))?
        .addr;

    if resolved == address {
        Ok(Some(name))
    } else {
        debug!(%address, %name, %resolved, "reverse record does not resolve back");
        Ok(None)
    }
}

/// `avatar` text record of `name`, as a fetchable HTTP(S) URL.
pub async fn lookup_avatar<B: ChainBackend>(backend: &B, name: &str) -> Result<Option<String>> {
    let node = namehash(name);
    let Some(resolver) = resolver_for(backend, node).await? else {
        return Ok(None);
    };
    let data = IEnsResolver::textCall {
        node,
        key: "avatar".to_string(),
    }
    .abi_encode();
    let out = backend.call(resolver, data.into()).await?;
    let record = IEnsResolver::textCall::abi_decode_returns(&out, true)
        .map_err(|e| Error::Network(format!("Bad text() result: {e}")))?
        .value;
    Ok(avatar_url(&record))
}

/// Map an avatar record to an HTTP(S) URL. NFT references (`eip155:`) are not
/// resolved.
pub fn avatar_url(record: &str) -> Option<String> {
    let record = record.trim();
    if record.starts_with("https://") || record.starts_with("http://") {
        Some(record.to_string())
    } else if let Some(cid) = record.strip_prefix("ipfs://") {
        Some(format!("{IPFS_GATEWAY}{}", cid.trim_start_matches("ipfs/")))
    } else {
        None
    }
}

/// Address plus whatever ENS data resolves. Lookup failures only cost the
/// decoration, never the identity.
pub async fn resolve_identity<B: ChainBackend>(backend: &B, address: Address) -> Identity {
    let ens_name = match lookup_name(backend, address).await {
        Ok(name) => name,
        Err(e) => {
            debug!(%address, error = %e, "ENS name lookup failed");
            None
        }
    };
    let avatar_url = match &ens_name {
        Some(name) => match lookup_avatar(backend, name).await {
            Ok(url) => url,
            Err(e) => {
                debug!(%name, error = %e, "ENS avatar lookup failed");
                None
            }
        },
        None => None,
    };
    Identity {
        address,
        ens_name,
        avatar_url,
    }
}

/// Download avatar image bytes for display.
pub async fn fetch_avatar(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}
