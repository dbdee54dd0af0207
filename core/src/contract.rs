//! ABI bindings for the registrar, the qualifying token and ENS.

use alloy_primitives::{hex, Address, Bytes};
use alloy_sol_types::{sol, Revert, SolCall, SolError};

use crate::config::ClaimConfig;

sol! {
    /// Subdomain registrar: one name per qualifying token.
    interface ISubdomainRegistrar {
        function setDomain(string calldata name) external;
    }

    interface IERC721 {
        function balanceOf(address owner) external view returns (uint256 balance);
    }

    interface IEnsRegistry {
        function resolver(bytes32 node) external view returns (address resolver);
    }

    interface IEnsResolver {
        function addr(bytes32 node) external view returns (address addr);
        function name(bytes32 node) external view returns (string memory name);
        function text(bytes32 node, string calldata key) external view returns (string memory value);
    }
}

pub const CLAIM_METHOD: &str = "setDomain";

/// A fully-bound contract write, ready for the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub to: Address,
    pub chain_id: u64,
    pub method: &'static str,
    pub data: Bytes,
}

/// Bind `label` as the sole argument of `setDomain` on the configured registrar.
pub fn claim_call(config: &ClaimConfig, label: &str) -> ContractCall {
    let call = ISubdomainRegistrar::setDomainCall {
        name: label.to_string(),
    };
    ContractCall {
        to: config.registrar,
        chain_id: config.chain_id,
        method: CLAIM_METHOD,
        data: call.abi_encode().into(),
    }
}

/// Decode `Error(string)` revert data into its reason.
pub fn decode_revert(data: &[u8]) -> Option<String> {
    Revert::abi_decode(data, true).ok().map(|r| r.reason)
}

/// Same as [`decode_revert`], from a `0x`-prefixed hex string.
pub fn decode_revert_hex(data: &str) -> Option<String> {
    let bytes = hex::decode(data).ok()?;
    decode_revert(&bytes)
}
