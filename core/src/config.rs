//! Claim configuration: built-in defaults, optional JSON file, CLI overrides.

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use alloy_primitives::{address, Address};
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Subdomain registrar on mainnet.
pub const DEFAULT_REGISTRAR: Address = address!("502441d44d38c32c4ef054720d052f196b3bf9da");

/// Lil Nouns ERC-721 contract, the qualifying token.
pub const DEFAULT_TOKEN_CONTRACT: Address = address!("4b10701bfd7bfedc47d50562b76b436fbb5bdb3b");

pub const MAINNET_CHAIN_ID: u64 = 1;

/// Frame's local JSON-RPC endpoint.
pub const DEFAULT_WALLET_URL: &str = "http://127.0.0.1:1248";

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 4_000;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TokenConfig {
    /// ERC-721 contract used to count the holder's tokens. `None` skips the lookup.
    pub contract: Option<Address>,
    /// Human name of one token, e.g. "Lil Noun".
    pub label: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            contract: Some(DEFAULT_TOKEN_CONTRACT),
            label: "Lil Noun".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ClaimConfig {
    pub registrar: Address,
    pub chain_id: u64,
    pub parent_domain: String,
    pub token: TokenConfig,
    /// JSON-RPC endpoint of the signing wallet.
    pub wallet_url: String,
    /// Separate node for receipts and ENS reads. Falls back to the wallet.
    pub rpc_url: Option<String>,
    pub poll_interval_ms: u64,
    pub explorer_url: String,
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self {
            registrar: DEFAULT_REGISTRAR,
            chain_id: MAINNET_CHAIN_ID,
            parent_domain: "test.eth".to_string(),
            token: TokenConfig::default(),
            wallet_url: DEFAULT_WALLET_URL.to_string(),
            rpc_url: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            explorer_url: "https://etherscan.io".to_string(),
        }
    }
}

impl ClaimConfig {
    /// Load from an explicit path, or from the default location if a file
    /// exists there. Missing default file means built-in defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = default_config_path()?;
                if default.exists() {
                    Self::from_file(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Endpoint used for receipts and ENS reads.
    pub fn read_url(&self) -> &str {
        self.rpc_url.as_deref().unwrap_or(&self.wallet_url)
    }

    /// Full name for a label, e.g. `alice.test.eth`.
    pub fn full_name(&self, label: &str) -> String {
        format!("{label}.{}", self.parent_domain)
    }

    pub fn explorer_tx_url(&self, tx_hash: &impl std::fmt::Display) -> String {
        format!("{}/tx/{tx_hash}", self.explorer_url.trim_end_matches('/'))
    }

    /// Check endpoint URLs before any connection is made.
    pub fn validate(&self, allow_insecure: bool) -> Result<()> {
        if self.parent_domain.is_empty() {
            return Err(Error::Config("Parent domain cannot be empty.".into()));
        }
        validate_endpoint_url(&self.wallet_url, allow_insecure)?;
        if let Some(url) = &self.rpc_url {
            validate_endpoint_url(url, allow_insecure)?;
        }
        Ok(())
    }
}

/// `<config dir>/subclaim/config.json`
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(crate::config_dir()?.join("config.json"))
}

/// Accept HTTPS anywhere and plain HTTP on loopback. Other HTTP endpoints
/// need `allow_insecure`.
pub fn validate_endpoint_url(url: &str, allow_insecure: bool) -> Result<()> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| Error::Config(format!("Invalid endpoint URL '{url}': {e}")))?;
    match parsed.scheme() {
        "https" => Ok(()),
        "http" if allow_insecure || is_loopback(parsed.host_str()) => Ok(()),
        "http" => Err(Error::Config(format!(
            "Refusing to connect over plain HTTP: {url}\nUse --insecure to allow unencrypted connections."
        ))),
        other => Err(Error::Config(format!(
            "Invalid endpoint URL scheme '{other}': {url}\nExpected an https:// URL."
        ))),
    }
}

fn is_loopback(host: Option<&str>) -> bool {
    let Some(host) = host else {
        return false;
    };
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .map(|ip| ip.is_loopback())
        .unwrap_or(false)
}
