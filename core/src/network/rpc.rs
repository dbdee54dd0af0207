//! Minimal Ethereum JSON-RPC transport over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Signature prompts wait on a human; give them longer.
const WALLET_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

impl From<RpcErrorObject> for Error {
    fn from(err: RpcErrorObject) -> Self {
        Error::Rpc {
            data: err.data.as_ref().and_then(revert_data),
            code: err.code,
            message: err.message,
        }
    }
}

pub(crate) struct RpcTransport {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcTransport {
    pub(crate) fn new(url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(WALLET_REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    /// Plain read request. A `null` result comes back as `Value::Null`.
    pub(crate) async fn request(&self, method: &str, params: Value) -> Result<Value> {
        self.send(method, params, REQUEST_TIMEOUT).await
    }

    /// Request that may block on a wallet prompt.
    pub(crate) async fn prompt(&self, method: &str, params: Value) -> Result<Value> {
        self.send(method, params, WALLET_REQUEST_TIMEOUT).await
    }

    async fn send(&self, method: &str, params: Value, timeout: Duration) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!(url = %self.url, method, id, "rpc request");

        let response = self
            .http
            .post(&self.url)
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Network(format!("{method} failed: {e}")))?;

        let status = response.status();
        let text = response.text().await?;
        let parsed: RpcResponse = serde_json::from_str(&text).map_err(|e| {
            Error::Network(format!(
                "{method}: unexpected response (HTTP {status}): {e}"
            ))
        })?;

        if let Some(err) = parsed.error {
            debug!(method, code = err.code, message = %err.message, "rpc error");
            return Err(err.into());
        }
        Ok(parsed.result.unwrap_or(Value::Null))
    }
}

/// Pull hex revert data out of an error's `data` field. Wallets nest it
/// differently: a bare string, `{ "data": "0x.." }`, or one level deeper
/// under `originalError`.
fn revert_data(data: &Value) -> Option<String> {
    match data {
        Value::String(s) if s.starts_with("0x") => Some(s.clone()),
        Value::Object(map) => map
            .get("data")
            .and_then(revert_data)
            .or_else(|| map.get("originalError").and_then(revert_data)),
        _ => None,
    }
}

/// Parse a JSON-RPC hex quantity such as `"0x1a"`.
pub(crate) fn parse_quantity(value: &Value) -> Result<u64> {
    let s = value
        .as_str()
        .ok_or_else(|| Error::Network(format!("Expected hex quantity, got {value}")))?;
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.is_empty() {
        return Err(Error::Network(format!("Empty hex quantity '{s}'")));
    }
    u64::from_str_radix(digits, 16)
        .map_err(|e| Error::Network(format!("Invalid hex quantity '{s}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quantity_parsing() {
        assert_eq!(parse_quantity(&json!("0x0")).unwrap(), 0);
        assert_eq!(parse_quantity(&json!("0x1")).unwrap(), 1);
        assert_eq!(parse_quantity(&json!("0x10d4f")).unwrap(), 68943);
        assert!(parse_quantity(&json!("0x")).is_err());
        assert!(parse_quantity(&json!(12)).is_err());
        assert!(parse_quantity(&json!("0xzz")).is_err());
    }

    #[test]
    fn revert_data_shapes() {
        assert_eq!(revert_data(&json!("0x08c379a0")).as_deref(), Some("0x08c379a0"));
        assert_eq!(
            revert_data(&json!({ "data": "0x08c379a0" })).as_deref(),
            Some("0x08c379a0")
        );
        assert_eq!(
            revert_data(&json!({ "originalError": { "data": "0xbeef" } })).as_deref(),
            Some("0xbeef")
        );
        assert_eq!(revert_data(&json!("Reverted")), None);
        assert_eq!(revert_data(&json!(3)), None);
    }

    #[test]
    fn error_response_shape() {
        let raw = r#"{"jsonrpc":"2.0","id":1,"error":{"code":4001,"message":"User rejected the request."}}"#;
        let parsed: RpcResponse = serde_json::from_str(raw).unwrap();
        let err = parsed.error.expect("error object");
        assert_eq!(err.code, 4001);
        assert!(parsed.result.is_none());
    }

    #[test]
    fn null_result_is_none() {
        let raw = r#"{"jsonrpc":"2.0","id":7,"result":null}"#;
        let parsed: RpcResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.result.is_none());
        assert!(parsed.error.is_none());
    }
}
