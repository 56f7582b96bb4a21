//! Minimal Solana JSON-RPC client.
//!
//! Only `getBalance` is implemented. Requests and responses follow the
//! JSON-RPC 2.0 envelope used by every Solana cluster:
//!
//! ```text
//! -> {"jsonrpc":"2.0","id":1,"method":"getBalance","params":["<pubkey>",{"commitment":"confirmed"}]}
//! <- {"jsonrpc":"2.0","id":1,"result":{"context":{"slot":1},"value":5000000000}}
//! <- {"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"Invalid param"}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::address::validate_address;
use crate::error::SolError;

/// Public devnet cluster endpoint.
pub const DEVNET_URL: &str = "https://api.devnet.solana.com";

/// How settled a block must be before the RPC node reports state from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Wrapper Solana puts around most account queries.
#[derive(Deserialize)]
struct WithContext<T> {
    value: T,
}

/// JSON-RPC client bound to a single cluster endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient {
    url: reqwest::Url,
    commitment: Commitment,
    http: reqwest::Client,
}

impl RpcClient {
    pub fn new(url: &str, commitment: Commitment) -> Result<Self, SolError> {
        let url = reqwest::Url::parse(url).map_err(|e| SolError::InvalidUrl(format!("{url}: {e}")))?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            url,
            commitment,
            http,
        })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn commitment(&self) -> Commitment {
        self.commitment
    }

    /// Fetch the balance of `address` in lamports.
    pub async fn get_balance(&self, address: &str) -> Result<u64, SolError> {
        validate_address(address)?;
        let request = balance_request(address, self.commitment);
        tracing::debug!(url = %self.url, %address, "getBalance");

        let body = self
            .http
            .post(self.url.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        decode_balance_response(&body)
    }
}

fn balance_request(address: &str, commitment: Commitment) -> RpcRequest<'static> {
    RpcRequest {
        jsonrpc: "2.0",
        id: 1,
        method: "getBalance",
        params: json!([address, { "commitment": commitment }]),
    }
}

/// Decode a raw `getBalance` response body into lamports.
pub fn decode_balance_response(body: &[u8]) -> Result<u64, SolError> {
    let response: RpcResponse<WithContext<u64>> = serde_json::from_slice(body)
        .map_err(|e| SolError::MalformedResponse(e.to_string()))?;

    if let Some(err) = response.error {
        return Err(SolError::Rpc {
            code: err.code,
            message: err.message,
        });
    }

    response
        .result
        .map(|r| r.value)
        .ok_or_else(|| SolError::MalformedResponse("response has neither result nor error".into()))
}
