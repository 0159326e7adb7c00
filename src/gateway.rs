//! Gateway chain client.
//!
//! Wraps the network gateway's `vm-values/query` REST endpoint behind the
//! [`ChainClient`] seam. Only read-only queries go through here; state
//! mutation is the wallet session's job.

use crate::{constants::GATEWAY_TIMEOUT_SECS, types::Address};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::trace;
use url::Url;

/// A read-only contract call addressed as a specific caller.
#[derive(Clone, Debug, Serialize)]
pub struct ContractQuery {
    /// Contract to query.
    #[serde(rename = "scAddress")]
    pub contract: Address,
    /// Account the query is addressed as.
    pub caller: Address,
    /// View function to invoke.
    #[serde(rename = "funcName")]
    pub function: String,
    /// Arguments, in call order.
    pub args: Vec<String>,
}

/// Errors talking to the gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Transport-level failure, including the request timeout.
    #[error("gateway unreachable: {0}")]
    Http(#[from] reqwest::Error),
    /// The gateway answered with a non-success HTTP status.
    #[error("gateway responded with status {0}")]
    Status(reqwest::StatusCode),
    /// The gateway reported an error envelope instead of data.
    #[error("gateway error: {0}")]
    Gateway(String),
    /// The query executed but the VM refused it.
    #[error("query returned {code}: {message}")]
    Vm {
        /// VM return code.
        code: String,
        /// VM return message, often empty.
        message: String,
    },
    /// A return data entry was not valid base64.
    #[error("return data is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The query endpoint could not be derived from the base URL.
    #[error("invalid gateway url: {0}")]
    Url(#[from] url::ParseError),
}

/// Read-only access to contract state.
///
/// The dashboard talks to the chain exclusively through this seam, which
/// keeps the network edge swappable in tests.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Executes a read-only contract query, returning one opaque blob per
    /// value the contract produced.
    async fn query_contract(&self, query: ContractQuery) -> Result<Vec<Vec<u8>>, GatewayError>;
}

/// HTTP client for the gateway's VM query endpoint.
#[derive(Clone, Debug)]
pub struct GatewayClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl GatewayClient {
    /// Creates a client for a gateway base URL, e.g.
    /// `https://devnet-gateway.multiversx.com`.
    pub fn new(base: Url) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(GATEWAY_TIMEOUT_SECS))
            .build()?;
        Ok(Self { endpoint: base.join("vm-values/query")?, http })
    }
}

#[async_trait]
impl ChainClient for GatewayClient {
    async fn query_contract(&self, query: ContractQuery) -> Result<Vec<Vec<u8>>, GatewayError> {
        trace!(contract = %query.contract, function = %query.function, "querying contract");
        let response = self.http.post(self.endpoint.clone()).json(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status));
        }
        decode_envelope(response.json().await?)
    }
}

/// Gateway responses wrap their payload in a data/error/code envelope.
#[derive(Debug, Deserialize)]
struct GatewayEnvelope {
    data: Option<VmQueryData>,
    #[serde(default)]
    error: String,
}

#[derive(Debug, Deserialize)]
struct VmQueryData {
    data: VmOutput,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VmOutput {
    #[serde(default)]
    return_data: Option<Vec<String>>,
    return_code: String,
    #[serde(default)]
    return_message: String,
}

fn decode_envelope(envelope: GatewayEnvelope) -> Result<Vec<Vec<u8>>, GatewayError> {
    let Some(data) = envelope.data else {
        return Err(GatewayError::Gateway(envelope.error));
    };
    let output = data.data;
    if output.return_code != "ok" {
        return Err(GatewayError::Vm { code: output.return_code, message: output.return_message });
    }
    output
        .return_data
        .unwrap_or_default()
        .iter()
        .map(|entry| Ok(BASE64.decode(entry)?))
        .collect()
}
