use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use ng_api_types::{Network, RpcQueryRequest, RpcQueryResponse};
use ng_chain_client::ContractViewer;
use tracing::debug;

#[cfg(not(target_arch = "wasm32"))]
const RPC_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// The node accepts any request id on these endpoints.
const REQUEST_ID: &str = "dontcare";

/// JSON-RPC client for the fastnear NEAR endpoints.
pub struct FastnearRpc {
    endpoint: String,
    http: reqwest::Client,
}

impl FastnearRpc {
    pub fn new(endpoint: impl Into<String>) -> FastnearRpc {
        let endpoint = endpoint.into().trim_end_matches('/').to_owned();
        FastnearRpc {
            endpoint,
            http: build_client(),
        }
    }

    pub fn for_network(network: Network) -> FastnearRpc {
        FastnearRpc::new(network.config().rpc_url)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn build_client() -> reqwest::Client {
    // Browser fetch carries no client-side timeout control; native
    // builds get a bounded one.
    #[cfg(not(target_arch = "wasm32"))]
    {
        reqwest::Client::builder()
            .timeout(RPC_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    }
    #[cfg(target_arch = "wasm32")]
    {
        reqwest::Client::new()
    }
}

#[async_trait(?Send)]
impl ContractViewer for FastnearRpc {
    async fn call_view_function(
        &self,
        contract_id: &str,
        method_name: &str,
        args: &[u8],
    ) -> Result<Vec<u8>> {
        let request =
            RpcQueryRequest::call_function(REQUEST_ID, contract_id, method_name, STANDARD.encode(args));

        debug!("view call {method_name} on {contract_id} via {}", self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .context("fastnear view call transport")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("fastnear view call HTTP {status}: {text}");
        }

        let body: RpcQueryResponse = response
            .json()
            .await
            .context("fastnear view call parse")?;

        decode_view_result(body)
    }
}

/// Extract the raw return bytes from a query response envelope.
pub fn decode_view_result(body: RpcQueryResponse) -> Result<Vec<u8>> {
    if let Some(error) = body.error {
        bail!("rpc error: {}", error.describe());
    }

    let Some(result) = body.result else {
        bail!("rpc response lacks a result payload");
    };

    if let Some(message) = result.error {
        bail!("contract view error: {message}");
    }

    match result.result {
        Some(bytes) => Ok(bytes),
        None => bail!("rpc response lacks a result payload"),
    }
}
