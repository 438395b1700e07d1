use serde::{Deserialize, Serialize};
use std::fmt;

// ── Network selection ─────────────────────────────────────────────────

/// Which of the two fixed deployments is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }

    pub fn toggled(&self) -> Network {
        match self {
            Network::Mainnet => Network::Testnet,
            Network::Testnet => Network::Mainnet,
        }
    }

    /// Resolve a persisted preference. Anything other than a stored
    /// `"mainnet"` resolves to testnet.
    pub fn from_persisted(value: Option<&str>) -> Network {
        match value {
            Some("mainnet") => Network::Mainnet,
            _ => Network::Testnet,
        }
    }

    pub fn config(&self) -> NetworkConfig {
        NetworkConfig::for_network(*self)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-network deployment endpoints. Both deployments are fixed; the
/// only runtime choice is which one is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub network: Network,
    pub contract_id: &'static str,
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
}

impl NetworkConfig {
    pub fn for_network(network: Network) -> NetworkConfig {
        match network {
            Network::Mainnet => NetworkConfig {
                network,
                contract_id: "hello.sleet.near",
                rpc_url: "https://free.rpc.fastnear.com",
                explorer_url: "https://nearblocks.io",
            },
            Network::Testnet => NetworkConfig {
                network,
                contract_id: "hello.sleet.testnet",
                rpc_url: "https://test.rpc.fastnear.com",
                explorer_url: "https://testnet.nearblocks.io",
            },
        }
    }
}

// ── JSON-RPC query envelope ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RpcQueryRequest {
    pub jsonrpc: &'static str,
    pub id: String,
    pub method: &'static str,
    pub params: RpcQueryParams,
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcQueryParams {
    pub request_type: &'static str,
    pub account_id: String,
    pub method_name: String,
    pub args_base64: String,
    pub finality: &'static str,
}

impl RpcQueryRequest {
    /// Read-only `call_function` query against finalized state.
    pub fn call_function(
        id: impl Into<String>,
        contract_id: &str,
        method_name: &str,
        args_base64: String,
    ) -> RpcQueryRequest {
        RpcQueryRequest {
            jsonrpc: "2.0",
            id: id.into(),
            method: "query",
            params: RpcQueryParams {
                request_type: "call_function",
                account_id: contract_id.to_owned(),
                method_name: method_name.to_owned(),
                args_base64,
                finality: "final",
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcQueryResponse {
    #[serde(default)]
    pub result: Option<CallFunctionResult>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct CallFunctionResult {
    /// Raw return bytes of the view call.
    #[serde(default)]
    pub result: Option<Vec<u8>>,
    /// Contract-side view failure; the node reports it inside `result`
    /// rather than as a top-level RPC error.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub logs: Vec<String>,
    #[serde(default)]
    pub block_height: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl RpcErrorObject {
    pub fn describe(&self) -> String {
        match (&self.message, &self.data) {
            (Some(message), Some(data)) => format!("{message}: {data}"),
            (Some(message), None) => message.clone(),
            (None, _) => self
                .name
                .clone()
                .unwrap_or_else(|| "unknown RPC error".to_owned()),
        }
    }
}

// ── Wallet-selector wire types ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletAccount {
    #[serde(rename = "accountId")]
    pub account_id: String,
}

/// Payload of the selector's `wallet:signIn` event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignInEvent {
    #[serde(default)]
    pub accounts: Vec<WalletAccount>,
}

impl SignInEvent {
    /// The account the wallet reports as primary.
    pub fn primary_account_id(&self) -> Option<&str> {
        self.accounts.first().map(|a| a.account_id.as_str())
    }
}

/// Transaction request in the wallet-selector's own wire shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionParams {
    pub signer_id: String,
    pub receiver_id: String,
    pub actions: Vec<TransactionAction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionAction {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub params: FunctionCallParams,
}

impl TransactionAction {
    pub fn function_call(params: FunctionCallParams) -> TransactionAction {
        TransactionAction {
            kind: "FunctionCall",
            params,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCallParams {
    pub method_name: String,
    pub args: serde_json::Value,
    pub gas: String,
    pub deposit: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_defaults_to_testnet() {
        assert_eq!(Network::default(), Network::Testnet);
        assert_eq!(Network::from_persisted(None), Network::Testnet);
        assert_eq!(Network::from_persisted(Some("garbage")), Network::Testnet);
        assert_eq!(Network::from_persisted(Some("mainnet")), Network::Mainnet);
        assert_eq!(Network::from_persisted(Some("testnet")), Network::Testnet);
    }

    #[test]
    fn network_persisted_value_round_trips() {
        for network in [Network::Mainnet, Network::Testnet] {
            assert_eq!(Network::from_persisted(Some(network.as_str())), network);
        }
        assert_eq!(Network::Testnet.toggled(), Network::Mainnet);
        assert_eq!(Network::Mainnet.toggled(), Network::Testnet);
    }

    #[test]
    fn network_config_is_fixed_per_network() {
        let testnet = Network::Testnet.config();
        assert_eq!(testnet.contract_id, "hello.sleet.testnet");
        assert_eq!(testnet.rpc_url, "https://test.rpc.fastnear.com");
        assert_eq!(testnet.explorer_url, "https://testnet.nearblocks.io");

        let mainnet = Network::Mainnet.config();
        assert_eq!(mainnet.contract_id, "hello.sleet.near");
        assert_eq!(mainnet.rpc_url, "https://free.rpc.fastnear.com");
        assert_eq!(mainnet.explorer_url, "https://nearblocks.io");
    }

    #[test]
    fn call_function_envelope_matches_wire_format() {
        let request =
            RpcQueryRequest::call_function("dontcare", "hello.sleet.testnet", "get_greeting", String::new());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": "dontcare",
                "method": "query",
                "params": {
                    "request_type": "call_function",
                    "account_id": "hello.sleet.testnet",
                    "method_name": "get_greeting",
                    "args_base64": "",
                    "finality": "final",
                },
            })
        );
    }

    #[test]
    fn query_response_parses_result_bytes() {
        let body: RpcQueryResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":"dontcare","result":{"result":[72,105],"logs":[],"block_height":7}}"#,
        )
        .unwrap();
        let result = body.result.unwrap();
        assert_eq!(result.result, Some(vec![72, 105]));
        assert_eq!(result.block_height, Some(7));
        assert!(body.error.is_none());
    }

    #[test]
    fn query_response_parses_error_object() {
        let body: RpcQueryResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":"dontcare","error":{"name":"HANDLER_ERROR","code":-32000,"message":"Server error","data":"account not found"}}"#,
        )
        .unwrap();
        assert!(body.result.is_none());
        let error = body.error.unwrap();
        assert_eq!(error.describe(), "Server error: \"account not found\"");
    }

    #[test]
    fn sign_in_event_reads_primary_account() {
        let event: SignInEvent = serde_json::from_str(
            r#"{"accounts":[{"accountId":"alice.testnet"},{"accountId":"bob.testnet"}]}"#,
        )
        .unwrap();
        assert_eq!(event.primary_account_id(), Some("alice.testnet"));

        let empty: SignInEvent = serde_json::from_str(r#"{"accounts":[]}"#).unwrap();
        assert_eq!(empty.primary_account_id(), None);
    }

    #[test]
    fn transaction_params_serialize_camel_case() {
        let params = TransactionParams {
            signer_id: "alice.testnet".to_owned(),
            receiver_id: "hello.sleet.testnet".to_owned(),
            actions: vec![TransactionAction::function_call(FunctionCallParams {
                method_name: "set_greeting".to_owned(),
                args: serde_json::json!({ "greeting": "howdy" }),
                gas: "30000000000000".to_owned(),
                deposit: "0".to_owned(),
            })],
        };

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "signerId": "alice.testnet",
                "receiverId": "hello.sleet.testnet",
                "actions": [{
                    "type": "FunctionCall",
                    "params": {
                        "methodName": "set_greeting",
                        "args": { "greeting": "howdy" },
                        "gas": "30000000000000",
                        "deposit": "0",
                    },
                }],
            })
        );
    }
}
