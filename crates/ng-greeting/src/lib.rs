use anyhow::{Context, Result, bail};
use ng_api_types::{FunctionCallParams, TransactionAction, TransactionParams};
use ng_chain_client::{ContractViewer, NearWallet};
use tracing::debug;

pub const GET_GREETING_METHOD: &str = "get_greeting";
pub const SET_GREETING_METHOD: &str = "set_greeting";

/// 30 TGas, the fixed execution budget for `set_greeting`.
pub const SET_GREETING_GAS: &str = "30000000000000";
/// The call attaches no deposit.
pub const NO_DEPOSIT: &str = "0";

/// Reads and updates the greeting stored by one contract.
///
/// Reads go through the viewer; updates go through whatever wallet
/// handle the session currently holds.
pub struct GreetingClient<V> {
    viewer: V,
    contract_id: String,
}

impl<V: ContractViewer> GreetingClient<V> {
    pub fn new(viewer: V, contract_id: impl Into<String>) -> GreetingClient<V> {
        GreetingClient {
            viewer,
            contract_id: contract_id.into(),
        }
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    /// Read the stored greeting from finalized state.
    pub async fn fetch_greeting(&self) -> Result<String> {
        let bytes = self
            .viewer
            .call_view_function(&self.contract_id, GET_GREETING_METHOD, b"")
            .await?;

        String::from_utf8(bytes).context("greeting is not valid UTF-8")
    }

    /// Submit `set_greeting` through the connected wallet, then re-read
    /// so the caller sees the on-chain value. Signing and broadcast
    /// failures propagate unchanged.
    pub async fn update_greeting(
        &self,
        new_greeting: &str,
        wallet: &dyn NearWallet,
    ) -> Result<String> {
        if new_greeting.trim().is_empty() {
            bail!("greeting message is empty");
        }

        let Some(signer_id) = wallet.account_id() else {
            bail!("wallet not connected");
        };

        let params = TransactionParams {
            signer_id,
            receiver_id: self.contract_id.clone(),
            actions: vec![TransactionAction::function_call(FunctionCallParams {
                method_name: SET_GREETING_METHOD.to_owned(),
                args: serde_json::json!({ "greeting": new_greeting }),
                gas: SET_GREETING_GAS.to_owned(),
                deposit: NO_DEPOSIT.to_owned(),
            })],
        };

        let outcome = wallet.sign_and_send_transaction(params).await?;
        debug!("set_greeting submitted: {outcome}");

        self.fetch_greeting().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Contract state shared between the fake viewer and fake wallet,
    /// so an update is visible to the following fetch.
    #[derive(Clone, Default)]
    struct FakeChain {
        greeting: Rc<RefCell<Vec<u8>>>,
    }

    impl FakeChain {
        fn with_greeting(greeting: &str) -> FakeChain {
            let chain = FakeChain::default();
            *chain.greeting.borrow_mut() = greeting.as_bytes().to_vec();
            chain
        }
    }

    #[async_trait(?Send)]
    impl ContractViewer for FakeChain {
        async fn call_view_function(
            &self,
            _contract_id: &str,
            method_name: &str,
            _args: &[u8],
        ) -> Result<Vec<u8>> {
            assert_eq!(method_name, GET_GREETING_METHOD);
            Ok(self.greeting.borrow().clone())
        }
    }

    struct FakeWallet {
        account: Option<String>,
        chain: FakeChain,
        reject_submit: bool,
    }

    #[async_trait(?Send)]
    impl NearWallet for FakeWallet {
        fn account_id(&self) -> Option<String> {
            self.account.clone()
        }

        async fn sign_out(&self) -> Result<()> {
            Ok(())
        }

        async fn sign_and_send_transaction(
            &self,
            params: TransactionParams,
        ) -> Result<serde_json::Value> {
            if self.reject_submit {
                bail!("user rejected the transaction");
            }

            let action = &params.actions[0];
            assert_eq!(action.kind, "FunctionCall");
            assert_eq!(action.params.method_name, SET_GREETING_METHOD);
            assert_eq!(action.params.gas, SET_GREETING_GAS);
            assert_eq!(action.params.deposit, NO_DEPOSIT);
            assert_eq!(params.signer_id, self.account.clone().unwrap());

            let value = action.params.args["greeting"]
                .as_str()
                .expect("args carry a greeting string");
            *self.chain.greeting.borrow_mut() = value.as_bytes().to_vec();

            Ok(serde_json::json!({ "status": "ok" }))
        }
    }

    #[tokio::test]
    async fn fetch_decodes_utf8_greeting() -> Result<()> {
        let client = GreetingClient::new(FakeChain::with_greeting("Hello"), "hello.sleet.testnet");
        assert_eq!(client.fetch_greeting().await?, "Hello");
        Ok(())
    }

    #[tokio::test]
    async fn fetch_rejects_invalid_utf8() {
        let chain = FakeChain::default();
        *chain.greeting.borrow_mut() = vec![0xff, 0xfe];
        let client = GreetingClient::new(chain, "hello.sleet.testnet");
        let error = client.fetch_greeting().await.unwrap_err();
        assert!(error.to_string().contains("not valid UTF-8"));
    }

    #[tokio::test]
    async fn update_then_fetch_round_trips() -> Result<()> {
        let chain = FakeChain::with_greeting("Hello");
        let wallet = FakeWallet {
            account: Some("alice.testnet".to_owned()),
            chain: chain.clone(),
            reject_submit: false,
        };
        let client = GreetingClient::new(chain, "hello.sleet.testnet");

        let fresh = client.update_greeting("howdy", &wallet).await?;
        assert_eq!(fresh, "howdy");
        assert_eq!(client.fetch_greeting().await?, "howdy");

        Ok(())
    }

    #[tokio::test]
    async fn update_requires_connected_wallet() {
        let chain = FakeChain::with_greeting("Hello");
        let wallet = FakeWallet {
            account: None,
            chain: chain.clone(),
            reject_submit: false,
        };
        let client = GreetingClient::new(chain, "hello.sleet.testnet");

        let error = client.update_greeting("howdy", &wallet).await.unwrap_err();
        assert!(error.to_string().contains("wallet not connected"));
    }

    #[tokio::test]
    async fn update_rejects_empty_message() {
        let chain = FakeChain::with_greeting("Hello");
        let wallet = FakeWallet {
            account: Some("alice.testnet".to_owned()),
            chain: chain.clone(),
            reject_submit: false,
        };
        let client = GreetingClient::new(chain, "hello.sleet.testnet");

        let error = client.update_greeting("   ", &wallet).await.unwrap_err();
        assert!(error.to_string().contains("empty"));
    }

    #[tokio::test]
    async fn submit_failure_propagates_and_leaves_state_alone() -> Result<()> {
        let chain = FakeChain::with_greeting("Hello");
        let wallet = FakeWallet {
            account: Some("alice.testnet".to_owned()),
            chain: chain.clone(),
            reject_submit: true,
        };
        let client = GreetingClient::new(chain, "hello.sleet.testnet");

        let error = client.update_greeting("howdy", &wallet).await.unwrap_err();
        assert!(error.to_string().contains("user rejected the transaction"));
        assert_eq!(client.fetch_greeting().await?, "Hello");

        Ok(())
    }
}
