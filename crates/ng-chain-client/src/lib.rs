use anyhow::Result;
use async_trait::async_trait;
use ng_api_types::TransactionParams;

// Futures here are ?Send: every implementation runs on the browser's
// single-threaded event loop.

/// Read-only access to contract state at finality `final`.
#[async_trait(?Send)]
pub trait ContractViewer {
    async fn call_view_function(
        &self,
        contract_id: &str,
        method_name: &str,
        args: &[u8],
    ) -> Result<Vec<u8>>;
}

/// A connected wallet handle as supplied by the external selector.
///
/// This is the whole surface the app relies on — an account id,
/// sign-out, and transaction signing. Implementations bind each method
/// to one concrete upstream call; nothing is probed at runtime.
#[async_trait(?Send)]
pub trait NearWallet {
    fn account_id(&self) -> Option<String>;

    async fn sign_out(&self) -> Result<()>;

    /// Sign and broadcast through the wallet; resolves to the wallet's
    /// own (opaque) outcome value.
    async fn sign_and_send_transaction(
        &self,
        params: TransactionParams,
    ) -> Result<serde_json::Value>;
}
