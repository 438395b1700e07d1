//! Bindings to the external wallet-selector library.
//!
//! `@hot-labs/near-connect` ships `WalletSelector` (owns wallet
//! sessions, emits `wallet:signIn`/`wallet:signOut`) and
//! `WalletSelectorUI` (the connect modal). Only the stable surface is
//! bound; everything behind it stays opaque JS.

use crate::debug_panel;
use crate::dom::Elements;
use crate::greeting_ui;
use crate::session_ui;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use js_sys::Function;
use ng_api_types::{Network, SignInEvent, TransactionParams};
use ng_chain_client::NearWallet;
use ng_session::{SessionSync, WalletConnector};
use serde::Serialize as _;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "@hot-labs/near-connect")]
extern "C" {
    pub type WalletSelector;

    #[wasm_bindgen(constructor)]
    pub fn new(options: &JsValue) -> WalletSelector;

    #[wasm_bindgen(method)]
    pub fn on(this: &WalletSelector, event: &str, callback: &Function);

    /// Resolves to the connected wallet object; rejects when there is
    /// none.
    #[wasm_bindgen(method, catch)]
    pub async fn wallet(this: &WalletSelector) -> Result<JsValue, JsValue>;

    pub type WalletSelectorUI;

    #[wasm_bindgen(constructor)]
    pub fn new(selector: &WalletSelector) -> WalletSelectorUI;

    #[wasm_bindgen(method)]
    pub fn open(this: &WalletSelectorUI);
}

#[wasm_bindgen]
extern "C" {
    /// A connected wallet as returned by `WalletSelector::wallet()`.
    #[derive(Clone)]
    pub type SelectorWallet;

    #[wasm_bindgen(method, getter, js_name = accountId)]
    pub fn account_id(this: &SelectorWallet) -> Option<String>;

    #[wasm_bindgen(method, catch, js_name = signOut)]
    pub async fn sign_out(this: &SelectorWallet) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = signAndSendTransaction)]
    pub async fn sign_and_send_transaction(
        this: &SelectorWallet,
        params: &JsValue,
    ) -> Result<JsValue, JsValue>;
}

fn js_error(value: JsValue) -> anyhow::Error {
    anyhow!(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// `NearWallet` over the JS wallet object.
#[derive(Clone)]
pub struct JsWallet {
    inner: SelectorWallet,
}

#[async_trait(?Send)]
impl NearWallet for JsWallet {
    fn account_id(&self) -> Option<String> {
        self.inner.account_id().filter(|id| !id.is_empty())
    }

    async fn sign_out(&self) -> Result<()> {
        self.inner.sign_out().await.map_err(js_error)
    }

    async fn sign_and_send_transaction(&self, params: TransactionParams) -> Result<serde_json::Value> {
        // json_compatible: the wallet expects plain objects, not Maps.
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let js_params = params
            .serialize(&serializer)
            .map_err(|e| anyhow!("serialize transaction params: {e}"))?;

        let outcome = self
            .inner
            .sign_and_send_transaction(&js_params)
            .await
            .map_err(js_error)?;

        Ok(serde_wasm_bindgen::from_value(outcome).unwrap_or(serde_json::Value::Null))
    }
}

/// `WalletConnector` over the selector + modal pair, bound to one
/// network for the whole page lifetime.
pub struct NearConnectConnector {
    selector: WalletSelector,
    modal: WalletSelectorUI,
}

impl NearConnectConnector {
    pub fn new(network: Network) -> Result<NearConnectConnector, JsValue> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"network".into(), &network.as_str().into())?;

        let selector = WalletSelector::new(&options);
        let modal = WalletSelectorUI::new(&selector);

        Ok(NearConnectConnector { selector, modal })
    }

    fn selector(&self) -> &WalletSelector {
        &self.selector
    }
}

#[async_trait(?Send)]
impl WalletConnector for NearConnectConnector {
    type Wallet = JsWallet;

    async fn live_wallet(&self) -> Result<Option<JsWallet>> {
        match self.selector.wallet().await {
            Ok(value) if value.is_null() || value.is_undefined() => Ok(None),
            Ok(value) => Ok(Some(JsWallet {
                inner: value.unchecked_into(),
            })),
            // The selector rejects when no wallet is connected; that is
            // "none", not a failure worth surfacing.
            Err(_) => Ok(None),
        }
    }

    fn open_connect_ui(&self) {
        self.modal.open();
    }
}

/// Build the selector for the active network, wire its session events,
/// and probe for a session it restored on its own.
pub async fn init_wallet(els: &Elements, network: Network) -> Result<(), JsValue> {
    let connector = NearConnectConnector::new(network)?;
    let session = Rc::new(SessionSync::new(connector));

    subscribe_session_events(&session, els);
    session_ui::install(Rc::clone(&session));
    session.adopt_existing().await;

    Ok(())
}

fn subscribe_session_events(session: &Rc<SessionSync<NearConnectConnector>>, els: &Elements) {
    {
        let session = Rc::clone(session);
        let els = els.clone();
        let closure_session = Rc::clone(&session);
        let cb = Closure::wrap(Box::new(move |payload: JsValue| {
            let event: SignInEvent = serde_wasm_bindgen::from_value(payload).unwrap_or_default();
            let session = Rc::clone(&closure_session);
            let els = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                session.on_sign_in(&event).await;
                session_ui::update_login_button(&els);
                greeting_ui::update_controls(&els);
                debug_panel::render(&els);
            });
        }) as Box<dyn FnMut(JsValue)>);
        session
            .connector()
            .selector()
            .on("wallet:signIn", cb.as_ref().unchecked_ref());
        cb.forget();
    }

    {
        let session = Rc::clone(session);
        let els = els.clone();
        let closure_session = Rc::clone(&session);
        let cb = Closure::wrap(Box::new(move || {
            closure_session.on_sign_out();
            session_ui::update_login_button(&els);
            greeting_ui::update_controls(&els);
            debug_panel::render(&els);
        }) as Box<dyn FnMut()>);
        session
            .connector()
            .selector()
            .on("wallet:signOut", cb.as_ref().unchecked_ref());
        cb.forget();
    }
}
