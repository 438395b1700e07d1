//! Greeting fetch and update handlers.
//!
//! Each handler corresponds to one user action and writes its result
//! (or error) straight back into the DOM.

use crate::dom::{self, Elements};
use crate::network;
use crate::session_ui;
use gloo_console::error;
use ng_chain_fastnear::FastnearRpc;
use ng_greeting::GreetingClient;

fn client() -> GreetingClient<FastnearRpc> {
    let config = network::active_network().config();
    GreetingClient::new(FastnearRpc::new(config.rpc_url), config.contract_id)
}

/// GET GREETING: read-only view call against finalized state.
pub async fn on_fetch_greeting(els: &Elements) {
    els.fetch_button.set_disabled(true);
    dom::set_text(els.fetch_button.as_ref(), "Loading...");
    dom::set_text(els.greeting_error.as_ref(), "");

    match client().fetch_greeting().await {
        Ok(greeting) => dom::set_text(&els.greeting_display, &greeting),
        Err(err) => {
            error!(format!("greeting fetch failed: {err:#}"));
            dom::set_text(&els.greeting_display, "Error fetching greeting");
            dom::set_text(els.greeting_error.as_ref(), &format!("Error: {err:#}"));
        }
    }

    els.fetch_button.set_disabled(false);
    dom::set_text(els.fetch_button.as_ref(), "GET GREETING");
}

/// Update Greeting: precondition checks, then a signed `set_greeting`
/// call through the connected wallet, then re-render the fresh value.
pub async fn on_update_greeting(els: &Elements) {
    let message = dom::get_input_value(&els.greeting_input);
    if message.is_empty() {
        dom::alert("Please enter a message");
        return;
    }

    let wallet = session_ui::session().and_then(|s| s.wallet());
    let Some(wallet) = wallet else {
        dom::alert("Please connect your wallet first");
        return;
    };

    els.update_button.set_disabled(true);
    dom::set_text(els.update_button.as_ref(), "Processing...");

    match client().update_greeting(&message, &wallet).await {
        Ok(fresh) => {
            els.greeting_input.set_value("");
            dom::set_text(&els.greeting_display, &fresh);
            dom::alert("Greeting updated successfully!");
        }
        Err(err) => dom::alert(&format!("Error: {err:#}")),
    }

    update_controls(els);
}

/// The update button is usable only with a connected session.
pub fn update_controls(els: &Elements) {
    let signed_in = session_ui::session().is_some_and(|s| s.is_signed_in());

    els.update_button.set_disabled(!signed_in);
    dom::set_text(els.update_button.as_ref(), "Update Greeting");

    let hint_display = if signed_in { "none" } else { "block" };
    let _ = els.update_hint.style().set_property("display", hint_display);
}
