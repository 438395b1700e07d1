//! NEAR greeting dapp front-end.
//!
//! Pure Rust + WASM page: connect a NEAR wallet through the external
//! selector, read the stored greeting over JSON-RPC, submit a
//! transaction to update it. Modularised for extensibility: each
//! concern lives in its own module.

pub mod debug_panel;
pub mod dom;
pub mod events;
pub mod greeting_ui;
pub mod network;
pub mod selector;
pub mod session_ui;

use gloo_console::{error, log};
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is
/// instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

/// Main initialisation sequence.
async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;

    // The network is bound for the whole page lifetime; the toggle
    // persists a new preference and reloads.
    let network = network::active_network();
    network::render_toggle(&els, network);

    // Selector init failure is non-fatal: the page still reads the
    // greeting, it just cannot connect a wallet.
    match selector::init_wallet(&els, network).await {
        Ok(()) => log!("wallet initialized successfully"),
        Err(err) => error!("failed to initialize wallet:", err),
    }

    session_ui::update_login_button(&els);
    greeting_ui::update_controls(&els);
    debug_panel::render(&els);

    events::bind_events(&els);

    Ok(())
}
