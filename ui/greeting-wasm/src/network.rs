//! Network preference.
//!
//! One persisted localStorage key holding `"mainnet"` or `"testnet"`.
//! The selector and RPC endpoint bind to the active network at startup,
//! so a toggle persists the new value and reloads the page.

use crate::dom::{self, Elements};
use gloo_storage::{LocalStorage, Storage};
use ng_api_types::Network;
use wasm_bindgen::JsCast;

const NETWORK_KEY: &str = "networkId";

/// Persisted preference; anything unreadable resolves to testnet.
pub fn active_network() -> Network {
    let raw = LocalStorage::raw().get_item(NETWORK_KEY).ok().flatten();
    Network::from_persisted(raw.as_deref())
}

pub fn persist_network(network: Network) {
    let _ = LocalStorage::raw().set_item(NETWORK_KEY, network.as_str());
}

pub fn render_toggle(els: &Elements, network: Network) {
    dom::set_text(els.network_toggle.unchecked_ref(), &network.as_str().to_uppercase());
    let color = match network {
        Network::Mainnet => "#ff6b6b",
        Network::Testnet => "#4ecdc4",
    };
    let _ = els
        .network_toggle
        .style()
        .set_property("background-color", color);
}

pub fn on_toggle(_els: &Elements) {
    let next = active_network().toggled();
    persist_network(next);
    dom::reload_page();
}
