//! Event binding.
//!
//! Wires all UI event listeners. To add new events, add closures here
//! and (if async) spawn via `wasm_bindgen_futures::spawn_local`.

use crate::debug_panel;
use crate::dom::Elements;
use crate::greeting_ui;
use crate::network;
use crate::session_ui;
use wasm_bindgen::prelude::*;

/// Helper: attach async click handler.
macro_rules! on_click_async {
    ($el:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let els2 = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&els2).await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }};
}

/// Helper: attach sync click handler.
macro_rules! on_click {
    ($el:expr, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(web_sys::MouseEvent)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) {
    // ── Wallet connect / disconnect ──
    on_click_async!(els.login_button, els, session_ui::on_login_click);

    // ── Network toggle (persists, then reloads) ──
    {
        let els2 = els.clone();
        on_click!(els.network_toggle, move |_: web_sys::MouseEvent| {
            network::on_toggle(&els2);
        });
    }

    // ── Greeting ──
    on_click_async!(els.fetch_button, els, greeting_ui::on_fetch_greeting);
    on_click_async!(els.update_button, els, greeting_ui::on_update_greeting);

    // ── Debug panel ──
    on_click_async!(els.debug_refresh, els, debug_panel::on_refresh);
}
