//! Session singleton and login-button rendering.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is
//! single-threaded). The session is installed once at startup and read
//! by every handler that needs wallet state.

use crate::debug_panel;
use crate::dom::{self, Elements};
use crate::greeting_ui;
use crate::selector::NearConnectConnector;
use gloo_console::warn;
use ng_session::{Disconnect, SessionSync};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;

pub type Session = Rc<SessionSync<NearConnectConnector>>;

thread_local! {
    static SESSION: RefCell<Option<Session>> = RefCell::new(None);
}

pub fn install(session: Session) {
    SESSION.with(|s| *s.borrow_mut() = Some(session));
}

pub fn session() -> Option<Session> {
    SESSION.with(|s| s.borrow().clone())
}

/// LOGIN / LOGOUT toggle, tooltip carrying the connected account.
pub fn update_login_button(els: &Elements) {
    let account_id = session().and_then(|s| s.account_id());
    let button = &els.login_button;

    match account_id {
        Some(account_id) => {
            dom::set_text(button.unchecked_ref(), "LOGOUT");
            button.set_title(&format!("Logged in as {account_id}"));
            let _ = button.style().set_property("background-color", "#4CAF50");
        }
        None => {
            dom::set_text(button.unchecked_ref(), "LOGIN");
            button.set_title("Connect your NEAR wallet");
            let _ = button.style().remove_property("background-color");
        }
    }
}

/// Login-button click: connect when signed out, disconnect when signed
/// in. A failed disconnect forces a reload for a clean selector state.
pub async fn on_login_click(els: &Elements) {
    let Some(session) = session() else {
        warn!("wallet not initialized");
        return;
    };

    if session.is_signed_in() {
        match session.request_disconnect().await {
            Disconnect::SignedOut => {}
            Disconnect::ForceReload => {
                warn!("sign-out failed, reloading for a clean state");
                dom::reload_page();
                return;
            }
        }
    } else {
        session.request_connect();
    }

    update_login_button(els);
    greeting_ui::update_controls(els);
    debug_panel::render(els);
}
