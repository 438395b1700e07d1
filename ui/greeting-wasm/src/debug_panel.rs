//! Debug readout of the synchronizer's internal state, with a manual
//! refresh control. Only rendered in debug builds.

use crate::dom::{self, Elements};
use crate::greeting_ui;
use crate::session_ui;

pub fn render(els: &Elements) {
    if !cfg!(debug_assertions) {
        let _ = els.debug_panel.style().set_property("display", "none");
        return;
    }

    let (signed_in, account_id, has_wallet) = match session_ui::session() {
        Some(session) => (
            session.is_signed_in(),
            session.account_id(),
            session.wallet().is_some(),
        ),
        None => (false, None, false),
    };

    let text = format!(
        "signed in: {signed_in}\naccount id: {}\nwallet: {}",
        account_id.as_deref().unwrap_or("null"),
        if has_wallet { "exists" } else { "null" },
    );
    dom::set_text(&els.debug_state, &text);
}

/// Events are not fully trusted; this re-derives the session from the
/// selector itself.
pub async fn on_refresh(els: &Elements) {
    if let Some(session) = session_ui::session() {
        session.refresh().await;
    }

    session_ui::update_login_button(els);
    greeting_ui::update_controls(els);
    render(els);
}
