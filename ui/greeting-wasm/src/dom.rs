//! DOM element bindings.
//!
//! All references are resolved once at startup. To add new UI elements,
//! add a field here and bind it in `Elements::bind()`.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

// ── Helpers ──

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

pub fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

pub fn alert(message: &str) {
    let _ = window().alert_with_message(message);
}

/// Full page reload; the wallet selector and RPC endpoint re-bind on
/// the next start.
pub fn reload_page() {
    let _ = window().location().reload();
}

// ── Elements struct ──

/// All DOM element references used by the greeting page.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Wallet
    pub login_button: HtmlElement,

    // Network
    pub network_toggle: HtmlElement,

    // Greeting display
    pub greeting_display: Element,
    pub fetch_button: HtmlButtonElement,
    pub greeting_error: HtmlElement,

    // Greeting update
    pub greeting_input: HtmlInputElement,
    pub update_button: HtmlButtonElement,
    pub update_hint: HtmlElement,

    // Debug panel
    pub debug_panel: HtmlElement,
    pub debug_state: Element,
    pub debug_refresh: HtmlElement,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_button {
    ($id:expr) => {
        by_id_typed::<HtmlButtonElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing button #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            login_button: get_html!("near_login_button"),

            network_toggle: get_html!("network_toggle"),

            greeting_display: get_el!("greeting_display"),
            fetch_button: get_button!("get_greeting_button"),
            greeting_error: get_html!("greeting_error"),

            greeting_input: get_input!("greeting_input"),
            update_button: get_button!("update_greeting_button"),
            update_hint: get_html!("update_hint"),

            debug_panel: get_html!("debug_panel"),
            debug_state: get_el!("debug_state"),
            debug_refresh: get_html!("debug_refresh_button"),
        })
    }
}
