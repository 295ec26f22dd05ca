//! Raw bindings to the page-global `dayboard` backend shim.
//!
//! The host page initializes the identity and document-store SDK handles
//! and exposes them under `window.dayboard` (see `assets/backend.js`).
//! Everything here is untyped; `store` wraps these in typed adapters.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Interactive sign-in. Resolves once the provider flow completes,
    /// rejects on cancel, network error, or a blocked popup.
    #[wasm_bindgen(js_namespace = dayboard, js_name = authSignIn)]
    pub fn auth_sign_in() -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = dayboard, js_name = authSignOut)]
    pub fn auth_sign_out() -> js_sys::Promise;

    /// Registers a session-change listener. The callback receives the
    /// current user object, or null when signed out. Returns the
    /// unsubscribe function.
    #[wasm_bindgen(js_namespace = dayboard, js_name = authSubscribe)]
    pub fn auth_subscribe(callback: &js_sys::Function) -> js_sys::Function;

    /// Registers a live listener on the task collection, scoped to the
    /// given owner in the store's query layer. The callback receives the
    /// full current document set on every change. Returns the unsubscribe
    /// function.
    #[wasm_bindgen(js_namespace = dayboard, js_name = tasksSubscribe)]
    pub fn tasks_subscribe(owner: &str, callback: &js_sys::Function) -> js_sys::Function;

    /// Appends a new document; resolves with the store-assigned id.
    #[wasm_bindgen(js_namespace = dayboard, js_name = tasksCreate)]
    pub fn tasks_create(doc: JsValue) -> js_sys::Promise;

    /// Merges the given fields into an existing document.
    #[wasm_bindgen(js_namespace = dayboard, js_name = tasksUpdate)]
    pub fn tasks_update(id: &str, fields: JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = dayboard, js_name = tasksDelete)]
    pub fn tasks_delete(id: &str) -> js_sys::Promise;
}
