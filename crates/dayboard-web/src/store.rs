//! Typed adapter over the backend shim: session watching, sign-in/out,
//! and the task collection's subscribe/create/update/delete operations.

use std::fmt;

use dayboard_core::task::{NewTask, Task, TaskPatch};
use dayboard_core::view::owned_by;
use serde::Deserialize;
use tracing::{debug, error, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::backend;

/// A document-store operation was rejected (network, permission, decode).
#[derive(Debug, Clone)]
pub struct StoreError(String);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store error: {}", self.0)
    }
}

impl From<JsValue> for StoreError {
    fn from(value: JsValue) -> Self {
        StoreError(format!("{value:?}"))
    }
}

/// The identity provider rejected or aborted an interactive flow.
#[derive(Debug, Clone)]
pub struct AuthError(String);

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "auth error: {}", self.0)
    }
}

impl From<JsValue> for AuthError {
    fn from(value: JsValue) -> Self {
        AuthError(format!("{value:?}"))
    }
}

/// The session object emitted by the identity provider's stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionUser {
    pub uid: String,
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A live listener registration. Dropping it detaches the listener, so the
/// handle doubles as the unsubscribe returned to mounting components.
pub struct Subscription {
    unsubscribe: js_sys::Function,
    _callback: Closure<dyn FnMut(JsValue)>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Err(err) = self.unsubscribe.call0(&JsValue::NULL) {
            warn!(?err, "backend unsubscribe failed");
        }
    }
}

/// Watches the identity provider's session stream. Each emission replaces
/// the caller's current-user reference; null clears it.
pub fn watch_session(mut on_change: impl FnMut(Option<SessionUser>) + 'static) -> Subscription {
    let callback = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
        match serde_wasm_bindgen::from_value::<Option<SessionUser>>(value) {
            Ok(user) => {
                debug!(signed_in = user.is_some(), "session event");
                on_change(user);
            }
            Err(err) => error!(error = %err, "failed to decode session event"),
        }
    });

    let unsubscribe = backend::auth_subscribe(callback.as_ref().unchecked_ref());
    Subscription {
        unsubscribe,
        _callback: callback,
    }
}

/// Subscribes to the task collection for `owner`. The subscription is
/// scoped by owner in the store's query; every snapshot is additionally
/// re-filtered client-side before it replaces the in-memory set.
pub fn subscribe_tasks(
    owner: &str,
    mut on_snapshot: impl FnMut(Vec<Task>) + 'static,
) -> Subscription {
    let owner_key = owner.to_string();
    let callback = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
        match serde_wasm_bindgen::from_value::<Vec<Task>>(value) {
            Ok(snapshot) => {
                let mine = owned_by(snapshot, &owner_key);
                debug!(count = mine.len(), "replacing task snapshot");
                on_snapshot(mine);
            }
            Err(err) => error!(error = %err, "failed to decode task snapshot"),
        }
    });

    let unsubscribe = backend::tasks_subscribe(owner, callback.as_ref().unchecked_ref());
    Subscription {
        unsubscribe,
        _callback: callback,
    }
}

pub async fn sign_in() -> Result<(), AuthError> {
    JsFuture::from(backend::auth_sign_in()).await?;
    Ok(())
}

pub async fn sign_out() -> Result<(), AuthError> {
    JsFuture::from(backend::auth_sign_out()).await?;
    Ok(())
}

/// Appends a new document and returns the store-assigned id.
pub async fn create_task(new_task: &NewTask) -> Result<String, StoreError> {
    let payload = serde_wasm_bindgen::to_value(new_task)
        .map_err(|err| StoreError(format!("failed to encode task: {err}")))?;
    let value = JsFuture::from(backend::tasks_create(payload)).await?;
    value
        .as_string()
        .ok_or_else(|| StoreError("create resolved with a non-string id".to_string()))
}

/// Merges `patch` into an existing document. No caller in the rendered UI
/// exercises this; the store boundary declares it and it is kept for
/// forward compatibility.
pub async fn update_task(id: &str, patch: &TaskPatch) -> Result<(), StoreError> {
    let payload = serde_wasm_bindgen::to_value(patch)
        .map_err(|err| StoreError(format!("failed to encode patch: {err}")))?;
    JsFuture::from(backend::tasks_update(id, payload)).await?;
    Ok(())
}

pub async fn delete_task(id: &str) -> Result<(), StoreError> {
    JsFuture::from(backend::tasks_delete(id)).await?;
    Ok(())
}
