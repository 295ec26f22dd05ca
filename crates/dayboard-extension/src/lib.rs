//! Browser-extension background worker. On a fired alarm it raises a local
//! desktop notification naming the alarm's task. The popup UI is the
//! shared web bundle; offline asset caching stays in the extension's
//! service worker.

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "alarms", "onAlarm"], js_name = addListener)]
    fn on_alarm_add_listener(callback: &js_sys::Function);

    #[wasm_bindgen(js_namespace = ["chrome", "alarms"], js_name = create)]
    fn alarms_create(name: &str, info: JsValue);

    #[wasm_bindgen(js_namespace = ["chrome", "notifications"], js_name = create)]
    fn notifications_create(options: JsValue);
}

#[derive(Debug, Deserialize)]
struct Alarm {
    name: String,
}

#[derive(Debug, Serialize)]
struct NotificationOptions {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "iconUrl")]
    icon_url: &'static str,
    title: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct AlarmInfo {
    when: f64,
}

fn reminder_message(name: &str) -> String {
    format!("Reminder for task: {name}")
}

fn reminder_options(name: &str) -> NotificationOptions {
    NotificationOptions {
        kind: "basic",
        icon_url: "icons/icon128.jpg",
        title: "To-Do List Reminder",
        message: reminder_message(name),
    }
}

/// Schedules a one-shot reminder alarm. `when_ms` is an absolute epoch
/// timestamp in milliseconds, matching the alarm API's `when` field.
#[wasm_bindgen(js_name = scheduleReminder)]
pub fn schedule_reminder(name: &str, when_ms: f64) -> Result<(), JsValue> {
    let info = serde_wasm_bindgen::to_value(&AlarmInfo { when: when_ms })
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    alarms_create(name, info);
    info!(%name, when_ms, "scheduled reminder alarm");
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() {
    wasm_tracing::set_as_global_default();
    info!("starting Dayboard background worker");

    let callback = Closure::<dyn FnMut(JsValue)>::new(|value: JsValue| {
        match serde_wasm_bindgen::from_value::<Alarm>(value) {
            Ok(alarm) => {
                info!(name = %alarm.name, "alarm fired");
                match serde_wasm_bindgen::to_value(&reminder_options(&alarm.name)) {
                    Ok(options) => notifications_create(options),
                    Err(err) => error!(error = %err, "failed to encode notification"),
                }
            }
            Err(err) => error!(error = %err, "failed to decode alarm event"),
        }
    });

    on_alarm_add_listener(callback.as_ref().unchecked_ref());
    // The listener lives for the worker's whole lifetime.
    callback.forget();
}

#[cfg(test)]
mod tests {
    use super::{reminder_message, reminder_options};

    #[test]
    fn reminder_references_the_alarm_name() {
        assert_eq!(
            reminder_message("Water the plants"),
            "Reminder for task: Water the plants"
        );
    }

    #[test]
    fn notification_is_a_basic_desktop_notice() {
        let options = reminder_options("Pay rent");
        assert_eq!(options.kind, "basic");
        assert_eq!(options.title, "To-Do List Reminder");
        assert_eq!(options.message, "Reminder for task: Pay rent");
    }
}
