use log::Level;
use serde_json::{Map, Value};

pub const DEFAULT_LOG_LEVEL: Level = Level::Info;

/// Emits one structured event line through the `log` facade.
///
/// `fields` is merged into the payload when it is a JSON object; any other
/// value is ignored so callers can pass `Value::Null` for bare events.
pub fn log_event(level: Level, event: &str, fields: Value) {
    if level > log::max_level() {
        return;
    }

    log::log!(level, "{}", event_payload(event, fields));
}

fn event_payload(event: &str, fields: Value) -> Value {
    let mut payload = Map::new();
    payload.insert("event".to_string(), Value::String(event.to_string()));

    if let Value::Object(extra) = fields {
        for (key, value) in extra {
            if key != "event" {
                payload.insert(key, value);
            }
        }
    }

    Value::Object(payload)
}

#[cfg(target_arch = "wasm32")]
pub fn init(level: Level) {
    console_error_panic_hook::set_once();
    // A second init only happens on hot reload; the first logger stays active.
    let _ = console_log::init_with_level(level);
}
