use serde::Serialize;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }
}

pub fn format_event(
    threshold: LogLevel,
    level: LogLevel,
    ts_millis: u64,
    event: &str,
    fields: serde_json::Value,
) -> Option<String> {
    if level < threshold {
        return None;
    }

    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(ts_millis)),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Some(serde_json::Value::Object(payload).to_string())
}

#[cfg(target_arch = "wasm32")]
pub fn log_event(threshold: LogLevel, level: LogLevel, event: &str, fields: serde_json::Value) {
    let ts_millis = js_sys::Date::now() as u64;
    let Some(line) = format_event(threshold, level, ts_millis, event, fields) else {
        return;
    };

    match level {
        LogLevel::Debug => gloo::console::debug!(line),
        LogLevel::Info => gloo::console::info!(line),
        LogLevel::Warn => gloo::console::warn!(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn levels_order_from_debug_to_warn() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
    }

    #[test]
    fn events_below_threshold_are_dropped() {
        let line = format_event(LogLevel::Info, LogLevel::Debug, 1, "particle_spawned", json!({}));
        assert_eq!(line, None);
    }

    #[test]
    fn event_fields_are_merged_into_payload() {
        let line = format_event(
            LogLevel::Info,
            LogLevel::Warn,
            1_700_000_000_000,
            "observer_unavailable",
            json!({ "behavior": "fade_in" }),
        )
        .expect("warn passes info threshold");

        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid JSON line");
        assert_eq!(parsed["ts"], json!(1_700_000_000_000u64));
        assert_eq!(parsed["level"], json!("warn"));
        assert_eq!(parsed["event"], json!("observer_unavailable"));
        assert_eq!(parsed["behavior"], json!("fade_in"));
    }

    #[test]
    fn level_serializes_lowercase() {
        assert_eq!(serde_json::to_value(LogLevel::Debug).expect("serializable"), json!("debug"));
    }
}
