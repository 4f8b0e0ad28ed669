//! Timestamp acquisition for new bill entries.
//!
//! One blocking call to a world-time service for the configured
//! timezone; any failure falls back to the local clock so a session
//! never stalls on the network.

use std::time::Duration;

use chrono::Local;

const WORLD_TIME_ENDPOINT: &str = "http://worldtimeapi.org/api/timezone";
const DATETIME_FIELD: &str = "datetime";
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
const LOCAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Fetches the current timestamp for `timezone` from the time service,
/// falling back to the local system clock on any failure. Never
/// returns an error; the caller always gets a usable stamp.
pub fn fetch_current_timestamp(timezone: &str) -> String {
    match fetch_from_service(timezone) {
        Some(stamp) => stamp,
        None => {
            tracing::debug!(timezone, "time service unavailable, using local clock");
            local_timestamp()
        }
    }
}

fn fetch_from_service(timezone: &str) -> Option<String> {
    let url = format!("{}/{}", WORLD_TIME_ENDPOINT, timezone);
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .ok()?;
    let payload: serde_json::Value = client.get(&url).send().ok()?.json().ok()?;
    extract_datetime(&payload)
}

/// Pulls the `datetime` field out of the service payload.
fn extract_datetime(payload: &serde_json::Value) -> Option<String> {
    payload
        .get(DATETIME_FIELD)
        .and_then(|value| value.as_str())
        .map(|value| value.to_string())
}

/// The local clock rendered in the same ISO-like shape the service
/// returns.
pub fn local_timestamp() -> String {
    Local::now().format(LOCAL_TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_datetime_field_from_payload() {
        let payload = json!({
            "timezone": "America/Denver",
            "datetime": "2025-03-14T09:26:53.589-06:00",
            "day_of_week": 5,
        });
        assert_eq!(
            extract_datetime(&payload).as_deref(),
            Some("2025-03-14T09:26:53.589-06:00")
        );
    }

    #[test]
    fn missing_or_non_string_field_yields_none() {
        assert_eq!(extract_datetime(&json!({ "timezone": "UTC" })), None);
        assert_eq!(extract_datetime(&json!({ "datetime": 42 })), None);
        assert_eq!(extract_datetime(&json!("not an object")), None);
    }

    #[test]
    fn local_fallback_produces_a_nonempty_stamp() {
        let stamp = local_timestamp();
        assert!(stamp.contains('T'));
        assert!(stamp.len() >= "2025-03-14T09:26:53".len());
    }
}
