//! Platform-aware clock and id generation.
//!
//! On `wasm32` the clock reads `Date.now()` through `js_sys`; native builds use
//! `Utc::now()`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg(target_arch = "wasm32")]
pub fn now() -> DateTime<Utc> {
    let millis = js_sys::Date::now() as i64;
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Time-ordered id such as `incident-0190d5c2-...`.
pub fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7())
}
