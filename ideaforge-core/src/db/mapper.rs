//! Translation between stored column values and the domain models.
//!
//! JSON columns hold serialized text. Decoding never fails: NULL, malformed
//! text or text of the wrong shape yields the empty default.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use serde::Serialize;
use serde_json::Value;

use crate::models::JsonObject;

/// Current time in the stored timestamp format.
pub fn now() -> String {
    format_timestamp(Utc::now())
}

/// Fixed-width RFC 3339 so that lexical order matches chronological order.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp, accepting SQLite's `CURRENT_TIMESTAMP` format too.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Read a timestamp column at `idx` as a row-mapping step.
pub fn timestamp_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("invalid timestamp: {}", raw).into(),
        )
    })
}

pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn decode_list(text: Option<String>) -> Vec<String> {
    text.and_then(|t| serde_json::from_str(&t).ok())
        .unwrap_or_default()
}

pub fn decode_object(text: Option<String>) -> JsonObject {
    match text.and_then(|t| serde_json::from_str(&t).ok()) {
        Some(Value::Object(map)) => map,
        _ => JsonObject::new(),
    }
}

pub fn decode_array(text: Option<String>) -> Vec<Value> {
    match text.and_then(|t| serde_json::from_str(&t).ok()) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

pub fn bool_column(value: i64) -> bool {
    value != 0
}
