use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::JsonObject;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub id: i64,
    pub idea_id: i64,
    pub validation_data: JsonObject,
    pub score: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateValidationInput {
    pub idea_id: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub validation_data: JsonObject,
    pub score: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValidationInput {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub validation_data: JsonObject,
    pub score: Option<i64>,
}
