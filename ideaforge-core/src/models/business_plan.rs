use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::JsonObject;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPlan {
    pub id: i64,
    pub idea_id: i64,
    pub template_id: Option<String>,
    pub sections: JsonObject,
    pub tasks: Vec<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessPlanInput {
    pub idea_id: i64,
    pub template_id: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub sections: JsonObject,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tasks: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBusinessPlanInput {
    pub template_id: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub sections: JsonObject,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tasks: Vec<serde_json::Value>,
}
