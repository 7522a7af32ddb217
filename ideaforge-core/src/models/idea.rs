use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: i64,
    pub summary: String,
    pub description: String,
    pub bullet_points: Vec<String>,
    pub status: IdeaStatus,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Lifecycle marker of an idea.
///
/// Transitions happen as side effects of creating child records and are not
/// enforced, so any client-supplied string is kept as [`IdeaStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdeaStatus {
    #[default]
    Draft,
    Validated,
    Planning,
    Implementing,
    Completed,
    Other(String),
}

impl IdeaStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Validated => "validated",
            Self::Planning => "planning",
            Self::Implementing => "implementing",
            Self::Completed => "completed",
            Self::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "draft" => Self::Draft,
            "validated" => Self::Validated,
            "planning" => Self::Planning,
            "implementing" => Self::Implementing,
            "completed" => Self::Completed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for IdeaStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<IdeaStatus> for String {
    fn from(status: IdeaStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIdeaInput {
    pub summary: String,
    pub description: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub bullet_points: Vec<String>,
    pub status: Option<IdeaStatus>,
    pub company_name: Option<String>,
}

/// Full replacement of an idea's mutable fields.
///
/// `status` and `isActive` keep their stored values when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIdeaInput {
    pub summary: String,
    pub description: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub bullet_points: Vec<String>,
    pub status: Option<IdeaStatus>,
    pub company_name: Option<String>,
    pub is_active: Option<bool>,
}

/// An idea together with the latest records hanging off it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaOverview {
    #[serde(flatten)]
    pub idea: Idea,
    pub validation: Option<super::Validation>,
    pub business_plan: Option<super::BusinessPlan>,
    pub implementation_items: Vec<super::ImplementationItem>,
}
