//! Request and output shapes for the AI generation endpoints.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// The four generation tasks. Each has its own prompt and shape filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Summary,
    Bullets,
    ImproveText,
    Skills,
}

/// Returns the trimmed value when present and non-blank.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Accepts a string, a number (`"years": 5`) or a list of strings (joined with ", ").
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(de::Error::custom(format!("expected a string, got {other}"))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|parts| Some(parts.join(", "))),
        other => Err(de::Error::custom(format!(
            "expected a string, number or list, got {other}"
        ))),
    }
}

/// POST /ai/generate-summary body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub years: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub skills: Option<String>,
    pub custom_instructions: Option<String>,
}

impl SummaryRequest {
    pub fn validate(&self) -> Result<&str, AppError> {
        non_blank(&self.title)
            .ok_or_else(|| AppError::Validation("Professional title is required".to_string()))
    }
}

/// POST /ai/generate-bullets body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletsRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub position: Option<String>,
    pub company: Option<String>,
    pub context: Option<String>,
    pub custom_instructions: Option<String>,
}

impl BulletsRequest {
    /// The role to write bullets for: position wins over title.
    pub fn validate(&self) -> Result<&str, AppError> {
        non_blank(&self.position)
            .or_else(|| non_blank(&self.title))
            .ok_or_else(|| AppError::Validation("Position or title is required".to_string()))
    }
}

/// POST /ai/improve-text body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveTextRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: Option<String>,
    pub custom_instructions: Option<String>,
}

impl ImproveTextRequest {
    pub fn validate(&self) -> Result<&str, AppError> {
        non_blank(&self.text)
            .ok_or_else(|| AppError::Validation("Text content is required".to_string()))
    }
}

/// POST /ai/suggest-skills body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    pub field: Option<String>,
    pub custom_instructions: Option<String>,
}

impl SkillsRequest {
    pub fn validate(&self) -> Result<&str, AppError> {
        non_blank(&self.title)
            .ok_or_else(|| AppError::Validation("Professional title is required".to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct BulletsResponse {
    pub bullets: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ImproveTextResponse {
    pub improved: String,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
}
