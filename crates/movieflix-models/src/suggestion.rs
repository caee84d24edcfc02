use serde::{Deserialize, Deserializer, Serialize};

/// One autocomplete candidate. Only lives for a single dropdown render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestionItem {
    pub title: String,
    #[serde(default, deserialize_with = "optional_year", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

impl SuggestionItem {
    pub fn new(title: impl Into<String>, year: Option<&str>) -> Self {
        Self {
            title: title.into(),
            year: year.map(str::to_string),
        }
    }
}

fn optional_year<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
