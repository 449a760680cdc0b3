use serde::{Deserialize, Deserializer, Serialize};

/// An email as the backend returns it from `GET /emails`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    pub sender: String,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub is_processed: bool,
    #[serde(default)]
    pub analysis: Option<Analysis>,
}

impl Email {
    /// Analysis is only meaningful once the backend marked the email processed.
    pub fn processed_analysis(&self) -> Option<&Analysis> {
        if self.is_processed {
            self.analysis.as_ref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub action_items: Vec<ActionItem>,
}

/// Model output is passed through unchecked, so `null` shows up where a value belongs.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The model sometimes emits plain strings and sometimes `{task, deadline}` objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionItem {
    Text(String),
    Task {
        task: String,
        #[serde(default)]
        deadline: Option<String>,
    },
}
