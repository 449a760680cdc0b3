use serde::{Deserialize, Serialize};

pub const CATEGORIZATION: &str = "categorization";

/// A prompt template stored by the backend under `/config/prompts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub template_text: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            id: None,
            kind: CATEGORIZATION.to_string(),
            template_text: String::new(),
        }
    }
}

/// First config of the categorization type, if the backend has one.
pub fn find_categorization(configs: Vec<PromptConfig>) -> Option<PromptConfig> {
    configs.into_iter().find(|c| c.kind == CATEGORIZATION)
}
