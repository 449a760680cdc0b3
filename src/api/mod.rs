pub mod client;
#[cfg(test)]
pub mod fake;

use anyhow::Result;

use crate::domain::email::Email;
use crate::domain::prompt::PromptConfig;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// The triage backend. Every method is one HTTP call; nothing is retried.
pub trait Backend: Send + Sync {
    fn load_mock_data(&self) -> Result<()>;
    fn get_emails(&self) -> Result<Vec<Email>>;
    fn process_emails(&self) -> Result<()>;

    fn get_prompts(&self) -> Result<Vec<PromptConfig>>;
    fn update_prompt(&self, config: &PromptConfig) -> Result<()>;
}
