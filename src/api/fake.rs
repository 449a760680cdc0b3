use anyhow::{Result, anyhow};
use std::sync::Mutex;

use crate::api::Backend;
use crate::domain::email::Email;
use crate::domain::prompt::PromptConfig;

/// Records every call; answers from canned data.
#[derive(Default)]
pub struct FakeBackend {
    pub emails: Vec<Email>,
    pub prompts: Vec<PromptConfig>,
    pub fail_updates: bool,
    pub calls: Mutex<Vec<String>>,
    pub saved: Mutex<Vec<PromptConfig>>,
}

impl FakeBackend {
    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Backend for FakeBackend {
    fn load_mock_data(&self) -> Result<()> {
        self.record("load_mock_data");
        Ok(())
    }

    fn get_emails(&self) -> Result<Vec<Email>> {
        self.record("get_emails");
        Ok(self.emails.clone())
    }

    fn process_emails(&self) -> Result<()> {
        self.record("process_emails");
        Ok(())
    }

    fn get_prompts(&self) -> Result<Vec<PromptConfig>> {
        self.record("get_prompts");
        Ok(self.prompts.clone())
    }

    fn update_prompt(&self, config: &PromptConfig) -> Result<()> {
        self.record("update_prompt");
        if self.fail_updates {
            return Err(anyhow!("500 Internal Server Error"));
        }
        self.saved.lock().unwrap().push(config.clone());
        Ok(())
    }
}

pub fn email(sender: &str, subject: &str) -> Email {
    Email {
        id: Some(format!("id-{subject}")),
        sender: sender.to_string(),
        subject: subject.to_string(),
        body: format!("body of {subject}"),
        timestamp: None,
        is_processed: false,
        analysis: None,
    }
}
