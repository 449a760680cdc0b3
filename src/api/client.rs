use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::api::Backend;
use crate::domain::email::Email;
use crate::domain::prompt::PromptConfig;

pub struct ApiClient {
    base: String,
    http: Client,
}

impl ApiClient {
    /// `timeout` of `None` means a request may wait forever.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let parsed =
            Url::parse(base_url).map_err(|e| anyhow!("Invalid backend url '{base_url}': {e}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!("Backend url must be http(s): {base_url}"));
        }

        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        log::debug!("GET {url}");
        let resp = self
            .http
            .get(&url)
            .send()
            .with_context(|| format!("GET {path}"))?
            .error_for_status()
            .with_context(|| format!("GET {path}"))?;
        resp.json()
            .with_context(|| format!("decoding response of GET {path}"))
    }

    // Response bodies of the mutating endpoints are not part of the contract.
    fn post_empty(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        log::debug!("POST {url}");
        self.http
            .post(&url)
            .send()
            .with_context(|| format!("POST {path}"))?
            .error_for_status()
            .with_context(|| format!("POST {path}"))?;
        Ok(())
    }
}

impl Backend for ApiClient {
    fn load_mock_data(&self) -> Result<()> {
        self.post_empty("/inbox/load_mock")
    }

    fn get_emails(&self) -> Result<Vec<Email>> {
        let emails: Vec<Email> = self.get_json("/emails")?;
        log::info!("fetched {} emails", emails.len());
        Ok(emails)
    }

    fn process_emails(&self) -> Result<()> {
        self.post_empty("/emails/process")
    }

    fn get_prompts(&self) -> Result<Vec<PromptConfig>> {
        self.get_json("/config/prompts")
    }

    fn update_prompt(&self, config: &PromptConfig) -> Result<()> {
        let url = self.url("/config/prompts");
        log::debug!("POST {url} type={}", config.kind);
        self.http
            .post(&url)
            .json(config)
            .send()
            .context("POST /config/prompts")?
            .error_for_status()
            .context("POST /config/prompts")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_base_path_prefix() {
        let c = ApiClient::new("http://example.test/api/", None).unwrap();
        assert_eq!(c.base_url(), "http://example.test/api");
        assert_eq!(c.url("/emails"), "http://example.test/api/emails");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(ApiClient::new("localhost:8000", None).is_err());
        assert!(ApiClient::new("ftp://host", None).is_err());
        assert!(ApiClient::new("not a url", None).is_err());
    }
}
