use anyhow::Result;
use std::time::{Duration, Instant};

use crate::domain::prompt::{PromptConfig, find_categorization};

pub const SAVE_OK: &str = "Prompt configuration updated successfully!";
pub const SAVE_FAILED: &str = "Error saving prompt.";
pub const LOAD_FAILED: &str = "Error loading prompt.";
pub const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub clear_at: Option<Instant>,
}

impl StatusMessage {
    pub fn is_error(&self) -> bool {
        self.text.contains("Error")
    }
}

#[derive(Debug, Default)]
pub struct PromptBrainState {
    pub config: PromptConfig,
    pub is_saving: bool,
    pub status: Option<StatusMessage>,
    /// Char index into `config.template_text`.
    pub cursor: usize,
}

impl PromptBrainState {
    pub fn adopt_prompts(&mut self, result: Result<Vec<PromptConfig>>) {
        match result {
            Ok(configs) => {
                if let Some(cfg) = find_categorization(configs) {
                    self.config = cfg;
                    self.cursor = 0;
                } else {
                    log::warn!("backend has no categorization prompt; editing a blank one");
                }
            }
            Err(e) => {
                log::error!("loading prompts failed: {e:#}");
                self.status = Some(StatusMessage {
                    text: LOAD_FAILED.to_string(),
                    clear_at: None,
                });
            }
        }
    }

    /// The full config to send, or `None` while a save is already in flight.
    pub fn begin_save(&mut self) -> Option<PromptConfig> {
        if self.is_saving {
            return None;
        }
        self.is_saving = true;
        Some(self.config.clone())
    }

    pub fn finish_save(&mut self, result: Result<()>, now: Instant) {
        self.status = Some(match result {
            Ok(()) => StatusMessage {
                text: SAVE_OK.to_string(),
                clear_at: Some(now + STATUS_CLEAR_AFTER),
            },
            Err(e) => {
                log::error!("saving prompt failed: {e:#}");
                StatusMessage {
                    text: SAVE_FAILED.to_string(),
                    clear_at: None,
                }
            }
        });
        self.is_saving = false;
    }

    pub fn tick(&mut self, now: Instant) {
        let expired = matches!(
            &self.status,
            Some(StatusMessage { clear_at: Some(at), .. }) if now >= *at
        );
        if expired {
            self.status = None;
        }
    }

    // ----- Editing -----

    fn byte_at(&self, char_idx: usize) -> usize {
        let text = &self.config.template_text;
        text.char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(text.len())
    }

    fn char_len(&self) -> usize {
        self.config.template_text.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        self.config.template_text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_at(self.cursor);
        self.config.template_text.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let at = self.byte_at(self.cursor);
        self.config.template_text.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    /// (row, column) of the cursor, both in chars.
    pub fn cursor_position(&self) -> (usize, usize) {
        let mut row = 0;
        let mut col = 0;
        for c in self.config.template_text.chars().take(self.cursor) {
            if c == '\n' {
                row += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (row, col)
    }

    fn line_lengths(&self) -> Vec<usize> {
        self.config
            .template_text
            .split('\n')
            .map(|l| l.chars().count())
            .collect()
    }

    fn set_position(&mut self, row: usize, col: usize) {
        let lens = self.line_lengths();
        let row = row.min(lens.len() - 1);
        let start: usize = lens[..row].iter().map(|l| l + 1).sum();
        self.cursor = start + col.min(lens[row]);
    }

    pub fn move_up(&mut self) {
        let (row, col) = self.cursor_position();
        if row > 0 {
            self.set_position(row - 1, col);
        }
    }

    pub fn move_down(&mut self) {
        let (row, col) = self.cursor_position();
        self.set_position(row + 1, col);
    }

    pub fn move_home(&mut self) {
        let (row, _) = self.cursor_position();
        self.set_position(row, 0);
    }

    pub fn move_end(&mut self) {
        let (row, _) = self.cursor_position();
        self.set_position(row, usize::MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn with_text(text: &str) -> PromptBrainState {
        let mut s = PromptBrainState::default();
        s.config.template_text = text.to_string();
        s
    }

    #[test]
    fn adopts_categorization_prompt() {
        let mut s = PromptBrainState::default();
        s.adopt_prompts(Ok(vec![
            PromptConfig {
                id: Some("1".into()),
                kind: "reply".into(),
                template_text: "nope".into(),
            },
            PromptConfig {
                id: Some("2".into()),
                kind: "categorization".into(),
                template_text: "Categorize: {email_body}".into(),
            },
        ]));
        assert_eq!(s.config.id.as_deref(), Some("2"));
        assert_eq!(s.config.template_text, "Categorize: {email_body}");
    }

    #[test]
    fn keeps_blank_default_when_missing() {
        let mut s = PromptBrainState::default();
        s.adopt_prompts(Ok(vec![]));
        assert_eq!(s.config, PromptConfig::default());
        assert!(s.status.is_none());
    }

    #[test]
    fn load_failure_shows_error() {
        let mut s = PromptBrainState::default();
        s.adopt_prompts(Err(anyhow!("refused")));
        assert_eq!(s.status.as_ref().unwrap().text, LOAD_FAILED);
    }

    #[test]
    fn success_status_clears_after_three_seconds() {
        let mut s = with_text("Summarize: {email_body}");
        let payload = s.begin_save().unwrap();
        assert_eq!(payload.template_text, "Summarize: {email_body}");
        assert!(s.is_saving);
        assert!(s.begin_save().is_none());

        let t0 = Instant::now();
        s.finish_save(Ok(()), t0);
        assert!(!s.is_saving);
        assert_eq!(s.status.as_ref().unwrap().text, SAVE_OK);
        assert!(!s.status.as_ref().unwrap().is_error());

        s.tick(t0 + Duration::from_millis(2999));
        assert!(s.status.is_some());
        s.tick(t0 + STATUS_CLEAR_AFTER);
        assert!(s.status.is_none());
    }

    #[test]
    fn error_status_sticks() {
        let mut s = with_text("x");
        s.begin_save().unwrap();
        let t0 = Instant::now();
        s.finish_save(Err(anyhow!("500")), t0);
        assert!(!s.is_saving);
        let status = s.status.clone().unwrap();
        assert_eq!(status.text, SAVE_FAILED);
        assert!(status.is_error());

        s.tick(t0 + Duration::from_secs(60));
        assert_eq!(s.status, Some(status));
    }

    #[test]
    fn editing_inserts_and_deletes_at_cursor() {
        let mut s = with_text("ab");
        s.move_right();
        s.insert_char('é');
        assert_eq!(s.config.template_text, "aéb");
        s.backspace();
        assert_eq!(s.config.template_text, "ab");
        s.delete();
        assert_eq!(s.config.template_text, "a");
        s.delete();
        assert_eq!(s.config.template_text, "a");
        s.move_left();
        s.move_left();
        s.backspace();
        assert_eq!(s.config.template_text, "a");
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn vertical_movement_clamps_column() {
        let mut s = with_text("long line\nab\nxyz");
        s.move_end();
        assert_eq!(s.cursor_position(), (0, 9));
        s.move_down();
        assert_eq!(s.cursor_position(), (1, 2));
        s.move_down();
        assert_eq!(s.cursor_position(), (2, 2));
        s.move_down();
        assert_eq!(s.cursor_position(), (2, 2));
        s.move_up();
        s.move_up();
        assert_eq!(s.cursor_position(), (0, 2));
        s.move_home();
        assert_eq!(s.cursor, 0);

        s.move_down();
        s.move_end();
        s.insert_char('\n');
        s.insert_char('c');
        assert_eq!(s.config.template_text, "long line\nab\nc\nxyz");
        assert_eq!(s.cursor_position(), (2, 1));
    }
}
