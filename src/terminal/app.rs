use anyhow::Result;
use std::time::Instant;

use crate::api::Backend;
use crate::domain::email::Email;
use crate::domain::prompt::PromptConfig;
use crate::terminal::brain::PromptBrainState;
use crate::terminal::inbox::{InboxJob, InboxState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Inbox,
    Brain,
}

impl ActiveView {
    pub fn other(self) -> Self {
        match self {
            ActiveView::Inbox => ActiveView::Brain,
            ActiveView::Brain => ActiveView::Inbox,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Inbox(InboxJob),
    LoadPrompts,
    SavePrompt(PromptConfig),
}

#[derive(Debug)]
pub enum Outcome {
    Inbox(InboxJob, Result<Vec<Email>>),
    Prompts(Result<Vec<PromptConfig>>),
    Saved(Result<()>),
}

impl Job {
    /// Calls run in order; a mutation is always followed by its re-fetch.
    pub fn run(self, backend: &dyn Backend) -> Outcome {
        match self {
            Job::Inbox(kind) => {
                let result = match kind {
                    InboxJob::Fetch => backend.get_emails(),
                    InboxJob::Reset => backend.load_mock_data().and_then(|_| backend.get_emails()),
                    InboxJob::Analyze => {
                        backend.process_emails().and_then(|_| backend.get_emails())
                    }
                };
                Outcome::Inbox(kind, result)
            }
            Job::LoadPrompts => Outcome::Prompts(backend.get_prompts()),
            Job::SavePrompt(cfg) => Outcome::Saved(backend.update_prompt(&cfg)),
        }
    }
}

/// Identifies the mounted view a job was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub view: ActiveView,
    pub epoch: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub ticket: Ticket,
    pub job: Job,
}

#[derive(Debug)]
pub struct Envelope {
    pub ticket: Ticket,
    pub outcome: Outcome,
}

pub struct App {
    pub active: ActiveView,
    pub inbox: InboxState,
    pub brain: PromptBrainState,
    pub spinner: usize,
    epoch: u64,
    outbox: Vec<Dispatch>,
}

impl App {
    pub fn new() -> Self {
        let mut app = Self {
            active: ActiveView::Inbox,
            inbox: InboxState::default(),
            brain: PromptBrainState::default(),
            spinner: 0,
            epoch: 0,
            outbox: vec![],
        };
        app.mount();
        app
    }

    fn ticket(&self) -> Ticket {
        Ticket {
            view: self.active,
            epoch: self.epoch,
        }
    }

    fn push(&mut self, job: Job) {
        let ticket = self.ticket();
        self.outbox.push(Dispatch { ticket, job });
    }

    /// Fresh state for the active view plus its initial fetch.
    fn mount(&mut self) {
        match self.active {
            ActiveView::Inbox => {
                self.inbox = InboxState::default();
                self.push(Job::Inbox(InboxJob::Fetch));
            }
            ActiveView::Brain => {
                self.brain = PromptBrainState::default();
                self.push(Job::LoadPrompts);
            }
        }
    }

    pub fn select(&mut self, view: ActiveView) {
        if view == self.active {
            return;
        }
        log::debug!("switching to {view:?}");
        self.active = view;
        self.epoch += 1;
        self.mount();
    }

    pub fn reset_inbox(&mut self) {
        self.start_inbox(InboxJob::Reset);
    }

    pub fn analyze_unread(&mut self) {
        self.start_inbox(InboxJob::Analyze);
    }

    fn start_inbox(&mut self, job: InboxJob) {
        if self.active == ActiveView::Inbox && self.inbox.begin(job) {
            self.push(Job::Inbox(job));
        }
    }

    pub fn save_prompt(&mut self) {
        if self.active != ActiveView::Brain {
            return;
        }
        if let Some(cfg) = self.brain.begin_save() {
            self.push(Job::SavePrompt(cfg));
        }
    }

    pub fn take_dispatches(&mut self) -> Vec<Dispatch> {
        std::mem::take(&mut self.outbox)
    }

    pub fn apply(&mut self, envelope: Envelope, now: Instant) {
        if envelope.ticket != self.ticket() {
            log::debug!("dropping result for unmounted view {:?}", envelope.ticket);
            return;
        }
        match envelope.outcome {
            Outcome::Inbox(job, result) => self.inbox.finish(job, result),
            Outcome::Prompts(result) => self.brain.adopt_prompts(result),
            Outcome::Saved(result) => self.brain.finish_save(result, now),
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.spinner = self.spinner.wrapping_add(1);
        self.brain.tick(now);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
