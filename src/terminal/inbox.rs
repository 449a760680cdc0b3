use anyhow::Result;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::domain::email::{ActionItem, Email};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboxJob {
    Fetch,
    Reset,
    Analyze,
}

#[derive(Debug, Default)]
pub struct InboxState {
    pub emails: Vec<Email>,
    /// Reset in flight.
    pub loading: bool,
    /// Analyze in flight.
    pub processing: bool,
    pub scroll: u16,
    /// Last scroll offset that still shows content; set on each render.
    pub max_scroll: u16,
    pub last_error: Option<String>,
}

impl InboxState {
    pub fn controls_disabled(&self) -> bool {
        self.loading || self.processing
    }

    pub fn shows_empty_state(&self) -> bool {
        self.emails.is_empty() && !self.loading
    }

    /// Returns false when another action is already pending.
    pub fn begin(&mut self, job: InboxJob) -> bool {
        match job {
            InboxJob::Fetch => true,
            InboxJob::Reset | InboxJob::Analyze if self.controls_disabled() => false,
            InboxJob::Reset => {
                self.loading = true;
                true
            }
            InboxJob::Analyze => {
                self.processing = true;
                true
            }
        }
    }

    pub fn finish(&mut self, job: InboxJob, result: Result<Vec<Email>>) {
        match result {
            Ok(emails) => {
                self.emails = emails;
                self.last_error = None;
            }
            Err(e) => {
                log::error!("inbox {job:?} failed: {e:#}");
                self.last_error = Some(format!("Backend request failed: {e}"));
            }
        }
        match job {
            InboxJob::Fetch => {}
            InboxJob::Reset => self.loading = false,
            InboxJob::Analyze => self.processing = false,
        }
    }

    pub fn scroll_by(&mut self, delta: i32) {
        if delta < 0 {
            self.scroll = self.scroll.saturating_sub((-delta) as u16);
        } else {
            self.scroll = self.scroll.saturating_add(delta as u16);
        }
        self.scroll = self.scroll.min(self.max_scroll);
    }

    pub fn set_max_scroll(&mut self, max: u16) {
        self.max_scroll = max;
        self.scroll = self.scroll.min(max);
    }
}

// ----- Rendering rules -----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarTone {
    Blue,
    Red,
    Emerald,
}

impl AvatarTone {
    /// Purely cosmetic; independent of the backend category. Case-sensitive.
    pub fn for_sender(sender: &str) -> Self {
        if sender.contains("boss") {
            AvatarTone::Blue
        } else if sender.contains("spam") {
            AvatarTone::Red
        } else {
            AvatarTone::Emerald
        }
    }

    pub fn color(self) -> Color {
        match self {
            AvatarTone::Blue => Color::Rgb(59, 130, 246),
            AvatarTone::Red => Color::Rgb(239, 68, 68),
            AvatarTone::Emerald => Color::Rgb(16, 185, 129),
        }
    }
}

pub fn avatar_glyph(sender: &str) -> String {
    match sender.chars().next() {
        Some(c) => c.to_uppercase().collect(),
        None => "?".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryStyle {
    Work,
    Personal,
    Spam,
    Newsletter,
    Error,
    Other,
}

impl CategoryStyle {
    pub fn for_category(category: &str) -> Self {
        match category.to_lowercase().as_str() {
            "work" => CategoryStyle::Work,
            "personal" => CategoryStyle::Personal,
            "spam" => CategoryStyle::Spam,
            "newsletter" => CategoryStyle::Newsletter,
            "error" => CategoryStyle::Error,
            _ => CategoryStyle::Other,
        }
    }

    pub fn style(self) -> Style {
        let (fg, bg) = match self {
            CategoryStyle::Work => (Color::Rgb(30, 64, 175), Color::Rgb(219, 234, 254)),
            CategoryStyle::Personal => (Color::Rgb(107, 33, 168), Color::Rgb(243, 232, 255)),
            CategoryStyle::Spam => (Color::Rgb(153, 27, 27), Color::Rgb(254, 226, 226)),
            CategoryStyle::Newsletter => (Color::Rgb(133, 77, 14), Color::Rgb(254, 249, 195)),
            CategoryStyle::Error => (Color::Rgb(255, 255, 255), Color::Rgb(185, 28, 28)),
            CategoryStyle::Other => (Color::Rgb(31, 41, 55), Color::Rgb(243, 244, 246)),
        };
        Style::default()
            .fg(fg)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Badge<'a> {
    Category(&'a str),
    Pending,
}

impl Badge<'_> {
    pub fn for_email(email: &Email) -> Badge<'_> {
        match email.processed_analysis() {
            Some(a) => Badge::Category(&a.category),
            None => Badge::Pending,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Badge::Category(c) => c,
            Badge::Pending => "Pending",
        }
    }

    fn span(&self) -> Span<'static> {
        match self {
            Badge::Category(c) => {
                Span::styled(format!(" {c} "), CategoryStyle::for_category(c).style())
            }
            Badge::Pending => Span::styled(
                " ◷ Pending ",
                Style::default().fg(Color::Gray).bg(Color::DarkGray),
            ),
        }
    }
}

pub fn action_item_spans(item: &ActionItem) -> Vec<Span<'static>> {
    match item {
        ActionItem::Text(text) => vec![Span::raw(text.clone())],
        ActionItem::Task { task, deadline } => {
            let mut spans = vec![Span::styled(
                task.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if let Some(d) = deadline {
                spans.push(Span::styled(
                    format!("  Due: {d}"),
                    Style::default().fg(Color::Red),
                ));
            }
            spans
        }
    }
}

const INDENT: &str = "      ";

/// One email card as terminal lines; also used for plain-text output.
pub fn email_card_lines(email: &Email) -> Vec<Line<'static>> {
    let tone = AvatarTone::for_sender(&email.sender);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", avatar_glyph(&email.sender)),
                Style::default()
                    .fg(Color::White)
                    .bg(tone.color())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                email.subject.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Badge::for_email(email).span(),
        ]),
        Line::from(vec![
            Span::raw(INDENT),
            Span::styled(email.sender.clone(), Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![Span::raw(INDENT), Span::raw(email.body.clone())]),
    ];

    if let Some(analysis) = email.processed_analysis() {
        let accent = Style::default().fg(Color::Rgb(79, 70, 229));
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled(
                "⚡ AI INTELLIGENCE",
                accent.add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled("Summary: ", Style::default().fg(Color::Gray)),
            Span::raw(analysis.summary.clone()),
        ]));
        if !analysis.action_items.is_empty() {
            lines.push(Line::from(vec![
                Span::raw(INDENT),
                Span::styled("Action Items", Style::default().fg(Color::Gray)),
            ]));
            for item in &analysis.action_items {
                let mut spans = vec![Span::raw(INDENT), Span::styled("  ! ", accent)];
                spans.extend(action_item_spans(item));
                lines.push(Line::from(spans));
            }
        }
    }

    lines.push(Line::default());
    lines
}

pub fn line_text(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
