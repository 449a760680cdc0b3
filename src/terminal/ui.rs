use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::terminal::app::{ActiveView, App};
use crate::terminal::inbox::email_card_lines;

const SLATE: Color = Color::Rgb(15, 23, 42);
const INDIGO: Color = Color::Rgb(79, 70, 229);
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render(f: &mut Frame, app: &mut App) {
    let [sidebar, main] =
        Layout::horizontal([Constraint::Length(24), Constraint::Min(0)]).areas(f.area());

    render_sidebar(f, sidebar, app.active);

    let main = main.inner(ratatui::layout::Margin::new(2, 1));
    match app.active {
        ActiveView::Inbox => render_inbox(f, main, app),
        ActiveView::Brain => render_brain(f, main, app),
    }
}

fn render_sidebar(f: &mut Frame, area: Rect, active: ActiveView) {
    let base = Style::default().fg(Color::White).bg(SLATE);
    let entry = |label: &'static str, view: ActiveView| {
        let style = if view == active {
            base.bg(INDIGO).add_modifier(Modifier::BOLD)
        } else {
            base
        };
        Line::from(Span::styled(format!(" {label:<20}"), style))
    };

    let text = Text::from(vec![
        Line::default(),
        Line::from(Span::styled(
            " ▦ AI Agent",
            base.add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        entry("✉ Inbox", ActiveView::Inbox),
        Line::default(),
        entry("✦ Prompt Brain", ActiveView::Brain),
    ]);
    f.render_widget(Paragraph::new(text).style(base), area);

    let [_, hint] = Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(area);
    let hint_text = Text::from(vec![
        Line::from(" Tab  switch view"),
        Line::from(" Esc  quit"),
    ]);
    f.render_widget(
        Paragraph::new(hint_text).style(base.fg(Color::Gray)),
        hint,
    );
}

fn spinner(app: &App) -> &'static str {
    SPINNER[app.spinner % SPINNER.len()]
}

fn key_hint(key: &str) -> Span<'static> {
    Span::styled(
        key.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )
}

fn render_inbox(f: &mut Frame, area: Rect, app: &mut App) {
    let spin = spinner(app);
    let state = &mut app.inbox;
    let error_height = if state.last_error.is_some() { 1 } else { 0 };
    let [header, error, list] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(error_height),
        Constraint::Min(0),
    ])
    .areas(area);

    let button = if state.controls_disabled() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let reset = if state.loading {
        Span::styled(format!("{spin} Resetting..."), button)
    } else {
        Span::styled("[r] Reset Inbox", button)
    };
    let analyze = if state.processing {
        Span::styled(format!("{spin} AI Thinking..."), button)
    } else {
        Span::styled("[a] ⚡ Analyze Unread", button.bg(if state.controls_disabled() {
            Color::Reset
        } else {
            INDIGO
        }))
    };

    let header_text = Text::from(vec![
        Line::from(Span::styled(
            "Email Inbox",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Manage and analyze your incoming messages",
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![reset, Span::raw("   "), analyze]),
    ]);
    f.render_widget(
        Paragraph::new(header_text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        ),
        header,
    );

    if let Some(err) = &state.last_error {
        f.render_widget(
            Paragraph::new(Span::styled(err.clone(), Style::default().fg(Color::Red))),
            error,
        );
    }

    if state.shows_empty_state() {
        let placeholder = Text::from(vec![
            Line::default(),
            Line::from("✉"),
            Line::from(Span::styled(
                "Inbox is empty",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                key_hint("r"),
                Span::styled(
                    " (Reset Inbox) to load sample data.",
                    Style::default().fg(Color::Gray),
                ),
            ]),
        ]);
        f.render_widget(
            Paragraph::new(placeholder)
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Plain)
                        .border_style(Style::default().fg(Color::DarkGray)),
                ),
            list,
        );
        return;
    }

    let lines: Vec<Line> = state.emails.iter().flat_map(email_card_lines).collect();
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let rows = paragraph.line_count(list.width);
    let max = rows.saturating_sub(list.height as usize);
    state.set_max_scroll(u16::try_from(max).unwrap_or(u16::MAX));
    f.render_widget(paragraph.scroll((state.scroll, 0)), list);
}

fn render_brain(f: &mut Frame, area: Rect, app: &App) {
    let state = &app.brain;
    let [title, help, editor, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new(Span::styled(
            "AI Brain Configuration",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        title,
    );
    f.render_widget(
        Paragraph::new(vec![
            Line::from("Categorization & Analysis Prompt"),
            Line::from(vec![
                Span::styled(
                    "This template controls how the AI reads emails. Variables available: ",
                    Style::default().fg(Color::Gray),
                ),
                Span::styled("{email_body}", Style::default().fg(Color::Cyan)),
            ]),
        ]),
        help,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(INDIGO));
    let inner = block.inner(editor);

    // keep the cursor inside the visible window
    let (row, col) = state.cursor_position();
    let scroll_y = row.saturating_sub(inner.height.saturating_sub(1) as usize);
    let scroll_x = col.saturating_sub(inner.width.saturating_sub(1) as usize);
    let to_u16 = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);

    f.render_widget(
        Paragraph::new(state.config.template_text.as_str())
            .block(block)
            .scroll((to_u16(scroll_y), to_u16(scroll_x))),
        editor,
    );
    if inner.width > 0 && inner.height > 0 {
        f.set_cursor_position(Position::new(
            inner.x.saturating_add(to_u16(col - scroll_x)),
            inner.y.saturating_add(to_u16(row - scroll_y)),
        ));
    }

    let [status, button] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(30)]).areas(footer);
    if let Some(msg) = &state.status {
        let color = if msg.is_error() {
            Color::Red
        } else {
            Color::Green
        };
        f.render_widget(
            Paragraph::new(Span::styled(msg.text.clone(), Style::default().fg(color))),
            status,
        );
    }
    let label = if state.is_saving {
        format!("{} Saving...", spinner(app))
    } else {
        "[Ctrl+S] Save Configuration".to_string()
    };
    let style = if state.is_saving {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White).bg(INDIGO)
    };
    f.render_widget(
        Paragraph::new(Span::styled(label, style)).alignment(Alignment::Right),
        button,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::email;
    use crate::terminal::inbox::InboxJob;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Instant;

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn empty_inbox_shows_placeholder() {
        let mut app = App::new();
        let s = screen(&mut app);
        assert!(s.contains("AI Agent"));
        assert!(s.contains("Inbox is empty"));
        assert!(s.contains("Reset Inbox"));
    }

    #[test]
    fn resetting_hides_placeholder_and_shows_progress() {
        let mut app = App::new();
        app.reset_inbox();
        let s = screen(&mut app);
        assert!(!s.contains("Inbox is empty"));
        assert!(s.contains("Resetting..."));
        assert!(s.contains("Analyze Unread"));
    }

    #[test]
    fn lists_email_cards() {
        let mut app = App::new();
        app.inbox.finish(
            InboxJob::Fetch,
            Ok(vec![email("boss@company.com", "Q3 Report")]),
        );
        let s = screen(&mut app);
        assert!(s.contains("Q3 Report"));
        assert!(s.contains("boss@company.com"));
        assert!(s.contains("Pending"));
        assert!(!s.contains("Inbox is empty"));
    }

    #[test]
    fn brain_view_shows_template_and_status() {
        let mut app = App::new();
        app.select(crate::terminal::app::ActiveView::Brain);
        app.brain.config.template_text = "Summarize: {email_body}".into();
        let s = screen(&mut app);
        assert!(s.contains("AI Brain Configuration"));
        assert!(s.contains("Summarize: {email_body}"));
        assert!(s.contains("Save Configuration"));

        app.brain.begin_save();
        assert!(screen(&mut app).contains("Saving..."));

        app.brain.finish_save(Ok(()), Instant::now());
        assert!(screen(&mut app).contains("Prompt configuration updated successfully!"));
    }

    #[test]
    fn inbox_scroll_is_clamped_to_rendered_rows() {
        let mut app = App::new();
        let emails: Vec<_> = (0..20)
            .map(|i| email("a@b", &format!("Subject {i}")))
            .collect();
        app.inbox.finish(InboxJob::Fetch, Ok(emails));
        screen(&mut app);
        let max = app.inbox.max_scroll;
        assert!(max > 0);

        app.inbox.scroll_by(10_000);
        assert_eq!(app.inbox.scroll, max);
        assert!(screen(&mut app).contains("Subject 19"));

        app.inbox.finish(InboxJob::Fetch, Ok(vec![email("a@b", "Only one")]));
        screen(&mut app);
        assert_eq!(app.inbox.scroll, 0);
        assert!(screen(&mut app).contains("Only one"));
    }

    #[test]
    fn very_long_template_line_keeps_cursor_in_editor() {
        let mut app = App::new();
        app.select(crate::terminal::app::ActiveView::Brain);
        let len = 65_546;
        app.brain.config.template_text = "x".repeat(len);
        app.brain.cursor = len;

        let mut terminal = Terminal::new(TestBackend::new(110, 30)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        let pos = terminal.get_cursor_position().unwrap();
        assert!(pos.x < 110);
        assert!(pos.y < 30);
    }
}
