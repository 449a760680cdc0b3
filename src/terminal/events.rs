use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::terminal::app::{ActiveView, App};

/// Returns true when the app should quit.
pub fn handle_key(key: KeyEvent, app: &mut App) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return true,
        KeyCode::Esc => return true,
        KeyCode::Tab | KeyCode::BackTab => {
            app.select(app.active.other());
            return false;
        }
        _ => {}
    }

    match app.active {
        ActiveView::Inbox => handle_inbox_keys(key, app),
        ActiveView::Brain => {
            handle_brain_keys(key, ctrl, app);
            false
        }
    }
}

fn handle_inbox_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('1') => app.select(ActiveView::Inbox),
        KeyCode::Char('2') => app.select(ActiveView::Brain),
        KeyCode::Char('r') => app.reset_inbox(),
        KeyCode::Char('a') => app.analyze_unread(),
        KeyCode::Down | KeyCode::Char('j') => app.inbox.scroll_by(1),
        KeyCode::Up | KeyCode::Char('k') => app.inbox.scroll_by(-1),
        KeyCode::PageDown => app.inbox.scroll_by(10),
        KeyCode::PageUp => app.inbox.scroll_by(-10),
        KeyCode::Home => app.inbox.scroll = 0,
        _ => {}
    }
    false
}

fn handle_brain_keys(key: KeyEvent, ctrl: bool, app: &mut App) {
    if ctrl {
        if key.code == KeyCode::Char('s') {
            app.save_prompt();
        }
        return;
    }
    let editor = &mut app.brain;
    match key.code {
        KeyCode::Char(c) => editor.insert_char(c),
        KeyCode::Enter => editor.insert_char('\n'),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Up => editor.move_up(),
        KeyCode::Down => editor.move_down(),
        KeyCode::Home => editor.move_home(),
        KeyCode::End => editor.move_end(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::app::Job;
    use crate::terminal::inbox::InboxJob;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn tab_toggles_views() {
        let mut app = App::new();
        assert!(!handle_key(press(KeyCode::Tab), &mut app));
        assert_eq!(app.active, ActiveView::Brain);
        assert!(!handle_key(press(KeyCode::BackTab), &mut app));
        assert_eq!(app.active, ActiveView::Inbox);
    }

    #[test]
    fn inbox_keys_dispatch_actions() {
        let mut app = App::new();
        app.take_dispatches();
        handle_key(press(KeyCode::Char('a')), &mut app);
        assert_eq!(
            app.take_dispatches()[0].job,
            Job::Inbox(InboxJob::Analyze)
        );
        assert!(handle_key(press(KeyCode::Char('q')), &mut app));
    }

    #[test]
    fn typing_in_brain_edits_template_not_shortcuts() {
        let mut app = App::new();
        app.select(ActiveView::Brain);
        app.take_dispatches();

        for c in "qr".chars() {
            assert!(!handle_key(press(KeyCode::Char(c)), &mut app));
        }
        handle_key(press(KeyCode::Enter), &mut app);
        assert_eq!(app.brain.config.template_text, "qr\n");

        handle_key(ctrl('s'), &mut app);
        let jobs = app.take_dispatches();
        assert!(matches!(&jobs[0].job, Job::SavePrompt(cfg) if cfg.template_text == "qr\n"));
        assert!(handle_key(ctrl('c'), &mut app));
    }
}
