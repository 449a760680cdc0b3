pub mod app;
pub mod brain;
pub mod events;
pub mod inbox;
pub mod ui;
pub mod worker;

use anyhow::{Result, anyhow};
use ratatui::{
    DefaultTerminal,
    crossterm::event::{self, Event, KeyEventKind},
};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use crate::api::Backend;
use crate::terminal::app::{App, Envelope};
use crate::terminal::worker::Worker;

const FRAME: Duration = Duration::from_millis(100);

pub fn run_tui(backend: Arc<dyn Backend>) -> Result<()> {
    color_eyre::install().map_err(|e| anyhow!("installing panic hooks: {e}"))?;

    let (tx, rx) = mpsc::channel();
    let worker = Worker::new(backend, tx);
    let mut app = App::new();

    let terminal = ratatui::init();
    let result = run(terminal, &mut app, &worker, &rx);
    ratatui::restore();

    result
}

fn run(
    mut terminal: DefaultTerminal,
    app: &mut App,
    worker: &Worker,
    rx: &Receiver<Envelope>,
) -> Result<()> {
    loop {
        for dispatch in app.take_dispatches() {
            worker.spawn(dispatch);
        }

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(FRAME)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && events::handle_key(key, app)
        {
            return Ok(());
        }

        let now = Instant::now();
        while let Ok(envelope) = rx.try_recv() {
            app.apply(envelope, now);
        }
        app.tick(now);
    }
}
