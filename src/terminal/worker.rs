use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use crate::api::Backend;
use crate::terminal::app::{Dispatch, Envelope};

/// Runs each job on its own thread so the UI keeps drawing while the backend works.
pub struct Worker {
    backend: Arc<dyn Backend>,
    tx: Sender<Envelope>,
}

impl Worker {
    pub fn new(backend: Arc<dyn Backend>, tx: Sender<Envelope>) -> Self {
        Self { backend, tx }
    }

    pub fn spawn(&self, dispatch: Dispatch) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let Dispatch { ticket, job } = dispatch;
            log::debug!("running {job:?} for {ticket:?}");
            let outcome = job.run(backend.as_ref());
            // receiver gone means the UI already quit
            let _ = tx.send(Envelope { ticket, outcome });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeBackend, email};
    use crate::terminal::app::{App, Outcome};
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    #[test]
    fn results_come_back_over_the_channel() {
        let backend = Arc::new(FakeBackend {
            emails: vec![email("boss@company.com", "Q3 Report")],
            ..FakeBackend::default()
        });
        let (tx, rx) = mpsc::channel();
        let worker = Worker::new(backend.clone(), tx);

        let mut app = App::new();
        for d in app.take_dispatches() {
            worker.spawn(d);
        }

        let envelope = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(envelope.outcome, Outcome::Inbox(_, Ok(_))));
        app.apply(envelope, Instant::now());
        assert_eq!(app.inbox.emails[0].subject, "Q3 Report");
    }
}
