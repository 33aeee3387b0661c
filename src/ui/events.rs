use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};

use crate::service::{ApplyOutcome, FindResult, ServiceError};
use crate::ui::workflow::WorkflowKind;

pub enum AppEvent {
    Key(KeyEvent),
    /// Bracketed paste; a terminal file drop arrives this way.
    Paste(String),
    Tick,
    Resize(u16, u16),
    SearchFinished(Result<FindResult, ServiceError>),
    ApplyFinished {
        /// Name of the file that was submitted.
        source_name: String,
        result: Result<ApplyOutcome, ServiceError>,
    },
    /// The request task ended without reporting (panicked or dropped).
    RequestAborted(WorkflowKind),
    /// Health probe result.
    Connectivity(bool),
}

pub type AppEventSender = mpsc::Sender<AppEvent>;

pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: AppEventSender,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                if stop_flag.load(Ordering::Relaxed) {
                    break;
                }

                // Short poll so the stop flag is seen promptly.
                let timeout = tick_rate
                    .saturating_sub(last_tick.elapsed())
                    .min(Duration::from_millis(50));

                match event::poll(timeout) {
                    Ok(true) => {
                        let forwarded = match event::read() {
                            Ok(Event::Key(key)) => Some(AppEvent::Key(key)),
                            Ok(Event::Paste(text)) => Some(AppEvent::Paste(text)),
                            Ok(Event::Resize(cols, rows)) => Some(AppEvent::Resize(cols, rows)),
                            Ok(_) => None,
                            Err(err) => {
                                tracing::error!("Terminal read failed: {}", err);
                                break;
                            }
                        };
                        if let Some(app_event) = forwarded {
                            if event_tx.send(app_event).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(err) => {
                        tracing::error!("Terminal poll failed: {}", err);
                        break;
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if event_tx.send(AppEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx, tx, stop }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn sender(&self) -> AppEventSender {
        self.tx.clone()
    }

    /// Ask the input thread to exit.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
