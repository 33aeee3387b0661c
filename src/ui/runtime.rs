use std::io;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::config::ConfigStore;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crate::ui::worker::{run_probe, run_worker};

const TICK_RATE: Duration = Duration::from_millis(100);
const COMMAND_QUEUE: usize = 8;

/// Run the interactive client until the user quits.
pub fn run(config: ConfigStore) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;
    let probe_interval = config.get().service.probe_interval_seconds;

    let (mut terminal, guard) = setup_terminal()?;
    let events = EventHandler::new(TICK_RATE);
    let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE);

    let mut app = App::new(config.clone());
    app.set_command_sender(command_tx);
    runtime.spawn(run_worker(config.clone(), command_rx, events.sender()));
    if probe_interval > 0 {
        runtime.spawn(run_probe(
            config,
            Duration::from_secs(u64::from(probe_interval)),
            events.sender(),
        ));
    }
    tracing::info!("UI started");

    loop {
        let mut viewport = Rect::default();
        terminal.draw(|frame| {
            viewport = frame.area();
            draw(frame, &app);
        })?;
        app.set_viewport(viewport);
        if app.should_quit() {
            break;
        }

        match events.next(TICK_RATE) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Paste(text)) => {
                if !app.is_blocked() {
                    app.on_paste(&text);
                }
            }
            Ok(AppEvent::Tick) => app.on_tick(),
            Ok(AppEvent::Resize(_, _)) => {
                terminal.autoresize()?;
            }
            Ok(AppEvent::SearchFinished(result)) => app.on_search_finished(result),
            Ok(AppEvent::ApplyFinished {
                source_name,
                result,
            }) => app.on_apply_finished(source_name, result),
            Ok(AppEvent::RequestAborted(kind)) => app.on_request_aborted(kind),
            Ok(AppEvent::Connectivity(reachable)) => app.on_connectivity(reachable),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    events.stop();
    drop(guard);
    // In-flight requests are not cancelled by the UI, but nobody is left
    // to read their results.
    runtime.shutdown_timeout(Duration::from_millis(500));
    tracing::info!("UI stopped");
    Ok(())
}
