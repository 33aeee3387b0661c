//! Async side of the UI: request execution and the connectivity probe.
//!
//! Runs on the tokio runtime; everything it learns goes back to the UI
//! thread as an [`AppEvent`].

use std::time::Duration;

use scopeguard::ScopeGuard;
use tokio::sync::mpsc;

use crate::config::{ConfigStore, ServiceConfig};
use crate::service::{ServiceClient, ServiceError};
use crate::ui::app::UiCommand;
use crate::ui::events::{AppEvent, AppEventSender};

/// Keeps one client per service config, rebuilt after a config reload
/// changes the `[service]` section.
struct ClientCache {
    config: ConfigStore,
    current: Option<(ServiceConfig, ServiceClient)>,
}

impl ClientCache {
    fn new(config: ConfigStore) -> Self {
        Self {
            config,
            current: None,
        }
    }

    fn client(&mut self) -> Result<ServiceClient, ServiceError> {
        let wanted = self.config.get().service;
        if let Some((config, client)) = &self.current {
            if *config == wanted {
                return Ok(client.clone());
            }
        }
        let client = ServiceClient::new(&wanted)?;
        tracing::info!("Service client ready for {}", client.base_url());
        self.current = Some((wanted, client.clone()));
        Ok(client)
    }
}

/// Execute commands until the UI drops its sender. Each command runs as its
/// own task so the two workflows never wait on each other.
pub async fn run_worker(
    config: ConfigStore,
    mut commands: mpsc::Receiver<UiCommand>,
    events: AppEventSender,
) {
    let mut clients = ClientCache::new(config);
    while let Some(command) = commands.recv().await {
        let client = clients.client();
        tokio::spawn(execute(client, command, events.clone()));
    }
    tracing::debug!("Request worker stopped");
}

/// Run one command and report exactly one completion event.
///
/// If the task panics or is dropped before reporting, the guard reports
/// `RequestAborted` instead.
pub async fn execute(
    client: Result<ServiceClient, ServiceError>,
    command: UiCommand,
    events: AppEventSender,
) {
    let kind = command.kind();
    let guard = scopeguard::guard(events, move |events| {
        tracing::warn!("{:?} request ended without a result", kind);
        let _ = events.send(AppEvent::RequestAborted(kind));
    });

    let event = match command {
        UiCommand::Search {
            file,
            template_type,
        } => {
            let result = match client {
                Ok(client) => client.search(&file, &template_type).await,
                Err(err) => Err(err),
            };
            if let Err(err) = &result {
                tracing::warn!("Search failed ({}): {}", err.kind(), err);
            }
            AppEvent::SearchFinished(result)
        }
        UiCommand::Apply {
            file,
            template_type,
        } => {
            let result = match client {
                Ok(client) => client.apply(&file, &template_type).await,
                Err(err) => Err(err),
            };
            if let Err(err) = &result {
                tracing::warn!("Apply failed ({}): {}", err.kind(), err);
            }
            AppEvent::ApplyFinished {
                source_name: file.name,
                result,
            }
        }
    };

    let events = ScopeGuard::into_inner(guard);
    let _ = events.send(event);
}

/// Poll the health endpoint every `interval` and report reachability.
/// Stops once the UI is gone.
pub async fn run_probe(config: ConfigStore, interval: Duration, events: AppEventSender) {
    let mut clients = ClientCache::new(config);
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let reachable = match clients.client() {
            Ok(client) => client.health().await,
            Err(_) => false,
        };
        if events.send(AppEvent::Connectivity(reachable)).is_err() {
            break;
        }
    }
}
