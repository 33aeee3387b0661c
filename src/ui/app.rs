use std::path::{Path, PathBuf};
use std::time::Instant;

use ratatui::layout::Rect;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::config::{Config, ConfigStore};
use crate::download::{save_artifact, DownloadError, ProcessedArtifact};
use crate::intake::{normalize_dropped_path, IntakeError, IntakePolicy, SelectedFile};
use crate::notify::{ConnectivityChange, ConnectivityTracker, LoadingIndicator, ToastStack};
use crate::results::{render_apply, render_find};
use crate::service::{ApplyOutcome, FindResult, ServiceError};
use crate::ui::layout::results_width;
use crate::ui::mvi::Reducer;
use crate::ui::results_view::max_scroll;
use crate::ui::workflow::{WorkflowIntent, WorkflowKind, WorkflowReducer, WorkflowState};

pub const SEARCH_SUCCESS: &str = "Korean text search completed successfully!";
pub const APPLY_SUCCESS: &str = "Translation applied successfully!";
pub const DOWNLOAD_SUCCESS: &str = "File downloaded successfully!";

/// Work handed to the request worker.
#[derive(Debug)]
pub enum UiCommand {
    Search {
        file: SelectedFile,
        template_type: String,
    },
    Apply {
        file: SelectedFile,
        template_type: String,
    },
}

impl UiCommand {
    pub fn kind(&self) -> WorkflowKind {
        match self {
            UiCommand::Search { .. } => WorkflowKind::Find,
            UiCommand::Apply { .. } => WorkflowKind::Apply,
        }
    }
}

pub type UiCommandSender = mpsc::Sender<UiCommand>;

/// Why `submit` did not dispatch a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("Please select a file first")]
    NoFile,

    #[error("A request is already in progress")]
    Busy,

    #[error("Request worker is not running")]
    ChannelClosed,
}

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// Settings derived from config; refreshed on reload.
struct Settings {
    intake: IntakePolicy,
    templates: Vec<String>,
    download_dir: PathBuf,
    base_url: String,
}

impl Settings {
    fn from_config(config: &Config) -> Self {
        Self {
            intake: IntakePolicy::from(&config.intake),
            templates: config.templates.available.clone(),
            download_dir: config.download.resolve_directory(),
            base_url: config.service.base_url.clone(),
        }
    }

    fn template_index(&self, name: &str) -> usize {
        self.templates.iter().position(|t| t == name).unwrap_or(0)
    }
}

pub struct App {
    should_quit: bool,
    focus: WorkflowKind,
    find: WorkflowState,
    apply: WorkflowState,
    /// Last successful Apply payload.
    artifact: Option<ProcessedArtifact>,
    toasts: ToastStack,
    loading: LoadingIndicator,
    connectivity: ConnectivityTracker,
    /// Path prompt buffer while the chooser is open.
    prompt: Option<String>,
    template_index: usize,
    /// Terminal size at the last draw; scroll limits depend on it.
    viewport: Option<Rect>,
    config: ConfigStore,
    settings: Settings,
    command_tx: Option<UiCommandSender>,
}

impl App {
    pub fn new(config: ConfigStore) -> Self {
        let current = config.get();
        let settings = Settings::from_config(&current);
        let template_index = settings.template_index(&current.templates.default);
        Self {
            should_quit: false,
            focus: WorkflowKind::Find,
            find: WorkflowState::default(),
            apply: WorkflowState::default(),
            artifact: None,
            toasts: ToastStack::new(),
            loading: LoadingIndicator::default(),
            connectivity: ConnectivityTracker::default(),
            prompt: None,
            template_index,
            viewport: None,
            config,
            settings,
            command_tx: None,
        }
    }

    pub fn set_command_sender(&mut self, sender: UiCommandSender) {
        self.command_tx = Some(sender);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn focus(&self) -> WorkflowKind {
        self.focus
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.other();
    }

    pub fn workflow(&self, kind: WorkflowKind) -> &WorkflowState {
        match kind {
            WorkflowKind::Find => &self.find,
            WorkflowKind::Apply => &self.apply,
        }
    }

    pub fn artifact(&self) -> Option<&ProcessedArtifact> {
        self.artifact.as_ref()
    }

    /// The download control is shown iff an artifact is held.
    pub fn download_visible(&self) -> bool {
        self.artifact.is_some()
    }

    pub fn toasts(&self) -> &ToastStack {
        &self.toasts
    }

    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    /// True while the loading overlay is modal.
    pub fn is_blocked(&self) -> bool {
        self.loading.is_visible()
    }

    pub fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn template_type(&self) -> &str {
        self.settings
            .templates
            .get(self.template_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn accepted_suffix(&self) -> &str {
        self.settings.intake.accepted_suffix()
    }

    pub fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    pub fn download_dir(&self) -> &Path {
        &self.settings.download_dir
    }

    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = Some(area);
    }

    pub fn cycle_template(&mut self) {
        let count = self.settings.templates.len().max(1);
        self.template_index = (self.template_index + 1) % count;
    }

    pub fn on_tick(&mut self) {
        self.on_tick_at(Instant::now());
    }

    pub fn on_tick_at(&mut self, now: Instant) {
        self.toasts.prune(now);
        self.loading.tick();
    }

    fn dispatch(&mut self, kind: WorkflowKind, intent: WorkflowIntent) {
        match kind {
            WorkflowKind::Find => {
                dispatch_mvi!(self, find, WorkflowReducer, intent);
            }
            WorkflowKind::Apply => {
                dispatch_mvi!(self, apply, WorkflowReducer, intent);
            }
        }
    }

    // ========================================================================
    // File intake
    // ========================================================================

    /// Offer an in-memory candidate to `kind`.
    pub fn select_candidate(
        &mut self,
        kind: WorkflowKind,
        name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), IntakeError> {
        let outcome = self.settings.intake.accept(name, bytes);
        self.finish_intake(kind, outcome)
    }

    /// Offer a file on disk to `kind`. Size is checked before reading.
    pub fn select_path(&mut self, kind: WorkflowKind, path: &Path) -> Result<(), IntakeError> {
        let outcome = self.settings.intake.load(path);
        self.finish_intake(kind, outcome)
    }

    fn finish_intake(
        &mut self,
        kind: WorkflowKind,
        outcome: Result<SelectedFile, IntakeError>,
    ) -> Result<(), IntakeError> {
        match outcome {
            Ok(file) => {
                tracing::info!("{:?} workflow selected '{}' ({} bytes)", kind, file.name, file.size);
                self.dispatch(kind, WorkflowIntent::Select(file));
                Ok(())
            }
            Err(err) => {
                self.dispatch(kind, WorkflowIntent::HoverEnd);
                self.toasts.error(err.to_string());
                Err(err)
            }
        }
    }

    /// Open the path chooser for the focused workflow.
    pub fn open_prompt(&mut self) {
        if self.prompt.is_none() {
            self.prompt = Some(String::new());
            self.dispatch(self.focus, WorkflowIntent::HoverStart);
        }
    }

    pub fn prompt_push(&mut self, text: &str) {
        if let Some(buffer) = self.prompt.as_mut() {
            buffer.push_str(text);
        }
    }

    pub fn prompt_pop(&mut self) {
        if let Some(buffer) = self.prompt.as_mut() {
            buffer.pop();
        }
    }

    pub fn cancel_prompt(&mut self) {
        if self.prompt.take().is_some() {
            self.dispatch(self.focus, WorkflowIntent::HoverEnd);
        }
    }

    pub fn submit_prompt(&mut self) {
        let Some(buffer) = self.prompt.take() else {
            return;
        };
        self.drop_path(&buffer);
    }

    /// A paste either types into the open prompt or is a file drop onto the
    /// focused workflow.
    pub fn on_paste(&mut self, text: &str) {
        if self.prompt.is_some() {
            let first_line = text.lines().next().unwrap_or_default();
            self.prompt_push(first_line);
            return;
        }
        self.drop_path(text);
    }

    fn drop_path(&mut self, raw: &str) {
        let kind = self.focus;
        match normalize_dropped_path(raw) {
            Some(path) => {
                let _ = self.select_path(kind, &path);
            }
            None => {
                self.dispatch(kind, WorkflowIntent::HoverEnd);
                self.toasts.error(SubmitRejected::NoFile.to_string());
            }
        }
    }

    // ========================================================================
    // Request dispatch
    // ========================================================================

    pub fn submit(&mut self, kind: WorkflowKind) -> Result<(), SubmitRejected> {
        let (file, busy) = {
            let state = self.workflow(kind);
            (state.selected.clone(), state.busy)
        };
        let Some(file) = file else {
            self.toasts.error(SubmitRejected::NoFile.to_string());
            return Err(SubmitRejected::NoFile);
        };
        if busy {
            tracing::debug!("{:?} submit ignored: request in flight", kind);
            return Err(SubmitRejected::Busy);
        }

        let template_type = self.template_type().to_string();
        let command = match kind {
            WorkflowKind::Find => UiCommand::Search {
                file,
                template_type,
            },
            WorkflowKind::Apply => UiCommand::Apply {
                file,
                template_type,
            },
        };

        let sent = match &self.command_tx {
            Some(sender) => sender.try_send(command).map_err(|err| match err {
                TrySendError::Full(_) => SubmitRejected::Busy,
                TrySendError::Closed(_) => SubmitRejected::ChannelClosed,
            }),
            None => Err(SubmitRejected::ChannelClosed),
        };
        if let Err(rejected) = sent {
            tracing::error!("{:?} submit not dispatched: {}", kind, rejected);
            self.toasts.error(rejected.to_string());
            return Err(rejected);
        }

        self.dispatch(kind, WorkflowIntent::Begin);
        self.loading.show(kind);
        Ok(())
    }

    pub fn on_search_finished(&mut self, result: Result<FindResult, ServiceError>) {
        self.loading.hide(WorkflowKind::Find);
        match result {
            Ok(found) => {
                let panel = render_find(&found);
                self.dispatch(WorkflowKind::Find, WorkflowIntent::Finish { panel: Some(panel) });
                self.toasts.success(SEARCH_SUCCESS);
            }
            Err(err) => {
                self.dispatch(WorkflowKind::Find, WorkflowIntent::Finish { panel: None });
                self.toasts.error(format!("Search failed: {}", err));
            }
        }
    }

    pub fn on_apply_finished(
        &mut self,
        source_name: String,
        result: Result<ApplyOutcome, ServiceError>,
    ) {
        self.loading.hide(WorkflowKind::Apply);
        match result {
            Ok(outcome) => {
                let panel = render_apply(&outcome);
                self.artifact = Some(ProcessedArtifact {
                    payload: outcome.payload,
                    source_name,
                });
                self.dispatch(WorkflowKind::Apply, WorkflowIntent::Finish { panel: Some(panel) });
                self.toasts.success(APPLY_SUCCESS);
            }
            Err(err) => {
                self.dispatch(WorkflowKind::Apply, WorkflowIntent::Finish { panel: None });
                self.toasts.error(format!("Translation failed: {}", err));
            }
        }
    }

    /// The request task died without reporting.
    pub fn on_request_aborted(&mut self, kind: WorkflowKind) {
        self.loading.hide(kind);
        self.dispatch(kind, WorkflowIntent::Finish { panel: None });
        let prefix = match kind {
            WorkflowKind::Find => "Search failed",
            WorkflowKind::Apply => "Translation failed",
        };
        self.toasts.error(format!("{}: request was interrupted", prefix));
    }

    // ========================================================================
    // Download, reset, scrolling
    // ========================================================================

    pub fn download(&mut self) -> Result<PathBuf, DownloadError> {
        match save_artifact(self.artifact.as_ref(), &self.settings.download_dir) {
            Ok(path) => {
                self.toasts.success(DOWNLOAD_SUCCESS);
                Ok(path)
            }
            Err(err) => {
                match &err {
                    DownloadError::NothingToSave => self.toasts.error(err.to_string()),
                    DownloadError::Write { .. } => {
                        self.toasts.error(format!("Download failed: {}", err))
                    }
                };
                Err(err)
            }
        }
    }

    /// Clear both workflows and the artifact.
    pub fn reset_all(&mut self) {
        self.prompt = None;
        self.dispatch(WorkflowKind::Find, WorkflowIntent::Reset);
        self.dispatch(WorkflowKind::Apply, WorkflowIntent::Reset);
        self.artifact = None;
        tracing::info!("Workflows reset");
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.dispatch(self.focus, WorkflowIntent::ScrollUp(lines));
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let width = self.viewport.map(|area| results_width(area, self.focus));
        let max = self
            .workflow(self.focus)
            .results
            .as_ref()
            .map(|panel| max_scroll(panel, width))
            .unwrap_or(0);
        self.dispatch(self.focus, WorkflowIntent::ScrollDown { lines, max });
    }

    // ========================================================================
    // Connectivity and config
    // ========================================================================

    pub fn on_connectivity(&mut self, reachable: bool) {
        match self.connectivity.observe(reachable) {
            Some(change @ ConnectivityChange::Restored) => {
                self.toasts.success(change.message());
            }
            Some(change @ ConnectivityChange::Lost) => {
                self.toasts.error(change.message());
            }
            None => {}
        }
    }

    /// Re-read the config file; intake, template and download settings
    /// take effect immediately.
    pub fn reload_config(&mut self) {
        match self.config.reload() {
            Ok(()) => {
                tracing::info!("Reloaded config from {}", self.config.path().display());
                let current_template = self.template_type().to_string();
                let config = self.config.get();
                self.settings = Settings::from_config(&config);
                self.template_index = if self.settings.templates.contains(&current_template) {
                    self.settings.template_index(&current_template)
                } else {
                    self.settings.template_index(&config.templates.default)
                };
                self.toasts.success("Configuration reloaded");
            }
            Err(err) => {
                self.toasts.error(format!("Config reload failed: {}", err));
            }
        }
    }
}
