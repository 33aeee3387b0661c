use crate::intake::SelectedFile;
use crate::results::ResultPanel;
use crate::ui::mvi::UiState;

/// The two independent workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowKind {
    Find,
    Apply,
}

impl WorkflowKind {
    pub fn title(self) -> &'static str {
        match self {
            WorkflowKind::Find => "Find Korean Text",
            WorkflowKind::Apply => "Apply Translation",
        }
    }

    pub fn action_label(self) -> &'static str {
        match self {
            WorkflowKind::Find => "Search",
            WorkflowKind::Apply => "Apply",
        }
    }

    pub fn other(self) -> Self {
        match self {
            WorkflowKind::Find => WorkflowKind::Apply,
            WorkflowKind::Apply => WorkflowKind::Find,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowState {
    pub selected: Option<SelectedFile>,
    /// Set from submit until the request's completion event.
    pub busy: bool,
    /// Drop target highlight.
    pub hover: bool,
    pub results: Option<ResultPanel>,
    /// First visible line of the results area.
    pub scroll: u16,
}

impl UiState for WorkflowState {}

impl WorkflowState {
    /// The action is enabled iff a file is selected and nothing is in flight.
    pub fn action_enabled(&self) -> bool {
        self.selected.is_some() && !self.busy
    }
}
