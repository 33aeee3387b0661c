use crate::intake::SelectedFile;
use crate::results::ResultPanel;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum WorkflowIntent {
    /// A file passed intake.
    Select(SelectedFile),

    /// Drop target highlighted (path prompt opened).
    HoverStart,

    /// Highlight cleared (prompt cancelled).
    HoverEnd,

    /// A request was dispatched.
    Begin,

    /// The request completed. `panel` is `None` on failure, which keeps
    /// the previous results.
    Finish { panel: Option<ResultPanel> },

    ScrollUp(u16),

    /// Scroll down, not past `max` (the last line index).
    ScrollDown { lines: u16, max: u16 },

    Reset,
}

impl Intent for WorkflowIntent {}
