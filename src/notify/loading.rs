//! Blocking loading indicator.
//!
//! Each dispatched request holds the indicator from `show` until its paired
//! `hide`. The indicator is visible while any workflow holds it.

use crate::ui::workflow::WorkflowKind;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingIndicator {
    holders: Vec<WorkflowKind>,
    animation_tick: u8,
}

impl LoadingIndicator {
    pub fn show(&mut self, kind: WorkflowKind) {
        if !self.holders.contains(&kind) {
            self.holders.push(kind);
        }
        if self.holders.len() == 1 {
            self.animation_tick = 0;
        }
    }

    /// Release the hold of `kind`. Releasing twice is a no-op.
    pub fn hide(&mut self, kind: WorkflowKind) {
        self.holders.retain(|holder| *holder != kind);
    }

    pub fn is_visible(&self) -> bool {
        !self.holders.is_empty()
    }

    pub fn is_held_by(&self, kind: WorkflowKind) -> bool {
        self.holders.contains(&kind)
    }

    pub fn tick(&mut self) {
        if self.is_visible() {
            self.animation_tick = self.animation_tick.wrapping_add(1);
        }
    }

    pub fn animation_tick(&self) -> u8 {
        self.animation_tick
    }

    /// Label for the workflow that most recently took the indicator.
    pub fn label(&self) -> Option<&'static str> {
        self.holders.last().map(|kind| match kind {
            WorkflowKind::Find => "Searching for Korean text...",
            WorkflowKind::Apply => "Applying translation...",
        })
    }
}
