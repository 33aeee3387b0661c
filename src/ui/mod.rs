//! Terminal client: two workflow panels, toasts and a modal loading overlay.

pub mod app;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod layout;
pub mod mvi;
pub mod render;
pub mod results_view;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;
pub mod worker;
pub mod workflow;

pub use runtime::run;
