//! Client for the Korean locale service.
//!
//! Finds untemplated Korean text in `.tsx` files and applies translation
//! templates through a remote service, either from the terminal UI
//! ([`ui::run`]) or one-shot ([`headless`]). [`server`] serves the web
//! assets of the same tool.

pub mod config;
pub mod download;
pub mod headless;
pub mod intake;
pub mod logging;
pub mod notify;
pub mod results;
pub mod server;
pub mod service;
pub mod ui;
