//! Terminal setup for the interactive client.
//!
//! Bracketed paste is enabled because a file dropped onto the terminal
//! arrives as a pasted path, which the UI treats as a drop.

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

pub type ClientTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Puts the terminal back on drop or on panic, whichever happens first.
pub struct TerminalGuard {
    restored: Arc<AtomicBool>,
}

impl TerminalGuard {
    /// Arm the guard and chain a panic hook that restores before the
    /// default hook prints.
    fn arm() -> Self {
        let restored = Arc::new(AtomicBool::new(false));
        let hook_flag = Arc::clone(&restored);
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            run_once(&hook_flag, restore_terminal);
            previous(info);
        }));
        Self { restored }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        run_once(&self.restored, restore_terminal);
    }
}

fn run_once(flag: &AtomicBool, action: impl FnOnce()) {
    if !flag.swap(true, Ordering::SeqCst) {
        action();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        DisableBracketedPaste,
        LeaveAlternateScreen,
        Show
    );
}

/// Raw mode, alternate screen, bracketed paste and a hidden cursor.
///
/// The guard is armed right after raw mode, so a failure in any later step
/// still restores the terminal when the guard drops.
pub fn setup_terminal() -> io::Result<(ClientTerminal, TerminalGuard)> {
    enable_raw_mode()?;
    let guard = TerminalGuard::arm();

    execute!(
        io::stdout(),
        EnterAlternateScreen,
        EnableBracketedPaste,
        Clear(ClearType::All),
        Hide
    )?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    Ok((terminal, guard))
}
