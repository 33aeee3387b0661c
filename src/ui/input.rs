use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::app::App;

/// Lines moved per Up/Down press.
const SCROLL_STEP: u16 = 1;
/// Lines moved per PageUp/PageDown press.
const PAGE_STEP: u16 = 10;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') {
        app.request_quit();
        return;
    }

    // The loading overlay is modal.
    if app.is_blocked() {
        return;
    }

    if app.prompt().is_some() {
        handle_prompt_key(app, key);
        return;
    }

    if is_ctrl_char(key, 'r') {
        app.reload_config();
        return;
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Char('o') => app.open_prompt(),
        KeyCode::Enter => {
            let _ = app.submit(app.focus());
        }
        KeyCode::Char('t') => app.cycle_template(),
        KeyCode::Char('d') => {
            let _ = app.download();
        }
        KeyCode::Up => app.scroll_up(SCROLL_STEP),
        KeyCode::Down => app.scroll_down(SCROLL_STEP),
        KeyCode::PageUp => app.scroll_up(PAGE_STEP),
        KeyCode::PageDown => app.scroll_down(PAGE_STEP),
        KeyCode::Esc => app.reset_all(),
        _ => {}
    }
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_prompt(),
        KeyCode::Enter => app.submit_prompt(),
        KeyCode::Backspace => app.prompt_pop(),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut buffer = [0u8; 4];
            app.prompt_push(ch.encode_utf8(&mut buffer));
        }
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
