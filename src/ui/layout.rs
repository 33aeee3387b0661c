use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::ui::workflow::WorkflowKind;

pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let header_height = area.height.min(3);
    let footer_height = 3.min(area.height.saturating_sub(header_height));
    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: area.height.saturating_sub(header_height + footer_height),
    };
    (header, body, footer)
}

/// Find and Apply panels side by side.
pub fn workflow_columns(body: Rect) -> (Rect, Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(body);
    (columns[0], columns[1])
}

/// Text width of `kind`'s results area on a screen of size `area`.
pub fn results_width(area: Rect, kind: WorkflowKind) -> u16 {
    let (_, body, _) = layout_regions(area);
    let (left, right) = workflow_columns(body);
    let column = match kind {
        WorkflowKind::Find => left,
        WorkflowKind::Apply => right,
    };
    // Panel borders take one column on each side.
    column.width.saturating_sub(2)
}

/// Upload area on top, results below.
pub fn panel_sections(inner: Rect, upload_height: u16) -> (Rect, Rect) {
    let upload_height = upload_height.min(inner.height);
    let upload = Rect {
        height: upload_height,
        ..inner
    };
    let results = Rect {
        y: inner.y + upload_height,
        height: inner.height - upload_height,
        ..inner
    };
    (upload, results)
}

/// A `width` x `height` rect centered in `area`, clipped to it.
pub fn centered_rect_by_size(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Stack of `count` rows of `height` in the top-right corner of `area`.
pub fn toast_slots(area: Rect, width: u16, height: u16, count: usize) -> Vec<Rect> {
    let width = width.min(area.width);
    let x = area.x + area.width - width;
    (0..count)
        .map(|i| Rect {
            x,
            y: area.y.saturating_add((i as u16).saturating_mul(height)),
            width,
            height,
        })
        .take_while(|slot| slot.y + slot.height <= area.y + area.height)
        .collect()
}
