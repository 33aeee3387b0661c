use std::time::Instant;

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::notify::{ToastKind, ToastPhase};
use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{
    centered_rect_by_size, layout_regions, panel_sections, toast_slots, workflow_columns,
};
use crate::ui::results_view::{max_scroll, results_paragraph};
use crate::ui::theme::{
    ACCENT, DROP_TARGET, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, POPUP_BORDER, STATUS_ERROR,
    STATUS_OK,
};
use crate::ui::workflow::WorkflowKind;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    let header_widget = Header {
        online: app.is_online(),
        template_type: app.template_type(),
        base_url: app.base_url(),
    };
    frame.render_widget(header_widget.widget(), header);

    frame.render_widget(Clear, body);
    let (left, right) = workflow_columns(body);
    draw_workflow(frame, app, WorkflowKind::Find, left);
    draw_workflow(frame, app, WorkflowKind::Apply, right);

    let footer_widget = Footer {
        prompt_open: app.prompt().is_some(),
    };
    frame.render_widget(footer_widget.widget(footer), footer);

    if let Some(buffer) = app.prompt() {
        draw_prompt(frame, body, app.accepted_suffix(), buffer);
    }
    draw_toasts(frame, app, body, Instant::now());
    if app.is_blocked() {
        draw_loading(frame, app, body);
    }
}

fn draw_workflow(frame: &mut Frame<'_>, app: &App, kind: WorkflowKind, area: Rect) {
    let state = app.workflow(kind);
    let border_color = if state.hover {
        DROP_TARGET
    } else if app.focus() == kind {
        ACCENT
    } else {
        GLOBAL_BORDER
    };
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", kind.title()),
            Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let muted = Style::default().fg(MUTED_TEXT);
    let mut upload = Vec::new();
    match &state.selected {
        Some(file) => {
            upload.push(Line::from(Span::styled(
                file.name.clone(),
                Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
            )));
            upload.push(Line::from(Span::styled(file.summary(), muted)));
        }
        None if state.hover => {
            upload.push(Line::from(Span::styled(
                format!("Drop a {} file here or type its path", app.accepted_suffix()),
                Style::default().fg(DROP_TARGET),
            )));
            upload.push(Line::from(""));
        }
        None => {
            upload.push(Line::from(Span::styled(
                format!("Press o to choose a {} file, or drop one here", app.accepted_suffix()),
                muted,
            )));
            upload.push(Line::from(""));
        }
    }

    let action_style = if state.action_enabled() {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        muted.add_modifier(Modifier::DIM)
    };
    let mut action = vec![Span::styled(format!("[Enter] {}", kind.action_label()), action_style)];
    if kind == WorkflowKind::Apply {
        if let Some(artifact) = app.artifact() {
            action.push(Span::raw("   "));
            action.push(Span::styled(
                format!("[d] Download {}", artifact.saved_name()),
                Style::default().fg(STATUS_OK),
            ));
        }
    }
    upload.push(Line::from(action));
    upload.push(Line::from(""));

    let (upload_area, results_area) = panel_sections(inner, upload.len() as u16);
    frame.render_widget(Paragraph::new(upload), upload_area);

    if let Some(panel) = &state.results {
        // A resize can leave the stored offset past the last wrapped row.
        let scroll = state
            .scroll
            .min(max_scroll(panel, Some(results_area.width)));
        frame.render_widget(results_paragraph(panel).scroll((scroll, 0)), results_area);
    }
}

fn draw_prompt(frame: &mut Frame<'_>, body: Rect, suffix: &str, buffer: &str) {
    let area = centered_rect_by_size(body, 64, 3);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(Span::styled(
            format!(" Open {} file ", suffix),
            Style::default().fg(ACCENT),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    let line = Line::from(vec![
        Span::styled(buffer.to_string(), Style::default().fg(HEADER_TEXT)),
        Span::styled("█", Style::default().fg(ACCENT)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_toasts(frame: &mut Frame<'_>, app: &App, body: Rect, now: Instant) {
    let toasts: Vec<_> = app.toasts().iter().collect();
    let slots = toast_slots(body, TOAST_WIDTH, TOAST_HEIGHT, toasts.len());
    for (toast, slot) in toasts.into_iter().zip(slots) {
        let color = match toast.kind {
            ToastKind::Success => STATUS_OK,
            ToastKind::Error => STATUS_ERROR,
        };
        let mut style = Style::default().fg(HEADER_TEXT);
        if toast.phase(now) != ToastPhase::Shown {
            style = style.add_modifier(Modifier::DIM);
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        frame.render_widget(Clear, slot);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(toast.message.clone(), style))).block(block),
            slot,
        );
    }
}

fn draw_loading(frame: &mut Frame<'_>, app: &App, body: Rect) {
    let loading = app.loading();
    let spinner = SPINNER_FRAMES[(loading.animation_tick() as usize) % SPINNER_FRAMES.len()];
    let label = loading.label().unwrap_or("Working...");

    let area = centered_rect_by_size(body, 40, 5);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} ", spinner), Style::default().fg(STATUS_OK)),
            Span::styled(label, Style::default().fg(HEADER_TEXT)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}
