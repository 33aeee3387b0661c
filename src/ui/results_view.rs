//! Styles a [`ResultPanel`] for the terminal.
//!
//! Produces exactly the lines of [`ResultPanel::plain_lines`]. Long lines
//! wrap at the panel width instead of being cut, so scroll limits count
//! wrapped rows.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::results::{PanelTone, ResultPanel};
use crate::ui::theme::{HEADER_TEXT, KOREAN_TEXT, MUTED_TEXT, STATUS_OK};

pub fn panel_lines(panel: &ResultPanel) -> Vec<Line<'static>> {
    let title_color = match panel.tone {
        PanelTone::Success => STATUS_OK,
        PanelTone::Neutral => HEADER_TEXT,
    };
    let label_style = Style::default().fg(MUTED_TEXT);
    let value_style = Style::default().fg(HEADER_TEXT);

    let mut lines = vec![Line::from(Span::styled(
        panel.title.clone(),
        Style::default().fg(title_color).add_modifier(Modifier::BOLD),
    ))];
    if let Some(note) = &panel.note {
        lines.push(Line::from(Span::styled(note.clone(), label_style)));
    }
    for stat in &panel.stats {
        lines.push(Line::from(vec![
            Span::styled(stat.label, label_style),
            Span::raw(" "),
            Span::styled(stat.value.clone(), value_style),
        ]));
    }
    for entry in &panel.entries {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            entry.heading.clone(),
            value_style.add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("Position: {}", entry.position),
            label_style,
        )));
        lines.push(Line::from(Span::styled("Korean text:", label_style)));
        let korean_style = Style::default().fg(KOREAN_TEXT);
        lines.extend(
            entry
                .text_lines()
                .map(|text| Line::from(Span::styled(text.to_string(), korean_style))),
        );
    }
    lines
}

/// The results area widget: styled lines, wrapped, whitespace kept.
pub fn results_paragraph(panel: &ResultPanel) -> Paragraph<'static> {
    Paragraph::new(panel_lines(panel)).wrap(Wrap { trim: false })
}

/// Largest useful scroll offset: the last row of the panel at `width`
/// columns, or the last plain line when the width is not known yet.
pub fn max_scroll(panel: &ResultPanel, width: Option<u16>) -> u16 {
    let rows = match width {
        Some(width) if width > 0 => results_paragraph(panel).line_count(width),
        _ => panel.plain_lines().len(),
    };
    u16::try_from(rows.saturating_sub(1)).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::render_find;
    use crate::service::{FindResult, FoundElement};

    #[test]
    fn styled_lines_match_plain_lines() {
        let panel = render_find(&FindResult {
            success: true,
            count: 2,
            elements: vec![
                FoundElement {
                    start: 3,
                    inner_text: "안녕\n하세요".to_string(),
                },
                FoundElement {
                    start: 40,
                    inner_text: "감사합니다".to_string(),
                },
            ],
            ..FindResult::default()
        });

        let styled: Vec<String> = panel_lines(&panel)
            .iter()
            .map(|line| line.spans.iter().map(|s| &*s.content).collect())
            .collect();
        assert_eq!(styled, panel.plain_lines());
    }

    #[test]
    fn max_scroll_counts_wrapped_rows() {
        let panel = render_find(&FindResult {
            success: true,
            count: 1,
            elements: vec![FoundElement {
                start: 0,
                inner_text: "가".repeat(100),
            }],
            ..FindResult::default()
        });
        let plain_last = panel.plain_lines().len() as u16 - 1;

        assert_eq!(max_scroll(&panel, None), plain_last);
        // 200 columns of Hangul in a 40 column area take five rows.
        assert_eq!(max_scroll(&panel, Some(40)), plain_last + 4);
    }

    #[test]
    fn max_scroll_saturates_for_huge_panels() {
        let elements = (0..17_000)
            .map(|i| FoundElement {
                start: i,
                inner_text: "안녕".to_string(),
            })
            .collect();
        let panel = render_find(&FindResult {
            success: true,
            count: 17_000,
            elements,
            ..FindResult::default()
        });
        assert!(panel.plain_lines().len() > usize::from(u16::MAX));
        assert_eq!(max_scroll(&panel, None), u16::MAX);
    }
}
