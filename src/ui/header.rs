use crate::ui::theme::{GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_OK};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header<'a> {
    pub online: bool,
    pub template_type: &'a str,
    pub base_url: &'a str,
}

impl Header<'_> {
    pub fn widget(&self) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let (status, status_style) = if self.online {
            ("● Online", Style::default().fg(STATUS_OK))
        } else {
            ("● Offline", Style::default().fg(STATUS_ERROR))
        };
        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("Korean Locale Tool", text_style.add_modifier(Modifier::BOLD)),
            Span::styled("  │  ", separator_style),
            Span::styled(status, status_style),
            Span::styled("  │  ", separator_style),
            Span::styled(format!("Template: {}", self.template_type), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(self.base_url.to_string(), separator_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
