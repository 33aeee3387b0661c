//! Result rendering as a pure tree.
//!
//! `render_find` / `render_apply` turn service results into a [`ResultPanel`];
//! the terminal view and the headless commands only lay the tree out.

use crate::service::{ApplyOutcome, FindResult};

pub const NO_MATCHES_TITLE: &str = "No Korean text found";
pub const NO_MATCHES_NOTE: &str = "All Korean text in your file is already properly templated.";

/// A labelled value in the summary block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
}

/// How a panel should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTone {
    Neutral,
    Success,
}

/// One found element, echoed verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub heading: String,
    pub position: u64,
    pub text: String,
}

impl ResultEntry {
    /// The text split on `\n`, with a trailing `\r` removed from each piece.
    /// Always yields at least one line, empty text included.
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
    }
}

/// Render tree for a workflow's results area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub title: String,
    pub tone: PanelTone,
    pub note: Option<String>,
    pub stats: Vec<Stat>,
    pub entries: Vec<ResultEntry>,
}

impl ResultPanel {
    /// True when the panel reports that nothing was found.
    pub fn is_empty_result(&self) -> bool {
        self.title == NO_MATCHES_TITLE
    }

    /// Plain-text layout of the panel, one string per line.
    pub fn plain_lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone()];
        if let Some(note) = &self.note {
            lines.push(note.clone());
        }
        for stat in &self.stats {
            lines.push(format!("{} {}", stat.label, stat.value));
        }
        for entry in &self.entries {
            lines.push(String::new());
            lines.push(entry.heading.clone());
            lines.push(format!("Position: {}", entry.position));
            lines.push("Korean text:".to_string());
            lines.extend(entry.text_lines().map(str::to_string));
        }
        lines
    }
}

pub fn render_find(result: &FindResult) -> ResultPanel {
    if !result.success || result.elements.is_empty() {
        return ResultPanel {
            title: NO_MATCHES_TITLE.to_string(),
            tone: PanelTone::Neutral,
            note: Some(NO_MATCHES_NOTE.to_string()),
            stats: Vec::new(),
            entries: Vec::new(),
        };
    }

    let stats = vec![
        Stat {
            label: "Total Korean elements found:",
            value: result.count.to_string(),
        },
        Stat {
            label: "Processing time:",
            value: non_empty_or(
                result.duration.as_ref().map(ToString::to_string).as_deref(),
                "N/A",
            ),
        },
        Stat {
            label: "File:",
            value: non_empty_or(result.filename.as_deref(), "Unknown"),
        },
    ];

    let entries = result
        .elements
        .iter()
        .enumerate()
        .map(|(index, element)| ResultEntry {
            heading: format!("Element {}", index + 1),
            position: element.start,
            text: element.inner_text.clone(),
        })
        .collect();

    ResultPanel {
        title: "Search Results".to_string(),
        tone: PanelTone::Neutral,
        note: None,
        stats,
        entries,
    }
}

pub fn render_apply(outcome: &ApplyOutcome) -> ResultPanel {
    ResultPanel {
        title: "Translation Results".to_string(),
        tone: PanelTone::Success,
        note: None,
        stats: vec![
            Stat {
                label: "Status:",
                value: "Success".to_string(),
            },
            Stat {
                label: "File processed:",
                value: non_empty_or(Some(&outcome.suggested_filename), "Unknown"),
            },
            Stat {
                label: "Message:",
                value: non_empty_or(Some(&outcome.message), "Translation completed"),
            },
        ],
        entries: Vec::new(),
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{FoundElement, ProcessingTime};

    fn element(start: u64, text: &str) -> FoundElement {
        FoundElement {
            start,
            inner_text: text.to_string(),
        }
    }

    #[test]
    fn empty_elements_render_no_matches_even_on_success() {
        for success in [true, false] {
            let panel = render_find(&FindResult {
                success,
                count: 3,
                ..FindResult::default()
            });
            assert!(panel.is_empty_result());
            assert!(panel.entries.is_empty());
            assert!(panel.stats.is_empty());
        }
    }

    #[test]
    fn unsuccessful_result_hides_elements() {
        let panel = render_find(&FindResult {
            success: false,
            count: 1,
            elements: vec![element(1, "안녕")],
            ..FindResult::default()
        });
        assert!(panel.is_empty_result());
    }

    #[test]
    fn entries_keep_order_and_text() {
        let long_text = "가".repeat(500);
        let panel = render_find(&FindResult {
            success: true,
            count: 3,
            duration: Some(ProcessingTime::Seconds(1.5)),
            filename: Some("page.tsx".to_string()),
            elements: vec![element(40, "둘"), element(3, "하나"), element(90, &long_text)],
        });

        assert_eq!(panel.entries.len(), 3);
        assert_eq!(panel.entries[0].heading, "Element 1");
        assert_eq!(panel.entries[0].position, 40);
        assert_eq!(panel.entries[1].text, "하나");
        assert_eq!(panel.entries[2].text, long_text);
        assert_eq!(panel.stats[1].value, "1.50s");
        assert_eq!(panel.stats[2].value, "page.tsx");
    }

    #[test]
    fn missing_duration_and_filename_use_defaults() {
        let panel = render_find(&FindResult {
            success: true,
            count: 1,
            duration: None,
            filename: None,
            elements: vec![element(12, "안녕")],
        });
        let lines = panel.plain_lines();
        assert!(lines.contains(&"Processing time: N/A".to_string()));
        assert!(lines.contains(&"File: Unknown".to_string()));
    }

    #[test]
    fn blank_duration_text_shows_default() {
        let panel = render_find(&FindResult {
            success: true,
            count: 1,
            duration: Some(ProcessingTime::Text(String::new())),
            elements: vec![element(12, "안녕")],
            ..FindResult::default()
        });
        assert!(panel
            .plain_lines()
            .contains(&"Processing time: N/A".to_string()));
    }

    #[test]
    fn element_text_lines_are_kept_verbatim() {
        let panel = render_find(&FindResult {
            success: true,
            count: 2,
            elements: vec![element(1, ""), element(9, "첫째\r\n둘째\n")],
            ..FindResult::default()
        });

        let first: Vec<_> = panel.entries[0].text_lines().collect();
        assert_eq!(first, vec![""]);
        let second: Vec<_> = panel.entries[1].text_lines().collect();
        assert_eq!(second, vec!["첫째", "둘째", ""]);

        let lines = panel.plain_lines();
        let label = lines.iter().position(|l| l == "Korean text:").unwrap();
        assert_eq!(lines[label + 1], "");
        assert_eq!(lines[label + 2], "");
        assert_eq!(lines[label + 3], "Element 2");
    }

    #[test]
    fn apply_panel_has_fixed_shape() {
        let panel = render_apply(&ApplyOutcome {
            payload: b"x".to_vec(),
            suggested_filename: String::new(),
            message: String::new(),
        });
        assert_eq!(panel.title, "Translation Results");
        assert_eq!(panel.tone, PanelTone::Success);
        assert_eq!(
            panel.plain_lines(),
            vec![
                "Translation Results".to_string(),
                "Status: Success".to_string(),
                "File processed: Unknown".to_string(),
                "Message: Translation completed".to_string(),
            ]
        );
    }
}
