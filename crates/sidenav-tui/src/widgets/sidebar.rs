use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::App;

pub struct SidebarWidget;

impl SidebarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let tree = app.lock_tree();

        let mut title = " Navigation ".to_string();
        let mut lines: Vec<Line> = Vec::new();
        let inner_width = area.width.saturating_sub(2) as usize;
        let inner_height = area.height.saturating_sub(2) as usize;

        if let Some(path) = tree.first_container_path() {
            if let Some(section) = tree.section_at(&path) {
                title = format!(" {} ", section.title);
                let offset = section.scroll.map(|s| s.offset).unwrap_or(0);

                let mut link_idx = 0usize;
                let mut content: Vec<Line> = Vec::new();
                for row in section.rows() {
                    let is_cursor = row.is_link && link_idx == app.cursor;
                    if row.is_link {
                        link_idx += 1;
                    }

                    // Priority: active > cursor > link > section header
                    let style = if row.active {
                        Style::default()
                            .fg(theme.active)
                            .add_modifier(Modifier::BOLD)
                    } else if is_cursor {
                        Style::default()
                            .fg(theme.fg0)
                            .bg(theme.selection)
                            .add_modifier(Modifier::BOLD)
                    } else if row.is_link {
                        Style::default().fg(theme.fg1)
                    } else {
                        Style::default()
                            .fg(theme.grey1)
                            .add_modifier(Modifier::BOLD)
                    };

                    let indent = "  ".repeat(row.depth);
                    let marker = if row.active { "▸ " } else { "  " };
                    let budget = inner_width
                        .saturating_sub(indent.len())
                        .saturating_sub(2);
                    let text = truncate_to_width(&row.title, budget);
                    content.push(Line::from(Span::styled(
                        format!("{indent}{marker}{text}"),
                        style,
                    )));
                    // Wrapped rows occupy extra lines in the model
                    for _ in 1..row.height {
                        content.push(Line::default());
                    }
                }

                lines = content
                    .into_iter()
                    .skip(offset as usize)
                    .take(inner_height)
                    .collect();
            }
        }

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg0));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Cut `text` down to `max` display columns
fn truncate_to_width(text: &str, max: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_by_display_width() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello", 3), "hel");
        // CJK characters are two columns wide
        assert_eq!(truncate_to_width("导航栏", 4), "导航");
    }
}
