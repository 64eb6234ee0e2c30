use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::block::{Position, Title};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::super::draw::section_title;

/// A preformatted document (text report or JSON), shown verbatim and scrolled vertically.
pub fn draw_document(f: &mut Frame, area: Rect, title: &str, content: &str, scroll: u16) {
    let total = content.lines().count();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title.to_string(), section_title()))
        .title(
            Title::from(format!(" line {}/{} ", (scroll as usize + 1).min(total), total))
                .position(Position::Bottom),
        );
    let paragraph = Paragraph::new(content.to_string())
        .style(Style::default().fg(Color::White))
        .block(block)
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}
