use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::centered_rect;
use crate::tui::draw::section_title;

/// Draw the modal help overlay describing selectors, navigation, and exports.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "contribdash - Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled("Year:", section_title())]),
        Line::from("  ←/→ or [ ]  Previous / next year"),
        Line::from("  1-4         Pick a year directly"),
        Line::from(""),
        Line::from(vec![Span::styled("Format:", section_title())]),
        Line::from("  Tab         Next format (Cards/Text/JSON)"),
        Line::from("  Shift+Tab   Previous format"),
        Line::from(""),
        Line::from(vec![Span::styled("Navigation:", section_title())]),
        Line::from("  j/k or ↑/↓  Scroll card list or document"),
        Line::from("  PgUp/PgDn   Scroll by 10 lines"),
        Line::from("  n / p       Next / previous card"),
        Line::from(""),
        Line::from(vec![Span::styled("Export:", section_title())]),
        Line::from("  e           Export current format (data.json, data.txt, stats.png)"),
        Line::from("  y           Copy cards image to clipboard"),
        Line::from(""),
        Line::from(vec![Span::styled("General:", section_title())]),
        Line::from("  h, F1       Toggle this help"),
        Line::from("  q           Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
