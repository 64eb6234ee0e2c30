use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::render::cards::render_grid;
use crate::render::CardView;

use super::super::layout::first_visible_row;
use super::super::state::TuiState;

/// Cards grid with the image export hint above it.
pub fn draw_cards_view(f: &mut Frame, area: Rect, cards: &[CardView], state: &TuiState) {
    if area.height == 0 {
        return;
    }
    let hint_area = Rect { height: 1, ..area };
    let grid_area = Rect {
        y: area.y + 1,
        height: area.height - 1,
        ..area
    };

    let selected = state
        .selected_card
        .as_ref()
        .and_then(|key| cards.iter().position(|c| &c.key == key));
    let position = match selected {
        Some(i) => format!("card {}/{}", i + 1, cards.len()),
        None => format!("{} cards", cards.len()),
    };
    let hint = Line::from(vec![
        Span::styled(position, Style::default().fg(Color::Cyan)),
        Span::styled(
            "  e: download stats.png  y: copy image  j/k: scroll card",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(hint), hint_area);

    let first_row = first_visible_row(grid_area, cards.len(), selected);
    render_grid(
        f.buffer_mut(),
        grid_area,
        cards,
        first_row,
        state.selected_card.as_ref(),
        |key| state.scroll_of(key),
    );
}
