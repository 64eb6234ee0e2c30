use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::render::cards::{columns_for_width, rows_needed, visible_rows};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Header, selectors, body and status line.
pub fn dashboard_chunks(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// First card row to draw so that the selected card stays on screen.
pub fn first_visible_row(area: Rect, cards: usize, selected: Option<usize>) -> usize {
    let columns = columns_for_width(area.width);
    let visible = visible_rows(area.height);
    let last_start = rows_needed(cards, columns).saturating_sub(visible);
    let selected_row = selected.unwrap_or(0) / columns as usize;
    selected_row.saturating_sub(visible - 1).min(last_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::cards::{CARD_GAP, CARD_HEIGHT};

    #[test]
    fn selected_card_stays_visible() {
        let area = Rect { x: 0, y: 0, width: 80, height: CARD_HEIGHT * 2 + CARD_GAP };
        assert_eq!(first_visible_row(area, 10, None), 0);
        assert_eq!(first_visible_row(area, 10, Some(1)), 0);
        assert_eq!(first_visible_row(area, 10, Some(2)), 1);
        assert_eq!(first_visible_row(area, 10, Some(9)), 8);
    }

    #[test]
    fn wide_areas_pack_more_cards_per_row() {
        let area = Rect { x: 0, y: 0, width: 160, height: CARD_HEIGHT };
        assert_eq!(first_visible_row(area, 9, Some(4)), 1);
        assert_eq!(first_visible_row(area, 9, Some(8)), 2);
    }
}
