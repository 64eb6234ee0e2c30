use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::block::{Position, Title};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use super::CardView;
use crate::model::{PullRequestState, RepoKey};

/// Visible pull-request rows per card; longer lists scroll inside the card.
pub const LIST_ROWS: u16 = 8;
/// Borders, header row and rule, plus the list.
pub const CARD_HEIGHT: u16 = LIST_ROWS + 4;
pub const CARD_GAP: u16 = 1;

const BADGE_PALETTE: [Color; 6] = [
    Color::Rgb(59, 130, 246),
    Color::Rgb(16, 185, 129),
    Color::Rgb(245, 158, 11),
    Color::Rgb(236, 72, 153),
    Color::Rgb(139, 92, 246),
    Color::Rgb(20, 184, 166),
];

/// Three columns on wide areas, two on medium, one otherwise.
pub fn columns_for_width(width: u16) -> u16 {
    if width >= 150 {
        3
    } else if width >= 96 {
        2
    } else {
        1
    }
}

pub fn rows_needed(cards: usize, columns: u16) -> usize {
    cards.div_ceil(columns.max(1) as usize)
}

pub fn grid_height(cards: usize, columns: u16) -> u16 {
    let rows = rows_needed(cards, columns) as u16;
    rows.saturating_mul(CARD_HEIGHT)
        .saturating_add(rows.saturating_sub(1).saturating_mul(CARD_GAP))
}

/// How many card rows fit in `height` terminal rows.
pub fn visible_rows(height: u16) -> usize {
    (((height + CARD_GAP) / (CARD_HEIGHT + CARD_GAP)) as usize).max(1)
}

pub fn max_scroll(card: &CardView) -> u16 {
    card.entries
        .len()
        .saturating_sub(LIST_ROWS as usize)
        .min(u16::MAX as usize) as u16
}

/// Stand-in for the owner avatar: the login's initial on a color derived from the login.
pub fn avatar_badge(login: &str) -> (char, Color) {
    let initial = login
        .chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('?');
    let hash = login
        .bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(b as u32));
    (initial, BADGE_PALETTE[hash as usize % BADGE_PALETTE.len()])
}

pub fn state_style(state: PullRequestState) -> Style {
    match state {
        PullRequestState::Open => Style::default().fg(Color::Green),
        PullRequestState::Closed => Style::default().fg(Color::Red),
        PullRequestState::Merged => Style::default().fg(Color::Magenta),
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

fn card_rect(area: Rect, columns: u16, slot: usize) -> Rect {
    let columns = columns.max(1);
    let width = area.width.saturating_sub(CARD_GAP * (columns - 1)) / columns;
    let col = (slot % columns as usize) as u16;
    let row = (slot / columns as usize) as u16;
    let x = area.x + col * (width + CARD_GAP);
    let y = area
        .y
        .saturating_add(row.saturating_mul(CARD_HEIGHT + CARD_GAP));
    if y >= area.bottom() {
        return Rect { x, y: area.bottom(), width, height: 0 };
    }
    let height = CARD_HEIGHT.min(area.bottom() - y);
    Rect { x, y, width, height }
}

/// Draw the cards grid starting at card row `first_row`.
pub fn render_grid<F>(
    buf: &mut Buffer,
    area: Rect,
    cards: &[CardView],
    first_row: usize,
    selected: Option<&RepoKey>,
    scroll_of: F,
) where
    F: Fn(&RepoKey) -> u16,
{
    let columns = columns_for_width(area.width);
    let skip = first_row * columns as usize;
    for (slot, card) in cards.iter().skip(skip).enumerate() {
        let rect = card_rect(area, columns, slot);
        if rect.height == 0 {
            break;
        }
        draw_card(buf, rect, card, scroll_of(&card.key), selected == Some(&card.key));
    }
}

/// Draw one repository card with its bounded, scrollable pull-request list.
pub fn draw_card(buf: &mut Buffer, area: Rect, card: &CardView, scroll: u16, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Rgb(100, 116, 139))
    };

    let scroll = scroll.min(max_scroll(card));
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    if card.entries.len() > LIST_ROWS as usize {
        let last = (scroll as usize + LIST_ROWS as usize).min(card.entries.len());
        block = block.title(
            Title::from(format!(" {}-{} of {} ", scroll + 1, last, card.entries.len()))
                .position(Position::Bottom)
                .alignment(Alignment::Right),
        );
    }
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let (initial, badge_color) = avatar_badge(&card.key.owner);
    let count = card.total_count.to_string();
    let title_room = (inner.width as usize).saturating_sub(count.len() + 5);
    let header = Line::from(vec![
        Span::styled(
            format!(" {initial} "),
            Style::default()
                .fg(Color::Black)
                .bg(badge_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            truncate(&card.title(), title_room),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]);
    let header_area = Rect { height: 1, ..inner };
    Paragraph::new(header).render(header_area, buf);
    Paragraph::new(Span::styled(
        count,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right)
    .render(header_area, buf);

    if inner.height < 2 {
        return;
    }
    let rule_area = Rect { y: inner.y + 1, height: 1, ..inner };
    Paragraph::new(Span::styled(
        "─".repeat(inner.width as usize),
        Style::default().fg(Color::DarkGray),
    ))
    .render(rule_area, buf);

    let list_area = Rect {
        y: inner.y + 2,
        height: inner.height.saturating_sub(2),
        ..inner
    };
    if list_area.height == 0 {
        return;
    }

    let lines: Vec<Line> = if card.entries.is_empty() {
        vec![Line::from(Span::styled(
            "no pull requests listed",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))]
    } else {
        let width = list_area.width as usize;
        card.entries
            .iter()
            .map(|entry| {
                let state = entry.state.as_str();
                let room = width.saturating_sub(state.len() + 1);
                Line::from(vec![
                    Span::raw(format!("{:<room$} ", truncate(&entry.title, room))),
                    Span::styled(state, state_style(entry.state)),
                ])
            })
            .collect()
    };
    Paragraph::new(lines)
        .scroll((scroll, 0))
        .render(list_area, buf);
}

/// Lay the whole grid out off-screen, in pages that each fit one ratatui buffer.
pub fn render_offscreen(cards: &[CardView], width: u16) -> Vec<Buffer> {
    let width = width.max(1);
    let columns = columns_for_width(width);
    let rows_per_page = ((u16::MAX / width) / (CARD_HEIGHT + CARD_GAP)).max(1) as usize;
    let cards_per_page = rows_per_page * columns as usize;

    cards
        .chunks(cards_per_page)
        .map(|page| {
            let area = Rect {
                x: 0,
                y: 0,
                width,
                height: grid_height(page.len(), columns),
            };
            let mut buf = Buffer::empty(area);
            render_grid(&mut buf, area, page, 0, None, |_| 0);
            buf
        })
        .collect()
}

/// The buffer's symbols row by row, trailing blanks trimmed.
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buf.get(x, y).symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}
