use ratatui::layout::Rect;
use ratatui::Frame;

use crate::model::FetchState;
use crate::render::{render_index, Presentation, NO_CONTRIBUTIONS_NOTICE};

use super::draw::{failure_style, notice_style};
use super::layout::dashboard_chunks;
use super::state::TuiState;

mod cards;
mod document;
mod header;
mod help;
mod notice;

pub use cards::draw_cards_view;
pub use document::draw_document;
pub use header::{draw_header, draw_selectors, draw_status_line};
pub use help::draw_help_overlay;
pub use notice::draw_notice;

/// Draw the whole dashboard for one frame.
pub fn draw_dashboard(f: &mut Frame, state: &TuiState) {
    let size = f.size();
    let [header, selectors, body, status] = dashboard_chunks(size);

    draw_header(f, header, state);
    draw_selectors(f, selectors, state);
    draw_body(f, body, state);
    draw_status_line(f, status, state);

    if state.show_help {
        draw_help_overlay(f, size);
    }
}

fn draw_body(f: &mut Frame, area: Rect, state: &TuiState) {
    let dataset = match &state.fetch {
        FetchState::Loading => {
            return draw_notice(f, area, "Loading contributions...", notice_style(&state.fetch));
        }
        FetchState::Failed(reason) => {
            let message = format!("Could not load contributions: {reason}");
            return draw_notice(f, area, &message, notice_style(&state.fetch));
        }
        FetchState::Ready(dataset) if dataset.is_empty() => {
            return draw_notice(f, area, NO_CONTRIBUTIONS_NOTICE, notice_style(&state.fetch));
        }
        FetchState::Ready(dataset) => dataset,
    };

    match render_index(dataset, state.tab_index) {
        Presentation::Cards(cards) => draw_cards_view(f, area, &cards, state),
        Presentation::Text(text) => {
            draw_document(f, area, "Text | e: export data.txt", &text, state.text_scroll)
        }
        Presentation::Json(json) => {
            draw_document(f, area, "JSON | e: export data.json", &json, state.text_scroll)
        }
        Presentation::Unrecognized(notice) => {
            draw_notice(f, area, &notice, notice_style(&state.fetch))
        }
        Presentation::Failed(reason) => draw_notice(f, area, &reason, failure_style()),
    }
}
