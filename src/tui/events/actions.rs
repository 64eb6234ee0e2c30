use crate::error::Result;
use crate::export::{ExportArtifact, ExportSink, ImageAction, DEFAULT_IMAGE_BASE};
use crate::model::{ExportFormat, RepoKey};
use crate::render::cards::max_scroll;
use crate::render::{card_views, render_index, CardView, Presentation, UNRECOGNIZED_FORMAT_NOTICE};
use crate::year::YearFilter;

use super::super::state::{TuiState, FORMAT_TABS};

/// Apply a year change; returns `true` when a new fetch is needed.
pub(super) fn change_year<F>(state: &mut TuiState, change: F) -> bool
where
    F: FnOnce(&mut YearFilter) -> bool,
{
    change(&mut state.year)
}

/// Switch the format tab. Only the presentation changes; the dataset is untouched.
pub(super) fn cycle_format(state: &mut TuiState, forward: bool) {
    state.tab_index = if forward {
        (state.tab_index + 1) % FORMAT_TABS
    } else if state.tab_index == 0 {
        FORMAT_TABS - 1
    } else {
        state.tab_index - 1
    };
    state.text_scroll = 0;
}

/// Scroll the active pane: the selected card's list on cards, the document otherwise.
pub(super) fn scroll(state: &mut TuiState, delta: i32) {
    match state.format() {
        Some(ExportFormat::Cards) => scroll_selected_card(state, delta),
        Some(ExportFormat::Text | ExportFormat::Json) => {
            let limit = document_lines(state).saturating_sub(1) as i32;
            state.text_scroll = (state.text_scroll as i32 + delta).clamp(0, limit.max(0)) as u16;
        }
        None => {}
    }
}

fn document_lines(state: &TuiState) -> usize {
    match state.fetch.renderable().map(|d| render_index(d, state.tab_index)) {
        Some(Presentation::Text(doc) | Presentation::Json(doc)) => doc.lines().count(),
        _ => 0,
    }
}

fn selected_card_view(state: &TuiState) -> Option<CardView> {
    let key = state.selected_card.as_ref()?;
    state
        .fetch
        .renderable()?
        .iter()
        .find(|g| &g.repository.key() == key)
        .map(CardView::from_group)
}

fn scroll_selected_card(state: &mut TuiState, delta: i32) {
    let Some(card) = selected_card_view(state) else {
        return;
    };
    let limit = max_scroll(&card) as i32;
    let offset = state.card_scroll.entry(card.key).or_insert(0);
    *offset = (*offset as i32 + delta).clamp(0, limit) as u16;
}

/// Move the card selection by `delta` positions in dataset order.
pub(super) fn select_card(state: &mut TuiState, delta: isize) {
    let keys: Vec<RepoKey> = match state.fetch.renderable() {
        Some(dataset) => dataset.iter().map(|g| g.repository.key()).collect(),
        None => return,
    };
    let current = state
        .selected_card
        .as_ref()
        .and_then(|key| keys.iter().position(|k| k == key))
        .unwrap_or(0);
    let next = (current as isize + delta).clamp(0, keys.len() as isize - 1) as usize;
    state.selected_card = keys.get(next).cloned();
}

fn report(state: &mut TuiState, result: Result<ExportArtifact>) {
    match result {
        Ok(artifact) => state.set_status(artifact.to_string()),
        Err(e) => state.set_error(format!("Export failed: {e}")),
    }
}

/// Export the dataset in the active format. Refused until a non-empty dataset is loaded.
pub(super) fn export_current(state: &mut TuiState, sink: &ExportSink) {
    let result = match (state.fetch.renderable(), state.format()) {
        (None, _) => {
            state.set_status("Nothing to export yet");
            return;
        }
        (Some(_), None) => {
            state.set_status(UNRECOGNIZED_FORMAT_NOTICE);
            return;
        }
        (Some(dataset), Some(ExportFormat::Json)) => {
            sink.export_json(dataset).map(ExportArtifact::File)
        }
        (Some(dataset), Some(ExportFormat::Text)) => {
            sink.export_text(dataset).map(ExportArtifact::File)
        }
        (Some(dataset), Some(ExportFormat::Cards)) => sink.export_image(
            &card_views(dataset),
            ImageAction::Download,
            DEFAULT_IMAGE_BASE,
        ),
    };
    report(state, result);
}

/// Copy the cards image to the clipboard. Only offered on the cards tab.
pub(super) fn copy_cards_image(state: &mut TuiState, sink: &ExportSink) {
    if state.format() != Some(ExportFormat::Cards) {
        state.set_status("Clipboard copy is available on the Cards tab");
        return;
    }
    let result = match state.fetch.renderable() {
        None => {
            state.set_status("Nothing to export yet");
            return;
        }
        Some(dataset) => sink.export_image(
            &card_views(dataset),
            ImageAction::Clipboard,
            DEFAULT_IMAGE_BASE,
        ),
    };
    report(state, result);
}
