use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::export::ExportSink;
use crate::fetch::Fetcher;
use crate::year::YearFilter;

use super::state::TuiState;

mod actions;

use actions::*;

const PAGE: i32 = 10;

/// Handle a keyboard event, mutating TUI state and returning `true` if the loop should exit.
pub fn handle_key_events(
    key_event: KeyEvent,
    state: &mut TuiState,
    fetcher: &mut Fetcher,
    sink: &ExportSink,
) -> io::Result<bool> {
    if key_event.kind != KeyEventKind::Press {
        return Ok(false);
    }

    if state.show_help {
        if matches!(
            key_event.code,
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('q') | KeyCode::F(1)
        ) {
            state.show_help = false;
        }
        return Ok(false);
    }

    let refetch = match key_event.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            return Ok(true)
        }
        KeyCode::Char('h') | KeyCode::F(1) => {
            state.show_help = true;
            false
        }
        KeyCode::Left | KeyCode::Char('[') => change_year(state, YearFilter::previous),
        KeyCode::Right | KeyCode::Char(']') => change_year(state, YearFilter::next),
        KeyCode::Char(c @ '1'..='4') => {
            change_year(state, |year| year.select_index(c as usize - '1' as usize))
        }
        KeyCode::Tab => {
            cycle_format(state, true);
            false
        }
        KeyCode::BackTab => {
            cycle_format(state, false);
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            scroll(state, -1);
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll(state, 1);
            false
        }
        KeyCode::PageUp => {
            scroll(state, -PAGE);
            false
        }
        KeyCode::PageDown => {
            scroll(state, PAGE);
            false
        }
        KeyCode::Char('n') => {
            select_card(state, 1);
            false
        }
        KeyCode::Char('p') => {
            select_card(state, -1);
            false
        }
        KeyCode::Char('e') => {
            export_current(state, sink);
            false
        }
        KeyCode::Char('y') => {
            copy_cards_image(state, sink);
            false
        }
        _ => false,
    };

    if refetch {
        state.begin_loading();
        fetcher.request(state.query());
    }
    Ok(false)
}
