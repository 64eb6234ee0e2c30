use ratatui::style::{Color, Modifier, Style};

use crate::model::FetchState;

use super::state::StatusKind;

pub fn tab_highlight() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn section_title() -> Style {
    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
}

/// Color of the body notice for the current fetch state.
pub fn notice_style(fetch: &FetchState) -> Style {
    match fetch {
        FetchState::Loading => Style::default().fg(Color::Cyan),
        FetchState::Failed(_) => failure_style(),
        FetchState::Ready(_) => Style::default().fg(Color::Yellow),
    }
}

pub fn failure_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

pub fn status_style(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Info => Style::default().fg(Color::Green),
        StatusKind::Error => failure_style(),
    }
}
