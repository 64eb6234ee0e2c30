use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

use crate::model::ExportFormat;

use super::super::draw::{status_style, tab_highlight};
use super::super::state::TuiState;

/// Title line with the session identity and a key hint.
pub fn draw_header(f: &mut Frame, area: Rect, state: &TuiState) {
    let identity = match &state.viewer {
        Some(viewer) => format!("signed in as {viewer}"),
        None => "not signed in".to_string(),
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Pull requests by {}", state.login),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(identity, Style::default().fg(Color::Gray)),
        ]),
        Line::from(Span::styled(
            "←/→ year  Tab format  n/p card  e export  h help  q quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// The year and format selectors side by side.
pub fn draw_selectors(f: &mut Frame, area: Rect, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let years: Vec<String> = state
        .year
        .selectable_years()
        .iter()
        .map(|y| y.to_string())
        .collect();
    let year_tabs = Tabs::new(years)
        .block(Block::default().borders(Borders::ALL).title("Select Year"))
        .highlight_style(tab_highlight())
        .select(state.year.selected_index());
    f.render_widget(year_tabs, chunks[0]);

    let formats: Vec<&str> = ExportFormat::ALL.iter().map(|format| format.label()).collect();
    let format_tabs = Tabs::new(formats)
        .block(Block::default().borders(Borders::ALL).title("Select Format"))
        .highlight_style(tab_highlight())
        .select(state.tab_index);
    f.render_widget(format_tabs, chunks[1]);
}

pub fn draw_status_line(f: &mut Frame, area: Rect, state: &TuiState) {
    let line = match &state.status_message {
        Some((message, kind, _)) => Line::from(Span::styled(message.as_str(), status_style(*kind))),
        None => match state.fetch.renderable() {
            Some(dataset) => Line::from(Span::styled(
                format!(
                    "{} repositories, {} contributions in {}",
                    dataset.len(),
                    dataset.total_contributions(),
                    state.year.selected()
                ),
                Style::default().fg(Color::DarkGray),
            )),
            None => Line::default(),
        },
    };
    f.render_widget(Paragraph::new(line), area);
}
