use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{poll, read, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use tracing::{debug, warn};

use crate::cli::CommonArgs;
use crate::export::ExportSink;
use crate::fetch::Fetcher;
use crate::source::build_source;
use crate::year::year_filter;

use super::events::handle_key_events;
use super::state::TuiState;
use super::views::draw_dashboard;

const TICK: Duration = Duration::from_millis(100);

pub fn run(common: &CommonArgs, login: String) -> anyhow::Result<()> {
    let year = year_filter(common)?;
    let source = build_source(common).context("Failed to set up contributions source")?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let mut fetcher = Fetcher::new(source, runtime.handle().clone());
    let sink = ExportSink::new(&common.out_dir);

    let mut state = TuiState::new(login, year);
    fetcher.request(state.query());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut state, &mut fetcher, &sink);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result.context("TUI event loop failed")
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut TuiState,
    fetcher: &mut Fetcher,
    sink: &ExportSink,
) -> io::Result<()> {
    loop {
        if let Some(outcome) = fetcher.poll() {
            debug!(generation = outcome.generation, login = %outcome.query.login, "fetch resolved");
            state.apply_result(outcome.result);
        }
        state.expire_status(Instant::now());

        let draw_result = terminal.draw(|f| draw_dashboard(f, state));
        if let Err(e) = draw_result {
            warn!(error = %e, "TUI draw error");
        }

        if poll(TICK)? {
            if let Event::Key(key_event) = read()? {
                if handle_key_events(key_event, state, fetcher, sink)? {
                    break;
                }
            }
        }
    }
    Ok(())
}
