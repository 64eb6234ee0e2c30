use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::error::Result;
use crate::github::ContributionQuery;
use crate::model::{Dataset, ExportFormat, FetchState, RepoKey, Viewer};
use crate::source::ContributionsPayload;
use crate::year::YearFilter;

pub const STATUS_TTL: Duration = Duration::from_secs(4);
pub const FORMAT_TABS: usize = ExportFormat::ALL.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

pub struct TuiState {
    pub login: String,
    pub viewer: Option<Viewer>,
    pub year: YearFilter,
    pub tab_index: usize,
    pub fetch: FetchState,
    pub selected_card: Option<RepoKey>,
    pub card_scroll: HashMap<RepoKey, u16>,
    pub text_scroll: u16,
    pub show_help: bool,
    pub status_message: Option<(String, StatusKind, Instant)>,
}

impl TuiState {
    pub fn new(login: impl Into<String>, year: YearFilter) -> Self {
        Self {
            login: login.into(),
            viewer: None,
            year,
            tab_index: ExportFormat::Cards.index(),
            fetch: FetchState::Loading,
            selected_card: None,
            card_scroll: HashMap::new(),
            text_scroll: 0,
            show_help: false,
            status_message: None,
        }
    }

    pub fn query(&self) -> ContributionQuery {
        ContributionQuery::new(self.login.clone(), self.year.from_param())
    }

    /// The active format; `None` only if the tab index is out of range.
    pub fn format(&self) -> Option<ExportFormat> {
        ExportFormat::from_index(self.tab_index)
    }

    pub fn begin_loading(&mut self) {
        self.fetch = FetchState::Loading;
        self.text_scroll = 0;
    }

    /// Replace the dataset wholesale with a resolved fetch.
    pub fn apply_result(&mut self, result: Result<ContributionsPayload>) {
        match result {
            Ok(payload) => {
                if payload.viewer.is_some() {
                    self.viewer = payload.viewer;
                }
                self.reconcile_selection(&payload.dataset);
                self.fetch = FetchState::Ready(payload.dataset);
            }
            Err(e) => {
                warn!(error = %e, login = %self.login, "fetch failed");
                self.fetch = FetchState::Failed(e.to_string());
            }
        }
    }

    /// Keep the selected card and scroll offsets for repositories still present, by identity.
    fn reconcile_selection(&mut self, dataset: &Dataset) {
        let still_present = self
            .selected_card
            .as_ref()
            .is_some_and(|key| dataset.contains(key));
        if !still_present {
            self.selected_card = dataset.iter().next().map(|g| g.repository.key());
        }
        self.card_scroll.retain(|key, _| dataset.contains(key));
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), StatusKind::Info, Instant::now()));
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), StatusKind::Error, Instant::now()));
    }

    pub fn expire_status(&mut self, now: Instant) {
        if let Some((_, _, since)) = &self.status_message {
            if now.duration_since(*since) >= STATUS_TTL {
                self.status_message = None;
            }
        }
    }

    pub fn scroll_of(&self, key: &RepoKey) -> u16 {
        self.card_scroll.get(key).copied().unwrap_or(0)
    }
}
