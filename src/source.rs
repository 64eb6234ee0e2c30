use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::cli::CommonArgs;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::github::{ContributionQuery, GithubClient};
use crate::model::{Dataset, Viewer};

/// What one query resolves to: the dataset plus the viewer shown in the header.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionsPayload {
    pub viewer: Option<Viewer>,
    pub dataset: Dataset,
}

/// Anything that can answer a `(login, from)` query.
#[async_trait]
pub trait ContributionSource: Send + Sync {
    async fn fetch(&self, query: &ContributionQuery) -> Result<ContributionsPayload>;
}

/// Serves a dataset previously written as `data.json`, whatever the query.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ContributionSource for FileSource {
    async fn fetch(&self, query: &ContributionQuery) -> Result<ContributionsPayload> {
        info!(path = %self.path.display(), login = %query.login, "loading dataset from file");
        let json = tokio::fs::read_to_string(&self.path).await?;
        Ok(ContributionsPayload {
            viewer: None,
            dataset: Dataset::from_json(&json)?,
        })
    }
}

pub fn build_source(common: &CommonArgs) -> Result<Arc<dyn ContributionSource>> {
    match &common.input {
        Some(path) => Ok(Arc::new(FileSource::new(path.clone()))),
        None => Ok(Arc::new(GithubClient::new(&ClientConfig::from_args(common))?)),
    }
}

/// Resolve one query on a short-lived runtime, with a spinner on interactive terminals.
pub fn fetch_once(common: &CommonArgs, query: &ContributionQuery) -> anyhow::Result<ContributionsPayload> {
    let source = build_source(common).context("Failed to set up the contributions source")?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    let pb = if console::Term::stderr().is_term() {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Loading contributions for {} since {}...", query.login, query.from));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = runtime.block_on(source.fetch(query));
    pb.finish_and_clear();

    result.with_context(|| format!("Failed to load contributions for {}", query.login))
}
