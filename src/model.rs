use crate::error::{ContribError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PullRequestState {
    Open,
    Closed,
    Merged,
}

impl PullRequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestState::Open => "OPEN",
            PullRequestState::Closed => "CLOSED",
            PullRequestState::Merged => "MERGED",
        }
    }
}

impl fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: String,
    pub title: String,
    pub state: PullRequestState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub pull_request: PullRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
    pub stargazer_count: u64,
}

impl Repository {
    pub fn key(&self) -> RepoKey {
        RepoKey {
            owner: self.owner.login.clone(),
            name: self.name.clone(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}

/// Identity of a repository: `(owner.login, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoKey {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// `total_count` is authoritative; `nodes` may be truncated upstream or missing entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributions {
    pub total_count: u64,
    #[serde(default)]
    pub nodes: Option<Vec<Contribution>>,
}

impl Contributions {
    pub fn nodes(&self) -> &[Contribution] {
        self.nodes.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionsByRepository {
    pub repository: Repository,
    pub contributions: Contributions,
}

/// All per-repository contribution groups for one `(login, year)` query, in API order.
///
/// A dataset is never patched: a new query produces a new dataset that replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset(Vec<ContributionsByRepository>);

impl Dataset {
    pub fn new(groups: Vec<ContributionsByRepository>) -> Self {
        Self(groups)
    }

    pub fn groups(&self) -> &[ContributionsByRepository] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContributionsByRepository> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_contributions(&self) -> u64 {
        self.0.iter().map(|g| g.contributions.total_count).sum()
    }

    pub fn contains(&self, key: &RepoKey) -> bool {
        self.0.iter().any(|g| &g.repository.key() == key)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty JSON with two-space indentation, as shown in the JSON view and written to `data.json`.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a ContributionsByRepository;
    type IntoIter = std::slice::Iter<'a, ContributionsByRepository>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The authenticated account, shown in the dashboard header only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl fmt::Display for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) if !name.is_empty() => write!(f, "{} ({})", name, self.login),
            _ => f.write_str(&self.login),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Cards,
    Text,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Cards, ExportFormat::Text, ExportFormat::Json];

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Cards => "Cards",
            ExportFormat::Text => "Text",
            ExportFormat::Json => "JSON",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ExportFormat::Cards => 0,
            ExportFormat::Text => 1,
            ExportFormat::Json => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Cards => "cards",
            ExportFormat::Text => "text",
            ExportFormat::Json => "json",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = ContribError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cards" => Ok(ExportFormat::Cards),
            "text" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            other => Err(ContribError::UnknownFormat(other.to_string())),
        }
    }
}

/// Outcome of the most recent dataset request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Failed(String),
    Ready(Dataset),
}

impl FetchState {
    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            FetchState::Ready(dataset) => Some(dataset),
            _ => None,
        }
    }

    /// A dataset that can be rendered and exported: resolved and non-empty.
    pub fn renderable(&self) -> Option<&Dataset> {
        self.dataset().filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn pr(id: &str, title: &str, state: PullRequestState) -> Contribution {
        Contribution {
            pull_request: PullRequest {
                id: id.to_string(),
                title: title.to_string(),
                state,
            },
        }
    }

    pub fn group(
        owner: &str,
        name: &str,
        stars: u64,
        total: u64,
        nodes: Option<Vec<Contribution>>,
    ) -> ContributionsByRepository {
        ContributionsByRepository {
            repository: Repository {
                name: name.to_string(),
                owner: Owner {
                    login: owner.to_string(),
                    avatar_url: format!("https://avatars.githubusercontent.com/{owner}"),
                },
                stargazer_count: stars,
            },
            contributions: Contributions {
                total_count: total,
                nodes,
            },
        }
    }

    pub fn sample() -> Dataset {
        Dataset::new(vec![
            group(
                "a",
                "x",
                3,
                1,
                Some(vec![pr("1", "Fix bug", PullRequestState::Merged)]),
            ),
            group(
                "rust-lang",
                "cargo",
                12000,
                5,
                Some(vec![
                    pr("PR_2", "Add lint", PullRequestState::Open),
                    pr("PR_3", "Drop old flag", PullRequestState::Closed),
                ]),
            ),
            group("b", "empty", 0, 0, None),
        ])
    }
}
