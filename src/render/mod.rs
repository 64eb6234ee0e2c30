pub mod cards;
pub mod text;

use crate::error::Result;
use crate::model::{ContributionsByRepository, Dataset, ExportFormat, PullRequestState, RepoKey};

pub use text::to_text;

pub const UNRECOGNIZED_FORMAT_NOTICE: &str = "Format is not matching any!";
pub const NO_CONTRIBUTIONS_NOTICE: &str = "No Contributions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardEntry {
    pub title: String,
    pub state: PullRequestState,
}

/// One repository card: identity, avatar, headline count and every pull request node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub key: RepoKey,
    pub avatar_url: String,
    pub total_count: u64,
    pub entries: Vec<CardEntry>,
}

impl CardView {
    pub fn from_group(group: &ContributionsByRepository) -> Self {
        Self {
            key: group.repository.key(),
            avatar_url: group.repository.owner.avatar_url.clone(),
            total_count: group.contributions.total_count,
            entries: group
                .contributions
                .nodes()
                .iter()
                .map(|c| CardEntry {
                    title: c.pull_request.title.clone(),
                    state: c.pull_request.state,
                })
                .collect(),
        }
    }

    pub fn title(&self) -> String {
        self.key.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    Cards(Vec<CardView>),
    Text(String),
    Json(String),
    Unrecognized(String),
    /// The format is known but producing it failed.
    Failed(String),
}

pub fn card_views(dataset: &Dataset) -> Vec<CardView> {
    dataset.iter().map(CardView::from_group).collect()
}

/// Pure view selection over `(dataset, format)`.
pub fn render(dataset: &Dataset, format: ExportFormat) -> Presentation {
    match format {
        ExportFormat::Cards => Presentation::Cards(card_views(dataset)),
        ExportFormat::Text => Presentation::Text(to_text(dataset)),
        ExportFormat::Json => json_view(dataset.to_pretty_json()),
    }
}

fn json_view(rendered: Result<String>) -> Presentation {
    match rendered {
        Ok(json) => Presentation::Json(json),
        Err(e) => Presentation::Failed(format!("JSON rendering failed: {e}")),
    }
}

/// Like [`render`], but for a format chosen by name; unknown names get the neutral notice.
pub fn render_named(dataset: &Dataset, name: &str) -> Presentation {
    match name.parse::<ExportFormat>() {
        Ok(format) => render(dataset, format),
        Err(_) => Presentation::Unrecognized(UNRECOGNIZED_FORMAT_NOTICE.to_string()),
    }
}

/// Resolve a tab position to a presentation; positions past the last format fall back to the notice.
pub fn render_index(dataset: &Dataset, index: usize) -> Presentation {
    match ExportFormat::from_index(index) {
        Some(format) => render(dataset, format),
        None => Presentation::Unrecognized(UNRECOGNIZED_FORMAT_NOTICE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample;

    #[test]
    fn json_view_is_two_space_pretty_print() {
        let dataset = sample();
        match render(&dataset, ExportFormat::Json) {
            Presentation::Json(json) => {
                assert_eq!(json, serde_json::to_string_pretty(&dataset).unwrap());
                assert_eq!(Dataset::from_json(&json).unwrap(), dataset);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cards_follow_dataset_order_and_keep_every_node() {
        let Presentation::Cards(cards) = render(&sample(), ExportFormat::Cards) else {
            panic!("expected cards");
        };
        let keys: Vec<String> = cards.iter().map(|c| c.key.to_string()).collect();
        assert_eq!(keys, vec!["a/x", "rust-lang/cargo", "b/empty"]);
        assert_eq!(cards[1].total_count, 5);
        assert_eq!(cards[1].entries.len(), 2);
        assert!(cards[2].entries.is_empty());
    }

    #[test]
    fn empty_dataset_renders_every_format() {
        let empty = Dataset::default();
        assert_eq!(render(&empty, ExportFormat::Cards), Presentation::Cards(Vec::new()));
        assert_eq!(
            render(&empty, ExportFormat::Text),
            Presentation::Text("List of repositories and their pull requests:\n\n".to_string())
        );
        assert_eq!(render(&empty, ExportFormat::Json), Presentation::Json("[]".to_string()));
    }

    #[test]
    fn json_failure_is_not_an_unknown_format() {
        let err = serde_json::from_str::<u8>("nope").unwrap_err();
        match json_view(Err(err.into())) {
            Presentation::Failed(reason) => {
                assert!(reason.starts_with("JSON rendering failed"));
                assert_ne!(reason, UNRECOGNIZED_FORMAT_NOTICE);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_format_falls_back_to_notice() {
        let expected = Presentation::Unrecognized(UNRECOGNIZED_FORMAT_NOTICE.to_string());
        assert_eq!(render_named(&sample(), "yaml"), expected);
        assert_eq!(render_index(&sample(), 7), expected);
        assert!(matches!(render_named(&sample(), "text"), Presentation::Text(_)));
    }

    #[test]
    fn switching_format_leaves_dataset_untouched() {
        let dataset = sample();
        let before = dataset.clone();
        for format in [ExportFormat::Cards, ExportFormat::Json, ExportFormat::Text] {
            let _ = render(&dataset, format);
        }
        assert_eq!(dataset, before);
    }
}
