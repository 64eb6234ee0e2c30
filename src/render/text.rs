use std::fmt::Write;

use crate::model::Dataset;

pub const BANNER: &str = "List of repositories and their pull requests:";

/// Plain-text report of the dataset. The on-screen preview and `data.txt` both come from here.
pub fn to_text(dataset: &Dataset) -> String {
    let mut text = String::new();
    let _ = write!(text, "{BANNER}\n\n");

    for group in dataset {
        let repo = &group.repository;
        let _ = writeln!(text, "Repository: {}", repo.name);
        let _ = writeln!(text, "Owner: {}", repo.owner.login);
        let _ = writeln!(text, "Stargazers: {}", repo.stargazer_count);
        let _ = write!(text, "Owner Avatar: {}\n\n", repo.owner.avatar_url);

        text.push_str("Contributions:\n");
        for contribution in group.contributions.nodes() {
            let pr = &contribution.pull_request;
            let _ = writeln!(text, "- Pull Request: {}", pr.title);
            let _ = writeln!(text, "  ID: {}", pr.id);
            let _ = writeln!(text, "  State: {}", pr.state);
        }

        text.push('\n');
    }
    text
}
