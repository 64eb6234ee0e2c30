use console::{style, Term};

use crate::cli::CommonArgs;
use crate::github::ContributionQuery;
use crate::render::cards::{buffer_lines, render_offscreen};
use crate::render::{render_named, Presentation, NO_CONTRIBUTIONS_NOTICE};
use crate::source::ContributionsPayload;
use crate::year::year_filter;

pub fn exec(common: CommonArgs, login: String, format: String) -> anyhow::Result<()> {
    let filter = year_filter(&common)?;
    let query = ContributionQuery::new(login, filter.from_param());
    let payload = crate::source::fetch_once(&common, &query)?;

    let width = Term::stdout().size().1.max(40);
    print!("{}", presentation(&payload, &query, &format, filter.selected(), width)?);
    Ok(())
}

fn header(payload: &ContributionsPayload, query: &ContributionQuery, year: i32) -> String {
    let who = match &payload.viewer {
        Some(viewer) => format!("{} | ", viewer),
        None => String::new(),
    };
    format!("{who}{} in {year}", query.login)
}

/// Everything `show` prints. Text and JSON are printed bare so they match the exported files.
fn presentation(
    payload: &ContributionsPayload,
    query: &ContributionQuery,
    format: &str,
    year: i32,
    width: u16,
) -> anyhow::Result<String> {
    if payload.dataset.is_empty() {
        return Ok(format!(
            "{}\n{}\n",
            style(header(payload, query, year)).bold(),
            style(NO_CONTRIBUTIONS_NOTICE).yellow()
        ));
    }

    Ok(match render_named(&payload.dataset, format) {
        Presentation::Json(json) => json + "\n",
        Presentation::Text(text) => text,
        Presentation::Cards(cards) => {
            let mut lines = vec![
                style(header(payload, query, year)).bold().to_string(),
                format!(
                    "{} repositories, {} contributions",
                    style(payload.dataset.len()).cyan(),
                    style(payload.dataset.total_contributions()).cyan()
                ),
                String::new(),
            ];
            for page in render_offscreen(&cards, width) {
                lines.extend(buffer_lines(&page));
            }
            lines.join("\n") + "\n"
        }
        Presentation::Unrecognized(notice) => format!("{}\n", style(notice).yellow()),
        Presentation::Failed(reason) => anyhow::bail!(reason),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample;
    use crate::model::{Dataset, Viewer};

    fn payload(dataset: Dataset) -> ContributionsPayload {
        ContributionsPayload {
            viewer: Some(Viewer { login: "octo".into(), name: None }),
            dataset,
        }
    }

    fn query() -> ContributionQuery {
        ContributionQuery::new("a", "2024-01-01T00:00:00")
    }

    #[test]
    fn json_is_printed_verbatim() {
        let out = presentation(&payload(sample()), &query(), "json", 2024, 100).unwrap();
        assert_eq!(out, sample().to_pretty_json().unwrap() + "\n");
    }

    #[test]
    fn text_matches_report_exactly() {
        let out = presentation(&payload(sample()), &query(), "text", 2024, 100).unwrap();
        assert_eq!(out, crate::render::to_text(&sample()));
    }

    #[test]
    fn empty_dataset_shows_notice_for_every_format() {
        for format in ["cards", "text", "json", "bogus"] {
            let out =
                presentation(&payload(Dataset::default()), &query(), format, 2024, 100).unwrap();
            let plain = console::strip_ansi_codes(&out).into_owned();
            assert_eq!(plain.lines().nth(1), Some(NO_CONTRIBUTIONS_NOTICE));
        }
    }

    #[test]
    fn cards_include_header_and_grid() {
        let out = presentation(&payload(sample()), &query(), "cards", 2024, 100).unwrap();
        let plain = console::strip_ansi_codes(&out).into_owned();
        assert_eq!(plain.lines().next(), Some("octo | a in 2024"));
        assert!(plain.contains("rust-lang/cargo"));
        assert!(plain.contains("3 repositories, 6 contributions"));
    }

    #[test]
    fn unknown_format_is_a_notice() {
        let out = presentation(&payload(sample()), &query(), "yaml", 2024, 100).unwrap();
        assert_eq!(
            console::strip_ansi_codes(&out).trim_end(),
            crate::render::UNRECOGNIZED_FORMAT_NOTICE
        );
    }
}
