use criterion::{black_box, criterion_group, criterion_main, Criterion};

use contribdash::model::{
    Contribution, Contributions, ContributionsByRepository, Dataset, Owner, PullRequest,
    PullRequestState, Repository,
};
use contribdash::render::{card_views, to_text};

fn dataset(repos: usize, prs: usize) -> Dataset {
    Dataset::new(
        (0..repos)
            .map(|r| ContributionsByRepository {
                repository: Repository {
                    name: format!("repo-{r}"),
                    owner: Owner {
                        login: format!("owner-{}", r % 7),
                        avatar_url: format!("https://avatars.githubusercontent.com/u/{r}"),
                    },
                    stargazer_count: r as u64 * 13,
                },
                contributions: Contributions {
                    total_count: prs as u64,
                    nodes: Some(
                        (0..prs)
                            .map(|p| Contribution {
                                pull_request: PullRequest {
                                    id: format!("PR_{r}_{p}"),
                                    title: format!("Change number {p} in repo {r}"),
                                    state: PullRequestState::Merged,
                                },
                            })
                            .collect(),
                    ),
                },
            })
            .collect(),
    )
}

fn bench_reports(c: &mut Criterion) {
    let data = dataset(100, 100);
    c.bench_function("to_text 100x100", |b| b.iter(|| to_text(black_box(&data))));
    c.bench_function("to_pretty_json 100x100", |b| {
        b.iter(|| black_box(&data).to_pretty_json())
    });
    c.bench_function("card_views 100x100", |b| b.iter(|| card_views(black_box(&data))));
}

criterion_group!(benches, bench_reports);
criterion_main!(benches);
