pub mod cache;
pub mod client;
pub mod query;

pub use cache::ResponseCache;
pub use client::GithubClient;
pub use query::{decode_response, ContributionQuery, PULL_REQUESTS_QUERY};
