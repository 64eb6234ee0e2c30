use serde::{Deserialize, Serialize};

use crate::error::{ContribError, Result};
use crate::model::{ContributionsByRepository, Dataset, Viewer};
use crate::source::ContributionsPayload;

pub const PULL_REQUESTS_QUERY: &str = r#"
query PullRequestContributions($login: String!, $from: DateTime) {
  viewer {
    login
    name
  }
  user(login: $login) {
    contributionsCollection(from: $from) {
      pullRequestContributionsByRepository(maxRepositories: 100) {
        repository {
          name
          owner {
            login
            avatarUrl
          }
          stargazerCount
        }
        contributions(first: 100) {
          totalCount
          nodes {
            pullRequest {
              id
              title
              state
            }
          }
        }
      }
    }
  }
}
"#;

/// Variables for one dataset request. Also the response cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContributionQuery {
    pub login: String,
    pub from: String,
}

impl ContributionQuery {
    pub fn new(login: impl Into<String>, from: impl Into<String>) -> Self {
        Self { login: login.into(), from: from.into() }
    }
}

#[derive(Serialize)]
pub(crate) struct GraphQlRequest<'a> {
    pub(crate) query: &'a str,
    pub(crate) variables: &'a ContributionQuery,
}

#[derive(Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub(crate) data: Option<T>,
    #[serde(default)]
    pub(crate) errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
pub(crate) struct GraphQlError {
    pub(crate) message: String,
}

#[derive(Deserialize)]
pub(crate) struct QueryData {
    pub(crate) viewer: Option<Viewer>,
    pub(crate) user: Option<UserNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserNode {
    pub(crate) contributions_collection: Option<ContributionsCollection>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContributionsCollection {
    pub(crate) pull_request_contributions_by_repository: Option<Vec<ContributionsByRepository>>,
}

/// Turn a GraphQL response body into a payload.
///
/// Only presence is checked: an unknown user is an error, a missing collection is an empty dataset.
pub fn decode_response(body: &str, login: &str) -> Result<ContributionsPayload> {
    let response: GraphQlResponse<QueryData> = serde_json::from_str(body)?;

    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(ContribError::GraphQl(messages.join("; ")));
    }

    let data = response
        .data
        .ok_or_else(|| ContribError::MissingData("response has no data".to_string()))?;
    let user = data
        .user
        .ok_or_else(|| ContribError::MissingData(format!("no GitHub user with login '{login}'")))?;

    let groups = user
        .contributions_collection
        .and_then(|c| c.pull_request_contributions_by_repository)
        .unwrap_or_default();

    Ok(ContributionsPayload {
        viewer: data.viewer,
        dataset: Dataset::new(groups),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
      "data": {
        "viewer": {"login": "octo", "name": "Octo Cat"},
        "user": {
          "contributionsCollection": {
            "pullRequestContributionsByRepository": [
              {
                "repository": {
                  "name": "x",
                  "owner": {"login": "a", "avatarUrl": "https://avatars.example/a"},
                  "stargazerCount": 3
                },
                "contributions": {
                  "totalCount": 2,
                  "nodes": [{"pullRequest": {"id": "1", "title": "Fix bug", "state": "MERGED"}}]
                }
              }
            ]
          }
        }
      }
    }"#;

    #[test]
    fn decodes_nested_payload() {
        let payload = decode_response(BODY, "octo").unwrap();
        assert_eq!(payload.viewer.unwrap().to_string(), "Octo Cat (octo)");
        assert_eq!(payload.dataset.len(), 1);
        let group = &payload.dataset.groups()[0];
        assert_eq!(group.repository.full_name(), "a/x");
        assert_eq!(group.contributions.total_count, 2);
        assert_eq!(group.contributions.nodes().len(), 1);
    }

    #[test]
    fn graphql_errors_become_failures() {
        let body = r#"{"data": null, "errors": [{"message": "Could not resolve to a User"}, {"message": "second"}]}"#;
        match decode_response(body, "ghost") {
            Err(ContribError::GraphQl(msg)) => {
                assert_eq!(msg, "Could not resolve to a User; second")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_user_is_reported() {
        let body = r#"{"data": {"viewer": null, "user": null}}"#;
        assert!(matches!(
            decode_response(body, "ghost"),
            Err(ContribError::MissingData(msg)) if msg.contains("ghost")
        ));
    }

    #[test]
    fn missing_collection_is_empty_dataset() {
        let body = r#"{"data": {"viewer": null, "user": {"contributionsCollection": null}}}"#;
        let payload = decode_response(body, "octo").unwrap();
        assert!(payload.dataset.is_empty());
        assert!(payload.viewer.is_none());
    }

    #[test]
    fn request_body_carries_variables() {
        let query = ContributionQuery::new("octo", "2024-01-01T00:00:00");
        let body = serde_json::to_value(GraphQlRequest { query: PULL_REQUESTS_QUERY, variables: &query }).unwrap();
        assert_eq!(body["variables"]["login"], "octo");
        assert_eq!(body["variables"]["from"], "2024-01-01T00:00:00");
        assert!(body["query"].as_str().unwrap().contains("pullRequestContributionsByRepository"));
    }
}
