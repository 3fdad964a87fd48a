//! Repository queries used by the metrics.

use super::Client;
use crate::Result;
use chrono::{DateTime, Utc};
use ohno::{EnrichableExt, IntoAppError};
use serde::Deserialize;
use serde_json::json;

const LICENSE_QUERY: &str = "
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    licenseInfo { spdxId }
  }
}";

const COMMITS_QUERY: &str = "
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    defaultBranchRef {
      target {
        ... on Commit {
          history(first: 100) {
            edges { node { author { name email } committedDate } }
          }
        }
      }
    }
  }
}";

const README_QUERY: &str = r#"
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    readme: object(expression: "HEAD:README.md") { ... on Blob { text } }
    readmeLower: object(expression: "HEAD:readme.md") { ... on Blob { text } }
    readmePlain: object(expression: "HEAD:README") { ... on Blob { text } }
  }
}"#;

const ISSUES_QUERY: &str = "
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    issues(first: 100, states: OPEN) {
      edges {
        node {
          createdAt
          closedAt
          comments(first: 1) { nodes { createdAt } }
        }
      }
    }
  }
}";

#[derive(Debug, Deserialize)]
struct RepositoryData<T> {
    repository: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LicenseRepository {
    license_info: Option<LicenseInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LicenseInfo {
    spdx_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitsRepository {
    default_branch_ref: Option<BranchRef>,
}

#[derive(Debug, Deserialize)]
struct BranchRef {
    target: Option<CommitTarget>,
}

#[derive(Debug, Deserialize)]
struct CommitTarget {
    history: Option<Connection<CommitNode>>,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    #[serde(default = "Vec::new")]
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

/// One commit on the default branch
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitNode {
    pub author: Option<CommitAuthor>,
    pub committed_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadmeRepository {
    readme: Option<Blob>,
    readme_lower: Option<Blob>,
    readme_plain: Option<Blob>,
}

#[derive(Debug, Deserialize)]
struct Blob {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IssuesRepository {
    issues: Connection<IssueNode>,
}

/// An open issue with its first comment, if any
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueNode {
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub comments: IssueComments,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueComments {
    #[serde(default)]
    pub nodes: Vec<IssueComment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueComment {
    pub created_at: DateTime<Utc>,
}

impl IssueNode {
    /// When the issue first got attention: the first comment, else its closing.
    #[must_use]
    pub fn first_response_at(&self) -> Option<DateTime<Utc>> {
        self.comments.nodes.first().map(|c| c.created_at).or(self.closed_at)
    }
}

impl Client {
    /// SPDX identifier of the repository license, if GitHub detected one
    pub async fn fetch_license(&self, owner: &str, repo: &str) -> Result<Option<String>> {
        let data: RepositoryData<LicenseRepository> = self
            .query(LICENSE_QUERY, json!({ "owner": owner, "name": repo }))
            .await
            .map_err(|e| e.enrich_with(|| format!("fetching license for {owner}/{repo}")))?;

        let repository = found(data, owner, repo)?;
        Ok(repository.license_info.and_then(|info| info.spdx_id))
    }

    /// The most recent commits on the default branch; empty for a repository without commits
    pub async fn fetch_commits(&self, owner: &str, repo: &str) -> Result<Vec<CommitNode>> {
        let data: RepositoryData<CommitsRepository> = self
            .query(COMMITS_QUERY, json!({ "owner": owner, "name": repo }))
            .await
            .map_err(|e| e.enrich_with(|| format!("fetching commit history for {owner}/{repo}")))?;

        let repository = found(data, owner, repo)?;
        let edges = repository
            .default_branch_ref
            .and_then(|r| r.target)
            .and_then(|t| t.history)
            .map(|h| h.edges)
            .unwrap_or_default();

        Ok(edges.into_iter().map(|e| e.node).collect())
    }

    /// Text of the top-level README, trying the common spellings in turn
    pub async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<Option<String>> {
        let data: RepositoryData<ReadmeRepository> = self
            .query(README_QUERY, json!({ "owner": owner, "name": repo }))
            .await
            .map_err(|e| e.enrich_with(|| format!("fetching README for {owner}/{repo}")))?;

        let repository = found(data, owner, repo)?;
        Ok([repository.readme, repository.readme_lower, repository.readme_plain]
            .into_iter()
            .flatten()
            .find_map(|blob| blob.text))
    }

    /// Up to 100 open issues
    pub async fn fetch_open_issues(&self, owner: &str, repo: &str) -> Result<Vec<IssueNode>> {
        let data: RepositoryData<IssuesRepository> = self
            .query(ISSUES_QUERY, json!({ "owner": owner, "name": repo }))
            .await
            .map_err(|e| e.enrich_with(|| format!("fetching open issues for {owner}/{repo}")))?;

        let repository = found(data, owner, repo)?;
        Ok(repository.issues.edges.into_iter().map(|e| e.node).collect())
    }
}

fn found<T>(data: RepositoryData<T>, owner: &str, repo: &str) -> Result<T> {
    data.repository
        .into_app_err_with(|| format!("repository {owner}/{repo} not found on GitHub"))
}
