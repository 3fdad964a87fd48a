//! Access to repository data through the GitHub GraphQL API.

mod client;
mod queries;

pub use client::{Client, RateLimitInfo};
pub use queries::{CommitAuthor, CommitNode, IssueComment, IssueComments, IssueNode};
