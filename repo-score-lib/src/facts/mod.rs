//! Everything the metrics need to know about a package, fetched from its sources.
//!
//! - [`PackageUrl`] / [`RepoSpec`]: classifying input links and naming a GitHub repository
//! - [`github`]: the GitHub GraphQL API
//! - [`npm`]: the npm registry, used to map package pages to repositories
//! - [`codebase`]: shallow clones and lint runs for source-level checks

pub mod codebase;
pub mod github;
pub mod npm;
mod package_url;
mod path_utils;
mod repo_spec;
mod resolver;

pub use package_url::PackageUrl;
pub use repo_spec::RepoSpec;
pub use resolver::{read_url_file, resolve};
