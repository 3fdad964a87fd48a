//! npm registry lookups, used to map package pages to their GitHub repositories.

mod client;
mod repository_url;

pub use client::{Client, PackageDocument, RepositoryField};
pub use repository_url::normalize_repository_url;
