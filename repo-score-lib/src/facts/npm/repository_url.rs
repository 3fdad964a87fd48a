/// Turn the `repository` field of an npm package document into an `https://` URL.
///
/// npm accepts many spellings for a repository: `git+https://…`, `git://…`,
/// `ssh://git@…`, scp-like `git@host:owner/repo`, the `github:owner/repo` shorthand and even a
/// bare `owner/repo`. Returns `None` for an empty field.
#[must_use]
pub fn normalize_repository_url(raw: &str) -> Option<String> {
    let mut url = raw.trim();
    if url.is_empty() {
        return None;
    }

    url = url.strip_prefix("git+").unwrap_or(url);

    let normalized = if let Some(rest) = url.strip_prefix("github:") {
        format!("https://github.com/{rest}")
    } else if let Some(rest) = url.strip_prefix("ssh://git@") {
        format!("https://{rest}")
    } else if let Some(rest) = url.strip_prefix("git://") {
        format!("https://{rest}")
    } else if let Some(rest) = url.strip_prefix("git@") {
        // scp-like syntax: git@github.com:owner/repo
        format!("https://{}", rest.replacen(':', "/", 1))
    } else if url.contains("://") {
        url.to_string()
    } else if !url.contains(':') && url.matches('/').count() == 1 {
        format!("https://github.com/{url}")
    } else {
        url.to_string()
    };

    let normalized = normalized.trim_end_matches('/');
    let normalized = normalized.strip_suffix(".git").unwrap_or(normalized);
    Some(normalized.to_string())
}
