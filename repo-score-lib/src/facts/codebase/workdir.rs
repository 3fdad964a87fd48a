use super::LOG_TARGET;
use crate::Result;
use crate::facts::path_utils::sanitize_path_component;
use camino::{Utf8Path, Utf8PathBuf};
use core::sync::atomic::{AtomicU64, Ordering};
use ohno::IntoAppError;
use tokio::task::spawn_blocking;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// A scratch directory for one clone.
///
/// Every instance gets its own path, so concurrent evaluations of the same repository never
/// share a working tree. Call [`WorkDir::remove`] once done with it; dropping an instance that
/// was never removed (a cancelled evaluation) deletes the tree synchronously instead.
#[derive(Debug)]
pub struct WorkDir {
    path: Utf8PathBuf,
}

impl WorkDir {
    /// Reserve a fresh directory path under `root` for `owner/repo`.
    ///
    /// `root` is created if needed; the directory itself is left for `git clone` to create.
    pub async fn new(root: &Utf8Path, owner: &str, repo: &str) -> Result<Self> {
        let root_owned = root.to_path_buf();
        spawn_blocking(move || std::fs::create_dir_all(&root_owned))
            .await?
            .into_app_err_with(|| format!("could not create directory '{root}'"))?;

        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let name = format!(
            "{}-{}-{}-{id}",
            sanitize_path_component(owner),
            sanitize_path_component(repo),
            std::process::id()
        );

        Ok(Self { path: root.join(name) })
    }

    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Delete the tree on the blocking pool, leaving the calling task free to poll other futures.
    pub async fn remove(mut self) {
        let path = core::mem::take(&mut self.path);
        let result = spawn_blocking(move || {
            let outcome = remove_tree(&path);
            (path, outcome)
        })
        .await;

        match result {
            Ok((path, Ok(true))) => log::debug!(target: LOG_TARGET, "Removed '{path}'"),
            Ok((_, Ok(false))) => {}
            Ok((path, Err(e))) => log::warn!(target: LOG_TARGET, "Could not remove '{path}': {e}"),
            Err(e) => log::warn!(target: LOG_TARGET, "Directory cleanup task failed: {e}"),
        }
    }
}

fn remove_tree(path: &Utf8Path) -> std::io::Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    std::fs::remove_dir_all(path)?;
    Ok(true)
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if self.path.as_str().is_empty() {
            return;
        }

        match remove_tree(&self.path) {
            Ok(true) => log::debug!(target: LOG_TARGET, "Removed '{}'", self.path),
            Ok(false) => {}
            Err(e) => log::warn!(target: LOG_TARGET, "Could not remove '{}': {e}", self.path),
        }
    }
}
