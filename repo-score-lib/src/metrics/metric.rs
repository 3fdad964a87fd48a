use crate::Result;
use futures_util::future::BoxFuture;

/// A scoring function over a repository identity.
///
/// Implementations produce a score in `[0, 1]` or fail with an error; they never signal failure
/// through a sentinel score. They only read shared state, so a single instance may be evaluated
/// for many repositories at once.
pub trait Metric: Send + Sync {
    fn score<'a>(&'a self, owner: &'a str, repo: &'a str) -> BoxFuture<'a, Result<f64>>;
}
