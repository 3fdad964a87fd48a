//! Path utilities for safe filesystem operations.

/// Sanitize a string for use as a path component
///
/// Owner and repository names come from user-supplied URLs, so traversal sequences and
/// characters that are special on some filesystems are replaced.
#[must_use]
pub fn sanitize_path_component(s: &str) -> String {
    // Replace ".." but allow single "." so names like "socket.io" survive
    let s = s.replace("..", "__");
    s.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_normal_name() {
        assert_eq!(sanitize_path_component("lodash"), "lodash");
        assert_eq!(sanitize_path_component("cloudinary_npm"), "cloudinary_npm");
        assert_eq!(sanitize_path_component("socket.io"), "socket.io");
    }

    #[test]
    fn test_sanitize_path_traversal() {
        assert_eq!(sanitize_path_component(".."), "__");
        assert_eq!(sanitize_path_component("../../etc/passwd"), "______etc_passwd");
    }

    #[test]
    fn test_sanitize_dangerous_chars() {
        assert_eq!(sanitize_path_component("foo/bar"), "foo_bar");
        assert_eq!(sanitize_path_component("foo\\bar"), "foo_bar");
        assert_eq!(sanitize_path_component("foo:bar|baz"), "foo_bar_baz");
    }
}
