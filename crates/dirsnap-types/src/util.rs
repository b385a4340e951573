/// Join a directory path and a child name with a single `/`.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else if parent.ends_with('/') {
        format!("{}{}", parent, name)
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Immediate parent of a slash-separated path.
///
/// `/a/b` -> `/a`, `/a` -> `/`, `a` -> `.`
pub fn parent_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => "/",
        Some(idx) => &trimmed[..idx],
        None if path.starts_with('/') => "/",
        None => ".",
    }
}

/// Normalize a crawl root: collapse repeated slashes and drop any trailing one.
pub fn normalize_root(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let joined = segments.join("/");
    if path.starts_with('/') {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
