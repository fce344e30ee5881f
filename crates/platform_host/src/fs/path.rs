//! Virtual-path helpers for the in-memory file tree.

/// Splits a path into resolved segments (`.`/`..` applied, empty segments dropped).
pub fn path_segments(path: &str) -> Vec<&str> {
    let trimmed = path.trim();
    let mut segments: Vec<&str> = Vec::new();
    for segment in trimmed.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments
}

/// Joins a child name onto an already-normalized parent path.
pub fn join_virtual_path(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}
