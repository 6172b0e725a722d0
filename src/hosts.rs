//! Host list loading.

use std::path::Path;

/// Read a newline-delimited host list, preserving file order.
///
/// Each line is trimmed of leading/trailing whitespace. No further
/// validation, filtering, or de-duplication is performed: a blank line stays
/// in the list as an empty string. An empty file yields an empty list.
///
/// # Errors
/// Returns the underlying I/O error if the file is missing or unreadable.
pub async fn load_hosts(path: impl AsRef<Path>) -> Result<Vec<String>, std::io::Error> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    Ok(content.lines().map(str::trim).map(String::from).collect())
}
