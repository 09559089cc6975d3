// Disk locations for the persistent cache tier.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Prefix shared by every persisted entry; `clear` only ever touches files
/// carrying it.
pub const NAMESPACE_PREFIX: &str = "github_cache_";

/// Base cache directory (~/.cache/folio on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "folio").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// File name for a logical cache key.
pub fn entry_file_name(key: &str) -> String {
    format!("{}{}.json", NAMESPACE_PREFIX, sanitize_key(key))
}

/// Replace characters that are unsafe in file names.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
