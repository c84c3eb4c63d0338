//! Sandbox path helpers.

use std::path::PathBuf;

/// Directory holding the trace file.
///
/// `/host` is the cwd of the last focused terminal (usually `$HOME`), so this
/// typically resolves to `~/.local/share/zellij/paperfeed`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("paperfeed")
}

/// Maps a `~`-prefixed path from plugin configuration onto `/host`.
///
/// ```
/// use paperfeed::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_under_host() {
        assert_eq!(get_data_dir(), PathBuf::from("/host/.local/share/zellij/paperfeed"));
    }

    #[test]
    fn tilde_only_expands_at_start() {
        assert_eq!(expand_tilde("a/~/b"), "a/~/b");
        assert_eq!(expand_tilde("~user/x"), "~user/x");
    }
}
