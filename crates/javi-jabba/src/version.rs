use std::sync::LazyLock;

use javi_backend::RawVersion;
use regex::Regex;

static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("ANSI escape pattern is valid")
});

/// Strips terminal colour codes and carriage returns from tool output.
pub(crate) fn clean_output(output: &str) -> String {
    ANSI_ESCAPE.replace_all(output, "").replace('\r', "")
}

/// Parses newline-separated version tokens, dropping blank lines.
pub fn parse_version_list(output: &str) -> Vec<RawVersion> {
    clean_output(output)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(RawVersion::from)
        .collect()
}

/// Parses the single token printed by `jabba current`.
pub fn parse_current(output: &str) -> Option<RawVersion> {
    parse_version_list(output).into_iter().next()
}
