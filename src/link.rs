// src/link.rs
//! Link token normalization.
//!
//! Maps a raw wiki-link token plus the directory of the document it was
//! found in onto a canonical node identifier. Any token produces *some*
//! identifier; malformed links are common in free-form text, so this
//! module degrades gracefully instead of validating.

use regex::Regex;
use std::sync::LazyLock;

/// Matches `[[target]]`, `[[target#anchor]]` and `[[target|display]]`.
/// Only the target (capture 1) matters.
pub static WIKI_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^#|\[\]]+)(?:#[^|\[\]]*)?(?:\|[^\]]*)?\]\]").expect("wiki link pattern")
});

static URL_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://").expect("url scheme pattern"));

static FILE_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^file:/").expect("file scheme pattern"));

static SCHEME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*:/+").expect("scheme prefix pattern"));

static PARENT_HOP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^/]+/\.\./").expect("parent hop pattern"));

/// Normalizes a raw link token into a canonical node identifier.
///
/// Rules, in order:
/// 1. HTTP(S) URLs collapse to their host name.
/// 2. `file:` references collapse to their bare filename.
/// 3. Anything else is a document path: joined to `dir`, colons stripped,
///    `.{ext}` appended if missing, and `segment/../` pairs removed in a
///    single left-to-right sweep (nested `../../` chains are NOT resolved
///    to a fixed point).
pub fn normalize(dir: &str, token: &str, ext: &str) -> String {
    if URL_SCHEME.is_match(token) {
        let host = SCHEME_PREFIX.replace(token, "").into_owned();
        return match host.find('/') {
            Some(cut) => host[..cut].to_string(),
            None => host,
        };
    }
    if FILE_SCHEME.is_match(token) {
        let rest = SCHEME_PREFIX.replace(token, "").into_owned();
        return match rest.rfind('/') {
            Some(cut) => rest[cut + 1..].to_string(),
            None => rest,
        };
    }
    let joined = join(dir, token);
    let path = ensure_extension(&joined.replace(':', ""), ext);
    PARENT_HOP.replace_all(&path, "").into_owned()
}

/// Resolves a user-supplied identifier: absolute paths pass through,
/// everything else is joined to the corpus root.
pub fn resolve_relative(root: &str, path: &str) -> String {
    if path.starts_with('/') {
        return path.to_string();
    }
    join(root, path)
}

/// Appends the document extension if the identifier doesn't carry it yet.
pub fn ensure_extension(path: &str, ext: &str) -> String {
    let suffix = format!(".{ext}");
    if path.ends_with(&suffix) {
        path.to_string()
    } else {
        format!("{path}{suffix}")
    }
}

/// Joins like `os.path.join`: an absolute second component wins outright.
fn join(dir: &str, path: &str) -> String {
    if path.starts_with('/') || dir.is_empty() {
        return path.to_string();
    }
    if dir.ends_with('/') {
        format!("{dir}{path}")
    } else {
        format!("{dir}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_collapses_to_host() {
        assert_eq!(
            normalize("/wiki", "http://example.com/page?q=1", "wiki"),
            "example.com"
        );
        assert_eq!(normalize("/wiki", "https://example.com", "wiki"), "example.com");
    }

    #[test]
    fn test_file_collapses_to_basename() {
        assert_eq!(
            normalize("/wiki", "file:///home/user/notes.txt", "wiki"),
            "notes.txt"
        );
    }

    #[test]
    fn test_relative_path_joined_and_suffixed() {
        assert_eq!(normalize("/wiki/sub", "note", "wiki"), "/wiki/sub/note.wiki");
        assert_eq!(
            normalize("/wiki/sub", "note.wiki", "wiki"),
            "/wiki/sub/note.wiki"
        );
    }

    #[test]
    fn test_absolute_token_ignores_dir() {
        assert_eq!(normalize("/wiki/sub", "/other/note", "wiki"), "/other/note.wiki");
    }

    #[test]
    fn test_colons_stripped() {
        assert_eq!(normalize("/wiki", "a:b", "wiki"), "/wiki/ab.wiki");
    }

    #[test]
    fn test_parent_hop_single_pass() {
        assert_eq!(normalize("/wiki/sub", "../note", "wiki"), "/wiki/note.wiki");
        // One sweep only: the second ../ survives because its preceding
        // segment was consumed by the first match.
        assert_eq!(normalize("/w", "b/../../c", "wiki"), "/w/../c.wiki");
    }

    #[test]
    fn test_idempotent_on_canonical_output() {
        let canonical = normalize("/wiki/sub", "note", "wiki");
        assert_eq!(normalize("", &canonical, "wiki"), canonical);
    }

    #[test]
    fn test_resolve_relative() {
        assert_eq!(resolve_relative("/wiki", "/abs/a.wiki"), "/abs/a.wiki");
        assert_eq!(resolve_relative("/wiki", "a.wiki"), "/wiki/a.wiki");
    }

    #[test]
    fn test_ensure_extension() {
        assert_eq!(ensure_extension("a", "wiki"), "a.wiki");
        assert_eq!(ensure_extension("a.wiki", "wiki"), "a.wiki");
    }

    #[test]
    fn test_wiki_link_pattern() {
        let line = "see [[note]] and [[other#sec|display]] and [[http://x.org/y]]";
        let targets: Vec<&str> = WIKI_LINK
            .captures_iter(line)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        assert_eq!(targets, vec!["note", "other", "http://x.org/y"]);
    }
}
