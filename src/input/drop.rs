//! Turns pasted or typed text into dropped files.
//!
//! Terminals deliver a drag-and-drop as a bracketed paste of one or more
//! paths, sometimes quoted, shell-escaped or written as `file://` URLs.

use std::path::{Path, PathBuf};

use reqwest::Url;
use tracing::debug;

use crate::transport::FilePayload;

/// Entries that are `file://` URLs naming another host are dropped.
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(normalize_entry)
        .collect()
}

/// Keeps the entries that name existing regular files.
pub fn payloads_from_text(text: &str) -> Vec<FilePayload> {
    parse_dropped_paths(text)
        .into_iter()
        .filter(|path| {
            let exists = Path::new(path).is_file();
            if !exists {
                debug!(path = %path.display(), "dropped entry is not a file");
            }
            exists
        })
        .map(FilePayload::from_path)
        .collect()
}

fn normalize_entry(entry: &str) -> Option<PathBuf> {
    let unquoted = strip_quotes(entry);
    if unquoted.starts_with("file://") {
        let path = Url::parse(unquoted).ok().and_then(|url| url.to_file_path().ok());
        if path.is_none() {
            debug!(entry = unquoted, "dropped url is not a local file");
        }
        return path;
    }
    Some(PathBuf::from(unescape_shell(unquoted)))
}

fn strip_quotes(entry: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = entry
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    entry
}

fn unescape_shell(entry: &str) -> String {
    let mut out = String::with_capacity(entry.len());
    let mut chars = entry.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(ch),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{parse_dropped_paths, payloads_from_text};

    #[test]
    fn parses_plain_quoted_and_escaped_paths() {
        let parsed = parse_dropped_paths("/tmp/a.pdf\n'/tmp/b c.pdf'\n/tmp/d\\ e.pdf\n\n");
        assert_eq!(
            parsed,
            vec![
                PathBuf::from("/tmp/a.pdf"),
                PathBuf::from("/tmp/b c.pdf"),
                PathBuf::from("/tmp/d e.pdf"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn parses_file_urls_with_percent_escapes() {
        let parsed = parse_dropped_paths("file:///home/me/My%20Doc.pdf\nfile://localhost/x.pdf");
        assert_eq!(
            parsed,
            vec![PathBuf::from("/home/me/My Doc.pdf"), PathBuf::from("/x.pdf")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn file_urls_naming_another_host_are_dropped() {
        let parsed = parse_dropped_paths(
            "file://localhostess/share/a.pdf\nfile://server/share/b.pdf\n/tmp/c.pdf",
        );
        assert_eq!(parsed, vec![PathBuf::from("/tmp/c.pdf")]);
    }

    #[cfg(unix)]
    #[test]
    fn malformed_percent_escape_is_kept_verbatim() {
        let parsed = parse_dropped_paths("file:///tmp/100%.pdf");
        assert_eq!(parsed, vec![PathBuf::from("/tmp/100%.pdf")]);
    }

    #[test]
    fn payloads_skip_missing_files() {
        let path = std::env::temp_dir().join(format!("pdfdrop-drop-{}.pdf", std::process::id()));
        std::fs::write(&path, b"%PDF-1.7").expect("temp file should be writable");

        let text = format!("{}\n/definitely/not/here.pdf", path.display());
        let payloads = payloads_from_text(&text);
        let _ = std::fs::remove_file(&path);

        assert_eq!(payloads.len(), 1);
        assert_eq!(
            payloads[0].file_name,
            path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
        );
    }
}
