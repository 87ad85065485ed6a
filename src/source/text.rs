use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::RawLink;

/// `[label](target "title")`, where the target may hold balanced parentheses,
/// or an autolink `<target>` that carries a scheme or a dot (so `<br>` is not a link).
static MARKDOWN_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\[[^\]]*\]\(\s*((?:[^()\s]|\([^()\s]*\))*)[^)]*\)|<((?:[A-Za-z][A-Za-z0-9+.\-]*://[^<>\s]+)|(?:[^<>\s]*\.[^<>\s]*))>"#,
    )
    .expect("valid regex")
});

/// Plain link list: one link per line, `#` comments, list bullets and
/// markdown link syntax tolerated. `-` reads from stdin.
pub struct TextSource;

impl TextSource {
    pub fn new() -> Self {
        Self
    }
}

impl super::LinkSource for TextSource {
    fn collect(&self, path: &Path) -> Result<Vec<RawLink>> {
        let content = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading links from stdin")?;
            buf
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?
        };

        Ok(parse_links(&content)
            .into_iter()
            .map(RawLink::bare)
            .collect())
    }
}

/// Extract raw link strings from a text or markdown list.
pub fn parse_links(content: &str) -> Vec<String> {
    let mut links = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = strip_bullet(line);

        let before = links.len();
        for caps in MARKDOWN_LINK.captures_iter(line) {
            if let Some(target) = caps.get(1).or_else(|| caps.get(2)) {
                links.push(target.as_str().to_string());
            }
        }

        if links.len() == before && !line.is_empty() {
            links.push(line.to_string());
        }
    }

    links
}

fn strip_bullet(line: &str) -> &str {
    for bullet in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return rest.trim_start();
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LinkSource;

    #[test]
    fn test_plain_lines() {
        let content = "github.com/lab\n\n  orcid.org/0000-0001  \n";
        assert_eq!(parse_links(content), vec!["github.com/lab", "orcid.org/0000-0001"]);
    }

    #[test]
    fn test_comments_and_bullets() {
        let content = "# Lab links\n- github.com/lab\n* x.com/lab\n+ mylab.stanford.edu\n";
        assert_eq!(
            parse_links(content),
            vec!["github.com/lab", "x.com/lab", "mylab.stanford.edu"]
        );
    }

    #[test]
    fn test_markdown_links() {
        let content = "- [Scholar](https://scholar.google.com/citations?user=abc) and <orcid.org/1>\n\
                       [Site](lab.example.edu \"Our site\")\n";
        assert_eq!(
            parse_links(content),
            vec![
                "https://scholar.google.com/citations?user=abc",
                "orcid.org/1",
                "lab.example.edu"
            ]
        );
    }

    #[test]
    fn test_inline_html_is_not_an_autolink() {
        assert_eq!(
            parse_links("<https://localhost> <br> <orcid.org/1>\n"),
            vec!["https://localhost", "orcid.org/1"]
        );
    }

    #[test]
    fn test_markdown_target_with_parentheses() {
        assert_eq!(
            parse_links("- [Prion](https://en.wikipedia.org/wiki/Prion_(disease)) notes\n"),
            vec!["https://en.wikipedia.org/wiki/Prion_(disease)"]
        );
        assert_eq!(
            parse_links("[Wiki](en.wikipedia.org/wiki/A_(b) \"title\")\n"),
            vec!["en.wikipedia.org/wiki/A_(b)"]
        );
    }

    #[test]
    fn test_malformed_lines_are_kept() {
        assert_eq!(parse_links("not a url\n"), vec!["not a url"]);
    }

    #[test]
    fn test_collect_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.txt");
        std::fs::write(&path, "github.com/a\nfacebook.com/b\n").unwrap();

        let entries = TextSource::new().collect(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].raw, "github.com/a");
        assert!(entries[0].owner.is_none());
        assert_eq!(entries[1].raw, "facebook.com/b");
    }

    #[test]
    fn test_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TextSource::new().collect(&dir.path().join("nope.txt")).is_err());
    }
}
