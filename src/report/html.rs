use std::fmt::Write;

use crate::models::LinkEntry;

/// Render links as anchor lists, one `<ul>` per owner in first-seen order.
/// Links open in a new tab and never leak the opener.
pub fn render(entries: &[LinkEntry]) -> String {
    let mut groups: Vec<(Option<&str>, Vec<&LinkEntry>)> = Vec::new();
    for entry in entries {
        let owner = entry.owner.as_deref();
        match groups.iter().position(|(o, _)| *o == owner) {
            Some(i) => groups[i].1.push(entry),
            None => groups.push((owner, vec![entry])),
        }
    }

    let mut out = String::new();
    for (owner, list) in groups {
        match owner {
            Some(name) => {
                let _ = writeln!(
                    out,
                    "<ul class=\"profile-links\" data-owner=\"{}\">",
                    escape(name)
                );
            }
            None => out.push_str("<ul class=\"profile-links\">\n"),
        }
        for entry in list {
            let _ = writeln!(
                out,
                "  <li><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" data-platform=\"{}\">{}</a></li>",
                escape(&entry.link.url),
                escape(&entry.link.platform),
                escape(&entry.link.display_name),
            );
        }
        out.push_str("</ul>\n");
    }
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::classifier::classify;
    use crate::models::PolicyVerdict;

    fn entry(owner: Option<&str>, raw: &str) -> LinkEntry {
        LinkEntry {
            owner: owner.map(str::to_string),
            group: None,
            raw: raw.to_string(),
            link: classify(raw),
            verdict: PolicyVerdict::Pass,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a&b<c>"d'"#), "a&amp;b&lt;c&gt;&quot;d&#39;");
    }

    #[test]
    fn test_anchor_markup() {
        let html = render(&[entry(None, "github.com/lab")]);
        assert_eq!(
            html,
            "<ul class=\"profile-links\">\n  <li><a href=\"https://github.com/lab\" target=\"_blank\" rel=\"noopener noreferrer\" data-platform=\"github\">GitHub</a></li>\n</ul>\n"
        );
    }

    #[test]
    fn test_groups_by_owner_in_first_seen_order() {
        let html = render(&[
            entry(Some("Ada"), "orcid.org/1"),
            entry(Some("Bo & Co"), "x.com/bo"),
            entry(Some("Ada"), "scholar.google.com/citations?user=a&hl=en"),
        ]);
        let ada = html.find("data-owner=\"Ada\"").unwrap();
        let bo = html.find("data-owner=\"Bo &amp; Co\"").unwrap();
        assert!(ada < bo);
        assert_eq!(html.matches("<ul").count(), 2);
        assert!(html.contains("citations?user=a&amp;hl=en"));
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        assert_eq!(render(&[]), "");
    }
}
