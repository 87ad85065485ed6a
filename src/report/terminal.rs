use std::collections::HashMap;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{LinkEntry, LinkKind, PolicyVerdict};

/// Render a colored terminal report.
pub fn render(entries: &[LinkEntry], inputs: &str, verbose: bool, quiet: bool) -> Result<()> {
    let total = entries.len();
    let pass_count = count(entries, PolicyVerdict::Pass);
    let warn_count = count(entries, PolicyVerdict::Warn);
    let error_count = count(entries, PolicyVerdict::Error);

    if quiet {
        println!(
            "Total: {}  Pass: {}  Warn: {}  Error: {}",
            total,
            pass_count.to_string().green(),
            warn_count.to_string().yellow(),
            error_count.to_string().red(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "profile-links".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Inputs: {}\n", inputs);

    let pass_platforms = summarize_platforms(entries, PolicyVerdict::Pass);
    let warn_platforms = summarize_platforms(entries, PolicyVerdict::Warn);
    let error_platforms = summarize_platforms(entries, PolicyVerdict::Error);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Total links : {}", total));
    println!(
        " │  {:<48} │",
        format!("{}  Pass        : {:>4}  {}", "✓".green(), pass_count, pass_platforms)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Warn        : {:>4}  {}", "⚠".yellow(), warn_count, warn_platforms)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Error       : {:>4}  {}", "✗".red(), error_count, error_platforms)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if error_count > 0 {
        println!(" {} Links requiring attention:\n", "[ERROR]".red().bold());
        render_table(entries, PolicyVerdict::Error);
        println!();
    }

    if warn_count > 0 {
        println!(" {} Links with warnings:\n", "[WARN]".yellow().bold());
        render_table(entries, PolicyVerdict::Warn);
        println!();
    }

    if verbose && pass_count > 0 {
        println!(" {} All passing links:\n", "[PASS]".green().bold());
        render_table(entries, PolicyVerdict::Pass);
        println!();
    }

    Ok(())
}

fn count(entries: &[LinkEntry], verdict: PolicyVerdict) -> usize {
    entries.iter().filter(|e| e.verdict == verdict).count()
}

fn render_table(entries: &[LinkEntry], verdict_filter: PolicyVerdict) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Owner").add_attribute(Attribute::Bold),
            Cell::new("Input").add_attribute(Attribute::Bold),
            Cell::new("Label").add_attribute(Attribute::Bold),
            Cell::new("Platform").add_attribute(Attribute::Bold),
            Cell::new("URL").add_attribute(Attribute::Bold),
            Cell::new("Verdict").add_attribute(Attribute::Bold),
        ]);

    for entry in entries.iter().filter(|e| e.verdict == verdict_filter) {
        let (verdict_str, verdict_color) = match entry.verdict {
            PolicyVerdict::Pass => ("✓ pass", Color::Green),
            PolicyVerdict::Warn => ("⚠ warn", Color::Yellow),
            PolicyVerdict::Error => ("✗ error", Color::Red),
        };

        let platform_color = match entry.link.kind() {
            LinkKind::Recognized => Color::Green,
            LinkKind::Other => Color::Yellow,
            LinkKind::Unknown => Color::DarkGrey,
        };

        table.add_row(vec![
            Cell::new(entry.owner.as_deref().unwrap_or("-")),
            Cell::new(&entry.raw),
            Cell::new(&entry.link.display_name),
            Cell::new(&entry.link.platform).fg(platform_color),
            Cell::new(&entry.link.url),
            Cell::new(verdict_str)
                .fg(verdict_color)
                .set_alignment(CellAlignment::Center),
        ]);
    }

    println!("{}", table);
}

/// Top three platform tags for a verdict, e.g. `[github (3), other (1)]`.
fn summarize_platforms(entries: &[LinkEntry], verdict: PolicyVerdict) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries.iter().filter(|e| e.verdict == verdict) {
        *counts.entry(entry.link.platform.as_str()).or_insert(0) += 1;
    }

    let mut pairs: Vec<(&str, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(platform, cnt)| format!("{} ({})", platform, cnt))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::classifier::classify;

    fn entry(raw: &str, verdict: PolicyVerdict) -> LinkEntry {
        LinkEntry {
            owner: None,
            group: None,
            raw: raw.to_string(),
            link: classify(raw),
            verdict,
        }
    }

    #[test]
    fn test_summarize_platforms_top_three() {
        let entries = vec![
            entry("github.com/a", PolicyVerdict::Pass),
            entry("github.com/b", PolicyVerdict::Pass),
            entry("orcid.org/1", PolicyVerdict::Pass),
            entry("x.com/a", PolicyVerdict::Pass),
            entry("facebook.com/a", PolicyVerdict::Pass),
            entry("lab.example.edu", PolicyVerdict::Warn),
        ];
        assert_eq!(
            summarize_platforms(&entries, PolicyVerdict::Pass),
            "[github (2), facebook (1), orcid (1)]"
        );
        assert_eq!(summarize_platforms(&entries, PolicyVerdict::Warn), "[other (1)]");
        assert_eq!(summarize_platforms(&entries, PolicyVerdict::Error), "");
    }
}
