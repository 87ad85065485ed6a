//! `profile-links` — classify profile links, apply policy, and render them.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and initialize logging ([`logging`]).
//! 2. Load config ([`load_config`]).
//! 3. Collect raw links from arguments, files or stdin ([`source`]).
//! 4. Classify each link ([`Classifier`]) and apply policy ([`apply_policy`]).
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0` (clean) or `1` (at least one [`PolicyVerdict::Error`]).

mod cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, ReportFormat};
use profile_links::config::{apply_policy, load_config, Config};
use profile_links::link::classifier::Classifier;
use profile_links::models::{LinkEntry, PolicyVerdict, RawLink};
use profile_links::{logging, report, source};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = load_config(&cwd, cli.config.as_deref())?;
    let classifier = config.classifier(cli.strict_hosts);
    tracing::debug!(
        rules = classifier.rules().len(),
        mode = ?classifier.mode(),
        "classifier ready"
    );

    let raws = gather_links(&cli)?;
    if raws.is_empty() {
        eprintln!("No links to classify");
        std::process::exit(1);
    }

    let entries = classify_entries(&classifier, &config, raws);

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&entries, &describe_inputs(&cli), cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            emit(cli.output.as_deref(), &serde_json::to_string_pretty(&entries)?)?;
        }
        ReportFormat::Html => {
            emit(cli.output.as_deref(), &report::html::render(&entries))?;
        }
    }

    if entries.iter().any(|e| e.verdict == PolicyVerdict::Error) {
        std::process::exit(1);
    }

    Ok(())
}

/// Links from the command line, then each `--file` in order. With neither,
/// reads a link list from stdin.
fn gather_links(cli: &Cli) -> Result<Vec<RawLink>> {
    let mut raws: Vec<RawLink> = cli.links.iter().map(RawLink::bare).collect();

    let stdin = [PathBuf::from("-")];
    let files: &[PathBuf] = if cli.links.is_empty() && cli.files.is_empty() {
        &stdin
    } else {
        &cli.files
    };

    for path in files {
        raws.extend(source::collect_from(path)?);
    }

    tracing::info!(links = raws.len(), "collected links");
    Ok(raws)
}

/// Classify every raw link and attach its policy verdict, keeping input order.
fn classify_entries(classifier: &Classifier, config: &Config, raws: Vec<RawLink>) -> Vec<LinkEntry> {
    let links = classifier.classify_all(raws.iter().map(|r| r.raw.as_str()));
    raws.into_iter()
        .zip(links)
        .map(|(raw, link)| {
            let verdict = apply_policy(config, &link);
            tracing::debug!(
                raw = %raw.raw,
                platform = %link.platform,
                verdict = %verdict,
                "classified"
            );
            LinkEntry {
                owner: raw.owner,
                group: raw.group,
                raw: raw.raw,
                link,
                verdict,
            }
        })
        .collect()
}

fn describe_inputs(cli: &Cli) -> String {
    let mut parts = Vec::new();
    if !cli.links.is_empty() {
        parts.push(format!("{} argument(s)", cli.links.len()));
    }
    parts.extend(cli.files.iter().map(|p| p.display().to_string()));
    if parts.is_empty() {
        "stdin".to_string()
    } else {
        parts.join(", ")
    }
}

fn emit(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{}", content.trim_end()),
    }
    Ok(())
}
