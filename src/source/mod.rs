use std::path::Path;

use anyhow::Result;

use crate::detector::{detect_source, SourceKind};
use crate::models::RawLink;

pub mod roster;
pub mod text;

pub trait LinkSource {
    fn collect(&self, path: &Path) -> Result<Vec<RawLink>>;
}

/// Read every link in `path` with the reader its name calls for.
pub fn collect_from(path: &Path) -> Result<Vec<RawLink>> {
    let entries = match detect_source(path) {
        SourceKind::Text => text::TextSource::new().collect(path)?,
        SourceKind::Roster(format) => roster::RosterSource::new(format).collect(path)?,
    };
    tracing::debug!(path = %path.display(), links = entries.len(), "collected links");
    Ok(entries)
}
