use std::path::Path;

/// Serialization of a roster file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    Json,
    Toml,
}

/// Which reader handles an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// One link per line, markdown links allowed.
    Text,
    /// Lab roster: site links plus members with their links.
    Roster(RosterFormat),
}

/// Pick a reader from the file extension. Anything unrecognized is read as text.
pub fn detect_source(path: &Path) -> SourceKind {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("json") => SourceKind::Roster(RosterFormat::Json),
        Some("toml") => SourceKind::Roster(RosterFormat::Toml),
        _ => SourceKind::Text,
    }
}
