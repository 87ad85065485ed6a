use serde::{Deserialize, Serialize};

/// Platform tag for a link that parsed but matched no rule.
pub const PLATFORM_OTHER: &str = "other";

/// Platform tag for a link that could not be parsed as a URL.
pub const PLATFORM_UNKNOWN: &str = "unknown";

/// A raw link resolved into an absolute URL, a display label and a platform tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedLink {
    pub url: String,
    pub display_name: String,
    pub platform: String,
}

impl ClassifiedLink {
    pub fn kind(&self) -> LinkKind {
        match self.platform.as_str() {
            PLATFORM_OTHER => LinkKind::Other,
            PLATFORM_UNKNOWN => LinkKind::Unknown,
            _ => LinkKind::Recognized,
        }
    }
}

/// Three-way view of a platform tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Matched one of the platform rules.
    Recognized,
    /// Valid URL on a host no rule knows about.
    Other,
    /// Could not be parsed.
    Unknown,
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkKind::Recognized => write!(f, "recognized"),
            LinkKind::Other => write!(f, "other"),
            LinkKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Which part of a roster a link came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Site,
    Current,
    Alumni,
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Group::Site => write!(f, "site"),
            Group::Current => write!(f, "current"),
            Group::Alumni => write!(f, "alumni"),
        }
    }
}

/// A link as read from an input, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    pub owner: Option<String>,
    pub group: Option<Group>,
    pub raw: String,
}

impl RawLink {
    /// A link with no owner, as given on the command line or in a plain list.
    pub fn bare(raw: impl Into<String>) -> Self {
        RawLink {
            owner: None,
            group: None,
            raw: raw.into(),
        }
    }

    pub fn owned(owner: &str, group: Group, raw: impl Into<String>) -> Self {
        RawLink {
            owner: Some(owner.to_string()),
            group: Some(group),
            raw: raw.into(),
        }
    }
}

/// One classified link: where it came from, what it classified as, and
/// the policy outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    pub raw: String,
    pub link: ClassifiedLink,
    pub verdict: PolicyVerdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyVerdict {
    Pass,
    Warn,
    Error,
}

impl std::fmt::Display for PolicyVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyVerdict::Pass => write!(f, "pass"),
            PolicyVerdict::Warn => write!(f, "warn"),
            PolicyVerdict::Error => write!(f, "error"),
        }
    }
}
