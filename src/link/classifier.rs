use once_cell::sync::Lazy;
use url::Url;

use crate::link::rules::{builtin_rules, first_match, MatchMode, PlatformRule};
use crate::models::{ClassifiedLink, PLATFORM_OTHER, PLATFORM_UNKNOWN};

const DEFAULT_SCHEME: &str = "https://";
const FALLBACK_LABEL: &str = "Website";
const UNPARSEABLE_LABEL: &str = "Link";

static DEFAULT_CLASSIFIER: Lazy<Classifier> = Lazy::new(Classifier::default);

/// Classify a raw link with the canonical rule table in substring mode.
///
/// Never fails: input that cannot be parsed comes back with the
/// `unknown` platform tag.
pub fn classify(raw: &str) -> ClassifiedLink {
    DEFAULT_CLASSIFIER.classify(raw)
}

/// Classify every input, preserving order and length.
pub fn classify_all<I, S>(raws: I) -> Vec<ClassifiedLink>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DEFAULT_CLASSIFIER.classify_all(raws)
}

/// An ordered rule table plus the mode used to test host names.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<PlatformRule>,
    mode: MatchMode,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(builtin_rules(), MatchMode::Substring)
    }
}

impl Classifier {
    pub fn new(rules: Vec<PlatformRule>, mode: MatchMode) -> Self {
        Classifier { rules, mode }
    }

    /// Canonical rules followed by `extra`, so extra rules never pre-empt them.
    pub fn with_extra_rules(extra: Vec<PlatformRule>, mode: MatchMode) -> Self {
        let mut rules = builtin_rules();
        rules.extend(extra);
        Classifier::new(rules, mode)
    }

    pub fn rules(&self) -> &[PlatformRule] {
        &self.rules
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn classify(&self, raw: &str) -> ClassifiedLink {
        let url = normalize_scheme(raw);

        let host = match Url::parse(&url) {
            Ok(parsed) => parsed.host_str().map(str::to_lowercase),
            Err(e) => {
                tracing::debug!(raw, error = %e, "link did not parse");
                None
            }
        };

        let Some(host) = host else {
            return ClassifiedLink {
                url,
                display_name: UNPARSEABLE_LABEL.to_string(),
                platform: PLATFORM_UNKNOWN.to_string(),
            };
        };

        if let Some(rule) = first_match(&self.rules, &host, self.mode) {
            return ClassifiedLink {
                url,
                display_name: rule.display_name.clone(),
                platform: rule.platform.clone(),
            };
        }

        let label = capitalize(base_domain(&host));
        ClassifiedLink {
            url,
            display_name: if label.is_empty() {
                FALLBACK_LABEL.to_string()
            } else {
                label
            },
            platform: PLATFORM_OTHER.to_string(),
        }
    }

    pub fn classify_all<I, S>(&self, raws: I) -> Vec<ClassifiedLink>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raws.into_iter().map(|r| self.classify(r.as_ref())).collect()
    }
}

/// Prefix `https://` unless the input already starts with an http(s) scheme.
/// Textual only; the scheme check is case-sensitive.
pub fn normalize_scheme(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{raw}")
    }
}

/// Second-to-last label of the host after dropping a leading `www.`,
/// or the only label when there is just one.
fn base_domain(host: &str) -> &str {
    let host = host.strip_prefix("www.").unwrap_or(host);
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() > 1 {
        labels[labels.len() - 2]
    } else {
        labels[0]
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
