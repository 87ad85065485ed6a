use serde::{Deserialize, Serialize};

/// Canonical platform table, in precedence order: (markers, display name, platform tag).
const BUILTIN_RULES: &[(&[&str], &str, &str)] = &[
    (&["scholar.google"], "Google Scholar", "scholar"),
    (&["orcid.org"], "ORCID", "orcid"),
    (&["researchgate.net"], "ResearchGate", "researchgate"),
    (&["linkedin.com"], "LinkedIn", "linkedin"),
    (&["twitter.com", "x.com"], "Twitter", "twitter"),
    (&["github.com"], "GitHub", "github"),
    (&["instagram.com"], "Instagram", "instagram"),
    (&["facebook.com"], "Facebook", "facebook"),
    (
        &["pubmed.ncbi.nlm.nih.gov", "ncbi.nlm.nih.gov"],
        "PubMed",
        "pubmed",
    ),
];

/// How a rule marker is tested against a host name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Host contains the marker anywhere. `dropbox.com` contains `x.com`.
    #[default]
    Substring,
    /// Marker must sit on whole dot-separated labels of the host.
    Labels,
}

impl MatchMode {
    /// Test a lower-cased host against a lower-cased marker.
    pub fn matches(self, host: &str, marker: &str) -> bool {
        match self {
            MatchMode::Substring => host.contains(marker),
            MatchMode::Labels => {
                if marker.is_empty() {
                    return false;
                }
                format!(".{host}.").contains(&format!(".{marker}."))
            }
        }
    }
}

/// A hostname predicate paired with the label and tag it assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRule {
    pub markers: Vec<String>,
    pub display_name: String,
    pub platform: String,
}

impl PlatformRule {
    pub fn new<M, S>(markers: M, display_name: &str, platform: &str) -> Self
    where
        M: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        PlatformRule {
            markers: markers
                .into_iter()
                .map(|m| m.as_ref().trim().to_lowercase())
                .collect(),
            display_name: display_name.to_string(),
            platform: platform.to_string(),
        }
    }

    /// True when any marker matches the (already lower-cased) host.
    pub fn matches(&self, host: &str, mode: MatchMode) -> bool {
        self.markers.iter().any(|m| mode.matches(host, m))
    }
}

/// The canonical rule list in precedence order.
pub fn builtin_rules() -> Vec<PlatformRule> {
    BUILTIN_RULES
        .iter()
        .map(|(markers, name, tag)| PlatformRule::new(markers.iter(), name, tag))
        .collect()
}

/// First rule, in order, whose predicate matches `host`.
pub fn first_match<'a>(
    rules: &'a [PlatformRule],
    host: &str,
    mode: MatchMode,
) -> Option<&'a PlatformRule> {
    rules.iter().find(|r| r.matches(host, mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let tags: Vec<String> = builtin_rules().into_iter().map(|r| r.platform).collect();
        assert_eq!(
            tags,
            vec![
                "scholar",
                "orcid",
                "researchgate",
                "linkedin",
                "twitter",
                "github",
                "instagram",
                "facebook",
                "pubmed"
            ]
        );
    }

    #[test]
    fn test_substring_over_matches() {
        assert!(MatchMode::Substring.matches("notscholar.google.com.evil.example", "scholar.google"));
        assert!(MatchMode::Substring.matches("dropbox.com", "x.com"));
    }

    #[test]
    fn test_labels_requires_whole_labels() {
        assert!(MatchMode::Labels.matches("scholar.google.com", "scholar.google"));
        assert!(MatchMode::Labels.matches("x.com", "x.com"));
        assert!(MatchMode::Labels.matches("mobile.twitter.com", "twitter.com"));
        assert!(!MatchMode::Labels.matches("notscholar.google.com", "scholar.google"));
        assert!(!MatchMode::Labels.matches("dropbox.com", "x.com"));
        assert!(!MatchMode::Labels.matches("example.com", ""));
    }

    #[test]
    fn test_first_match_wins() {
        let rules = builtin_rules();
        // Both the twitter and github markers occur; twitter comes first.
        let hit = first_match(&rules, "github.com.x.com", MatchMode::Substring).unwrap();
        assert_eq!(hit.platform, "twitter");
        assert!(first_match(&rules, "example.org", MatchMode::Substring).is_none());
    }

    #[test]
    fn test_markers_lowercased() {
        let rule = PlatformRule::new(["  Bsky.App "], "Bluesky", "bluesky");
        assert_eq!(rule.markers, vec!["bsky.app"]);
        assert!(rule.matches("bsky.app", MatchMode::Substring));
    }
}
