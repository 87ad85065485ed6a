use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::detector::RosterFormat;
use crate::models::{Group, RawLink};

/// Sort key for members without an explicit position (also used for `0`).
const UNORDERED: i64 = 999;

/// Owner name given to site-wide links.
pub const SITE_OWNER: &str = "site";

#[derive(Debug, Default, Deserialize)]
struct Roster {
    #[serde(default)]
    site: Option<SiteLinks>,
    #[serde(default)]
    members: Vec<Member>,
}

/// Site-wide social links, in the order they are reported.
#[derive(Debug, Default, Deserialize)]
struct SiteLinks {
    #[serde(default, alias = "twitterUrl")]
    twitter_url: Option<String>,
    #[serde(default, alias = "githubUrl")]
    github_url: Option<String>,
    #[serde(default, alias = "linkedInUrl")]
    linkedin_url: Option<String>,
    #[serde(default, alias = "googleScholarUrl")]
    google_scholar_url: Option<String>,
}

/// CMS exports write `null` for empty optional fields, so everything but
/// the name is an `Option`.
#[derive(Debug, Deserialize)]
struct Member {
    name: String,
    #[serde(default)]
    links: Option<Vec<String>>,
    #[serde(default, alias = "isAlumni")]
    is_alumni: Option<bool>,
    #[serde(default)]
    order: Option<i64>,
}

impl Member {
    fn sort_key(&self) -> i64 {
        match self.order {
            Some(o) if o != 0 => o,
            _ => UNORDERED,
        }
    }

    fn is_alumni(&self) -> bool {
        self.is_alumni.unwrap_or(false)
    }
}

/// Lab roster: `[site]` links plus `[[members]]` with their `links` arrays.
pub struct RosterSource {
    format: RosterFormat,
}

impl RosterSource {
    pub fn new(format: RosterFormat) -> Self {
        Self { format }
    }

    fn parse(&self, content: &str) -> Result<Roster> {
        match self.format {
            RosterFormat::Json => parse_json(content),
            RosterFormat::Toml => Ok(toml::from_str(content)?),
        }
    }
}

impl super::LinkSource for RosterSource {
    fn collect(&self, path: &Path) -> Result<Vec<RawLink>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let roster = self
            .parse(&content)
            .with_context(|| format!("parsing roster {}", path.display()))?;
        Ok(roster_links(roster))
    }
}

/// A JSON roster is either an array of members or an object with `site`
/// and `members`. Any record may be wrapped in a CMS entry (`{"fields": {...}}`).
fn parse_json(content: &str) -> Result<Roster> {
    let doc: Value = serde_json::from_str(content)?;

    let (site, members) = match doc {
        Value::Array(members) => (None, members),
        Value::Object(mut map) => {
            let site = map.remove("site").filter(|v| !v.is_null());
            let members = match map.remove("members") {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(members)) => members,
                Some(_) => bail!("`members` must be an array"),
            };
            (site, members)
        }
        _ => bail!("roster must be an object or an array of members"),
    };

    let site = site
        .map(|v| serde_json::from_value::<SiteLinks>(unwrap_fields(v)))
        .transpose()
        .context("in `site`")?;

    let members = members
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            serde_json::from_value::<Member>(unwrap_fields(v))
                .with_context(|| format!("in member #{}", i + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Roster { site, members })
}

/// The record inside a CMS entry envelope, or the value itself.
fn unwrap_fields(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("fields").is_some_and(Value::is_object) => map
            .remove("fields")
            .unwrap_or(Value::Null),
        other => other,
    }
}

/// Site links first, then current members, then alumni; members within a
/// group ordered by their `order` field.
fn roster_links(roster: Roster) -> Vec<RawLink> {
    let mut links = Vec::new();

    if let Some(site) = roster.site {
        let urls = [
            site.twitter_url,
            site.github_url,
            site.linkedin_url,
            site.google_scholar_url,
        ];
        for url in urls.into_iter().flatten() {
            if url.trim().is_empty() {
                continue;
            }
            links.push(RawLink::owned(SITE_OWNER, Group::Site, url));
        }
    }

    let (mut alumni, mut current): (Vec<Member>, Vec<Member>) =
        roster.members.into_iter().partition(Member::is_alumni);
    current.sort_by_key(Member::sort_key);
    alumni.sort_by_key(Member::sort_key);

    for (group, members) in [(Group::Current, current), (Group::Alumni, alumni)] {
        for member in members {
            let member_links = member.links.unwrap_or_default();
            if member_links.is_empty() {
                tracing::debug!(member = %member.name, "member has no links");
            }
            for raw in member_links {
                links.push(RawLink::owned(&member.name, group, raw));
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LinkSource;

    fn owners(entries: &[RawLink]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.owner.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_toml_roster_order() {
        let content = r#"
[site]
twitter_url = "x.com/lab"
github_url = ""
google_scholar_url = "scholar.google.com/citations?user=lab"

[[members]]
name = "Bo"
links = ["github.com/bo"]

[[members]]
name = "Old"
is_alumni = true
order = 1
links = ["old.example.edu"]

[[members]]
name = "Ada"
role = "Principal Investigator"
order = 1
links = ["orcid.org/1", "ada.example.edu"]

[[members]]
name = "Cy"
order = 2
links = []
"#;
        let roster = RosterSource::new(RosterFormat::Toml).parse(content).unwrap();
        let entries = roster_links(roster);
        assert_eq!(
            owners(&entries),
            vec!["site", "site", "Ada", "Ada", "Bo", "Old"]
        );
        assert_eq!(entries[0].raw, "x.com/lab");
        assert_eq!(entries[1].raw, "scholar.google.com/citations?user=lab");
        assert_eq!(entries[2].group, Some(Group::Current));
        assert_eq!(entries[5].group, Some(Group::Alumni));
    }

    #[test]
    fn test_zero_order_sorts_last() {
        let content = r#"
[[members]]
name = "Zero"
order = 0
links = ["a.org"]

[[members]]
name = "Five"
order = 5
links = ["b.org"]
"#;
        let roster = RosterSource::new(RosterFormat::Toml).parse(content).unwrap();
        assert_eq!(owners(&roster_links(roster)), vec!["Five", "Zero"]);
    }

    #[test]
    fn test_json_cms_entries() {
        let content = r#"{
            "site": { "fields": { "labName": "Lab", "githubUrl": "github.com/lab" } },
            "members": [
                { "sys": { "id": "1" }, "fields": { "name": "Ada", "links": ["orcid.org/1"], "isAlumni": false, "order": 1 } },
                { "name": "Bo", "links": ["x.com/bo"], "isAlumni": true }
            ]
        }"#;
        let roster = RosterSource::new(RosterFormat::Json).parse(content).unwrap();
        let entries = roster_links(roster);
        assert_eq!(owners(&entries), vec!["site", "Ada", "Bo"]);
        assert_eq!(entries[0].raw, "github.com/lab");
        assert_eq!(entries[2].group, Some(Group::Alumni));
    }

    #[test]
    fn test_json_bare_member_array() {
        let content = r#"[ { "name": "Ada", "links": ["github.com/ada", ""] } ]"#;
        let roster = RosterSource::new(RosterFormat::Json).parse(content).unwrap();
        let entries = roster_links(roster);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].raw, "");
    }

    #[test]
    fn test_json_null_fields_are_empty() {
        let content = r#"{
            "site": null,
            "members": [
                { "fields": { "name": "Ada", "links": ["orcid.org/1"], "isAlumni": null, "order": null } },
                { "fields": { "name": "Bo", "links": null, "isAlumni": null } }
            ]
        }"#;
        let roster = RosterSource::new(RosterFormat::Json).parse(content).unwrap();
        let entries = roster_links(roster);
        assert_eq!(owners(&entries), vec!["Ada"]);
        assert_eq!(entries[0].raw, "orcid.org/1");
        assert_eq!(entries[0].group, Some(Group::Current));
    }

    #[test]
    fn test_json_error_names_member_and_field() {
        let content = r#"{ "members": [
            { "name": "Ada", "links": [] },
            { "fields": { "links": ["github.com/bo"] } }
        ] }"#;
        let err = RosterSource::new(RosterFormat::Json)
            .parse(content)
            .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("member #2"), "{msg}");
        assert!(msg.contains("missing field `name`"), "{msg}");
    }

    #[test]
    fn test_json_rejects_scalar_document() {
        assert!(RosterSource::new(RosterFormat::Json).parse("42").is_err());
    }

    #[test]
    fn test_collect_reports_file_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("team.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = RosterSource::new(RosterFormat::Json)
            .collect(&path)
            .unwrap_err();
        assert!(format!("{err:#}").contains("team.json"));
    }
}
