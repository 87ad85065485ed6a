use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::link::classifier::Classifier;
use crate::link::rules::{MatchMode, PlatformRule};
use crate::models::{ClassifiedLink, PolicyVerdict, PLATFORM_OTHER, PLATFORM_UNKNOWN};

/// Root configuration structure, deserialized from `.profile-links/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// How rule markers are tested against host names.
    #[serde(default)]
    pub matching: MatchingConfig,
    /// Extra platform rules, tried after the built-in table.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
    /// Verdicts per platform tag.
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct MatchingConfig {
    #[serde(default)]
    pub mode: MatchMode,
}

/// A user-defined platform rule.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    pub markers: Vec<String>,
    pub display_name: String,
    pub platform: String,
}

/// Defines how classified links are evaluated.
#[derive(Debug, Deserialize)]
pub struct PolicyConfig {
    /// Verdict applied to any platform not listed in `platforms`.
    /// Defaults to `pass`.
    #[serde(default = "default_policy_action")]
    pub default: PolicyAction,
    /// Per-platform overrides keyed by tag (e.g. `"unknown"`, `"other"`, `"twitter"`).
    #[serde(default = "default_platform_actions")]
    pub platforms: HashMap<String, PolicyAction>,
}

impl Default for PolicyConfig {
    /// Malformed links are errors, unrecognized hosts warn, everything else passes.
    fn default() -> Self {
        PolicyConfig {
            default: default_policy_action(),
            platforms: default_platform_actions(),
        }
    }
}

fn default_policy_action() -> PolicyAction {
    PolicyAction::Pass
}

fn default_platform_actions() -> HashMap<String, PolicyAction> {
    let mut platforms = HashMap::new();
    platforms.insert(PLATFORM_UNKNOWN.to_string(), PolicyAction::Error);
    platforms.insert(PLATFORM_OTHER.to_string(), PolicyAction::Warn);
    platforms
}

/// The action to take when a link's platform matches a policy entry.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PolicyAction {
    Pass,
    Warn,
    /// The CLI exits with code 1.
    Error,
}

impl PolicyAction {
    pub fn to_verdict(self) -> PolicyVerdict {
        match self {
            PolicyAction::Pass => PolicyVerdict::Pass,
            PolicyAction::Warn => PolicyVerdict::Warn,
            PolicyAction::Error => PolicyVerdict::Error,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rule #{index} has no markers")]
    NoMarkers { index: usize },
    #[error("rule #{index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },
    #[error("rule #{index} uses reserved platform tag `{tag}`")]
    ReservedTag { index: usize, tag: String },
}

impl Config {
    /// Reject extra rules that could never match or that would blur the
    /// `other` / `unknown` distinction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, rule) in self.rules.iter().enumerate() {
            let index = i + 1;
            if rule.markers.iter().all(|m| m.trim().is_empty()) {
                return Err(ConfigError::NoMarkers { index });
            }
            if rule.display_name.trim().is_empty() {
                return Err(ConfigError::EmptyField {
                    index,
                    field: "display_name",
                });
            }
            let tag = rule.platform.trim();
            if tag.is_empty() {
                return Err(ConfigError::EmptyField {
                    index,
                    field: "platform",
                });
            }
            if tag == PLATFORM_OTHER || tag == PLATFORM_UNKNOWN {
                return Err(ConfigError::ReservedTag {
                    index,
                    tag: tag.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Build a classifier from the built-in table plus the configured rules.
    /// `strict_hosts` forces label matching regardless of `[matching]`.
    pub fn classifier(&self, strict_hosts: bool) -> Classifier {
        let mode = if strict_hosts {
            MatchMode::Labels
        } else {
            self.matching.mode
        };
        let extra = self
            .rules
            .iter()
            .map(|r| {
                PlatformRule::new(
                    r.markers.iter().filter(|m| !m.trim().is_empty()),
                    r.display_name.trim(),
                    r.platform.trim(),
                )
            })
            .collect();
        Classifier::with_extra_rules(extra, mode)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<base>/.profile-links/config.toml`
/// 3. `~/.config/profile-links/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = base.join(".profile-links").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("profile-links")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    tracing::debug!("no config file found, using built-in defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::info!(path = %path.display(), rules = config.rules.len(), "loaded config");
    Ok(config)
}

/// Determine the policy verdict for a classified link by its platform tag.
pub fn apply_policy(config: &Config, link: &ClassifiedLink) -> PolicyVerdict {
    config
        .policy
        .platforms
        .get(&link.platform)
        .copied()
        .unwrap_or(config.policy.default)
        .to_verdict()
}
