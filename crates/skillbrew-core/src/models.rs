//! Domain models for skillbrew.
//!
//! A skill is a self-contained unit of agent capability described by a
//! `SKILL.md` document with YAML frontmatter (metadata) and a markdown body
//! (instructions), plus optional resource files under `scripts/`,
//! `references/`, and `assets/`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::frontmatter::Frontmatter;

/// Skill file format conventions by agent ecosystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillFormat {
    #[serde(rename = "claude-code")]
    ClaudeCode,

    #[serde(rename = "opencode")]
    OpenCode,

    #[serde(rename = "openclaw")]
    OpenClaw,

    /// The agent-neutral source-of-truth format stored in the bank.
    #[default]
    #[serde(rename = "canonical")]
    Canonical,
}

impl SkillFormat {
    /// The string value used in sidecar files and on the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClaudeCode => "claude-code",
            Self::OpenCode => "opencode",
            Self::OpenClaw => "openclaw",
            Self::Canonical => "canonical",
        }
    }

    /// Parse a format name. Unknown names return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "claude-code" => Some(Self::ClaudeCode),
            "opencode" => Some(Self::OpenCode),
            "openclaw" => Some(Self::OpenClaw),
            "canonical" => Some(Self::Canonical),
            _ => None,
        }
    }
}

/// Metadata extracted from a skill document's frontmatter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillMetadata {
    /// Unique skill name / slug (e.g. `todoist-cli`, `git-commit-helper`).
    pub name: String,

    /// Short human-readable description of what the skill does.
    #[serde(default)]
    pub description: String,

    /// Semantic version string.
    #[serde(default)]
    pub version: String,

    /// Author name or handle.
    #[serde(default)]
    pub author: String,

    /// Tags for categorization and search.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Frontmatter keys this model does not understand, kept verbatim.
    #[serde(default, skip_serializing_if = "Frontmatter::is_empty")]
    pub extra: Frontmatter,
}

/// Frontmatter keys lifted into [`SkillMetadata`] fields.
const KNOWN_KEYS: [&str; 5] = ["name", "description", "version", "author", "tags"];

impl SkillMetadata {
    /// Build metadata from an untyped frontmatter mapping.
    ///
    /// Values of the wrong YAML type are ignored (the validator reports
    /// them); `skill_id` fills in for a missing name.
    pub fn from_frontmatter(frontmatter: &Frontmatter, skill_id: &str) -> Self {
        let string_of = |key: &str| match frontmatter.get(key) {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };

        let name = match frontmatter.get("name") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => skill_id.to_owned(),
        };

        let tags = frontmatter
            .get("tags")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default();

        let extra = frontmatter
            .iter()
            .filter(|(k, _)| !KNOWN_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            name,
            description: string_of("description"),
            version: string_of("version"),
            author: string_of("author"),
            tags,
            extra,
        }
    }
}

/// A skill in the bank.
#[derive(Debug, Clone)]
pub struct Skill {
    /// The bank directory name identifying this skill.
    pub skill_id: String,

    /// Structured metadata parsed from frontmatter.
    pub metadata: SkillMetadata,

    /// Raw document content (frontmatter + body).
    pub content: String,

    /// The format the skill was imported in.
    pub format: SkillFormat,

    /// SHA-256 checksum of `content`.
    pub checksum: String,
}

/// Where a skill came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provenance {
    pub skill_id: String,

    /// `"file"`, `"target"`, or `"manual"`.
    pub source_type: String,

    /// Path or other locator of the original copy.
    pub source_location: String,

    /// RFC 3339 timestamp of the import.
    pub imported_at: String,

    /// Checksum of the content at import time.
    #[serde(default)]
    pub original_checksum: String,

    #[serde(default)]
    pub notes: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
