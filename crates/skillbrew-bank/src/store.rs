//! Skill store — add, get, list, and remove skills in the bank.
//!
//! Each skill occupies one directory under `bank/skills/`:
//!
//! ```text
//! bank/skills/<skill-id>/
//! ├── canonical/SKILL.md        the agent-neutral source of truth
//! ├── canonical/scripts/...     optional resources
//! ├── variants/<agent-type>/SKILL.md
//! ├── metadata.json
//! └── provenance.json
//! ```
//!
//! The canonical copy is what the validator checks and adapters translate
//! from. Variants hold agent-specific renditions when a skill was imported
//! from a particular ecosystem.

use std::path::PathBuf;

use skillbrew_core::{
    Provenance, Skill, SkillFormat, SkillMetadata, Workspace, checksum_directory, checksum_string,
    parse_frontmatter,
};

use crate::error::{BankError, Result};

/// Name of the canonical document inside a skill directory.
pub const SKILL_FILE: &str = "SKILL.md";

/// Subdirectory holding the canonical copy.
pub const CANONICAL_DIR: &str = "canonical";

/// Manages skills stored in the bank.
pub struct SkillStore {
    skills_dir: PathBuf,
}

impl SkillStore {
    /// Create a store over a workspace's bank.
    pub fn new(workspace: &Workspace) -> Self {
        Self {
            skills_dir: workspace.bank_skills(),
        }
    }

    // --- Path helpers ---

    pub fn skill_dir(&self, skill_id: &str) -> PathBuf {
        self.skills_dir.join(skill_id)
    }

    pub fn canonical_dir(&self, skill_id: &str) -> PathBuf {
        self.skill_dir(skill_id).join(CANONICAL_DIR)
    }

    pub fn variants_dir(&self, skill_id: &str) -> PathBuf {
        self.skill_dir(skill_id).join("variants")
    }

    pub fn variant_dir(&self, skill_id: &str, agent_type: &str) -> PathBuf {
        self.variants_dir(skill_id).join(agent_type)
    }

    pub fn metadata_file(&self, skill_id: &str) -> PathBuf {
        self.skill_dir(skill_id).join("metadata.json")
    }

    pub fn provenance_file(&self, skill_id: &str) -> PathBuf {
        self.skill_dir(skill_id).join("provenance.json")
    }

    // --- Operations ---

    /// Whether a skill with this ID has a canonical document in the bank.
    pub fn exists(&self, skill_id: &str) -> bool {
        self.canonical_dir(skill_id).join(SKILL_FILE).exists()
    }

    /// Add or update a skill in the bank.
    ///
    /// Writes the canonical copy, a variant copy when the source format is
    /// agent-specific, and the `metadata.json` sidecar.
    pub fn add(&self, skill_id: &str, content: &str, source_format: SkillFormat) -> Result<Skill> {
        let canonical = self.canonical_dir(skill_id);
        std::fs::create_dir_all(&canonical)?;
        std::fs::write(canonical.join(SKILL_FILE), content)?;

        if source_format != SkillFormat::Canonical {
            let variant = self.variant_dir(skill_id, source_format.as_str());
            std::fs::create_dir_all(&variant)?;
            std::fs::write(variant.join(SKILL_FILE), content)?;
        }

        let (frontmatter, _) = parse_frontmatter(content);
        let metadata = SkillMetadata::from_frontmatter(&frontmatter, skill_id);
        let checksum = checksum_string(content);

        let sidecar = serde_json::json!({
            "name": metadata.name,
            "description": metadata.description,
            "version": metadata.version,
            "author": metadata.author,
            "tags": metadata.tags,
            "format": source_format.as_str(),
            "checksum": checksum,
        });
        std::fs::write(
            self.metadata_file(skill_id),
            serde_json::to_string_pretty(&sidecar)?,
        )?;

        tracing::info!(skill = %skill_id, format = source_format.as_str(), "skill added to bank");

        Ok(Skill {
            skill_id: skill_id.to_owned(),
            metadata,
            content: content.to_owned(),
            format: source_format,
            checksum,
        })
    }

    /// Get a skill by ID, or `None` when it is not in the bank.
    pub fn get(&self, skill_id: &str) -> Result<Option<Skill>> {
        let skill_file = self.canonical_dir(skill_id).join(SKILL_FILE);
        if !skill_file.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&skill_file)?;
        let (frontmatter, _) = parse_frontmatter(&content);
        let metadata = SkillMetadata::from_frontmatter(&frontmatter, skill_id);
        let checksum = checksum_string(&content);

        Ok(Some(Skill {
            skill_id: skill_id.to_owned(),
            metadata,
            content,
            format: SkillFormat::Canonical,
            checksum,
        }))
    }

    /// All skill IDs with a canonical document, sorted.
    pub fn list_skills(&self) -> Result<Vec<String>> {
        if !self.skills_dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.skills_dir)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let id = entry.file_name().to_string_lossy().into_owned();
            if self.exists(&id) {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Variant agent types stored for a skill, sorted.
    pub fn list_variants(&self, skill_id: &str) -> Result<Vec<String>> {
        let variants = self.variants_dir(skill_id);
        if !variants.exists() {
            return Ok(Vec::new());
        }

        let mut types = Vec::new();
        for entry in std::fs::read_dir(&variants)? {
            let entry = entry?;
            if entry.path().is_dir() {
                types.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        types.sort();
        Ok(types)
    }

    /// Add or update a variant document for a specific agent type.
    pub fn add_variant(&self, skill_id: &str, agent_type: &str, content: &str) -> Result<PathBuf> {
        let variant = self.variant_dir(skill_id, agent_type);
        std::fs::create_dir_all(&variant)?;
        let path = variant.join(SKILL_FILE);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Variant document content for an agent type, if stored.
    pub fn variant_content(&self, skill_id: &str, agent_type: &str) -> Result<Option<String>> {
        let path = self.variant_dir(skill_id, agent_type).join(SKILL_FILE);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    /// Remove a skill (canonical, variants, and sidecars).
    pub fn remove(&self, skill_id: &str) -> Result<()> {
        let dir = self.skill_dir(skill_id);
        if !dir.exists() {
            return Err(BankError::NotFound(skill_id.to_owned()));
        }
        std::fs::remove_dir_all(&dir)?;
        tracing::info!(skill = %skill_id, "skill removed from bank");
        Ok(())
    }

    /// Checksum of the skill's canonical directory tree.
    pub fn dir_checksum(&self, skill_id: &str) -> Result<String> {
        let canonical = self.canonical_dir(skill_id);
        if !canonical.exists() {
            return Err(BankError::NotFound(skill_id.to_owned()));
        }
        Ok(checksum_directory(&canonical)?)
    }

    /// Record where a skill came from.
    pub fn record_provenance(&self, provenance: &Provenance) -> Result<()> {
        std::fs::write(
            self.provenance_file(&provenance.skill_id),
            serde_json::to_string_pretty(provenance)?,
        )?;
        Ok(())
    }

    /// Provenance record for a skill, if one was written.
    pub fn provenance(&self, skill_id: &str) -> Result<Option<Provenance>> {
        let path = self.provenance_file(skill_id);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(tmp: &tempfile::TempDir) -> SkillStore {
        let ws = Workspace::new(tmp.path().join(".skillbrew"));
        ws.initialize().unwrap();
        SkillStore::new(&ws)
    }

    const DOC: &str = "---\nname: test-skill\ndescription: A test.\nversion: 1.0.0\n---\n\nDo the thing.\n";

    #[test]
    fn add_then_get_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp);

        let added = store.add("test-skill", DOC, SkillFormat::Canonical).unwrap();
        assert_eq!(added.metadata.name, "test-skill");
        assert_eq!(added.metadata.version, "1.0.0");

        let got = store.get("test-skill").unwrap().unwrap();
        assert_eq!(got.content, DOC);
        assert_eq!(got.checksum, added.checksum);
        assert!(store.metadata_file("test-skill").exists());
    }

    #[test]
    fn get_missing_returns_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp);
        assert!(store.get("ghost").unwrap().is_none());
    }

    #[test]
    fn agent_format_also_writes_variant() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp);

        store.add("imported", DOC, SkillFormat::ClaudeCode).unwrap();
        assert_eq!(store.list_variants("imported").unwrap(), vec!["claude-code"]);
        assert_eq!(
            store.variant_content("imported", "claude-code").unwrap(),
            Some(DOC.to_owned())
        );
    }

    #[test]
    fn variant_can_be_added_after_import() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp);

        store.add("translated", DOC, SkillFormat::Canonical).unwrap();
        store
            .add_variant("translated", "opencode", "# opencode rendition\n")
            .unwrap();

        assert_eq!(store.list_variants("translated").unwrap(), vec!["opencode"]);
        assert_eq!(
            store.variant_content("translated", "opencode").unwrap(),
            Some("# opencode rendition\n".to_owned())
        );
        assert_eq!(store.variant_content("translated", "openclaw").unwrap(), None);
    }

    #[test]
    fn list_skips_dirs_without_canonical_document() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp);

        store.add("real", DOC, SkillFormat::Canonical).unwrap();
        std::fs::create_dir_all(store.skill_dir("hollow")).unwrap();

        assert_eq!(store.list_skills().unwrap(), vec!["real"]);
    }

    #[test]
    fn remove_deletes_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp);

        store.add("gone-soon", DOC, SkillFormat::Canonical).unwrap();
        store.remove("gone-soon").unwrap();
        assert!(!store.skill_dir("gone-soon").exists());
        assert!(matches!(
            store.remove("gone-soon"),
            Err(BankError::NotFound(_))
        ));
    }

    #[test]
    fn dir_checksum_tracks_resources() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp);

        store.add("hashed", DOC, SkillFormat::Canonical).unwrap();
        let before = store.dir_checksum("hashed").unwrap();

        let scripts = store.canonical_dir("hashed").join("scripts");
        std::fs::create_dir_all(&scripts).unwrap();
        std::fs::write(scripts.join("run.sh"), "#!/bin/bash\n").unwrap();

        assert_ne!(before, store.dir_checksum("hashed").unwrap());
    }

    #[test]
    fn provenance_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp);
        store.add("tracked", DOC, SkillFormat::Canonical).unwrap();

        let prov = Provenance {
            skill_id: "tracked".into(),
            source_type: "file".into(),
            source_location: "/tmp/somewhere/SKILL.md".into(),
            imported_at: "2026-08-06T12:00:00Z".into(),
            original_checksum: checksum_string(DOC),
            notes: String::new(),
        };
        store.record_provenance(&prov).unwrap();

        let loaded = store.provenance("tracked").unwrap().unwrap();
        assert_eq!(loaded.source_location, prov.source_location);
        assert!(store.provenance("untracked").unwrap().is_none());
    }
}
