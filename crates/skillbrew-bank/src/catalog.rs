//! Master catalog — the `catalog.json` index of everything in the bank.
//!
//! The catalog is a convenience index for listing and searching without
//! re-parsing every skill document. The bank directories remain the source
//! of truth; entries are upserted whenever a skill is added.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use skillbrew_core::{Skill, Workspace};

use crate::error::Result;

/// One catalog entry per skill ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Checksum of the canonical document at registration time.
    #[serde(default)]
    pub checksum: String,

    /// RFC 3339 timestamp of the first or most recent registration.
    #[serde(default)]
    pub registered_at: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogData {
    #[serde(default)]
    version: String,

    #[serde(default)]
    skills: BTreeMap<String, CatalogEntry>,

    #[serde(default)]
    updated_at: String,
}

/// The master catalog stored in `catalog.json`.
pub struct Catalog {
    path: PathBuf,
    data: CatalogData,
}

impl Catalog {
    /// Load the catalog for a workspace. A missing file is an empty catalog.
    pub fn load(workspace: &Workspace) -> Result<Self> {
        let path = workspace.catalog_file();
        let data = if path.exists() {
            serde_json::from_str(&std::fs::read_to_string(&path)?)?
        } else {
            CatalogData {
                version: env!("CARGO_PKG_VERSION").to_owned(),
                ..CatalogData::default()
            }
        };
        Ok(Self { path, data })
    }

    fn save(&mut self) -> Result<()> {
        self.data.updated_at = chrono::Utc::now().to_rfc3339();
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.data)?)?;
        Ok(())
    }

    /// Register (or refresh) a skill in the catalog.
    pub fn register(&mut self, skill: &Skill) -> Result<()> {
        self.data.skills.insert(
            skill.skill_id.clone(),
            CatalogEntry {
                name: skill.metadata.name.clone(),
                description: skill.metadata.description.clone(),
                version: skill.metadata.version.clone(),
                tags: skill.metadata.tags.clone(),
                checksum: skill.checksum.clone(),
                registered_at: chrono::Utc::now().to_rfc3339(),
            },
        );
        self.save()?;
        tracing::debug!(skill = %skill.skill_id, "skill registered in catalog");
        Ok(())
    }

    /// Remove a skill from the catalog. Returns whether it was present.
    pub fn unregister(&mut self, skill_id: &str) -> Result<bool> {
        let removed = self.data.skills.remove(skill_id).is_some();
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// Catalog entry for a skill.
    pub fn get(&self, skill_id: &str) -> Option<&CatalogEntry> {
        self.data.skills.get(skill_id)
    }

    /// All entries, keyed by skill ID (sorted).
    pub fn list_all(&self) -> &BTreeMap<String, CatalogEntry> {
        &self.data.skills
    }

    /// Case-insensitive substring search over ID, name, description, tags.
    pub fn search(&self, query: &str) -> BTreeMap<String, CatalogEntry> {
        let needle = query.to_lowercase();
        self.data
            .skills
            .iter()
            .filter(|(id, entry)| {
                id.to_lowercase().contains(&needle)
                    || entry.name.to_lowercase().contains(&needle)
                    || entry.description.to_lowercase().contains(&needle)
                    || entry.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .map(|(id, entry)| (id.clone(), entry.clone()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use skillbrew_core::{SkillFormat, SkillMetadata, checksum_string};

    fn sample_skill(id: &str, description: &str, tags: &[&str]) -> Skill {
        Skill {
            skill_id: id.to_owned(),
            metadata: SkillMetadata {
                name: id.to_owned(),
                description: description.to_owned(),
                version: "1.0.0".into(),
                tags: tags.iter().map(|t| (*t).to_owned()).collect(),
                ..SkillMetadata::default()
            },
            content: "---\n---\nbody".into(),
            format: SkillFormat::Canonical,
            checksum: checksum_string("body"),
        }
    }

    fn workspace_in(tmp: &tempfile::TempDir) -> Workspace {
        let ws = Workspace::new(tmp.path().join(".skillbrew"));
        ws.initialize().unwrap();
        ws
    }

    #[test]
    fn register_persists_across_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = workspace_in(&tmp);

        let mut catalog = Catalog::load(&ws).unwrap();
        catalog
            .register(&sample_skill("git-helper", "Commit messages.", &["git"]))
            .unwrap();

        let reloaded = Catalog::load(&ws).unwrap();
        let entry = reloaded.get("git-helper").unwrap();
        assert_eq!(entry.description, "Commit messages.");
        assert!(!entry.registered_at.is_empty());
    }

    #[test]
    fn unregister_removes_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = workspace_in(&tmp);

        let mut catalog = Catalog::load(&ws).unwrap();
        catalog
            .register(&sample_skill("ephemeral", "Short-lived.", &[]))
            .unwrap();

        assert!(catalog.unregister("ephemeral").unwrap());
        assert!(!catalog.unregister("ephemeral").unwrap());
        assert!(Catalog::load(&ws).unwrap().get("ephemeral").is_none());
    }

    #[test]
    fn search_matches_id_description_and_tags() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = workspace_in(&tmp);

        let mut catalog = Catalog::load(&ws).unwrap();
        catalog
            .register(&sample_skill("git-helper", "Commit messages.", &["vcs"]))
            .unwrap();
        catalog
            .register(&sample_skill("weather", "Forecasts.", &["api"]))
            .unwrap();

        assert_eq!(catalog.search("GIT").len(), 1);
        assert_eq!(catalog.search("forecast").len(), 1);
        assert_eq!(catalog.search("vcs").len(), 1);
        assert!(catalog.search("nothing-matches").is_empty());
    }

    #[test]
    fn list_all_is_sorted_by_id() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = workspace_in(&tmp);

        let mut catalog = Catalog::load(&ws).unwrap();
        for id in ["zeta", "alpha", "mid"] {
            catalog.register(&sample_skill(id, "", &[])).unwrap();
        }

        let ids: Vec<_> = catalog.list_all().keys().cloned().collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    }
}
