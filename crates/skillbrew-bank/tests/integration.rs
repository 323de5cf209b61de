//! Integration tests for the skillbrew-bank crate.
//!
//! These tests exercise the store, catalog, and validator together over a
//! real temporary workspace, mirroring how the CLI drives them.

use skillbrew_bank::{Catalog, IssueCategory, SkillStore, SkillValidator};
use skillbrew_core::{SkillFormat, Workspace};

fn fresh_workspace(tmp: &tempfile::TempDir) -> Workspace {
    let workspace = Workspace::new(tmp.path().join(".skillbrew"));
    workspace.initialize().unwrap();
    workspace
}

// ═══════════════════════════════════════════════════════════════════════
//  Store + catalog + validator lifecycle
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn add_register_validate_lifecycle() {
    let tmp = tempfile::tempdir().unwrap();
    let workspace = fresh_workspace(&tmp);
    let store = SkillStore::new(&workspace);
    let mut catalog = Catalog::load(&workspace).unwrap();

    // Add two well-formed skills and register them.
    for (id, description) in [("git-helper", "Commit messages."), ("weather", "Forecasts.")] {
        let content =
            format!("---\nname: {id}\ndescription: {description}\n---\n\n# {id}\n\nInstructions.\n");
        let skill = store.add(id, &content, SkillFormat::Canonical).unwrap();
        catalog.register(&skill).unwrap();
    }

    assert_eq!(store.list_skills().unwrap(), vec!["git-helper", "weather"]);
    assert_eq!(catalog.list_all().len(), 2);

    let report = SkillValidator::new(&workspace).validate_all().unwrap();
    assert_eq!(report.total_skills, 2);
    assert!(report.passed());

    // Remove one and make sure every view agrees.
    store.remove("weather").unwrap();
    catalog.unregister("weather").unwrap();
    assert_eq!(store.list_skills().unwrap(), vec!["git-helper"]);
    assert_eq!(
        SkillValidator::new(&workspace)
            .validate_all()
            .unwrap()
            .total_skills,
        1
    );
}

#[test]
fn break_reference_then_repair_with_stubs() {
    let tmp = tempfile::tempdir().unwrap();
    let workspace = fresh_workspace(&tmp);
    let store = SkillStore::new(&workspace);
    let validator = SkillValidator::new(&workspace);

    store
        .add(
            "deploy-helper",
            "---\nname: deploy-helper\ndescription: Deploys things.\n---\n\nRun scripts/deploy.sh, then check references/runbook.md.\n",
            SkillFormat::Canonical,
        )
        .unwrap();

    // The document references two files that do not exist yet.
    let broken = validator.validate_one("deploy-helper").unwrap();
    assert!(!broken.passed());
    assert_eq!(broken.errors().len(), 2);
    assert!(
        broken
            .errors()
            .iter()
            .all(|i| i.category == IssueCategory::Reference)
    );

    // Stub repair fills them in; validation then passes cleanly.
    let created = validator.fix_stubs("deploy-helper").unwrap();
    assert_eq!(created.len(), 2);

    let fixed = validator.validate_one("deploy-helper").unwrap();
    assert!(fixed.passed());
    assert!(fixed.issues.is_empty());

    // A second repair pass finds nothing to do.
    assert!(validator.fix_stubs("deploy-helper").unwrap().is_empty());
}

#[test]
fn imported_variant_keeps_canonical_authoritative() {
    let tmp = tempfile::tempdir().unwrap();
    let workspace = fresh_workspace(&tmp);
    let store = SkillStore::new(&workspace);

    let content = "---\nname: imported\ndescription: From Claude Code.\n---\n\nBody.\n";
    store
        .add("imported", content, SkillFormat::ClaudeCode)
        .unwrap();

    // Both copies exist; the validator only ever reads the canonical one.
    assert_eq!(store.list_variants("imported").unwrap(), vec!["claude-code"]);
    let report = SkillValidator::new(&workspace)
        .validate_one("imported")
        .unwrap();
    assert!(report.passed());

    // Drift detection: editing a resource changes the directory checksum.
    let before = store.dir_checksum("imported").unwrap();
    let assets = store.canonical_dir("imported").join("assets");
    std::fs::create_dir_all(&assets).unwrap();
    std::fs::write(assets.join("logo.svg"), "<svg/>").unwrap();
    assert_ne!(before, store.dir_checksum("imported").unwrap());
}
