//! Skill bank for skillbrew — storage, catalog, and validation.
//!
//! This crate provides:
//!
//! - **Skill store** — add, get, list, and remove skills in the bank, with
//!   per-agent variants, metadata sidecars, and provenance records.
//!
//! - **Catalog** — the `catalog.json` master index with substring search.
//!
//! - **Validation engine** — structural, frontmatter, reference, and orphan
//!   checks over the bank, with stub auto-repair for dangling references.
//!
//! # Example
//!
//! ```rust,no_run
//! use skillbrew_bank::{SkillStore, SkillValidator};
//! use skillbrew_core::{SkillFormat, Workspace};
//!
//! let workspace = Workspace::discover();
//! workspace.initialize().unwrap();
//!
//! let store = SkillStore::new(&workspace);
//! store
//!     .add(
//!         "hello",
//!         "---\nname: hello\ndescription: Greets.\n---\n\nSay hi.\n",
//!         SkillFormat::Canonical,
//!     )
//!     .unwrap();
//!
//! let report = SkillValidator::new(&workspace).validate_all().unwrap();
//! assert!(report.passed());
//! ```

pub mod catalog;
pub mod error;
pub mod store;
pub mod validator;

pub use catalog::{Catalog, CatalogEntry};
pub use error::{BankError, Result};
pub use store::{CANONICAL_DIR, SKILL_FILE, SkillStore};
pub use validator::{
    IssueCategory, Severity, SkillValidator, ValidationIssue, ValidationReport,
};
