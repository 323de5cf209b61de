//! Core building blocks for skillbrew — a personal skill asset manager.
//!
//! This crate provides:
//!
//! - **Workspace layout** — the `~/.skillbrew/` directory tree holding the
//!   skill bank, catalog, and configuration.
//!
//! - **Frontmatter parser/writer** — splits `SKILL.md` documents into an
//!   untyped YAML metadata mapping and a markdown body, with a forgiving
//!   fallback: malformed frontmatter is treated as body text.
//!
//! - **Domain models** — [`Skill`], [`SkillMetadata`], [`SkillFormat`], and
//!   [`Provenance`].
//!
//! - **Checksums** — SHA-256 content and directory hashes used for drift
//!   detection.

pub mod checksum;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod models;
pub mod workspace;

pub use checksum::{checksum_directory, checksum_file, checksum_string};
pub use config::Config;
pub use error::{CoreError, Result};
pub use frontmatter::{Frontmatter, extract_skill_name, parse_frontmatter, write_frontmatter};
pub use models::{Provenance, Skill, SkillFormat, SkillMetadata};
pub use workspace::{InitSummary, Workspace};
