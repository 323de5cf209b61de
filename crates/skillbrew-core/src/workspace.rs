//! Workspace manager — creates and manages the `~/.skillbrew/` directory tree.
//!
//! Layout:
//!
//! ```text
//! ~/.skillbrew/
//! ├── bank/
//! │   └── skills/
//! │       └── <skill-id>/
//! │           ├── canonical/SKILL.md      (+ scripts/, references/, assets/)
//! │           ├── variants/<agent-type>/SKILL.md
//! │           ├── metadata.json
//! │           └── provenance.json
//! ├── catalog.json
//! └── config.json
//! ```

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;

/// Manages the skillbrew root directory tree.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

/// What [`Workspace::initialize`] created on this run.
#[derive(Debug, Default)]
pub struct InitSummary {
    pub directories: Vec<PathBuf>,
    pub config_files: Vec<PathBuf>,
}

impl Workspace {
    /// Create a workspace rooted at an explicit path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the default workspace root.
    ///
    /// Priority:
    /// 1. `$SKILLBREW_ROOT`
    /// 2. `$HOME/.skillbrew`
    /// 3. `./.skillbrew` relative to the current working directory
    pub fn discover() -> Self {
        if let Ok(dir) = std::env::var("SKILLBREW_ROOT") {
            return Self::new(dir);
        }
        if let Ok(home) = std::env::var("HOME") {
            return Self::new(Path::new(&home).join(".skillbrew"));
        }
        Self::new(".skillbrew")
    }

    /// The workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The skill bank directory.
    pub fn bank(&self) -> PathBuf {
        self.root.join("bank")
    }

    /// Where skill directories live, one per skill ID.
    pub fn bank_skills(&self) -> PathBuf {
        self.bank().join("skills")
    }

    /// The master catalog file.
    pub fn catalog_file(&self) -> PathBuf {
        self.root.join("catalog.json")
    }

    /// The configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    /// All directories that should exist in an initialized workspace.
    pub fn all_directories(&self) -> Vec<PathBuf> {
        vec![self.root.clone(), self.bank(), self.bank_skills()]
    }

    /// Create all workspace directories. Returns the newly created ones.
    pub fn ensure_directories(&self) -> Result<Vec<PathBuf>> {
        let mut created = Vec::new();
        for dir in self.all_directories() {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
                created.push(dir);
            }
        }
        Ok(created)
    }

    /// Write the default config file if it does not exist (never overwrites).
    pub fn ensure_config_files(&self) -> Result<Vec<PathBuf>> {
        let mut created = Vec::new();
        let config_file = self.config_file();
        if !config_file.exists() {
            Config::default().save(&config_file)?;
            created.push(config_file);
        }
        Ok(created)
    }

    /// Full workspace bootstrap. Idempotent.
    pub fn initialize(&self) -> Result<InitSummary> {
        let directories = self.ensure_directories()?;
        let config_files = self.ensure_config_files()?;

        if !directories.is_empty() || !config_files.is_empty() {
            tracing::info!(
                root = %self.root.display(),
                directories = directories.len(),
                config_files = config_files.len(),
                "workspace initialized"
            );
        }

        Ok(InitSummary {
            directories,
            config_files,
        })
    }

    /// True once both the root and the config file exist.
    pub fn is_initialized(&self) -> bool {
        self.root.exists() && self.config_file().exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
