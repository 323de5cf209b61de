//! CLI argument definitions for skillbrew.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// skillbrew — a personal skill bank for AI agents.
#[derive(Parser)]
#[command(
    name = "skillbrew",
    version,
    about = "skillbrew -- a personal skill bank for AI agents",
    long_about = "Stores, catalogs, validates, and repairs markdown-based skill bundles \
                  for agent ecosystems such as Claude Code, OpenCode, and OpenClaw."
)]
pub struct Cli {
    /// Workspace root override (default: $SKILLBREW_ROOT or ~/.skillbrew).
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the skillbrew workspace.
    Init,

    /// Add a skill to the bank from a SKILL.md file or a skill directory.
    Add {
        /// Path to a SKILL.md file, or a directory containing one.
        path: PathBuf,

        /// Skill ID to store under (default: frontmatter name or path stem).
        #[arg(long)]
        id: Option<String>,

        /// Source format: canonical, claude-code, opencode, or openclaw.
        #[arg(long, default_value = "canonical")]
        format: String,
    },

    /// List skills in the bank.
    List,

    /// Remove a skill from the bank and the catalog.
    Remove {
        /// The skill ID to remove.
        id: String,
    },

    /// Search the catalog by ID, name, description, or tag.
    Search {
        /// Search query (case-insensitive substring).
        query: String,
    },

    /// Validate skills in the bank for completeness and consistency.
    Validate {
        /// Validate a single skill by ID.
        #[arg(long)]
        skill: Option<String>,

        /// Auto-create stubs for missing referenced files (requires --skill).
        #[arg(long)]
        fix: bool,

        /// Emit the report as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}
