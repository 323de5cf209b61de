//! CLI entry point for skillbrew.
//!
//! This binary provides the `skillbrew` command with subcommands for
//! initializing the workspace, managing the skill bank, and running the
//! validation engine.

mod cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skillbrew_bank::{Catalog, SkillStore, SkillValidator, ValidationReport};
use skillbrew_core::{
    CoreError, Provenance, SkillFormat, Workspace, checksum_string, extract_skill_name,
};

use crate::cli::{Cli, Commands};

/// Resource folders copied alongside a skill document on `add`.
const RESOURCE_DIRS: [&str; 3] = ["scripts", "references", "assets"];

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to warn so tables and listings stay clean; RUST_LOG overrides.
    init_tracing("warn");

    let workspace = match &cli.root {
        Some(root) => Workspace::new(root),
        None => Workspace::discover(),
    };

    match cli.command {
        Commands::Init => cmd_init(&workspace),
        Commands::Add { path, id, format } => cmd_add(&workspace, &path, id, &format),
        Commands::List => cmd_list(&workspace),
        Commands::Remove { id } => cmd_remove(&workspace, &id),
        Commands::Search { query } => cmd_search(&workspace, &query),
        Commands::Validate { skill, fix, json } => {
            cmd_validate(&workspace, skill.as_deref(), fix, json)
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommand: init
// ---------------------------------------------------------------------------

fn cmd_init(workspace: &Workspace) -> Result<()> {
    let summary = workspace.initialize()?;

    println!();
    println!("  skillbrew workspace: {}", workspace.root().display());
    for dir in &summary.directories {
        println!("  [+] Created {}", dir.display());
    }
    for file in &summary.config_files {
        println!("  [+] Created {}", file.display());
    }
    if summary.directories.is_empty() && summary.config_files.is_empty() {
        println!("  Already initialized.");
    }
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: add
// ---------------------------------------------------------------------------

fn cmd_add(workspace: &Workspace, path: &Path, id: Option<String>, format: &str) -> Result<()> {
    require_initialized(workspace)?;

    let Some(source_format) = SkillFormat::parse(format) else {
        bail!("unknown format `{format}` (expected canonical, claude-code, opencode, or openclaw)");
    };

    // Accept either the document itself or a directory containing one.
    let (skill_file, source_dir) = if path.is_dir() {
        (path.join(skillbrew_bank::SKILL_FILE), Some(path))
    } else {
        (path.to_path_buf(), None)
    };
    if !skill_file.exists() {
        bail!("no {} found at {}", skillbrew_bank::SKILL_FILE, path.display());
    }

    let content = std::fs::read_to_string(&skill_file)
        .with_context(|| format!("failed to read {}", skill_file.display()))?;

    let fallback = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unnamed".to_owned());
    let skill_id = id.unwrap_or_else(|| extract_skill_name(&content, &fallback));

    let store = SkillStore::new(workspace);
    let skill = store.add(&skill_id, &content, source_format)?;

    // Bring resource folders along when importing a whole directory.
    let mut copied = 0usize;
    if let Some(dir) = source_dir {
        for resource in RESOURCE_DIRS {
            let from = dir.join(resource);
            if from.is_dir() {
                copied += copy_tree(&from, &store.canonical_dir(&skill_id).join(resource))?;
            }
        }
    }

    store.record_provenance(&Provenance {
        skill_id: skill_id.clone(),
        source_type: "file".to_owned(),
        source_location: path.display().to_string(),
        imported_at: chrono::Utc::now().to_rfc3339(),
        original_checksum: checksum_string(&content),
        notes: String::new(),
    })?;

    let mut catalog = Catalog::load(workspace)?;
    catalog.register(&skill)?;

    println!("Added `{}` to the bank ({} resource files).", skill_id, copied);
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: list
// ---------------------------------------------------------------------------

fn cmd_list(workspace: &Workspace) -> Result<()> {
    require_initialized(workspace)?;

    let store = SkillStore::new(workspace);
    let catalog = Catalog::load(workspace)?;
    let ids = store.list_skills()?;

    if ids.is_empty() {
        println!("No skills in the bank. Add one with `skillbrew add <path>`.");
        return Ok(());
    }

    let id_width = column_width(ids.iter().map(String::as_str), "skill");
    println!();
    println!("  {:<id_width$}  {:<9}  {}", "skill", "version", "description");
    for skill_id in &ids {
        let (version, description) = catalog
            .get(skill_id)
            .map(|e| (e.version.clone(), e.description.clone()))
            .unwrap_or_default();
        println!("  {skill_id:<id_width$}  {version:<9}  {description}");
    }
    println!();
    println!("{} skills", ids.len());
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: remove
// ---------------------------------------------------------------------------

fn cmd_remove(workspace: &Workspace, skill_id: &str) -> Result<()> {
    require_initialized(workspace)?;

    let store = SkillStore::new(workspace);
    store.remove(skill_id)?;

    let mut catalog = Catalog::load(workspace)?;
    catalog.unregister(skill_id)?;

    println!("Removed `{skill_id}`.");
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: search
// ---------------------------------------------------------------------------

fn cmd_search(workspace: &Workspace, query: &str) -> Result<()> {
    require_initialized(workspace)?;

    let catalog = Catalog::load(workspace)?;
    let matches = catalog.search(query);

    if matches.is_empty() {
        println!("No skills matching `{query}`.");
        return Ok(());
    }

    let id_width = column_width(matches.keys().map(String::as_str), "skill");
    println!();
    for (skill_id, entry) in &matches {
        println!("  {skill_id:<id_width$}  {}", entry.description);
    }
    println!();
    println!("{} matches", matches.len());
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: validate
// ---------------------------------------------------------------------------

fn cmd_validate(workspace: &Workspace, skill: Option<&str>, fix: bool, json: bool) -> Result<()> {
    require_initialized(workspace)?;

    let validator = SkillValidator::new(workspace);

    if fix {
        let Some(skill_id) = skill else {
            bail!("--fix requires --skill <id>");
        };
        let created = validator.fix_stubs(skill_id)?;
        if created.is_empty() {
            println!("No stubs needed.");
        } else {
            println!("Created {} stub files:", created.len());
            for path in &created {
                println!("  {}", path.display());
            }
        }
    }

    let report = match skill {
        Some(skill_id) => validator.validate_one(skill_id)?,
        None => validator.validate_all()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report.summary())?);
    } else {
        render_report(&report);
    }

    // The validator never fails on findings; the exit code carries them.
    if !report.passed() {
        std::process::exit(1);
    }
    Ok(())
}

/// Print validation results as a table with a summary line.
fn render_report(report: &ValidationReport) {
    if report.issues.is_empty() {
        println!("All {} skills passed validation.", report.total_skills);
        return;
    }

    let skill_width = column_width(report.issues.iter().map(|i| i.skill_id.as_str()), "skill");
    println!();
    println!("Validation results ({} skills)", report.total_skills);
    println!(
        "  {:<8}  {:<skill_width$}  {:<11}  {}",
        "severity", "skill", "category", "message"
    );
    for issue in &report.issues {
        println!(
            "  {:<8}  {:<skill_width$}  {:<11}  {}",
            issue.severity.as_str(),
            issue.skill_id,
            issue.category.as_str(),
            issue.message
        );
    }
    println!();
    println!(
        "{} errors, {} warnings",
        report.errors().len(),
        report.warnings().len()
    );
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn require_initialized(workspace: &Workspace) -> Result<()> {
    if !workspace.is_initialized() {
        return Err(CoreError::NotInitialized(workspace.root().to_path_buf()).into());
    }
    Ok(())
}

/// Width of a table column: the longest cell, or the header.
fn column_width<'a>(cells: impl Iterator<Item = &'a str>, header: &str) -> usize {
    cells.map(str::len).max().unwrap_or(0).max(header.len())
}

/// Recursively copy a directory tree. Returns the number of files copied.
fn copy_tree(from: &Path, to: &Path) -> Result<usize> {
    std::fs::create_dir_all(to)?;
    let mut copied = 0usize;
    for entry in std::fs::read_dir(from)? {
        let entry = entry?;
        let source: PathBuf = entry.path();
        let dest = to.join(entry.file_name());
        if source.is_dir() {
            copied += copy_tree(&source, &dest)?;
        } else {
            std::fs::copy(&source, &dest)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
