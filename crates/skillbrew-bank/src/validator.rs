//! Skill validation engine — checks bank skills for completeness and
//! consistency.
//!
//! Five checks run per skill, sharing one pass over the canonical directory:
//!
//! 1. **structure** — the canonical `SKILL.md` exists. Missing means no
//!    further checks can run for that skill.
//! 2. **frontmatter/name** — `name` is a non-empty string.
//! 3. **frontmatter/description** — `description` is a non-empty string.
//! 4. **reference** — every `scripts/…`, `references/…`, or `assets/…` path
//!    mentioned in the body exists on disk. Fenced code blocks are stripped
//!    first so example snippets do not count as references.
//! 5. **orphan** — resource files on disk that the body never mentions,
//!    except a fixed set of infrastructure filenames (`.gitkeep`, README,
//!    LICENSE, ...). Orphans warn; they never fail validation.
//!
//! Findings are issues in a [`ValidationReport`], not errors. Only genuine
//! I/O failures (permission denied and the like) surface as [`BankError`].
//! Skills and issues are emitted in sorted order, so an unchanged tree
//! produces an identical report on every run.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use skillbrew_core::{Frontmatter, Workspace, parse_frontmatter};

use crate::error::Result;
use crate::store::{CANONICAL_DIR, SKILL_FILE};

/// Matches resource paths like `scripts/foo.sh`, `references/a/b.md`,
/// `assets/logo.png` in a document body. The match must end on a word
/// character so trailing prose punctuation is not swallowed.
static RESOURCE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:scripts|references|assets)/[\w./_-]*\w").expect("resource path pattern")
});

/// The resource folders the reference and orphan checks cover.
const RESOURCE_DIRS: [&str; 3] = ["scripts", "references", "assets"];

/// Infrastructure filenames never reported as orphans, wherever they sit.
const ORPHAN_IGNORE: [&str; 8] = [
    ".gitkeep",
    ".keep",
    ".gitignore",
    "README",
    "README.md",
    "LICENSE",
    "LICENSE.md",
    "__init__.py",
];

/// How bad an issue is. An error fails validation; a warning never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// The string value used at the serialization boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// Which check produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCategory {
    Structure,
    Frontmatter,
    Reference,
    Orphan,
}

impl IssueCategory {
    /// The string value used at the serialization boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Frontmatter => "frontmatter",
            Self::Reference => "reference",
            Self::Orphan => "orphan",
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Which skill the issue belongs to.
    pub skill_id: String,
    pub severity: Severity,
    pub category: IssueCategory,
    /// Human-readable description, embedding the offending path or field.
    pub message: String,
    /// Filesystem location for tooling to jump to, when one applies.
    pub path: Option<PathBuf>,
}

/// The outcome of a validation run.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// How many skills were checked.
    pub total_skills: usize,
    /// All findings, in deterministic order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Issues with severity [`Severity::Error`].
    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .collect()
    }

    /// Issues with severity [`Severity::Warning`].
    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .collect()
    }

    /// True iff no error is present. Warnings do not fail validation.
    pub fn passed(&self) -> bool {
        self.issues.iter().all(|i| i.severity != Severity::Error)
    }

    /// Flat JSON view for programmatic callers:
    /// `{total, passed, errors, warnings, issues: [...]}`.
    pub fn summary(&self) -> Value {
        serde_json::json!({
            "total": self.total_skills,
            "passed": self.passed(),
            "errors": self.errors().len(),
            "warnings": self.warnings().len(),
            "issues": self.issues.iter().map(|i| {
                serde_json::json!({
                    "skill_id": i.skill_id,
                    "severity": i.severity.as_str(),
                    "category": i.category.as_str(),
                    "message": i.message,
                })
            }).collect::<Vec<_>>(),
        })
    }
}

/// Validates skills in the bank and repairs dangling references.
pub struct SkillValidator {
    skills_dir: PathBuf,
}

impl SkillValidator {
    /// Create a validator over a workspace's bank.
    pub fn new(workspace: &Workspace) -> Self {
        Self {
            skills_dir: workspace.bank_skills(),
        }
    }

    /// Validate every skill in the bank.
    ///
    /// Skill directories are enumerated in lexicographic order; hidden
    /// directories are skipped. A missing bank is nothing to validate, not
    /// an error.
    pub fn validate_all(&self) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();
        if !self.skills_dir.exists() {
            return Ok(report);
        }

        let mut skill_ids = Vec::new();
        for entry in std::fs::read_dir(&self.skills_dir)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            skill_ids.push(name);
        }
        skill_ids.sort();

        report.total_skills = skill_ids.len();
        for skill_id in &skill_ids {
            self.validate_skill(skill_id, &mut report)?;
        }

        tracing::debug!(
            skills = report.total_skills,
            issues = report.issues.len(),
            "bank validation finished"
        );
        Ok(report)
    }

    /// Validate a single skill by ID.
    pub fn validate_one(&self, skill_id: &str) -> Result<ValidationReport> {
        let mut report = ValidationReport {
            total_skills: 1,
            issues: Vec::new(),
        };
        self.validate_skill(skill_id, &mut report)?;
        Ok(report)
    }

    /// Create stub files for missing references in a skill's document.
    ///
    /// Re-runs the same body scan as the reference check, then writes a
    /// `TODO` placeholder for every referenced path not on disk, creating
    /// parent directories as needed. Existing files are never touched, so a
    /// second call returns an empty list. A skill without a canonical
    /// document is a no-op.
    pub fn fix_stubs(&self, skill_id: &str) -> Result<Vec<PathBuf>> {
        let canonical = self.canonical_dir(skill_id);
        let skill_file = canonical.join(SKILL_FILE);
        if !skill_file.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&skill_file)?;
        let (_, body) = parse_frontmatter(&content);

        let mut created = Vec::new();
        for ref_path in extract_references(&body) {
            let full_path = canonical.join(&ref_path);
            if full_path.exists() {
                continue;
            }
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&full_path, format!("# TODO: Implement {ref_path}\n"))?;
            created.push(full_path);
        }

        if !created.is_empty() {
            tracing::info!(skill = %skill_id, stubs = created.len(), "created stub files");
        }
        Ok(created)
    }

    fn canonical_dir(&self, skill_id: &str) -> PathBuf {
        self.skills_dir.join(skill_id).join(CANONICAL_DIR)
    }

    /// Run all checks for one skill, appending findings to `report`.
    fn validate_skill(&self, skill_id: &str, report: &mut ValidationReport) -> Result<()> {
        let canonical = self.canonical_dir(skill_id);
        let skill_file = canonical.join(SKILL_FILE);

        // Check 1: the canonical document exists. Without it nothing else
        // can be evaluated, so this is the only short-circuiting check.
        if !skill_file.exists() {
            report.issues.push(ValidationIssue {
                skill_id: skill_id.to_owned(),
                severity: Severity::Error,
                category: IssueCategory::Structure,
                message: format!("{CANONICAL_DIR}/{SKILL_FILE} is missing"),
                path: Some(canonical),
            });
            return Ok(());
        }

        let content = std::fs::read_to_string(&skill_file)?;
        let (frontmatter, body) = parse_frontmatter(&content);

        // Checks 2 and 3: required frontmatter fields.
        for field in ["name", "description"] {
            if let Some(message) = check_required_string(&frontmatter, field) {
                report.issues.push(ValidationIssue {
                    skill_id: skill_id.to_owned(),
                    severity: Severity::Error,
                    category: IssueCategory::Frontmatter,
                    message,
                    path: Some(skill_file.clone()),
                });
            }
        }

        // Check 4: referenced paths exist on disk.
        let referenced = extract_references(&body);
        for ref_path in &referenced {
            let full_path = canonical.join(ref_path);
            if !full_path.exists() {
                report.issues.push(ValidationIssue {
                    skill_id: skill_id.to_owned(),
                    severity: Severity::Error,
                    category: IssueCategory::Reference,
                    message: format!("referenced path does not exist: {ref_path}"),
                    path: Some(full_path),
                });
            }
        }

        // Check 5: resource files never mentioned in the body (orphans).
        for dir_name in RESOURCE_DIRS {
            let subdir = canonical.join(dir_name);
            if !subdir.is_dir() {
                continue;
            }
            let mut files = Vec::new();
            collect_files(&subdir, &mut files)?;
            files.sort();

            for file_path in files {
                let file_name = file_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if ORPHAN_IGNORE.contains(&file_name.as_str()) {
                    continue;
                }
                let rel = relative_slash_path(&file_path, &canonical);
                if referenced.contains(&rel) {
                    continue;
                }
                report.issues.push(ValidationIssue {
                    skill_id: skill_id.to_owned(),
                    severity: Severity::Warning,
                    category: IssueCategory::Orphan,
                    message: format!("file not referenced in {SKILL_FILE}: {rel}"),
                    path: Some(file_path),
                });
            }
        }

        Ok(())
    }
}

/// Distinct resource paths referenced in a body, sorted.
///
/// Fenced code blocks are stripped before matching so documentation examples
/// never count as references. Both the reference check and
/// [`SkillValidator::fix_stubs`] go through here, keeping the two entry
/// points in agreement.
fn extract_references(body: &str) -> BTreeSet<String> {
    let stripped = strip_fenced_code_blocks(body);
    RESOURCE_PATH_RE
        .find_iter(&stripped)
        .map(|m| m.as_str().to_owned())
        .collect()
}

/// Remove fenced code blocks (``` ... ```), including the fence lines and
/// any language tag on the opening fence.
fn strip_fenced_code_blocks(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut in_fence = false;

    for line in body.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if !in_fence {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// `None` when the field is a usable non-empty string; otherwise the issue
/// message. A value of the wrong YAML type fails the same as a missing one.
fn check_required_string(frontmatter: &Frontmatter, field: &str) -> Option<String> {
    match frontmatter.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => None,
        Some(_) => Some(format!(
            "frontmatter field '{field}' must be a non-empty string"
        )),
        None => Some(format!("frontmatter missing '{field}' field")),
    }
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else if path.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

/// Path relative to `base`, joined with forward slashes to match how bodies
/// reference resources.
fn relative_slash_path(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
