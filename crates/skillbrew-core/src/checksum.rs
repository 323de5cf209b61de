//! SHA-256 checksum helpers for skill content.
//!
//! Checksums are used to detect drift between the bank copy of a skill and
//! whatever is deployed elsewhere. Directory checksums hash file contents in
//! sorted path order, so results are stable across runs and machines.

use std::path::{Path, PathBuf};

use ring::digest;

use crate::error::Result;

/// SHA-256 hash of a string, hex-encoded.
pub fn checksum_string(content: &str) -> String {
    let d = digest::digest(&digest::SHA256, content.as_bytes());
    hex_encode(d.as_ref())
}

/// SHA-256 hash of a file's contents.
pub fn checksum_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)?;
    Ok(checksum_string(&content))
}

/// SHA-256 hash over all regular files in a directory, sorted.
pub fn checksum_directory(dir: &Path) -> Result<String> {
    let mut files = Vec::new();
    collect_files(dir, &mut files)?;
    files.sort();

    let mut ctx = digest::Context::new(&digest::SHA256);
    for file in &files {
        ctx.update(std::fs::read_to_string(file)?.as_bytes());
    }
    Ok(hex_encode(ctx.finish().as_ref()))
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

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_checksum_is_stable() {
        let a = checksum_string("hello");
        let b = checksum_string("hello");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, checksum_string("hello!"));
    }

    #[test]
    fn file_checksum_matches_string_checksum() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("a.txt");
        std::fs::write(&file, "content").unwrap();
        assert_eq!(checksum_file(&file).unwrap(), checksum_string("content"));
    }

    #[test]
    fn directory_checksum_ignores_creation_order() {
        let make = |names: &[&str]| {
            let tmp = tempfile::tempdir().unwrap();
            for name in names {
                let path = tmp.path().join(name);
                std::fs::create_dir_all(path.parent().unwrap()).unwrap();
                std::fs::write(&path, format!("body of {name}")).unwrap();
            }
            (checksum_directory(tmp.path()).unwrap(), tmp)
        };

        let (a, _ta) = make(&["x.md", "sub/y.md", "z.md"]);
        let (b, _tb) = make(&["z.md", "x.md", "sub/y.md"]);
        assert_eq!(a, b);
    }

    #[test]
    fn directory_checksum_changes_with_content() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.txt"), "one").unwrap();
        let before = checksum_directory(tmp.path()).unwrap();

        std::fs::write(tmp.path().join("a.txt"), "two").unwrap();
        let after = checksum_directory(tmp.path()).unwrap();
        assert_ne!(before, after);
    }
}
