//! Parse and write SKILL.md documents with YAML frontmatter.
//!
//! A canonical skill document consists of:
//! 1. YAML frontmatter delimited by `---` lines.
//! 2. Markdown body.
//!
//! ```text
//! ---
//! name: git-commit-helper
//! description: Writes conventional commit messages.
//! version: 1.0.0
//! tags:
//!   - git
//!   - productivity
//! ---
//!
//! # Git Commit Helper
//!
//! Instructions go here...
//! ```
//!
//! The parser is deliberately forgiving: a document without a leading `---`,
//! with an unterminated delimiter, or whose embedded block fails to parse is
//! treated as all-body with empty metadata. Callers that require specific
//! fields (the validator, the store) then report the absence themselves
//! instead of aborting on a parse error.
//!
//! Frontmatter values keep their YAML type: `name: 123` parses as a number,
//! not the string `"123"`. Consumers must check the variant before accepting
//! a value.

use serde_json::{Map, Value};

/// Untyped frontmatter mapping from key to YAML-typed value.
pub type Frontmatter = Map<String, Value>;

/// Split a skill document into YAML frontmatter and markdown body.
///
/// Returns `(yaml_str, markdown_body)`, or `None` when the document does not
/// start with `---` or the delimiter is unterminated.
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start();

    if !content.starts_with("---") {
        return None;
    }

    let after_first = &content[3..];
    let end = after_first.find("\n---")?;
    let yaml = after_first[..end].trim();
    let body = after_first[end + 4..].trim_start_matches(['\n', '\r']);

    Some((yaml, body))
}

/// Parse YAML frontmatter from a markdown document.
///
/// Returns `(metadata, body)`. If no frontmatter is found, or the block does
/// not parse, returns an empty mapping and the full content as body.
pub fn parse_frontmatter(content: &str) -> (Frontmatter, String) {
    let Some((yaml, body)) = split_frontmatter(content) else {
        return (Frontmatter::new(), content.trim().to_owned());
    };

    match parse_yaml_mapping(yaml) {
        Ok(metadata) => (metadata, body.to_owned()),
        Err(reason) => {
            tracing::debug!(%reason, "frontmatter block did not parse, treating as body");
            (Frontmatter::new(), content.trim().to_owned())
        }
    }
}

/// Combine frontmatter and markdown body into a skill document string.
pub fn write_frontmatter(metadata: &Frontmatter, body: &str) -> String {
    let mut yaml = String::new();
    emit_mapping(metadata, 0, &mut yaml);
    format!("---\n{}---\n\n{}\n", yaml, body.trim_end())
}

/// Extract a skill name from frontmatter or the first markdown heading.
///
/// Falls back to slugifying the first `# ` heading, then to `fallback`.
pub fn extract_skill_name(content: &str, fallback: &str) -> String {
    let (metadata, body) = parse_frontmatter(content);

    if let Some(Value::String(name)) = metadata.get("name") {
        return name.clone();
    }

    for line in body.lines() {
        if let Some(heading) = line.trim().strip_prefix("# ") {
            return heading.trim().to_lowercase().replace(' ', "-");
        }
    }

    fallback.to_owned()
}

// ---------------------------------------------------------------------------
// Minimal YAML parser (avoids a serde_yaml dependency)
// ---------------------------------------------------------------------------

/// Parse the subset of YAML used in SKILL.md frontmatter:
/// key-value scalars, nested mappings, block lists, and inline flow
/// sequences. Scalars are type-inferred (bool, int, float, null, string).
///
/// This covers all real-world SKILL.md files; anything stranger fails and
/// the caller falls back to treating the document as all-body.
fn parse_yaml_mapping(yaml: &str) -> std::result::Result<Frontmatter, String> {
    let mut root = Frontmatter::new();
    parse_yaml_block(yaml, &mut root, 0)?;
    Ok(root)
}

fn parse_yaml_block(
    yaml: &str,
    map: &mut Frontmatter,
    base_indent: usize,
) -> std::result::Result<(), String> {
    let lines: Vec<&str> = yaml.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        // Skip empty lines and comments.
        if trimmed.is_empty() || trimmed.starts_with('#') {
            i += 1;
            continue;
        }

        let indent = line.len() - line.trim_start().len();
        if indent < base_indent {
            break;
        }

        let Some(colon_pos) = trimmed.find(':') else {
            return Err(format!("expected `key: value`, got `{trimmed}`"));
        };

        let key = trimmed[..colon_pos].trim().to_owned();
        let value_part = trimmed[colon_pos + 1..].trim();

        if value_part.is_empty() {
            // Nested mapping or block list — look at the following lines.
            i += 1;
            let child_indent = if i < lines.len() {
                let next = lines[i];
                next.len() - next.trim_start().len()
            } else {
                indent + 2
            };

            if i < lines.len() && lines[i].trim_start().starts_with("- ") {
                let mut list = Vec::new();
                while i < lines.len() {
                    let l = lines[i];
                    let li = l.len() - l.trim_start().len();
                    if li < child_indent && !l.trim().is_empty() {
                        break;
                    }
                    let lt = l.trim();
                    if let Some(item) = lt.strip_prefix("- ") {
                        list.push(parse_yaml_scalar(item.trim()));
                    } else if !lt.is_empty() {
                        break;
                    }
                    i += 1;
                }
                map.insert(key, Value::Array(list));
            } else {
                let mut child = Frontmatter::new();
                let block_end = find_block_end(&lines, i, child_indent);
                let block = lines[i..block_end].join("\n");
                parse_yaml_block(&block, &mut child, child_indent)?;
                map.insert(key, Value::Object(child));
                i = block_end;
            }
        } else {
            map.insert(key, parse_yaml_scalar(value_part));
            i += 1;
        }
    }

    Ok(())
}

fn find_block_end(lines: &[&str], start: usize, min_indent: usize) -> usize {
    let mut end = start;
    while end < lines.len() {
        let line = lines[end];
        if line.trim().is_empty() {
            end += 1;
            continue;
        }
        let indent = line.len() - line.trim_start().len();
        if indent < min_indent {
            break;
        }
        end += 1;
    }
    end
}

fn parse_yaml_scalar(s: &str) -> Value {
    let s = s.trim();

    // Quoted strings stay strings regardless of content.
    if (s.starts_with('"') && s.ends_with('"') && s.len() >= 2)
        || (s.starts_with('\'') && s.ends_with('\'') && s.len() >= 2)
    {
        return Value::String(s[1..s.len() - 1].to_owned());
    }

    // Inline flow sequence: `[a, b]` or `["a", "b"]`.
    if s.starts_with('[') && s.ends_with(']') {
        if let Ok(v) = serde_json::from_str::<Value>(s) {
            return v;
        }
        let inner = s[1..s.len() - 1].trim();
        if inner.is_empty() {
            return Value::Array(Vec::new());
        }
        let items = inner
            .split(',')
            .map(|item| parse_yaml_scalar(item.trim()))
            .collect();
        return Value::Array(items);
    }

    match s {
        "true" | "yes" | "on" => return Value::Bool(true),
        "false" | "no" | "off" => return Value::Bool(false),
        "null" | "~" => return Value::Null,
        _ => {}
    }

    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = s.parse::<f64>()
        && let Some(n) = serde_json::Number::from_f64(n)
    {
        return Value::Number(n);
    }

    Value::String(s.to_owned())
}

// ---------------------------------------------------------------------------
// Minimal YAML emitter
// ---------------------------------------------------------------------------

fn emit_mapping(map: &Frontmatter, indent: usize, out: &mut String) {
    let pad = " ".repeat(indent);
    for (key, value) in map {
        match value {
            Value::Object(child) => {
                out.push_str(&format!("{pad}{key}:\n"));
                emit_mapping(child, indent + 2, out);
            }
            Value::Array(items) => {
                out.push_str(&format!("{pad}{key}:\n"));
                for item in items {
                    out.push_str(&format!("{pad}  - {}\n", emit_scalar(item)));
                }
            }
            _ => {
                out.push_str(&format!("{pad}{key}: {}\n", emit_scalar(value)));
            }
        }
    }
}

fn emit_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if needs_quoting(s) {
                format!("\"{}\"", s.replace('"', "\\\""))
            } else {
                s.clone()
            }
        }
        // Nested containers inside lists are not produced by our own writer.
        other => other.to_string(),
    }
}

/// A bare string must be quoted when the parser would read it back as a
/// different type or mangle it.
fn needs_quoting(s: &str) -> bool {
    if s.is_empty() || s.trim() != s {
        return true;
    }
    if matches!(
        s,
        "true" | "false" | "yes" | "no" | "on" | "off" | "null" | "~"
    ) {
        return true;
    }
    if s.parse::<f64>().is_ok() {
        return true;
    }
    s.contains(':') || s.contains('#') || s.starts_with(['[', '{', '-', '"', '\''])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
