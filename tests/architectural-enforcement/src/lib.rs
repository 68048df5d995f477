//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The event loop never blocks on network I/O
//! - No sleep() calls in production code
//! - Blocking file I/O only where configuration is read, before the UI starts
//!
//! The helpers below walk the production sources of the workspace and yield
//! code lines with comments and `#[cfg(test)]` modules removed.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Production source directories, relative to the workspace root
pub const PRODUCTION_DIRS: &[&str] = &["chat/core/src", "tui/src"];

/// Workspace root, two levels above this package
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// One line of production code
#[derive(Clone, Debug)]
pub struct SourceLine {
    /// File path relative to the workspace root
    pub path: PathBuf,
    /// 1-based line number
    pub number: usize,
    /// Code with any trailing `//` comment removed
    pub code: String,
}

/// A forbidden pattern found in production code
#[derive(Clone, Debug)]
pub struct Violation {
    /// Where it was found
    pub line: SourceLine,
    /// What rule it breaks
    pub rule: &'static str,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} - {}: {}",
            self.line.path.display(),
            self.line.number,
            self.rule,
            self.line.code.trim()
        )
    }
}

/// All production code lines of the workspace
#[must_use]
pub fn production_lines() -> Vec<SourceLine> {
    let root = workspace_root();
    let mut lines = Vec::new();

    for dir in PRODUCTION_DIRS {
        let path = root.join(dir);
        if !path.exists() {
            continue;
        }

        for entry in walkdir::WalkDir::new(&path)
            .into_iter()
            .filter_map(Result::ok)
        {
            if entry.path().extension().and_then(|s| s.to_str()) == Some("rs") {
                let relative = entry
                    .path()
                    .strip_prefix(&root)
                    .unwrap_or(entry.path())
                    .to_path_buf();
                collect_file(entry.path(), &relative, &mut lines);
            }
        }
    }

    lines
}

fn collect_file(path: &Path, relative: &Path, lines: &mut Vec<SourceLine>) {
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        // Test modules sit at the end of each file
        if trimmed == "#[cfg(test)]" {
            break;
        }
        if trimmed.starts_with("//") {
            continue;
        }

        let code = line.split("//").next().unwrap_or(line);
        if code.trim().is_empty() {
            continue;
        }

        lines.push(SourceLine {
            path: relative.to_path_buf(),
            number: idx + 1,
            code: code.to_string(),
        });
    }
}

/// Lines containing any of `patterns`, reported under `rule`
#[must_use]
pub fn find_violations(
    lines: &[SourceLine],
    patterns: &[&str],
    rule: &'static str,
) -> Vec<Violation> {
    lines
        .iter()
        .filter(|line| patterns.iter().any(|p| line.code.contains(p)))
        .map(|line| Violation {
            line: line.clone(),
            rule,
        })
        .collect()
}

/// Print violations and fail the test when there are any
///
/// # Panics
///
/// Panics when `violations` is not empty.
pub fn assert_no_violations(violations: &[Violation], guidance: &str) {
    if violations.is_empty() {
        return;
    }

    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    eprintln!("\n{guidance}");

    panic!(
        "\nFound {} violation(s) in production code.\nFix these before merging!",
        violations.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scans_workspace_sources() {
        let lines = production_lines();
        assert!(lines
            .iter()
            .any(|l| l.path.ends_with("chat/core/src/controller.rs")));
        assert!(lines.iter().any(|l| l.path.ends_with("tui/src/app.rs")));
    }

    #[test]
    fn test_comments_not_reported() {
        let line = SourceLine {
            path: PathBuf::from("x.rs"),
            number: 1,
            code: "let a = 1; ".to_string(),
        };
        assert!(find_violations(&[line], &["block_on("], "Blocking").is_empty());
    }
}
