//! Local file helpers: app directory, log file, JSON exports.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Application directory (`~/.euclid-cli`), created on demand.
pub fn app_dir() -> Result<PathBuf> {
    let dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".euclid-cli");
    fs::create_dir_all(&dir).context("create app directory")?;
    Ok(dir)
}

pub fn log_path() -> Result<PathBuf> {
    Ok(app_dir()?.join("euclid-cli.log"))
}

/// Write a value as pretty JSON to the given path.
pub fn export_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("create export directory")?;
        }
    }
    let contents = serde_json::to_string_pretty(value)?;
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Default export filename for a calculation, placed in the current
/// directory.
pub fn default_export_path(a: u64, b: u64, id: Option<i64>) -> Result<PathBuf> {
    let name = match id {
        Some(id) => format!("euclid-gcd-{id}-{a}-{b}.json"),
        None => format!("euclid-gcd-{a}-{b}.json"),
    };
    let current_dir = std::env::current_dir().context("get current directory")?;
    Ok(current_dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GcdResult;
    use tempfile::TempDir;

    #[test]
    fn export_writes_readable_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("result.json");
        let result = GcdResult {
            result: 6,
            steps: Vec::new(),
            a: 48,
            b: 18,
        };
        export_json(&path, &result).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let parsed: GcdResult = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.result, 6);
    }

    #[test]
    fn default_export_name_includes_operands_and_id() {
        let path = default_export_path(48, 18, Some(7)).unwrap();
        assert!(path.ends_with("euclid-gcd-7-48-18.json"));
        let path = default_export_path(48, 18, None).unwrap();
        assert!(path.ends_with("euclid-gcd-48-18.json"));
    }
}
