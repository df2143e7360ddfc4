use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Next free `<prefix><NN>` directory under `parent`.
///
/// Takes the highest existing number plus one, zero-padded to `width`.
/// Starts at 0 when `parent` has no matching directories or does not exist.
pub fn next_output_dir(parent: &Path, prefix: &str, width: usize) -> Result<PathBuf> {
    let next = match last_number(parent, prefix)? {
        Some(n) => n.saturating_add(1),
        None => 0,
    };
    Ok(parent.join(format!("{}{:0width$}", prefix, next, width = width)))
}

fn last_number(parent: &Path, prefix: &str) -> Result<Option<u64>> {
    if !parent.is_dir() {
        return Ok(None);
    }

    let mut last = None;
    for entry in fs::read_dir(parent)? {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let Some(suffix) = name.strip_prefix(prefix) else {
            continue;
        };
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        if let Ok(n) = suffix.parse::<u64>() {
            last = last.max(Some(n));
        }
    }

    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "practice-problem-set-";

    #[test]
    fn first_set_is_zero() {
        let tmp = tempfile::TempDir::new().unwrap();
        let next = next_output_dir(tmp.path(), PREFIX, 2).unwrap();
        assert_eq!(next, tmp.path().join("practice-problem-set-00"));
    }

    #[test]
    fn missing_parent_is_zero() {
        let tmp = tempfile::TempDir::new().unwrap();
        let next = next_output_dir(&tmp.path().join("nope"), PREFIX, 2).unwrap();
        assert!(next.ends_with("practice-problem-set-00"));
    }

    #[test]
    fn continues_after_highest_number() {
        let tmp = tempfile::TempDir::new().unwrap();
        for name in [
            "practice-problem-set-00",
            "practice-problem-set-09",
            "practice-problem-set-3",
            "practice-problem-set-notes",
            "unrelated-42",
        ] {
            fs::create_dir(tmp.path().join(name)).unwrap();
        }
        // Files don't count
        fs::write(tmp.path().join("practice-problem-set-50"), "").unwrap();

        let next = next_output_dir(tmp.path(), PREFIX, 2).unwrap();
        assert_eq!(next, tmp.path().join("practice-problem-set-10"));
    }

    #[test]
    fn grows_past_width() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("practice-problem-set-99")).unwrap();

        let next = next_output_dir(tmp.path(), PREFIX, 2).unwrap();
        assert_eq!(next, tmp.path().join("practice-problem-set-100"));
    }
}
