//! Tree filesystem
//!
//! The catalog and the composer only need a handful of directory
//! operations. They go through [`TreeFs`] so tests can swap the real
//! filesystem for an in-memory one.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{PracticeGenError, Result};

/// Directory operations used by catalog discovery and tree composition
pub trait TreeFs {
    /// Whether anything (file or directory) exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is an existing directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the immediate subdirectories of `dir`, sorted
    fn list_dirs(&self, dir: &Path) -> Result<Vec<String>>;

    /// Every file under `root`, recursively, as sorted paths relative to `root`.
    /// A missing `root` yields an empty list.
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>>;

    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Copy one file, creating the destination's parent directories
    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()>;
}

/// File name globs that are never treated as library content
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    patterns: Vec<glob::Pattern>,
}

impl IgnoreRules {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                glob::Pattern::new(p.as_ref()).map_err(|e| PracticeGenError::InvalidPattern {
                    pattern: p.as_ref().to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Check the file name of `path` against every pattern
    pub fn should_ignore(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy();
        self.patterns.iter().any(|p| p.matches(&name))
    }
}

/// [`TreeFs`] backed by the real filesystem
#[derive(Debug, Clone, Default)]
pub struct LocalFs {
    ignore: IgnoreRules,
}

impl LocalFs {
    pub fn new(ignore: IgnoreRules) -> Self {
        Self { ignore }
    }
}

impl TreeFs for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dirs(&self, dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| {
                PracticeGenError::Io(e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::other(format!("failed to walk {}", root.display()))
                }))
            })?;
            if !entry.path().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            if self.ignore.should_ignore(relative) {
                debug!(path = %relative.display(), "ignoring file");
                continue;
            }
            files.push(relative.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        Ok(())
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src, dst)?;
        Ok(())
    }
}
