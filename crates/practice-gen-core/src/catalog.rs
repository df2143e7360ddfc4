//! Category catalog
//!
//! A library looks like:
//!
//! ```text
//! categories/
//!   intro-to-arrays/
//!     problems/sum.js
//!     test/sum-spec.js
//!     README.md          (auxiliary)
//! ```
//!
//! The catalog is read once and is immutable afterwards.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::config::LibraryConfig;
use crate::error::{PracticeGenError, Result};
use crate::fs::TreeFs;

/// A problem file and its spec file; never split apart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemArtifact {
    /// Base name shared by both files (e.g. `sum`)
    pub name: String,
    /// Problem file, relative to the category root
    pub problem: PathBuf,
    /// Spec file, relative to the category root
    pub spec: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub root: PathBuf,
    pub artifacts: Vec<ProblemArtifact>,
    /// Every other file in the category, relative to `root`
    pub auxiliary: Vec<PathBuf>,
}

/// Listing record for `list --json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub problems: usize,
    pub auxiliary: usize,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    categories: Vec<Category>,
}

impl Catalog {
    /// Discover every category under `root`
    pub fn load(fs: &dyn TreeFs, root: &Path, layout: &LibraryConfig) -> Result<Self> {
        if !fs.is_dir(root) {
            return Err(PracticeGenError::CatalogNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut categories = Vec::new();
        for name in fs.list_dirs(root)? {
            let category = load_category(fs, &root.join(&name), &name, layout)?;
            debug!(
                category = %category.name,
                problems = category.artifacts.len(),
                auxiliary = category.auxiliary.len(),
                "discovered category"
            );
            categories.push(category);
        }

        Ok(Self {
            root: root.to_path_buf(),
            categories,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Categories sorted by name
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn summary(&self) -> Vec<CategorySummary> {
        self.categories
            .iter()
            .map(|c| CategorySummary {
                name: c.name.clone(),
                problems: c.artifacts.len(),
                auxiliary: c.auxiliary.len(),
            })
            .collect()
    }
}

fn load_category(
    fs: &dyn TreeFs,
    root: &Path,
    name: &str,
    layout: &LibraryConfig,
) -> Result<Category> {
    let problems_dir = Path::new(&layout.problems_dir);
    let tests_dir = Path::new(&layout.tests_dir);

    let files = fs.list_files(root)?;
    let present: HashSet<&Path> = files.iter().map(PathBuf::as_path).collect();

    let mut artifacts = Vec::new();
    let mut paired: HashSet<PathBuf> = HashSet::new();

    for file in files.iter().filter(|f| f.starts_with(problems_dir)) {
        let Ok(relative) = file.strip_prefix(problems_dir) else {
            continue;
        };
        let spec = tests_dir.join(spec_path(relative, &layout.spec_suffix));

        if !present.contains(spec.as_path()) {
            return Err(PracticeGenError::MissingSpec {
                category: name.to_string(),
                problem: file.clone(),
                spec,
            });
        }

        let base = relative
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        paired.insert(file.clone());
        paired.insert(spec.clone());
        artifacts.push(ProblemArtifact {
            name: base,
            problem: file.clone(),
            spec,
        });
    }

    let auxiliary = files
        .iter()
        .filter(|f| !paired.contains(*f))
        .cloned()
        .collect();

    Ok(Category {
        name: name.to_string(),
        root: root.to_path_buf(),
        artifacts,
        auxiliary,
    })
}

/// `arrays/sum.js` → `arrays/sum-spec.js`
pub(crate) fn spec_path(problem: &Path, suffix: &str) -> PathBuf {
    let stem = problem
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let file_name = match problem.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };

    problem.with_file_name(file_name)
}
