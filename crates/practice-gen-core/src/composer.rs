use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Category};
use crate::config::LibraryConfig;
use crate::error::{PracticeGenError, Result};
use crate::fs::TreeFs;
use crate::sampler::sample_with;
use crate::selection::{Count, ValidatedSelection};

/// Callback type for file operation progress reporting
pub type FileCallback<'a> = Option<&'a dyn Fn(&str, &str)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// The whole category tree, auxiliary files included
    Full,
    /// Only the sampled problem/spec pairs
    Sampled,
}

#[derive(Debug, Clone)]
pub struct CategoryOutcome {
    pub category: String,
    pub mode: CopyMode,
    /// What the user asked for; `None` in full mode
    pub requested: Option<Count>,
    pub pool_size: usize,
    /// Base names of the copied problems, in copy order
    pub problems: Vec<String>,
    pub files_copied: usize,
}

#[derive(Debug, Clone)]
pub struct ComposeReport {
    pub output_root: PathBuf,
    pub template_files: usize,
    /// One entry per selected category, in selection order
    pub categories: Vec<CategoryOutcome>,
}

impl ComposeReport {
    pub fn total_problems(&self) -> usize {
        self.categories.iter().map(|c| c.problems.len()).sum()
    }
}

/// Builds a problem set directory from a validated selection
pub struct Composer<'a> {
    fs: &'a dyn TreeFs,
    catalog: &'a Catalog,
    template_root: PathBuf,
    layout: &'a LibraryConfig,
}

impl<'a> Composer<'a> {
    pub fn new(
        fs: &'a dyn TreeFs,
        catalog: &'a Catalog,
        template_root: impl Into<PathBuf>,
        layout: &'a LibraryConfig,
    ) -> Self {
        Self {
            fs,
            catalog,
            template_root: template_root.into(),
            layout,
        }
    }

    /// Compose using the thread-local random source
    pub fn compose(
        &self,
        selection: &ValidatedSelection,
        output_root: &Path,
        on_file: FileCallback<'_>,
    ) -> Result<ComposeReport> {
        self.compose_with(&mut rand::thread_rng(), selection, output_root, on_file)
    }

    pub fn compose_with<R: Rng>(
        &self,
        rng: &mut R,
        selection: &ValidatedSelection,
        output_root: &Path,
        on_file: FileCallback<'_>,
    ) -> Result<ComposeReport> {
        if self.fs.exists(output_root) {
            return Err(PracticeGenError::OutputExists {
                path: output_root.to_path_buf(),
            });
        }
        if !self.fs.is_dir(&self.template_root) {
            return Err(PracticeGenError::TemplatesNotFound {
                path: self.template_root.clone(),
            });
        }

        info!(output = %output_root.display(), "composing problem set");

        self.fs.create_dir_all(output_root)?;
        for dir in [&self.layout.problems_dir, &self.layout.tests_dir] {
            self.fs.create_dir_all(&output_root.join(dir))?;
        }

        let mut writer = Writer {
            fs: self.fs,
            output_root,
            on_file,
            written: HashSet::new(),
            artifacts: HashSet::new(),
        };

        let template_files = self.copy_templates(&mut writer)?;

        let categories = match selection {
            ValidatedSelection::AllCategories => self
                .catalog
                .categories()
                .iter()
                .map(|category| copy_full(&mut writer, category))
                .collect::<Result<Vec<_>>>()?,
            ValidatedSelection::AllExcept(excluded) => self
                .catalog
                .categories()
                .iter()
                .filter(|category| !excluded.contains(&category.name))
                .map(|category| copy_full(&mut writer, category))
                .collect::<Result<Vec<_>>>()?,
            ValidatedSelection::PerCategory(entries) => {
                let mut outcomes = Vec::with_capacity(entries.len());
                for entry in entries {
                    let category = self.category(&entry.category)?;
                    outcomes.push(copy_sampled(rng, &mut writer, category, entry.count)?);
                }
                outcomes
            }
        };

        let report = ComposeReport {
            output_root: output_root.to_path_buf(),
            template_files,
            categories,
        };
        info!(
            output = %output_root.display(),
            problems = report.total_problems(),
            "problem set created"
        );
        Ok(report)
    }

    fn copy_templates(&self, writer: &mut Writer<'_>) -> Result<usize> {
        let mut copied = 0;
        for relative in self.fs.list_files(&self.template_root)? {
            if writer.copy(&self.template_root.join(&relative), &relative, "TEMPLATE", false)? {
                copied += 1;
            }
        }
        Ok(copied)
    }

    // Only fails for a selection validated against another catalog
    fn category(&self, name: &str) -> Result<&'a Category> {
        self.catalog
            .get(name)
            .ok_or_else(|| PracticeGenError::UnknownCategory {
                names: vec![name.to_string()],
            })
    }
}

fn copy_full(writer: &mut Writer<'_>, category: &Category) -> Result<CategoryOutcome> {
    debug!(category = %category.name, "copying whole category");

    let mut files_copied = 0;
    for artifact in &category.artifacts {
        for file in [&artifact.problem, &artifact.spec] {
            writer.copy(&category.root.join(file), file, "COPY", true)?;
        }
        files_copied += 2;
    }
    for relative in &category.auxiliary {
        if writer.copy(&category.root.join(relative), relative, "COPY", false)? {
            files_copied += 1;
        }
    }

    Ok(CategoryOutcome {
        category: category.name.clone(),
        mode: CopyMode::Full,
        requested: None,
        pool_size: category.artifacts.len(),
        problems: category.artifacts.iter().map(|a| a.name.clone()).collect(),
        files_copied,
    })
}

fn copy_sampled<R: Rng>(
    rng: &mut R,
    writer: &mut Writer<'_>,
    category: &Category,
    count: Count,
) -> Result<CategoryOutcome> {
    let pool_size = category.artifacts.len();
    let chosen = sample_with(rng, pool_size, count);
    debug!(
        category = %category.name,
        requested = %count,
        pool_size,
        chosen = chosen.len(),
        "sampled problems"
    );

    let mut problems = Vec::with_capacity(chosen.len());
    for index in chosen {
        let artifact = &category.artifacts[index];
        for file in [&artifact.problem, &artifact.spec] {
            writer.copy(&category.root.join(file), file, "SAMPLE", true)?;
        }
        problems.push(artifact.name.clone());
    }

    Ok(CategoryOutcome {
        category: category.name.clone(),
        mode: CopyMode::Sampled,
        requested: Some(count),
        pool_size,
        files_copied: problems.len() * 2,
        problems,
    })
}

/// Tracks what has been written under the output root
struct Writer<'a> {
    fs: &'a dyn TreeFs,
    output_root: &'a Path,
    on_file: FileCallback<'a>,
    written: HashSet<PathBuf>,
    artifacts: HashSet<PathBuf>,
}

impl Writer<'_> {
    /// Copy `src` to `relative` under the output root and report whether it
    /// was written. Artifact files must never land on the same path twice.
    /// Other files never replace an artifact file and are skipped with a
    /// warning; otherwise they overwrite with a warning.
    fn copy(
        &mut self,
        src: &Path,
        relative: &Path,
        status: &str,
        artifact: bool,
    ) -> Result<bool> {
        if artifact {
            if !self.artifacts.insert(relative.to_path_buf()) {
                return Err(PracticeGenError::PathCollision {
                    path: self.output_root.join(relative),
                });
            }
        } else if self.artifacts.contains(relative) {
            warn!(
                path = %relative.display(),
                source = %src.display(),
                "skipping file that would replace a problem or spec"
            );
            return Ok(false);
        }
        if !self.written.insert(relative.to_path_buf()) {
            warn!(path = %relative.display(), "overwriting file already in the problem set");
        }

        self.fs.copy_file(src, &self.output_root.join(relative))?;

        if let Some(f) = self.on_file {
            f(status, &relative.to_string_lossy());
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::fs::memory::MemoryFs;
    use crate::selection::parse;

    const OUT: &str = "out/practice-problem-set-00";

    fn library() -> MemoryFs {
        let fs = MemoryFs::new();
        fs.add_file("lib/templates/package.json", "{}");
        fs.add_file("lib/templates/.mocharc.json", "{}");
        for name in ["a", "b", "c", "d", "e"] {
            fs.add_file(format!("lib/categories/intro-to-arrays/problems/{name}.js"), name);
            fs.add_file(
                format!("lib/categories/intro-to-arrays/test/{name}-spec.js"),
                &format!("{name} spec"),
            );
        }
        fs.add_file("lib/categories/intro-to-arrays/notes.md", "notes");
        for name in ["loop1", "loop2"] {
            fs.add_file(format!("lib/categories/basic-loops/problems/{name}.js"), name);
            fs.add_file(format!("lib/categories/basic-loops/test/{name}-spec.js"), name);
        }
        fs.add_file("lib/categories/bonus/problems/extra.js", "extra");
        fs.add_file("lib/categories/bonus/test/extra-spec.js", "extra");
        fs
    }

    fn run(fs: &MemoryFs, raw: &str) -> Result<ComposeReport> {
        let layout = LibraryConfig::default();
        let catalog = Catalog::load(fs, Path::new("lib/categories"), &layout)?;
        let selection = parse(raw)?.validate(&catalog)?;
        let composer = Composer::new(fs, &catalog, "lib/templates", &layout);
        composer.compose_with(
            &mut StdRng::seed_from_u64(3),
            &selection,
            Path::new(OUT),
            None,
        )
    }

    fn under(fs: &MemoryFs, dir: &str) -> Vec<String> {
        fs.files_under(Path::new(OUT).join(dir))
            .into_iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn sampled_category_copies_only_chosen_pairs() {
        let fs = library();
        let report = run(&fs, "intro-to-arrays: 2").unwrap();

        let problems = under(&fs, "problems");
        let specs = under(&fs, "test");
        assert_eq!(problems.len(), 2);
        assert_eq!(specs.len(), 2);
        for problem in &problems {
            let stem = problem.trim_end_matches(".js");
            assert!(specs.contains(&format!("{stem}-spec.js")));
        }

        // Templates yes, auxiliary files and other categories no
        assert!(fs.read(Path::new(OUT).join("package.json")).is_some());
        assert!(fs.read(Path::new(OUT).join("notes.md")).is_none());
        assert!(!problems.iter().any(|p| p.starts_with("loop")));

        let outcome = &report.categories[0];
        assert_eq!(outcome.mode, CopyMode::Sampled);
        assert_eq!(outcome.pool_size, 5);
        assert_eq!(outcome.problems.len(), 2);
        assert_eq!(report.template_files, 2);
    }

    #[test]
    fn over_request_is_clamped() {
        let fs = library();
        let report = run(&fs, "basic-loops: 40").unwrap();
        assert_eq!(under(&fs, "problems").len(), 2);
        assert_eq!(report.categories[0].requested, Some(Count::Exactly(40)));
        assert_eq!(report.categories[0].problems.len(), 2);
    }

    #[test]
    fn zero_count_copies_nothing() {
        let fs = library();
        let report = run(&fs, "bonus: 0, basic-loops: all").unwrap();
        assert_eq!(report.categories[0].problems.len(), 0);
        assert_eq!(report.categories[1].problems.len(), 2);
        assert_eq!(under(&fs, "problems"), vec!["loop1.js", "loop2.js"]);
    }

    #[test]
    fn all_categories_copies_everything() {
        let fs = library();
        let report = run(&fs, "all").unwrap();

        assert_eq!(under(&fs, "problems").len(), 8);
        assert_eq!(under(&fs, "test").len(), 8);
        assert_eq!(fs.read(Path::new(OUT).join("notes.md")).as_deref(), Some("notes"));

        let names: Vec<_> = report.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["basic-loops", "bonus", "intro-to-arrays"]);
        assert!(report.categories.iter().all(|c| c.mode == CopyMode::Full));
        assert_eq!(report.total_problems(), 8);
    }

    #[test]
    fn all_except_skips_excluded() {
        let fs = library();
        let report = run(&fs, "all, except: intro-to-arrays").unwrap();
        assert_eq!(
            under(&fs, "problems"),
            vec!["extra.js", "loop1.js", "loop2.js"]
        );
        assert_eq!(report.categories.len(), 2);
    }

    #[test]
    fn copy_order_follows_selection() {
        let fs = library();
        run(&fs, "bonus: 1, basic-loops: 1").unwrap();

        let writes: Vec<_> = fs
            .writes
            .borrow()
            .iter()
            .filter_map(|p| p.strip_prefix(OUT).ok().map(Path::to_path_buf))
            .filter(|p| p.starts_with("problems"))
            .collect();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0], PathBuf::from("problems/extra.js"));
        assert!(writes[1].starts_with("problems/loop"));
    }

    #[test]
    fn existing_output_is_fatal() {
        let fs = library();
        fs.add_file(format!("{OUT}/keep.txt"), "mine");

        let err = run(&fs, "all").unwrap_err();
        assert!(matches!(err, PracticeGenError::OutputExists { .. }));
        assert_eq!(fs.read(format!("{OUT}/keep.txt")).as_deref(), Some("mine"));
    }

    #[test]
    fn colliding_problems_are_fatal() {
        let fs = library();
        fs.add_file("lib/categories/bonus/problems/a.js", "clash");
        fs.add_file("lib/categories/bonus/test/a-spec.js", "clash");

        let err = run(&fs, "all").unwrap_err();
        assert!(matches!(err, PracticeGenError::PathCollision { .. }));
    }

    #[test]
    fn auxiliary_file_never_replaces_a_spec() {
        let fs = library();
        // Only a spec, no problem: auxiliary in `bonus`, but the same
        // destination as a spec from `basic-loops`
        fs.add_file("lib/categories/bonus/test/loop1-spec.js", "stray");

        let report = run(&fs, "all").unwrap();

        assert_eq!(
            fs.read(Path::new(OUT).join("test/loop1-spec.js")).as_deref(),
            Some("loop1")
        );
        let bonus = report
            .categories
            .iter()
            .find(|c| c.category == "bonus")
            .unwrap();
        assert_eq!(bonus.files_copied, 2);
    }

    #[test]
    fn missing_template_root_is_fatal() {
        let fs = library();
        let layout = LibraryConfig::default();
        let catalog = Catalog::load(&fs, Path::new("lib/categories"), &layout).unwrap();
        let selection = parse("all").unwrap().validate(&catalog).unwrap();
        let composer = Composer::new(&fs, &catalog, "lib/missing-templates", &layout);

        let err = composer
            .compose(&selection, Path::new(OUT), None)
            .unwrap_err();
        assert!(matches!(err, PracticeGenError::TemplatesNotFound { .. }));
        assert!(!fs.exists(Path::new(OUT)));
    }

    #[test]
    fn sources_are_untouched() {
        let fs = library();
        let before = fs.files_under("lib");
        run(&fs, "all").unwrap();
        assert_eq!(fs.files_under("lib"), before);
    }

    #[test]
    fn progress_callback_sees_every_file() {
        let fs = library();
        let layout = LibraryConfig::default();
        let catalog = Catalog::load(&fs, Path::new("lib/categories"), &layout).unwrap();
        let selection = parse("bonus: all").unwrap().validate(&catalog).unwrap();
        let composer = Composer::new(&fs, &catalog, "lib/templates", &layout);

        let seen = std::cell::RefCell::new(Vec::new());
        let on_file = |status: &str, path: &str| {
            seen.borrow_mut().push(format!("{status} {path}"));
        };
        composer
            .compose(&selection, Path::new(OUT), Some(&on_file))
            .unwrap();

        assert_eq!(
            seen.into_inner(),
            vec![
                "TEMPLATE .mocharc.json",
                "TEMPLATE package.json",
                "SAMPLE problems/extra.js",
                "SAMPLE test/extra-spec.js",
            ]
        );
    }
}
