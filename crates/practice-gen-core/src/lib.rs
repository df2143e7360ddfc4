pub mod catalog;
pub mod composer;
pub mod config;
pub mod error;
pub mod fs;
pub mod naming;
pub mod sampler;
pub mod selection;

pub use catalog::{Catalog, Category, CategorySummary, ProblemArtifact};
pub use composer::{CategoryOutcome, ComposeReport, Composer, CopyMode, FileCallback};
pub use config::{Config, LibraryConfig, OutputConfig};
pub use error::{PracticeGenError, Result};
pub use fs::{IgnoreRules, LocalFs, TreeFs};
pub use naming::next_output_dir;
pub use sampler::{sample, sample_with};
pub use selection::{
    parse, CategoryCount, CategoryRequest, Count, SelectionSpec, ValidatedSelection,
};
