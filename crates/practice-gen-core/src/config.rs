use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PracticeGenError, Result};
use crate::fs::IgnoreRules;

const CONFIG_FILE: &str = "practice-gen.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# practice-gen configuration file
# Location: <library root>/practice-gen.toml

[library]
# Directory holding one subdirectory per category
categories = "categories"

# File tree copied into every generated problem set
templates = "templates"

# Per-category directories for problem files and their spec files
problems_dir = "problems"
tests_dir = "test"

# A problem `sum.js` is paired with `sum<spec_suffix>.js`
spec_suffix = "-spec"

# File name globs skipped everywhere
ignore = [".DS_Store"]

[output]
# Where new problem sets are created, relative to the library root
parent = ".."

# Problem sets are named <prefix><number>, e.g. practice-problem-set-00
prefix = "practice-problem-set-"
width = 2
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Layout of the problem library
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub categories: String,
    pub templates: String,
    pub problems_dir: String,
    pub tests_dir: String,
    pub spec_suffix: String,
    pub ignore: Vec<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            categories: "categories".to_string(),
            templates: "templates".to_string(),
            problems_dir: "problems".to_string(),
            tests_dir: "test".to_string(),
            spec_suffix: "-spec".to_string(),
            ignore: vec![".DS_Store".to_string()],
        }
    }
}

/// Where and how generated problem sets are named
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub parent: String,
    pub prefix: String,
    pub width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            parent: "..".to_string(),
            prefix: "practice-problem-set-".to_string(),
            width: 2,
        }
    }
}

impl Config {
    /// Load config from the library root
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| PracticeGenError::ConfigParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        Ok(config)
    }

    /// Save config to the library root
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = root.join(CONFIG_FILE);
        fs::create_dir_all(root)?;

        let content =
            toml::to_string_pretty(self).map_err(|e| PracticeGenError::ConfigParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(root: &Path) -> Result<PathBuf> {
        let path = root.join(CONFIG_FILE);
        fs::create_dir_all(root)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        self.list()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "library.categories" => self.library.categories = value.to_string(),
            "library.templates" => self.library.templates = value.to_string(),
            "library.problems_dir" => self.library.problems_dir = value.to_string(),
            "library.tests_dir" => self.library.tests_dir = value.to_string(),
            "library.spec_suffix" => self.library.spec_suffix = value.to_string(),
            "library.ignore" => self.library.ignore = parse_string_list(value),
            "output.parent" => self.output.parent = value.to_string(),
            "output.prefix" => self.output.prefix = value.to_string(),
            "output.width" => {
                self.output.width = value.parse().map_err(|_| PracticeGenError::ConfigParse {
                    path: PathBuf::from(CONFIG_FILE),
                    message: format!("output.width must be a number, got '{}'", value),
                })?;
            }
            _ => {
                return Err(PracticeGenError::ConfigKeyNotFound {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            ("library.categories".into(), self.library.categories.clone()),
            ("library.templates".into(), self.library.templates.clone()),
            ("library.problems_dir".into(), self.library.problems_dir.clone()),
            ("library.tests_dir".into(), self.library.tests_dir.clone()),
            ("library.spec_suffix".into(), self.library.spec_suffix.clone()),
            ("library.ignore".into(), format!("{:?}", self.library.ignore)),
            ("output.parent".into(), self.output.parent.clone()),
            ("output.prefix".into(), self.output.prefix.clone()),
            ("output.width".into(), self.output.width.to_string()),
        ]
    }

    pub fn categories_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.library.categories)
    }

    pub fn templates_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.library.templates)
    }

    pub fn output_parent(&self, root: &Path) -> PathBuf {
        root.join(&self.output.parent)
    }

    /// Compile the ignore globs for use by the tree walker
    pub fn ignore_rules(&self) -> Result<IgnoreRules> {
        IgnoreRules::new(&self.library.ignore)
    }
}

/// Parse a comma-separated or JSON-like list string
fn parse_string_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    let inner = if trimmed.starts_with('[') && trimmed.ends_with(']') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    inner
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
