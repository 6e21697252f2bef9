//! Scan configuration types.

use std::collections::BTreeSet;
use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Directory names pruned from traversal: build output, dependency caches,
/// version control and editor metadata.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    "node_modules",
    ".next",
    ".git",
    "__pycache__",
    ".vscode",
    ".idea",
    "dist",
    "build",
    ".turbo",
    ".vercel",
    ".cache",
    "coverage",
    ".pytest_cache",
];

/// Extensions eligible for line counting.
pub const DEFAULT_TRACKED_EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".js", ".jsx", ".json", ".md", ".css", ".scss", ".html", ".yml", ".yaml",
    ".env", ".sql", ".sh", ".py", ".txt", ".mjs", ".cjs",
];

/// Dotfiles kept despite the hidden-entry filter.
pub const DEFAULT_ALLOWED_DOTFILES: &[&str] = &[".env", ".env.local"];

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn default_ignore_dirs() -> BTreeSet<String> {
    to_set(DEFAULT_IGNORE_DIRS)
}

fn default_tracked_extensions() -> BTreeSet<String> {
    to_set(DEFAULT_TRACKED_EXTENSIONS)
}

fn default_allowed_dotfiles() -> BTreeSet<String> {
    to_set(DEFAULT_ALLOWED_DOTFILES)
}

/// Configuration for scanning operations.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Directory names never descended into.
    #[builder(default = "default_ignore_dirs()")]
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: BTreeSet<String>,

    /// Extensions (with leading dot) whose lines are counted.
    #[builder(default = "default_tracked_extensions()")]
    #[serde(default = "default_tracked_extensions")]
    pub tracked_extensions: BTreeSet<String>,

    /// Hidden entries that are still scanned.
    #[builder(default = "default_allowed_dotfiles()")]
    #[serde(default = "default_allowed_dotfiles")]
    pub allowed_dotfiles: BTreeSet<String>,
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a config with the default filter sets.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore_dirs: default_ignore_dirs(),
            tracked_extensions: default_tracked_extensions(),
            allowed_dotfiles: default_allowed_dotfiles(),
        }
    }

    /// Add directory names to the ignore set.
    pub fn with_extra_ignores<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_dirs.extend(names.into_iter().map(Into::into));
        self
    }

    /// Check if an entry should be dropped before it is visited.
    pub fn should_skip(&self, name: &str, is_dir: bool) -> bool {
        self.is_hidden(name) || (is_dir && self.ignore_dirs.contains(name))
    }

    /// Hidden entries start with `.` unless explicitly allowed.
    pub fn is_hidden(&self, name: &str) -> bool {
        name.starts_with('.') && !self.allowed_dotfiles.contains(name)
    }

    /// Check if lines should be counted for the given extension.
    pub fn is_tracked(&self, extension: &str) -> bool {
        self.tracked_extensions.contains(extension)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
