//! Report configuration
//!
//! Values come from (highest precedence first) CLI flags, an optional JSON
//! file, and the defaults below. Relative paths are resolved against a root
//! directory, normally the working directory the tool was started in.
//!
//! ```rust
//! use bench_report::config::ReportConfig;
//!
//! let config = ReportConfig::builder()
//!     .output_dir("target/report")
//!     .recall_labels(false)
//!     .build();
//! assert_eq!(config.chart_size(), (1500, 900));
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::DEFAULT_SIZE;
use crate::{Error, Result};

/// Default location of the benchmark results.
pub const DEFAULT_INPUT: &str = "bench/out/results.csv";

/// Default destination for charts and tables.
pub const DEFAULT_OUTPUT_DIR: &str = "bench/out";

/// Report settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    input: PathBuf,
    output_dir: PathBuf,
    chart_width: u32,
    chart_height: u32,
    recall_labels: bool,
    console_summary: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            chart_width: DEFAULT_SIZE.0,
            chart_height: DEFAULT_SIZE.1,
            recall_labels: true,
            console_summary: true,
        }
    }
}

impl ReportConfig {
    /// Start from the defaults.
    #[must_use]
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder {
            config: Self::default(),
        }
    }

    /// Load a JSON config file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read, is not valid
    /// JSON, contains unknown keys, or sets a zero chart dimension.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("invalid config {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a chart dimension is zero.
    pub fn validate(&self) -> Result<()> {
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(Error::Config(format!(
                "chart size must be non-zero, got {}x{}",
                self.chart_width, self.chart_height
            )));
        }
        Ok(())
    }

    /// Results file as configured.
    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Output directory as configured.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Results file resolved against `root`.
    #[must_use]
    pub fn input_path(&self, root: &Path) -> PathBuf {
        root.join(&self.input)
    }

    /// Output directory resolved against `root`.
    #[must_use]
    pub fn output_dir_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_dir)
    }

    /// Chart canvas `(width, height)` in pixels.
    #[must_use]
    pub const fn chart_size(&self) -> (u32, u32) {
        (self.chart_width, self.chart_height)
    }

    /// Whether recall points carry percentage labels.
    #[must_use]
    pub const fn recall_labels(&self) -> bool {
        self.recall_labels
    }

    /// Whether the summary is echoed to the console.
    #[must_use]
    pub const fn console_summary(&self) -> bool {
        self.console_summary
    }
}

/// Builder for [`ReportConfig`]
#[derive(Debug, Clone)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    /// Start from an existing config (e.g. one loaded from a file).
    #[must_use]
    pub const fn from_config(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Results file path.
    #[must_use]
    pub fn input(mut self, input: impl Into<PathBuf>) -> Self {
        self.config.input = input.into();
        self
    }

    /// Output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Chart canvas size in pixels.
    #[must_use]
    pub const fn chart_size(mut self, width: u32, height: u32) -> Self {
        self.config.chart_width = width;
        self.config.chart_height = height;
        self
    }

    /// Toggle recall point labels.
    #[must_use]
    pub const fn recall_labels(mut self, enabled: bool) -> Self {
        self.config.recall_labels = enabled;
        self
    }

    /// Toggle the console summary echo.
    #[must_use]
    pub const fn console_summary(mut self, enabled: bool) -> Self {
        self.config.console_summary = enabled;
        self
    }

    /// Build the config
    #[must_use]
    pub fn build(self) -> ReportConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.input(), Path::new("bench/out/results.csv"));
        assert_eq!(config.output_dir(), Path::new("bench/out"));
        assert_eq!(config.chart_size(), (1500, 900));
        assert!(config.recall_labels());
        assert!(config.console_summary());
    }

    #[test]
    fn test_paths_resolve_against_root() {
        let config = ReportConfig::default();
        let root = Path::new("/work/repo");
        assert_eq!(
            config.input_path(root),
            PathBuf::from("/work/repo/bench/out/results.csv")
        );
        assert_eq!(config.output_dir_path(root), PathBuf::from("/work/repo/bench/out"));

        let absolute = ReportConfig::builder().input("/data/results.csv").build();
        assert_eq!(absolute.input_path(root), PathBuf::from("/data/results.csv"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.json");
        fs::write(&path, r#"{ "output_dir": "reports", "recall_labels": false }"#).unwrap();

        let config = ReportConfig::from_json_file(&path).unwrap();
        assert_eq!(config.output_dir(), Path::new("reports"));
        assert!(!config.recall_labels());
        assert_eq!(config.input(), Path::new(DEFAULT_INPUT));
    }

    #[test]
    fn test_bad_config_files() {
        let tmp = TempDir::new().unwrap();

        let missing = tmp.path().join("missing.json");
        assert!(matches!(ReportConfig::from_json_file(&missing), Err(Error::Config(_))));

        let unknown = tmp.path().join("unknown.json");
        fs::write(&unknown, r#"{ "dpi": 150 }"#).unwrap();
        assert!(matches!(ReportConfig::from_json_file(&unknown), Err(Error::Config(_))));

        let zero = tmp.path().join("zero.json");
        fs::write(&zero, r#"{ "chart_width": 0 }"#).unwrap();
        assert!(matches!(ReportConfig::from_json_file(&zero), Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_overrides_loaded_config() {
        let loaded = ReportConfig::builder().output_dir("from-file").build();
        let config = ReportConfigBuilder::from_config(loaded)
            .output_dir("from-flag")
            .console_summary(false)
            .build();
        assert_eq!(config.output_dir(), Path::new("from-flag"));
        assert!(!config.console_summary());
    }
}
