//! Configuration infrastructure
//!
//! Layered configuration for a harvest run, merged by the `config` crate:
//! 1. Built-in defaults (every section is `#[serde(default)]`)
//! 2. An optional TOML file (`--config`, or `config/catalog_harvest.toml`)
//! 3. Environment variables, e.g. `CATALOG_HARVEST__HARVEST__MAX_ITEMS=200`
//!
//! Command-line arguments are applied on top by the binary.

#![allow(clippy::uninlined_format_args)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::constants::{analysis, harvest, output, site};
use crate::domain::statistics::QuartileMethod;
use crate::infrastructure::http_client::HttpClientConfig;
use crate::infrastructure::parsing::ExtractorSelectors;
use crate::infrastructure::retry_calculator::RetryPolicy;

/// Config file looked up when no explicit path is given (extension optional)
pub const DEFAULT_CONFIG_FILE: &str = "config/catalog_harvest";

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "CATALOG_HARVEST";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config from file: {source}")]
    FileLoad {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

impl ConfigError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub harvest: HarvestSettings,
    pub http: HttpClientConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Pagination loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestSettings {
    /// Listing URL; the page parameter is appended to it
    pub base_url: String,
    /// Item cap for the whole run
    pub max_items: usize,
    /// First page index requested
    pub start_page: u32,
    /// Delay between consecutive page requests (milliseconds)
    pub pacing_ms: u64,
    /// Stop after this many page requests
    pub max_pages: Option<u32>,
    /// Stop after this many failed pages in a row
    pub max_consecutive_failures: Option<u32>,
    pub retry: RetryPolicy,
    pub selectors: ExtractorSelectors,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            base_url: site::DEFAULT_BASE_URL.to_string(),
            max_items: harvest::DEFAULT_MAX_ITEMS,
            start_page: site::PAGE_NUMBERING_BASE,
            pacing_ms: harvest::DEFAULT_PACING_MS,
            max_pages: None,
            max_consecutive_failures: None,
            retry: RetryPolicy::default(),
            selectors: ExtractorSelectors::default(),
        }
    }
}

/// Statistical analysis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub quartile_method: QuartileMethod,
    /// Tukey fence multiplier applied to the IQR
    pub iqr_multiplier: f64,
    /// Length of the word-frequency table
    pub top_words: usize,
    pub histogram_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            quartile_method: QuartileMethod::default(),
            iqr_multiplier: analysis::DEFAULT_IQR_MULTIPLIER,
            top_words: analysis::DEFAULT_TOP_WORDS,
            histogram_bins: analysis::DEFAULT_HISTOGRAM_BINS,
        }
    }
}

/// Output sink settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    pub csv_file_name: String,
    pub text_report_file_name: String,
    pub json_report_file_name: String,
    /// Also write the report as JSON
    pub write_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(output::DEFAULT_OUTPUT_DIR),
            csv_file_name: output::CSV_FILE_NAME.to_string(),
            text_report_file_name: output::TEXT_REPORT_FILE_NAME.to_string(),
            json_report_file_name: output::JSON_REPORT_FILE_NAME.to_string(),
            write_json: true,
        }
    }
}

impl OutputConfig {
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(&self.csv_file_name)
    }

    pub fn text_report_path(&self) -> PathBuf {
        self.output_dir.join(&self.text_report_file_name)
    }

    pub fn json_report_path(&self) -> PathBuf {
        self.output_dir.join(&self.json_report_file_name)
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for the log file
    pub log_dir: PathBuf,

    /// Log file name inside `log_dir`
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            log_dir: PathBuf::from("logs"),
            file_name: "catalog-harvest.log".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment.
    ///
    /// An explicit `path` must exist; the default config file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file_source = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// File source `load` reads for the given `path` argument
    pub fn source_label(path: Option<&Path>) -> String {
        path.map_or_else(|| DEFAULT_CONFIG_FILE.to_string(), |p| p.display().to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.harvest.base_url.trim().is_empty() {
            return Err(ConfigError::validation("harvest.base_url must not be empty"));
        }

        if let Err(e) = url::Url::parse(&self.harvest.base_url) {
            return Err(ConfigError::validation(format!(
                "harvest.base_url is not a valid URL ({}): {}",
                self.harvest.base_url, e
            )));
        }

        if self.harvest.max_items == 0 {
            return Err(ConfigError::validation("harvest.max_items must be greater than 0"));
        }

        if self.harvest.retry.max_attempts == 0 {
            return Err(ConfigError::validation(
                "harvest.retry.max_attempts must be at least 1",
            ));
        }

        if self.harvest.max_pages == Some(0) {
            return Err(ConfigError::validation("harvest.max_pages must be greater than 0"));
        }

        if self.harvest.max_consecutive_failures == Some(0) {
            return Err(ConfigError::validation(
                "harvest.max_consecutive_failures must be greater than 0",
            ));
        }

        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::validation("http.timeout_seconds must be greater than 0"));
        }

        if !self.analysis.iqr_multiplier.is_finite() || self.analysis.iqr_multiplier < 0.0 {
            return Err(ConfigError::validation(
                "analysis.iqr_multiplier must be a non-negative number",
            ));
        }

        if self.analysis.top_words == 0 {
            return Err(ConfigError::validation("analysis.top_words must be greater than 0"));
        }

        if self.analysis.histogram_bins == 0 {
            return Err(ConfigError::validation(
                "analysis.histogram_bins must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_source_label_names_the_file() {
        assert_eq!(AppConfig::source_label(None), DEFAULT_CONFIG_FILE);
        assert_eq!(
            AppConfig::source_label(Some(Path::new("conf/run.toml"))),
            "conf/run.toml"
        );
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.harvest.max_items, 1132);
        assert_eq!(config.harvest.start_page, 1);
        assert_eq!(config.harvest.pacing_ms, 1000);
        assert_eq!(config.harvest.retry.max_attempts, 1);
        assert_eq!(config.http.timeout_seconds, 10);
        assert_eq!(config.analysis.top_words, 10);
        assert_eq!(config.analysis.quartile_method, QuartileMethod::Exclusive);
        assert_eq!(config.output.csv_path(), PathBuf::from("output/products.csv"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[harvest]
base_url = "https://example.com/catalog.html?limit=50"
max_items = 25
max_pages = 3

[harvest.retry]
max_attempts = 2
jitter = false

[analysis]
quartile_method = "inclusive"
top_words = 5

[output]
output_dir = "reports"
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.harvest.base_url, "https://example.com/catalog.html?limit=50");
        assert_eq!(config.harvest.max_items, 25);
        assert_eq!(config.harvest.max_pages, Some(3));
        assert_eq!(config.harvest.retry.max_attempts, 2);
        assert!(!config.harvest.retry.jitter);
        // untouched keys keep their defaults
        assert_eq!(config.harvest.retry.base_delay_ms, 1000);
        assert_eq!(config.harvest.pacing_ms, 1000);
        assert_eq!(config.analysis.quartile_method, QuartileMethod::Inclusive);
        assert_eq!(config.analysis.top_words, 5);
        assert_eq!(config.output.output_dir, PathBuf::from("reports"));
        assert_eq!(config.http.timeout_seconds, 10);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("definitely/not/here.toml")));
        assert!(matches!(result, Err(ConfigError::FileLoad { .. })));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[harvest]\nmax_items = 0").unwrap();
        assert!(matches!(
            AppConfig::load(Some(file.path())),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_validation_rules() {
        let cases: Vec<(&str, Box<dyn Fn(&mut AppConfig)>)> = vec![
            ("base_url", Box::new(|c: &mut AppConfig| c.harvest.base_url = "  ".to_string())),
            ("base_url", Box::new(|c: &mut AppConfig| c.harvest.base_url = "not a url".to_string())),
            ("max_items", Box::new(|c: &mut AppConfig| c.harvest.max_items = 0)),
            ("max_attempts", Box::new(|c: &mut AppConfig| c.harvest.retry.max_attempts = 0)),
            ("max_pages", Box::new(|c: &mut AppConfig| c.harvest.max_pages = Some(0))),
            ("timeout_seconds", Box::new(|c: &mut AppConfig| c.http.timeout_seconds = 0)),
            ("iqr_multiplier", Box::new(|c: &mut AppConfig| c.analysis.iqr_multiplier = f64::NAN)),
            ("top_words", Box::new(|c: &mut AppConfig| c.analysis.top_words = 0)),
            ("histogram_bins", Box::new(|c: &mut AppConfig| c.analysis.histogram_bins = 0)),
        ];

        for (field, mutate) in cases {
            let mut config = AppConfig::default();
            mutate(&mut config);
            match config.validate() {
                Err(ConfigError::Validation { message }) => {
                    assert!(message.contains(field), "{} not in '{}'", field, message)
                }
                other => panic!("expected validation error for {}, got {:?}", field, other),
            }
        }
    }
}
