//! Infrastructure layer: HTTP retrieval, HTML extraction, configuration,
//! logging and the output sinks.

pub mod config;
pub mod csv_export;
pub mod export_error;
pub mod http_client;
pub mod logging;
pub mod parsing;
pub mod parsing_error;
pub mod report_writer;
pub mod retry_calculator;

// Re-export commonly used items
pub use config::{AppConfig, ConfigError};
pub use export_error::ExportError;
pub use http_client::{FetchOutcome, HttpClient, HttpClientConfig, PageFetcher};
pub use logging::init_logging_with_config;
pub use parsing::{ExtractorSelectors, ParsingError, ParsingResult, ProductListParser, RecordExtractor};
pub use retry_calculator::RetryPolicy;
