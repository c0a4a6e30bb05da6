//! Catalog and analysis constants
//!
//! Site characteristics of the harvested catalog and the fixed parameters of
//! the price/naming analysis.

/// Catalog site characteristics
pub mod site {
    /// Default catalog listing (gypsum board category, 100 cards per page)
    pub const DEFAULT_BASE_URL: &str = "https://glavsnab.net/stroymateriali/gipsokarton.html?limit=100";

    /// Query parameter carrying the page number
    pub const PAGE_QUERY_PARAM: &str = "p";

    /// Page numbering is 1-based
    pub const PAGE_NUMBERING_BASE: u32 = 1;
}

/// Placeholder values substituted for fields missing from a product card
pub mod sentinel {
    /// Missing name or sku ("not specified")
    pub const UNSPECIFIED: &str = "Не указано";

    /// Missing product link
    pub const NO_LINK: &str = "#";

    /// Missing price ("price on request")
    pub const PRICE_ON_REQUEST: &str = "По запросу";
}

/// Harvest loop defaults
pub mod harvest {
    /// Request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

    /// Pacing delay between page requests (milliseconds)
    pub const DEFAULT_PACING_MS: u64 = 1000;

    /// Item cap used when none is configured
    pub const DEFAULT_MAX_ITEMS: usize = 1132;

    /// One attempt per page: failed pages are skipped, not retried
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;
}

/// Statistical analysis parameters
pub mod analysis {
    /// Minimum sample count for real quartiles and anomaly detection
    pub const MIN_SAMPLES_FOR_QUARTILES: usize = 4;

    /// Tukey fence multiplier
    pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

    /// Anomaly examples surfaced per side in the report
    pub const ANOMALY_EXAMPLES_PER_SIDE: usize = 3;

    /// Words kept in the frequency table
    pub const DEFAULT_TOP_WORDS: usize = 10;

    /// Tokens with this many characters or fewer are ignored
    pub const MAX_IGNORED_TOKEN_CHARS: usize = 2;

    /// Histogram bin count handed to the chart collaborator
    pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

    /// Connective words skipped by the frequency analysis
    pub const STOP_WORDS: &[&str] = &[
        "для", "или", "при", "без", "под", "над", "про", "это", "как", "что", "его", "все",
        "and", "the", "for", "with",
    ];
}

/// Output file names
pub mod output {
    pub const DEFAULT_OUTPUT_DIR: &str = "output";
    pub const CSV_FILE_NAME: &str = "products.csv";
    pub const TEXT_REPORT_FILE_NAME: &str = "report.txt";
    pub const JSON_REPORT_FILE_NAME: &str = "report.json";
}
