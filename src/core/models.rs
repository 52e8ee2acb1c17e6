//! Output configuration.

/// Default format for timestamps in exported files.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration for output format.
/// Controls which fields are written and how timestamps look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Include timestamps in output
    pub include_timestamps: bool,
    /// chrono format string for timestamps
    pub timestamp_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_timestamps: true,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the timestamp column/field.
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.include_timestamps = false;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }
}
