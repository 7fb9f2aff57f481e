use thiserror::Error;

/// All errors produced while expanding a schedule.
///
/// Every error is raised before any instance is produced; there are no
/// partial results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DistributionError {
    /// The range start falls after the range end.
    #[error("range start date {start} is after range end date {end}")]
    InvalidRange { start: String, end: String },

    #[error("invalid time '{input}': {reason}")]
    InvalidTimeFormat { input: String, reason: String },

    #[error("invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("invalid timezone '{name}': {reason}")]
    InvalidTimezone { name: String, reason: String },

    #[error("unknown weekday '{0}'")]
    UnknownWeekday(String),

    #[error("unknown week ordinal '{0}'")]
    UnknownOrdinal(String),

    /// A repeat interval of zero would never advance.
    #[error("{field} must be at least 1, got {value}")]
    InvalidStep { field: &'static str, value: u32 },

    #[error("day of month must be between 1 and 31, got {0}")]
    InvalidDayOfMonth(u32),

    #[error("unknown pattern '{0}'")]
    UnknownPattern(String),

    #[error("unknown monthly type '{0}'")]
    UnknownMonthlyType(String),

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    /// The schedule descriptor JSON could not be decoded.
    #[error("invalid schedule descriptor: {0}")]
    Json(String),

    /// A schedule descriptor file could not be read.
    #[error("cannot read {path}: {reason}")]
    Io { path: String, reason: String },

    /// Date arithmetic left the range `jiff` can represent.
    #[error("calendar arithmetic failed: {0}")]
    Calendar(String),
}

impl DistributionError {
    pub fn time_format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTimeFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn date(input: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidDate {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    pub fn timezone(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidTimezone {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    pub fn calendar(err: jiff::Error) -> Self {
        Self::Calendar(err.to_string())
    }

    /// Format the error the way the command-line front end prints it.
    pub fn display_rich(&self) -> String {
        format!("error: {self}")
    }
}

impl From<jiff::Error> for DistributionError {
    fn from(err: jiff::Error) -> Self {
        Self::calendar(err)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for DistributionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
