//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Crate-wide result alias
pub type Result<T, E = FunksError> = std::result::Result<T, E>;

/// Why a duration string was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("empty duration")]
    Empty,

    #[error("invalid number")]
    InvalidNumber,

    #[error("missing unit")]
    MissingUnit,

    #[error("unknown unit \"{0}\"")]
    UnknownUnit(String),

    #[error("value out of range")]
    Overflow,
}

#[derive(Error, Debug)]
pub enum FunksError {
    // ─────────────────────────────────────────────────────────────
    // Duration errors (FUNKS-001 to FUNKS-003)
    // ─────────────────────────────────────────────────────────────

    #[error("FUNKS-001: invalid duration \"{input}\": {kind}")]
    DurationParse { input: String, kind: ParseErrorKind },

    #[error("FUNKS-002: invalid duration format: expected a number or a string, found {found}")]
    InvalidDurationFormat { found: String },

    #[error("FUNKS-003: fatal duration construction from \"{input}\": {kind}")]
    FatalConstruction { input: String, kind: ParseErrorKind },

    // ─────────────────────────────────────────────────────────────
    // Configuration errors (FUNKS-010 to FUNKS-012)
    // ─────────────────────────────────────────────────────────────

    #[error("FUNKS-010: configuration error: {reason}")]
    Config { reason: String },

    #[error("FUNKS-011: TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("FUNKS-012: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // HTTP errors (FUNKS-020 to FUNKS-021)
    // ─────────────────────────────────────────────────────────────

    #[error("FUNKS-020: HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("FUNKS-021: invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("FUNKS-030: IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FunksError {
    /// Build a parse error for `input`
    pub(crate) fn parse(input: &str, kind: ParseErrorKind) -> Self {
        FunksError::DurationParse {
            input: input.to_string(),
            kind,
        }
    }

    /// True for `ParseError` (FUNKS-001)
    pub fn is_parse_error(&self) -> bool {
        matches!(self, FunksError::DurationParse { .. })
    }

    /// True for `InvalidDurationFormat` (FUNKS-002)
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, FunksError::InvalidDurationFormat { .. })
    }

    /// True when the underlying HTTP failure was a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, FunksError::Http(e) if e.is_timeout())
    }
}

impl FixSuggestion for FunksError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            FunksError::DurationParse { kind, .. } => match kind {
                ParseErrorKind::Empty => Some("Provide a value such as \"5s\" or \"300ms\""),
                ParseErrorKind::MissingUnit => {
                    Some("Add a unit suffix: ns, us, ms, s, m or h (e.g. \"5s\")")
                }
                ParseErrorKind::UnknownUnit(_) => Some("Valid units are ns, us, µs, ms, s, m, h"),
                ParseErrorKind::InvalidNumber => Some("Use digits with an optional fraction, e.g. \"1.5h\""),
                ParseErrorKind::Overflow => Some("Durations are limited to about 292 years"),
            },
            FunksError::InvalidDurationFormat { .. } => {
                Some("Write the duration as a string (\"5s\") or a nanosecond count (5000000000)")
            }
            FunksError::FatalConstruction { .. } => {
                Some("Use Duration::from_string to handle invalid input")
            }
            FunksError::Config { .. } => Some("Check the FUNKS_HTTP_* environment variables"),
            FunksError::TomlParse(_) => Some("Check TOML syntax: durations must be quoted (timeout = \"5s\")"),
            FunksError::Json(_) => Some("Check JSON syntax"),
            FunksError::Http(e) if e.is_timeout() => Some("Increase the timeout (--timeout)"),
            FunksError::Http(_) => Some("Check the URL is reachable; use --insecure for self-signed certificates"),
            FunksError::InvalidUrl { .. } => Some("Use an absolute URL such as http://localhost:8080/path"),
            FunksError::Io(_) => Some("Check file path and permissions"),
        }
    }
}
