//! Error types for song validation and processing.

use thiserror::Error;

/// Error codes for song validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: ticksPerBeat is zero
    ZeroTicksPerBeat,
    /// E002: song has no channels
    NoChannels,
    /// E003: a consumed channel has no instruments
    MissingInstrument,
    /// E004: a note has fewer than two points
    MissingNotePoints,
    /// E005: a note has no pitches
    EmptyNotePitches,
    /// E006: a sequence entry references a pattern out of range
    SequenceOutOfRange,
    /// E007: a note's end tick precedes its start tick
    NotePointsOutOfOrder,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::ZeroTicksPerBeat => "E001",
            ErrorCode::NoChannels => "E002",
            ErrorCode::MissingInstrument => "E003",
            ErrorCode::MissingNotePoints => "E004",
            ErrorCode::EmptyNotePitches => "E005",
            ErrorCode::SequenceOutOfRange => "E006",
            ErrorCode::NotePointsOutOfOrder => "E007",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for song validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: more channels than the player consumes
    ExtraChannels,
    /// W002: unknown wave name
    UnknownWave,
    /// W003: pitch outside the fixed tone table
    PitchOutsideTable,
    /// W004: local tick at or beyond the block window
    TickOutsideBlock,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::ExtraChannels => "W001",
            WarningCode::UnknownWave => "W002",
            WarningCode::PitchOutsideTable => "W003",
            WarningCode::TickOutsideBlock => "W004",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "channels\[0\].patterns\[2\]").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for song loading.
#[derive(Debug, Error)]
pub enum SpecError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of song validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}
