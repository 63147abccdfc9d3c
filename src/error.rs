use thiserror::Error;

/// Top-level error carrying the process exit code.
///
/// Exit codes:
/// - `2`: invalid input, bad catalog data, I/O failures
/// - `3`: an earning rule could not be applied to the requested program
/// - `4`: internal errors
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Shorthand for a structurally invalid flight request.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(2, format!("Invalid request: {}", message.into()))
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Why an earning rule could not be applied to one program.
///
/// These never abort a comparison; the comparator records them next to the
/// ranked results.
#[derive(Debug, Clone, PartialEq, Error, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EarnError {
    #[error("{program} earns on ticket price, but no usable ticket price was given")]
    MissingTicketPrice { program: String },
    #[error("{program} would earn {miles:.0} miles, more than a single flight can credit")]
    MilesOverflow { program: String, miles: f64 },
}

impl From<EarnError> for AppError {
    fn from(value: EarnError) -> Self {
        AppError::new(3, value.to_string())
    }
}
