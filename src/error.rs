/// Errors that abort a clustering call before any result state exists.
///
/// Non-convergence, degenerate clusters and cancellation are not errors;
/// they are reported on [`crate::RunResult`].
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A parameter is out of range or malformed.
    InvalidConfig { param: &'static str, reason: String },
    /// A feature vector (or the dataset as a whole) cannot be clustered.
    /// `index` is the offending sample, when there is one.
    InvalidData { index: Option<usize>, reason: String },
}

impl Error {
    pub fn config(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            param,
            reason: reason.into(),
        }
    }
    pub fn data(reason: impl Into<String>) -> Self {
        Self::InvalidData {
            index: None,
            reason: reason.into(),
        }
    }
    pub fn sample(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            index: Some(index),
            reason: reason.into(),
        }
    }
    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
    pub fn is_data(&self) -> bool {
        matches!(self, Self::InvalidData { .. })
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig { param, reason } => {
                write!(f, "invalid configuration: {}: {}", param, reason)
            }
            Self::InvalidData {
                index: Some(i),
                reason,
            } => write!(f, "invalid data: sample {}: {}", i, reason),
            Self::InvalidData {
                index: None,
                reason,
            } => write!(f, "invalid data: {}", reason),
        }
    }
}

impl std::error::Error for Error {}
