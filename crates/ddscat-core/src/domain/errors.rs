use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DdscatResult<T> = Result<T, DdscatError>;
pub type ParseResult<T> = DdscatResult<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DdscatErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    InternalError,
}

impl DdscatErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::InternalError => 5,
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

/// Error carried through every fallible core operation. The `code` is a
/// stable short identifier for the failure site; the category fixes the
/// process exit code reported by the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdscatError {
    category: DdscatErrorCategory,
    code: &'static str,
    message: String,
}

impl DdscatError {
    pub fn new(
        category: DdscatErrorCategory,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn input_validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DdscatErrorCategory::InputValidationError, code, message)
    }

    pub fn io_system(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DdscatErrorCategory::IoSystemError, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DdscatErrorCategory::InternalError, code, message)
    }

    pub const fn category(&self) -> DdscatErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.code, self.message)
    }
}

impl Display for DdscatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DdscatError {}
