//! Application-level error carried out of `app::run`.
//!
//! Library modules return their own `thiserror` enums; they are turned into an
//! `AppError` at the pipeline boundary, which picks the process exit code:
//!
//! - `2`: bad input or usage (unreadable files, cancelled prompt)
//! - `4`: the results site could not be reached

use crate::data::locator::LocateError;

pub const EXIT_INPUT: u8 = 2;
pub const EXIT_NETWORK: u8 = 4;

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

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<LocateError> for AppError {
    fn from(err: LocateError) -> Self {
        let code = match err {
            LocateError::Listing { .. } => EXIT_NETWORK,
            LocateError::UnknownBondType(_) => EXIT_INPUT,
        };
        AppError::new(code, err.to_string())
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
