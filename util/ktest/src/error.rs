// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Errors raised by the harness itself.
//!
//! Test failures are never reported through this type; they are counted by
//! the running session and surface only in the report and the exit status.

/// Harness setup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KtestError {
    /// `KTEST_COLOR` held something other than `auto`, `always` or `never`
    InvalidColorChoice(String),
    /// `KTEST_LOG` did not name a log level
    InvalidLogLevel(String),
    /// Another logger was installed before the harness started
    LoggerInstalled,
}

impl core::fmt::Display for KtestError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            KtestError::InvalidColorChoice(value) => write!(
                f,
                "invalid color choice `{value}` (expected `auto`, `always` or `never`)"
            ),
            KtestError::InvalidLogLevel(value) => write!(
                f,
                "invalid log level `{value}` (expected off, error, warn, info, debug or trace)"
            ),
            KtestError::LoggerInstalled => write!(f, "a global logger is already installed"),
        }
    }
}

impl std::error::Error for KtestError {}

impl From<log::SetLoggerError> for KtestError {
    fn from(_: log::SetLoggerError) -> Self {
        KtestError::LoggerInstalled
    }
}

/// Convenience type alias for Result with KtestError
pub type KtestResult<T> = core::result::Result<T, KtestError>;
