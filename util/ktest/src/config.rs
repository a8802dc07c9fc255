// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Run configuration read from the environment.
//!
//! | Variable      | Values                                   | Default |
//! |---------------|------------------------------------------|---------|
//! | `KTEST_COLOR` | `auto`, `always`, `never`                | `auto`  |
//! | `NO_COLOR`    | any non-empty value disables color       | unset   |
//! | `KTEST_LOG`   | `off`, `error`, `warn`, `info`, `debug`, `trace` | `warn` |

use core::str::FromStr;

use log::LevelFilter;

use crate::error::{KtestError, KtestResult};

pub const COLOR_VAR: &str = "KTEST_COLOR";
pub const NO_COLOR_VAR: &str = "NO_COLOR";
pub const LOG_VAR: &str = "KTEST_LOG";

/// When the report may use color escapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Color only when stdout is an interactive terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Whether colors are enabled given the terminal state of stdout.
    pub fn enabled(self, stdout_is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => stdout_is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl FromStr for ColorChoice {
    type Err = KtestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(KtestError::InvalidColorChoice(s.into())),
        }
    }
}

/// Settings for a single harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub color: ColorChoice,
    pub log_level: LevelFilter,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
            log_level: LevelFilter::Warn,
        }
    }
}

impl RunConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> KtestResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// An explicit `KTEST_COLOR` wins over `NO_COLOR`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> KtestResult<Self> {
        let mut config = Self::default();

        match lookup(COLOR_VAR) {
            Some(value) => config.color = value.parse()?,
            None => {
                if lookup(NO_COLOR_VAR).is_some_and(|v| !v.is_empty()) {
                    config.color = ColorChoice::Never;
                }
            }
        }

        if let Some(value) = lookup(LOG_VAR) {
            config.log_level = LevelFilter::from_str(value.trim())
                .map_err(|_| KtestError::InvalidLogLevel(value.clone()))?;
        }

        Ok(config)
    }

    /// Installs the console logger at the configured level.
    pub fn install_logger(&self) -> KtestResult<()> {
        klogger::init_klogger()?;
        klogger::set_log_level(self.log_level);
        Ok(())
    }
}
