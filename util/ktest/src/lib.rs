// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! A small unit test harness.
//!
//! Functions marked with `#[def_test]` register themselves at link time; no
//! central list of tests exists anywhere. [`test_main!`] generates a `main`
//! that runs every registered test in declaration order, one at a time, and
//! turns the outcome into the process exit status.
//!
//! ```rust,ignore
//! use ktest::{assert, assert_eq, def_test};
//!
//! #[def_test]
//! fn addition() {
//!     assert_eq!(2 + 2, 4);
//! }
//!
//! #[def_test]
//! fn bounds() {
//!     let value = 42;
//!     assert!(value < 100, "value was {}", value);
//! }
//!
//! ktest::test_main!();
//! ```
//!
//! Assertions never stop a test body: a failed check is printed to stderr,
//! counted, and execution continues with the next statement.

#[macro_use]
extern crate log;
extern crate self as ktest;

#[doc(hidden)]
pub mod assert;
pub mod config;
pub mod error;
mod macros;
pub mod operand;
pub mod palette;
pub mod registry;
pub mod runner;
pub mod session;

use std::process::ExitCode;

pub use ktest_macros::def_test;

pub use crate::{
    config::{ColorChoice, RunConfig},
    error::{KtestError, KtestResult},
    operand::Operand,
    palette::Palette,
    registry::{Registry, TestCase},
    runner::{RunReport, Runner, TestStats},
    session::{Capture, Console},
};

/// Items referenced by macro expansions. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use linkme::{self, distributed_slice};

    pub use crate::registry::TESTS;
}

/// Status returned when the harness fails before any test ran.
const SETUP_FAILURE: u8 = 2;

/// Entry point used by [`test_main!`].
///
/// Reads the configuration from the environment, installs the logger,
/// collects every registered test and runs them.
pub fn main(args: impl IntoIterator<Item = String>) -> ExitCode {
    let args: Vec<String> = args.into_iter().collect();

    let config = match RunConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ktest: {err}");
            return ExitCode::from(SETUP_FAILURE);
        }
    };
    if let Err(err) = config.install_logger() {
        eprintln!("ktest: {err}");
        return ExitCode::from(SETUP_FAILURE);
    }
    debug!("harness started with {} argument(s)", args.len());

    Runner::new(registry::take(), &config).run().exit_code()
}
