// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Assertion and entry point macros.
//!
//! The assertions shadow the standard ones on purpose; import them with
//! `use ktest::{assert, assert_eq, assert_ne};` inside test modules.

/// Checks a boolean condition.
///
/// On failure the source text of the condition is printed, followed by the
/// optional message, and the run's failure count grows by one. The test body
/// keeps running.
///
/// ```rust,ignore
/// assert!(queue.len() <= CAPACITY);
/// assert!(id > 0, "bad id {} for {}", id, name);
/// ```
#[macro_export]
macro_rules! assert {
    ($cond:expr $(,)?) => {
        if !$cond {
            $crate::assert::fail_condition(::core::stringify!($cond), ::core::option::Option::None);
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::assert::fail_condition(
                ::core::stringify!($cond),
                ::core::option::Option::Some(::core::format_args!($($arg)+)),
            );
        }
    };
}

/// Checks that `expected == actual`.
///
/// Both operands must have the same numeric or raw pointer type; see
/// [`Operand`](crate::Operand) for how each type is printed.
#[macro_export]
macro_rules! assert_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        match (&$expected, &$actual) {
            (expected, actual) => $crate::assert::check_eq(expected, actual),
        }
    };
}

/// Checks that `unexpected != actual`.
#[macro_export]
macro_rules! assert_ne {
    ($unexpected:expr, $actual:expr $(,)?) => {
        match (&$unexpected, &$actual) {
            (unexpected, actual) => $crate::assert::check_ne(unexpected, actual),
        }
    };
}

/// Generates a `main` that runs every registered test.
///
/// The process exits with 0 when every assertion passed and with a nonzero
/// status otherwise.
#[macro_export]
macro_rules! test_main {
    () => {
        fn main() -> ::std::process::ExitCode {
            $crate::main(::std::env::args())
        }
    };
}
