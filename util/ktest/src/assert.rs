// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Failure reporting behind the assertion macros.
//!
//! These helpers are called by macro expansions only. A failed check prints
//! its diagnostic to the run's error stream and bumps the failure count; it
//! never unwinds, so the test body carries on with its next statement.

use core::{fmt, panic::Location};

use crate::{
    operand::{Operand, Rendered},
    session::{Session, with_active},
};

fn header(session: &Session, location: &Location<'_>) {
    let palette = session.palette();
    session.err(format_args!(
        "{}Failure in {}, {}:\n{}",
        palette.failure,
        location.file(),
        location.line(),
        palette.reset
    ));
}

/// Reports a condition that evaluated to `false`.
#[track_caller]
pub fn fail_condition(expr: &str, message: Option<fmt::Arguments<'_>>) {
    let location = Location::caller();
    with_active(|session| {
        header(session, location);
        session.err(format_args!("Expected: true\n"));
        session.err(format_args!("Actual: `{expr}` is false\n"));
        if let Some(message) = message {
            session.err(format_args!("{message}\n"));
        }
        session.record_failure();
    });
}

/// Checks that two operands of the same type are equal.
#[track_caller]
pub fn check_eq<T: Operand + PartialEq>(expected: &T, actual: &T) {
    if expected != actual {
        let location = Location::caller();
        with_active(|session| {
            header(session, location);
            session.err(format_args!("Expected: {}\n", Rendered(expected)));
            session.err(format_args!("Actual: {}\n", Rendered(actual)));
            session.record_failure();
        });
    }
}

/// Checks that two operands of the same type differ.
#[track_caller]
pub fn check_ne<T: Operand + PartialEq>(unexpected: &T, actual: &T) {
    if unexpected == actual {
        let location = Location::caller();
        with_active(|session| {
            header(session, location);
            session.err(format_args!("Expected: not {}\n", Rendered(unexpected)));
            session.err(format_args!("Actual: {}\n", Rendered(actual)));
            session.record_failure();
        });
    }
}
