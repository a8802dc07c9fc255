// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Sequential test runner.
//!
//! Runs every test of a [`Registry`] in registration order, one at a time,
//! and reports:
//!
//! ```text
//! Test start
//! Running Test math::addition [1/2]
//! Running Test math::overflow [2/2]
//! 1 tests failed!
//! ```
//!
//! Failure diagnostics from the assertions go to the error stream while the
//! test that raised them is running.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
    rc::Rc,
};

use crate::{
    config::RunConfig,
    palette::Palette,
    registry::{Registry, TestCase},
    session::{ActiveSession, Console, Session},
};

/// Counters gathered during a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TestStats {
    /// Registered tests, ignored ones included
    pub total: usize,
    /// Tests whose body finished without a failed assertion
    pub passed: usize,
    /// Tests with at least one failed assertion
    pub failed: usize,
    pub ignored: usize,
    /// Failed assertion evaluations over the whole run
    pub assertion_failures: usize,
}

/// Outcome of [`Runner::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub stats: TestStats,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.stats.assertion_failures == 0
    }

    /// Process status: 0 when every assertion passed, 1 otherwise.
    ///
    /// The failure count itself is never used as the status.
    pub fn status(&self) -> u8 {
        if self.passed() { 0 } else { 1 }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }
}

/// Runs a registry with a fixed palette and console.
pub struct Runner {
    registry: Registry,
    palette: Palette,
    console: Console,
}

impl Runner {
    /// Runner reporting to stdout and stderr.
    ///
    /// Colors are resolved here, once, from `config` and the terminal state
    /// of stdout.
    pub fn new(registry: Registry, config: &RunConfig) -> Self {
        let palette = Palette::resolve(config.color, io::stdout().is_terminal());
        Self::with_console(registry, palette, Console::stdio())
    }

    pub fn with_console(registry: Registry, palette: Palette, console: Console) -> Self {
        Self {
            registry,
            palette,
            console,
        }
    }

    /// Runs every test and prints the summary.
    ///
    /// Each call counts failures from zero. A test body that panics is not
    /// caught and ends the process.
    pub fn run(self) -> RunReport {
        let Runner {
            registry,
            palette,
            console,
        } = self;

        let session = Rc::new(Session::new(palette, console));
        let _active = ActiveSession::enter(session.clone());

        session.out(format_args!("Test start\n"));

        let total = registry.len();
        let mut stats = TestStats {
            total,
            ..TestStats::default()
        };

        for (index, case) in registry.iter().enumerate() {
            run_case(&session, case, index + 1, total, &mut stats);
        }

        stats.assertion_failures = session.failures();
        if stats.assertion_failures > 0 {
            session.out(format_args!(
                "{}{} tests failed!{}\n",
                palette.failure, stats.assertion_failures, palette.reset
            ));
        } else {
            session.out(format_args!(
                "{}All tests PASSED!{}\n",
                palette.success, palette.reset
            ));
        }
        session.flush();

        registry.dispose();
        debug!(
            "run finished: total={}, passed={}, failed={}, ignored={}, assertion failures={}",
            stats.total, stats.passed, stats.failed, stats.ignored, stats.assertion_failures
        );

        RunReport { stats }
    }
}

fn run_case(
    session: &Session,
    case: &TestCase,
    position: usize,
    total: usize,
    stats: &mut TestStats,
) {
    let name = case.display_name();

    if case.ignore {
        session.out(format_args!("Ignoring Test {name} [{position}/{total}]\n"));
        stats.ignored += 1;
        return;
    }

    session.out(format_args!("Running Test {name} [{position}/{total}]\n"));
    // Progress must be visible before the diagnostics the body may print.
    session.flush();

    let before = session.failures();
    (case.body)();
    let raised = session.failures() - before;

    if raised > 0 {
        debug!("test `{name}` raised {raised} assertion failure(s)");
        stats.failed += 1;
    } else {
        stats.passed += 1;
    }
}
