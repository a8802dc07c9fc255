// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Test registration.
//!
//! `#[def_test]` places a [`TestCase`] in the [`TESTS`] distributed slice, so
//! every declared test is known once the binary is linked and no central list
//! has to be maintained. Tests can also be added by hand with [`register`]
//! before the run starts. [`take`] turns both sources into the [`Registry`]
//! handed to the runner.
//!
//! Linked cases are ordered by their declaration site, which makes the run
//! order match the declaration order inside every source file. The relative
//! order of different files is stable but carries no meaning.

use core::sync::atomic::{AtomicBool, Ordering};

use linkme::distributed_slice;
use spin::Mutex;

/// A single registered test.
#[derive(Debug, Clone, Copy)]
pub struct TestCase {
    /// Function name as written in the declaration
    pub name: &'static str,
    /// `module_path!()` of the declaration
    pub module: &'static str,
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
    /// The test body
    pub body: fn(),
    /// Declared with `#[def_test(ignore)]`
    pub ignore: bool,
}

impl TestCase {
    pub const fn new(
        name: &'static str,
        module: &'static str,
        file: &'static str,
        line: u32,
        column: u32,
        body: fn(),
        ignore: bool,
    ) -> Self {
        Self {
            name,
            module,
            file,
            line,
            column,
            body,
            ignore,
        }
    }

    /// Name shown in the report: the module path without its crate prefix,
    /// followed by the function name.
    pub fn display_name(&self) -> String {
        match self.module.split_once("::") {
            Some((_, inner)) => format!("{inner}::{}", self.name),
            None => self.name.into(),
        }
    }

    fn declared_at(&self) -> (&'static str, u32, u32) {
        (self.file, self.line, self.column)
    }
}

/// Every test declared with `#[def_test]` in the final binary.
#[distributed_slice]
pub static TESTS: [TestCase] = [..];

/// Ordered, append-only collection of tests.
#[derive(Default)]
pub struct Registry {
    cases: Vec<TestCase>,
}

impl Registry {
    pub const fn new() -> Self {
        Self { cases: Vec::new() }
    }

    /// Appends a test after every test registered so far.
    pub fn register(&mut self, case: TestCase) {
        trace!("registering test `{}` from {}:{}", case.name, case.file, case.line);
        self.cases.push(case);
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Tests in registration order.
    pub fn iter(&self) -> core::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }

    /// Releases the registry once the run is over.
    pub fn dispose(self) {
        debug!("disposing registry of {} test(s)", self.cases.len());
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a TestCase;
    type IntoIter = core::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<TestCase> for Registry {
    fn from_iter<I: IntoIterator<Item = TestCase>>(iter: I) -> Self {
        let mut registry = Registry::new();
        for case in iter {
            registry.register(case);
        }
        registry
    }
}

/// Hand registrations waiting for the run, closed by the first take.
struct Collector {
    pending: Mutex<Registry>,
    sealed: AtomicBool,
}

impl Collector {
    const fn new() -> Self {
        Self {
            pending: Mutex::new(Registry::new()),
            sealed: AtomicBool::new(false),
        }
    }

    /// Returns `false` when the collector was already taken.
    fn register(&self, case: TestCase) -> bool {
        // The flag is read under the lock, so a concurrent `take` either
        // collects the case or this call rejects it.
        let mut pending = self.pending.lock();
        if self.sealed.load(Ordering::Acquire) {
            drop(pending);
            warn!(
                "test `{}` registered after the run started, ignoring it",
                case.name
            );
            return false;
        }
        pending.register(case);
        true
    }

    fn take(&self, linked_cases: &[TestCase]) -> Registry {
        let pending = {
            let mut pending = self.pending.lock();
            if self.sealed.swap(true, Ordering::AcqRel) {
                None
            } else {
                Some(core::mem::take(&mut *pending))
            }
        };
        let Some(pending) = pending else {
            warn!("test registry already taken, nothing left to run");
            return Registry::new();
        };

        let mut registry = linked(linked_cases);
        for case in pending.cases {
            registry.register(case);
        }
        debug!(
            "collected {} test(s), {} linked",
            registry.len(),
            linked_cases.len()
        );
        registry
    }
}

static COLLECTOR: Collector = Collector::new();

/// Registers a test by hand.
///
/// Safe to call at any point before [`take`], including from code that runs
/// before `main`. Registrations after [`take`] are dropped with a warning.
pub fn register(case: TestCase) {
    COLLECTOR.register(case);
}

/// Collects every registered test into the registry for this run.
///
/// Linked tests come first, in declaration order, followed by the tests
/// passed to [`register`] in call order. Only the first call returns tests.
pub fn take() -> Registry {
    COLLECTOR.take(&TESTS)
}

fn linked(cases: &[TestCase]) -> Registry {
    let mut ordered: Vec<&TestCase> = cases.iter().collect();
    ordered.sort_by_key(|case| case.declared_at());
    ordered.into_iter().copied().collect()
}
