// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Runner behaviour over hand-built registries with captured output.

use std::sync::atomic::{AtomicUsize, Ordering};

use ktest::{Capture, Console, Palette, Registry, RunReport, Runner, TestCase};

fn case(name: &'static str, body: fn()) -> TestCase {
    TestCase::new(name, module_path!(), file!(), line!(), column!(), body, false)
}

fn run(cases: impl IntoIterator<Item = TestCase>) -> (RunReport, Capture, Capture) {
    let (console, out, err) = Console::capture();
    let registry: Registry = cases.into_iter().collect();
    let report = Runner::with_console(registry, Palette::PLAIN, console).run();
    (report, out, err)
}

#[test]
fn arithmetic_scenario() {
    fn four() {
        ktest::assert_eq!(2 + 2, 4);
    }
    fn five() {
        ktest::assert_eq!(5, 2 + 2);
    }

    let (report, out, err) = run([case("four", four), case("five", five)]);

    assert_eq!(
        out.contents(),
        "Test start\n\
         Running Test four [1/2]\n\
         Running Test five [2/2]\n\
         1 tests failed!\n"
    );
    let err = err.contents();
    assert!(err.contains("Expected: 5\n"), "{err}");
    assert!(err.contains("Actual: 4\n"), "{err}");
    assert_ne!(report.status(), 0);
    assert_eq!(report.stats.assertion_failures, 1);
}

#[test]
fn condition_with_message() {
    fn context() {
        ktest::assert!(false, "context {}", 42);
    }

    let (report, _, err) = run([case("context", context)]);
    let err = err.contents();
    let lines: Vec<&str> = err.lines().collect();

    assert_eq!(lines.len(), 4, "{err}");
    assert!(lines[0].starts_with(&format!("Failure in {}, ", file!())));
    assert!(lines[0].ends_with(':'));
    assert_eq!(lines[1], "Expected: true");
    assert_eq!(lines[2], "Actual: `false` is false");
    assert_eq!(lines[3], "context 42");
    assert_eq!(report.stats.assertion_failures, 1);
}

#[test]
fn condition_without_message_prints_no_diagnostic() {
    fn bare() {
        let limit = 3;
        ktest::assert!(limit > 10);
    }

    let (_, _, err) = run([case("bare", bare)]);
    let err = err.contents();
    assert_eq!(err.lines().count(), 3, "{err}");
    assert!(err.contains("Actual: `limit > 10` is false\n"));
}

#[test]
fn failed_assertion_does_not_stop_the_body() {
    static REACHED: AtomicUsize = AtomicUsize::new(0);

    fn keeps_going() {
        ktest::assert_eq!(1u32, 2u32);
        REACHED.fetch_add(1, Ordering::SeqCst);
        ktest::assert!(false);
        REACHED.fetch_add(1, Ordering::SeqCst);
    }
    fn next() {
        REACHED.fetch_add(10, Ordering::SeqCst);
    }

    let (report, _, _) = run([case("keeps_going", keeps_going), case("next", next)]);
    assert_eq!(REACHED.load(Ordering::SeqCst), 12);
    assert_eq!(report.stats.assertion_failures, 2);
    assert_eq!(report.stats.failed, 1);
    assert_eq!(report.stats.passed, 1);
}

#[test]
fn tests_run_in_registration_order() {
    static ORDER: AtomicUsize = AtomicUsize::new(0);

    // Each body checks that exactly the bodies before it have run.
    fn first() {
        ktest::assert_eq!(ORDER.fetch_add(1, Ordering::SeqCst), 0);
    }
    fn second() {
        ktest::assert_eq!(ORDER.fetch_add(1, Ordering::SeqCst), 1);
    }
    fn third() {
        ktest::assert_eq!(ORDER.fetch_add(1, Ordering::SeqCst), 2);
    }

    let (report, out, _) = run([
        case("first", first),
        case("second", second),
        case("third", third),
    ]);
    assert!(report.passed());
    let out = out.contents();
    let progress: Vec<&str> = out
        .lines()
        .filter(|line| line.starts_with("Running"))
        .collect();
    assert_eq!(
        progress,
        [
            "Running Test first [1/3]",
            "Running Test second [2/3]",
            "Running Test third [3/3]",
        ]
    );
}

#[test]
fn every_run_counts_from_zero() {
    fn fails() {
        ktest::assert!(false);
    }

    let (first, _, _) = run([case("fails", fails)]);
    let (second, _, _) = run([case("fails", fails)]);
    let (clean, _, _) = run([case("passes", || {})]);

    assert_eq!(first.stats.assertion_failures, 1);
    assert_eq!(second.stats.assertion_failures, 1);
    assert_eq!(clean.status(), 0);
}

#[test]
fn nested_run_keeps_its_own_count() {
    static INNER_FAILURES: AtomicUsize = AtomicUsize::new(0);

    fn inner_failing() {
        ktest::assert_eq!(1i64, -1i64);
    }
    fn outer() {
        let (inner, _, _) = run([case("inner_failing", inner_failing)]);
        INNER_FAILURES.store(inner.stats.assertion_failures, Ordering::SeqCst);
        ktest::assert_eq!(inner.status(), 1u8);
    }

    let (report, _, _) = run([case("outer", outer)]);
    assert_eq!(INNER_FAILURES.load(Ordering::SeqCst), 1);
    assert!(report.passed());
}

#[test]
fn operands_print_with_their_type_rule() {
    fn floats() {
        ktest::assert_eq!(0.5f64, 0.25f64);
    }
    fn unsigned() {
        ktest::assert_eq!(u64::MAX, 0u64);
    }
    fn pointers() {
        let value = 1u8;
        ktest::assert_eq!(&value as *const u8, std::ptr::null());
    }
    fn different() {
        ktest::assert_ne!(-7i16, -7i16);
    }

    let (report, _, err) = run([
        case("floats", floats),
        case("unsigned", unsigned),
        case("pointers", pointers),
        case("different", different),
    ]);
    let err = err.contents();

    assert!(err.contains("Expected: 0.500000\nActual: 0.250000\n"), "{err}");
    assert!(err.contains("Expected: 18446744073709551615\nActual: 0\n"), "{err}");
    assert!(err.contains("Expected: 0x"), "{err}");
    assert!(err.contains("Actual: 0x0\n"), "{err}");
    assert!(err.contains("Expected: not -7\nActual: -7\n"), "{err}");
    assert_eq!(report.stats.assertion_failures, 4);
}

#[test]
fn assertion_inside_a_message_argument_is_reported() {
    struct Checked;

    impl std::fmt::Display for Checked {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            ktest::assert_eq!(1, 2);
            f.write_str("checked")
        }
    }

    fn outer() {
        ktest::assert!(false, "value {}", Checked);
    }

    let (report, out, err) = run([case("outer", outer)]);
    let err = err.contents();

    assert!(err.contains("Expected: 1\nActual: 2\n"), "{err}");
    assert!(err.ends_with("value checked\n"), "{err}");
    assert_eq!(report.stats.assertion_failures, 2);
    assert!(out.contents().ends_with("2 tests failed!\n"));
}

#[test]
#[should_panic(expected = "outside of a running test body")]
fn assertion_outside_a_run_is_rejected() {
    ktest::assert!(1 + 1 == 3);
}
