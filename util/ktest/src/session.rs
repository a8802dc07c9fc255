// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Per-run state shared between the runner and the assertions.
//!
//! Test bodies take no arguments, so assertions reach the run they belong to
//! through a thread-local slot. The runner installs its session for the whole
//! run and [`ActiveSession`] puts the previous one back on drop, which keeps
//! nested runs and runs on separate threads independent of each other.

use core::{
    cell::{Cell, RefCell},
    fmt,
};
use std::{
    io::{self, Write},
    rc::Rc,
};

use crate::palette::Palette;

/// Output streams of a run: the report goes to `out`, failures to `err`.
pub struct Console {
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl Console {
    pub fn new(out: impl Write + 'static, err: impl Write + 'static) -> Self {
        Self {
            out: Box::new(out),
            err: Box::new(err),
        }
    }

    /// Process stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }

    /// A console writing into two in-memory buffers.
    pub fn capture() -> (Self, Capture, Capture) {
        let out = Capture::default();
        let err = Capture::default();
        (Self::new(out.clone(), err.clone()), out, err)
    }

    // Console output is best effort; a closed pipe must not abort the run.
    pub(crate) fn out(&mut self, args: fmt::Arguments) {
        let _ = self.out.write_fmt(args);
    }

    pub(crate) fn err(&mut self, args: fmt::Arguments) {
        let _ = self.err.write_fmt(args);
    }

    pub(crate) fn flush(&mut self) {
        let _ = self.out.flush();
        let _ = self.err.flush();
    }
}

/// Shared in-memory sink, cloned into a [`Console`] and read back afterwards.
#[derive(Clone, Default)]
pub struct Capture(Rc<RefCell<Vec<u8>>>);

impl Capture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// State of one run.
pub(crate) struct Session {
    palette: Palette,
    console: RefCell<Console>,
    failures: Cell<usize>,
}

impl Session {
    pub(crate) fn new(palette: Palette, console: Console) -> Self {
        Self {
            palette,
            console: RefCell::new(console),
            failures: Cell::new(0),
        }
    }

    pub(crate) fn palette(&self) -> Palette {
        self.palette
    }

    /// Number of failed assertion evaluations so far.
    pub(crate) fn failures(&self) -> usize {
        self.failures.get()
    }

    pub(crate) fn record_failure(&self) {
        self.failures.set(self.failures.get() + 1);
    }

    // Arguments are rendered before the console is borrowed: a `Display`
    // impl in an assertion message may itself run an assertion.
    pub(crate) fn out(&self, args: fmt::Arguments) {
        let text = args.to_string();
        self.console.borrow_mut().out(format_args!("{text}"));
    }

    pub(crate) fn err(&self, args: fmt::Arguments) {
        let text = args.to_string();
        self.console.borrow_mut().err(format_args!("{text}"));
    }

    pub(crate) fn flush(&self) {
        if let Ok(mut console) = self.console.try_borrow_mut() {
            console.flush();
        }
    }
}

std::thread_local! {
    static ACTIVE: RefCell<Option<Rc<Session>>> = const { RefCell::new(None) };
}

/// Guard that keeps a session installed on the current thread.
pub(crate) struct ActiveSession {
    previous: Option<Rc<Session>>,
}

impl ActiveSession {
    pub(crate) fn enter(session: Rc<Session>) -> Self {
        let previous = ACTIVE.with(|slot| slot.replace(Some(session)));
        Self { previous }
    }
}

impl Drop for ActiveSession {
    fn drop(&mut self) {
        let previous = self.previous.take();
        ACTIVE.with(|slot| *slot.borrow_mut() = previous);
    }
}

/// Runs `f` against the session active on this thread.
///
/// # Panics
/// Panics when no run is in progress: assertions are only meaningful inside a
/// test body.
pub(crate) fn with_active<R>(f: impl FnOnce(&Session) -> R) -> R {
    let session = ACTIVE.with(|slot| slot.borrow().clone());
    match session {
        Some(session) => f(&*session),
        None => panic!("ktest assertion evaluated outside of a running test body"),
    }
}
