// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Leveled console logger.
//!
//! Records go to stderr so they never interleave with a harness report on
//! stdout. Colors are emitted only when stderr is attached to a terminal.

use std::{
    fmt,
    io::{self, IsTerminal, Write as _},
    sync::atomic::{AtomicBool, Ordering},
};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
pub use log::{debug, error, info, trace, warn};

macro_rules! color_fmt {
    ($color_code:expr, $($arg:tt)*) => {
        format_args!("\u{1B}[{}m{}\u{1B}[m", $color_code as u8, format_args!($($arg)*))
    };
}

#[repr(u8)]
#[derive(Clone, Copy)]
enum AnsiColor {
    Red         = 31,
    Green       = 32,
    Yellow      = 33,
    Cyan        = 36,
    White       = 37,
    BrightBlack = 90,
}

impl AnsiColor {
    fn for_level(level: Level) -> Self {
        match level {
            Level::Error => AnsiColor::Red,
            Level::Warn => AnsiColor::Yellow,
            Level::Info => AnsiColor::Green,
            Level::Debug => AnsiColor::Cyan,
            Level::Trace => AnsiColor::BrightBlack,
        }
    }
}

static COLORED: AtomicBool = AtomicBool::new(false);

struct ConsoleLogger;

impl Log for ConsoleLogger {
    #[inline]
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut line = String::new();
        let time = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f");
        let _ = format_record(&mut line, record, time, COLORED.load(Ordering::Relaxed));
        let _ = print_fmt(format_args!("{line}"));
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

fn format_record(
    out: &mut impl fmt::Write,
    record: &Record,
    time: impl fmt::Display,
    colored: bool,
) -> fmt::Result {
    let line = record.line().unwrap_or(0);
    let path = record.target();

    if colored {
        let color = AnsiColor::for_level(record.level());
        writeln!(
            out,
            "{}",
            color_fmt!(
                AnsiColor::White,
                "[{time} {path}:{line}] {args}",
                time = time,
                path = path,
                line = line,
                args = color_fmt!(color, "{}", record.args()),
            )
        )
    } else {
        writeln!(
            out,
            "[{time} {path}:{line}] {level:<5} {args}",
            level = record.level(),
            args = record.args(),
        )
    }
}

/// Writes pre-formatted text to stderr under the stream lock.
pub fn print_fmt(args: fmt::Arguments) -> io::Result<()> {
    let mut stderr = io::stderr().lock();
    stderr.write_fmt(args)
}

/// Installs the console logger with the default `warn` level.
pub fn init_klogger() -> Result<(), SetLoggerError> {
    COLORED.store(io::stderr().is_terminal(), Ordering::Relaxed);
    log::set_logger(&ConsoleLogger)?;
    log::set_max_level(LevelFilter::Warn);
    Ok(())
}

pub fn set_log_level(level: LevelFilter) {
    log::set_max_level(level);
}
