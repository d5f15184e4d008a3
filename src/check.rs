//! Fatal and debug-only checks.
//!
//! A failed check is a broken invariant, never an expected error: the process
//! prints a diagnostic to stderr and aborts. Nothing unwinds and nothing can
//! catch it.

use core::fmt::Arguments;
use core::mem;
use std::io;
use std::io::Write;
use std::panic;
use std::panic::AssertUnwindSafe;
use std::process;

/// Evaluates a condition and aborts the process if it is `false`.
///
/// This is like [`assert!`], but it never unwinds and is never compiled out.
/// On failure the following is written to stderr before the process aborts:
///
/// ```text
/// CHECK failed at <file>:<line>:<column>
/// <message>
/// ```
///
/// Without a message, the stringified condition is printed instead.
///
/// # Examples
///
/// ```
/// use swiss_base::check;
///
/// let capacity: usize = 15;
///
/// check!((capacity + 1) & capacity == 0, "invalid capacity: {capacity}");
/// check!(capacity > 0);
/// ```
#[macro_export]
macro_rules! check {
  ($cond:expr $(,)?) => {
    $crate::check!($cond, "{}", ::core::stringify!($cond))
  };
  ($cond:expr, $($arg:tt)+) => {
    if $crate::hint::unlikely(!$cond) {
      $crate::__private::check_failed(
        ::core::file!(),
        ::core::line!(),
        ::core::column!(),
        ::core::format_args!($($arg)+),
      )
    }
  };
}

/// Like [`check!`], but only enabled with `debug_assertions`.
///
/// In release builds the condition is type-checked but never evaluated, so a
/// disabled check costs nothing at runtime.
///
/// # Examples
///
/// ```
/// use swiss_base::debug_check;
///
/// let index: usize = 3;
/// let capacity: usize = 7;
///
/// debug_check!(index < capacity, "out-of-bounds: {index} >= {capacity}");
/// ```
#[macro_export]
macro_rules! debug_check {
  ($($arg:tt)+) => {
    if ::core::cfg!(debug_assertions) {
      $crate::check!($($arg)+);
    }
  };
}

/// Reports a failed check and aborts the process.
///
/// The process aborts even if formatting the message or the installed
/// `tracing` subscriber panics.
#[cold]
#[inline(never)]
pub fn check_failed(file: &'static str, line: u32, column: u32, message: Arguments<'_>) -> ! {
  let report = AssertUnwindSafe(|| {
    {
      let mut stderr: io::StderrLock<'static> = io::stderr().lock();

      // Write errors are ignored; the process is going down either way.
      drop(writeln!(stderr, "CHECK failed at {file}:{line}:{column}"));
      drop(writeln!(stderr, "{message}"));
      drop(stderr.flush());
    }

    tracing::error!(target: "swiss_base::check", file, line, column, "check failed: {message}");
  });

  // The panic payload is leaked; its destructor could unwind again.
  mem::forget(panic::catch_unwind(report));

  process::abort()
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
