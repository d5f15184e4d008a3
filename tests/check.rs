//! Process-level behavior of the fatal checks.
//!
//! A failing check aborts the process, so each failure case re-runs this test
//! binary filtered down to a single test, and inspects the child's exit
//! status and stderr.

use std::env;
use std::fmt::Display;
use std::fmt::Formatter;
use std::panic;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use swiss_base::check;
use swiss_base::debug_check;
use tracing::Event;
use tracing::Metadata;
use tracing::Subscriber;
use tracing::span::Attributes;
use tracing::span::Id;
use tracing::span::Record;

const CHILD: &str = "SWISS_BASE_CHECK_CHILD";

fn is_child(name: &str) -> bool {
  env::var(CHILD).is_ok_and(|value| value == name)
}

fn spawn_child(name: &str) -> Output {
  let exe: PathBuf = env::current_exe().unwrap();

  Command::new(exe)
    .args(["--exact", name, "--nocapture", "--test-threads=1"])
    .env(CHILD, name)
    .output()
    .unwrap()
}

fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_aborted(output: &Output) {
  assert!(
    !output.status.success(),
    "child exited cleanly: {}",
    stderr(output),
  );

  #[cfg(unix)]
  {
    use std::os::unix::process::ExitStatusExt;

    // SIGABRT
    assert_eq!(output.status.signal(), Some(6), "{}", stderr(output));
  }
}

#[test]
fn passing_checks_continue() {
  let capacity: usize = 15;

  check!(capacity > 0);
  check!((capacity + 1) & capacity == 0, "invalid capacity: {capacity}");
  debug_check!(capacity < 16, "capacity too large: {capacity}");
}

#[test]
fn failing_check_aborts_with_location_and_message() {
  const NAME: &str = "failing_check_aborts_with_location_and_message";

  if is_child(NAME) {
    let bucket: usize = 12;
    check!(bucket < 8, "bucket out of range: {bucket}");
    return;
  }

  let output: Output = spawn_child(NAME);
  let stderr: String = stderr(&output);

  assert_aborted(&output);
  assert!(stderr.contains("CHECK failed at "), "{stderr}");
  assert!(stderr.contains("check.rs:"), "{stderr}");
  assert!(stderr.contains("bucket out of range: 12"), "{stderr}");
}

#[test]
fn failing_check_without_message_prints_condition() {
  const NAME: &str = "failing_check_without_message_prints_condition";

  if is_child(NAME) {
    let slots: Vec<u8> = vec![0x80];
    check!(slots.is_empty());
    return;
  }

  let output: Output = spawn_child(NAME);
  let stderr: String = stderr(&output);

  assert_aborted(&output);
  assert!(stderr.contains("slots.is_empty()"), "{stderr}");
}

#[test]
fn failing_debug_check_follows_build_mode() {
  const NAME: &str = "failing_debug_check_follows_build_mode";

  if is_child(NAME) {
    let index: usize = 9;
    debug_check!(index < 8, "index out of range: {index}");
    return;
  }

  let output: Output = spawn_child(NAME);

  if cfg!(debug_assertions) {
    assert_aborted(&output);
    assert!(stderr(&output).contains("index out of range: 9"));
  } else {
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(!stderr(&output).contains("CHECK failed"));
  }
}

#[test]
fn failing_check_emits_tracing_event() {
  const NAME: &str = "failing_check_emits_tracing_event";

  if is_child(NAME) {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let full: bool = true;
    check!(!full, "table is full");
    return;
  }

  let output: Output = spawn_child(NAME);
  let stderr: String = stderr(&output);

  assert_aborted(&output);
  assert!(stderr.contains("CHECK failed at "), "{stderr}");
  assert!(stderr.contains("swiss_base::check"), "{stderr}");
  assert!(stderr.contains("table is full"), "{stderr}");
}

// -----------------------------------------------------------------------------
// Panicking Collaborators
// -----------------------------------------------------------------------------

struct PanickingSubscriber;

impl Subscriber for PanickingSubscriber {
  fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
    true
  }

  fn new_span(&self, _span: &Attributes<'_>) -> Id {
    Id::from_u64(1)
  }

  fn record(&self, _span: &Id, _values: &Record<'_>) {}

  fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

  fn event(&self, _event: &Event<'_>) {
    panic!("subscriber failure");
  }

  fn enter(&self, _span: &Id) {}

  fn exit(&self, _span: &Id) {}
}

struct PanickingDisplay;

impl Display for PanickingDisplay {
  fn fmt(&self, _f: &mut Formatter<'_>) -> std::fmt::Result {
    panic!("display failure");
  }
}

#[test]
fn panicking_subscriber_cannot_catch_failed_check() {
  const NAME: &str = "panicking_subscriber_cannot_catch_failed_check";

  if is_child(NAME) {
    tracing::subscriber::set_global_default(PanickingSubscriber).unwrap();

    let sum: u32 = 1 + 1;
    let caught: bool = panic::catch_unwind(|| check!(sum == 3, "must abort")).is_err();

    println!("check returned control, caught = {caught}");
    return;
  }

  let output: Output = spawn_child(NAME);
  let stderr: String = stderr(&output);

  assert_aborted(&output);
  assert!(stderr.contains("must abort"), "{stderr}");
  assert!(!String::from_utf8_lossy(&output.stdout).contains("check returned control"));
}

#[test]
fn panicking_message_cannot_catch_failed_check() {
  const NAME: &str = "panicking_message_cannot_catch_failed_check";

  if is_child(NAME) {
    let ready: bool = false;
    let caught: bool = panic::catch_unwind(|| check!(ready, "{}", PanickingDisplay)).is_err();

    println!("check returned control, caught = {caught}");
    return;
  }

  let output: Output = spawn_child(NAME);

  assert_aborted(&output);
  assert!(stderr(&output).contains("CHECK failed at "));
  assert!(!String::from_utf8_lossy(&output.stdout).contains("check returned control"));
}
