//! Toolchain and language-mode identification.

use core::fmt::Debug;
use core::fmt::Display;
use core::fmt::Formatter;
use core::fmt::Result;

// -----------------------------------------------------------------------------
// Compiler
// -----------------------------------------------------------------------------

/// The toolchain compiling this crate.
///
/// rustc has no notion of "Clang" or "GCC", but the two properties the table
/// engine cares about map cleanly onto the codegen backend and the target's C
/// environment:
///
/// - [`clang()`] is set when the LLVM backend is in use.
/// - [`gccish()`] is set for the GCC backend, and for LLVM targeting a
///   non-MSVC environment (GCC-mode Clang).
/// - [`msvcish()`] is set when targeting an MSVC environment (including the
///   clang-cl analogue, LLVM + MSVC).
///
/// An unrecognized backend resolves every flag to `false`. Consumers must read
/// that as "use the most portable path", never as an error.
///
/// # Examples
///
/// ```
/// use swiss_base::config::Compiler;
///
/// let compiler: Compiler = Compiler::CURRENT;
///
/// // "GCC" never means GCC-mode Clang.
/// assert!(!(compiler.gcc() && compiler.clang()));
/// assert!(!(compiler.msvc() && compiler.clang()));
/// ```
///
/// [`clang()`]: Self::clang
/// [`gccish()`]: Self::gccish
/// [`msvcish()`]: Self::msvcish
#[derive(Clone, Copy, Hash, PartialEq, Eq)]
pub struct Compiler {
  clang: bool,
  gccish: bool,
  msvcish: bool,
}

impl Compiler {
  /// The toolchain this crate was built with.
  pub const CURRENT: Self = Self::new(
    cfg!(swiss_compiler_clang),
    cfg!(swiss_compiler_gccish),
    cfg!(swiss_compiler_msvcish),
  );

  /// A toolchain nothing is known about.
  pub const UNKNOWN: Self = Self::new(false, false, false);

  #[inline]
  pub(crate) const fn new(clang: bool, gccish: bool, msvcish: bool) -> Self {
    Self {
      clang,
      gccish,
      msvcish,
    }
  }

  /// Returns `true` if the LLVM backend is in use.
  #[inline]
  pub const fn clang(self) -> bool {
    self.clang
  }

  /// Returns `true` for GCC and GCC-mode Clang.
  #[inline]
  pub const fn gccish(self) -> bool {
    self.gccish
  }

  /// Returns `true` for MSVC and clang-cl.
  #[inline]
  pub const fn msvcish(self) -> bool {
    self.msvcish
  }

  /// Returns `true` for GCC, and *not* Clang pretending to be GCC.
  #[inline]
  pub const fn gcc(self) -> bool {
    self.gccish && !self.clang
  }

  /// Returns `true` for MSVC, and *not* clang-cl.
  #[inline]
  pub const fn msvc(self) -> bool {
    self.msvcish && !self.clang
  }

  /// Returns `true` if no flag is set.
  #[inline]
  pub const fn is_unknown(self) -> bool {
    !self.clang && !self.gccish && !self.msvcish
  }

  const fn name(self) -> &'static str {
    match (self.clang, self.gccish, self.msvcish) {
      (true, true, _) => "clang",
      (true, false, true) => "clang-cl",
      (true, false, false) => "llvm",
      (false, true, _) => "gcc",
      (false, false, true) => "msvc",
      (false, false, false) => "unknown",
    }
  }
}

impl Debug for Compiler {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.debug_struct("Compiler")
      .field("clang", &self.clang())
      .field("gccish", &self.gccish())
      .field("msvcish", &self.msvcish())
      .field("gcc", &self.gcc())
      .field("msvc", &self.msvc())
      .finish()
  }
}

impl Display for Compiler {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.write_str(self.name())
  }
}

// -----------------------------------------------------------------------------
// Dialect
// -----------------------------------------------------------------------------

/// The execution model the crate's atomics are compiled against.
///
/// [`Native`] uses [`core::sync::atomic`]. [`Model`] routes every atomic
/// through a model-checking runtime (`loom` or `shuttle`), which schedules
/// threads itself. The atomic counter API is identical under both.
///
/// [`Native`]: Self::Native
/// [`Model`]: Self::Model
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Dialect {
  /// Hardware atomics.
  Native,
  /// Model-checker atomics.
  Model,
}

impl Dialect {
  /// The dialect this crate was built for.
  pub const CURRENT: Self = if cfg!(any(loom, shuttle)) {
    Self::Model
  } else {
    Self::Native
  };

  /// Returns `true` if atomics are provided by a model checker.
  #[inline]
  pub const fn is_model(self) -> bool {
    matches!(self, Self::Model)
  }
}

impl Display for Dialect {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      Self::Native => f.write_str("native"),
      Self::Model => f.write_str("model"),
    }
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use crate::compiler::Compiler;
  use crate::compiler::Dialect;

  #[test]
  fn derived_flags() {
    let compiler: Compiler = Compiler::new(true, true, false);

    assert!(compiler.clang());
    assert!(compiler.gccish());
    assert!(!compiler.gcc());
    assert!(!compiler.msvc());

    let compiler: Compiler = Compiler::new(false, true, false);

    assert!(compiler.gcc());
    assert!(!compiler.msvc());

    let compiler: Compiler = Compiler::new(true, false, true);

    assert!(compiler.msvcish());
    assert!(!compiler.msvc());

    let compiler: Compiler = Compiler::new(false, false, true);

    assert!(compiler.msvc());
    assert!(!compiler.gcc());
  }

  #[test]
  fn unknown_is_all_false() {
    let compiler: Compiler = Compiler::UNKNOWN;

    assert!(compiler.is_unknown());
    assert!(!compiler.clang());
    assert!(!compiler.gccish());
    assert!(!compiler.msvcish());
    assert!(!compiler.gcc());
    assert!(!compiler.msvc());
    assert_eq!(compiler.to_string(), "unknown");
  }

  #[test]
  fn current_is_consistent() {
    let compiler: Compiler = Compiler::CURRENT;

    assert_eq!(compiler.gcc(), compiler.gccish() && !compiler.clang());
    assert_eq!(compiler.msvc(), compiler.msvcish() && !compiler.clang());
    assert!(!(compiler.gcc() && compiler.msvc()));
  }

  #[test]
  fn display_names() {
    assert_eq!(Compiler::new(true, true, false).to_string(), "clang");
    assert_eq!(Compiler::new(true, false, true).to_string(), "clang-cl");
    assert_eq!(Compiler::new(false, true, false).to_string(), "gcc");
    assert_eq!(Compiler::new(false, false, true).to_string(), "msvc");
  }

  #[test]
  fn dialect() {
    assert_eq!(Dialect::CURRENT.is_model(), cfg!(any(loom, shuttle)));
    assert_eq!(Dialect::Native.to_string(), "native");
    assert_eq!(Dialect::Model.to_string(), "model");
  }
}
