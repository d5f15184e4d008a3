//! Builtin and attribute probing.
//!
//! Answers "does this toolchain support extension X" at compile time. Every
//! answer defaults to `false`: an unrecognized backend, or a name nothing is
//! known about, never reports availability.

use core::fmt::Display;
use core::fmt::Formatter;
use core::fmt::Result;

// -----------------------------------------------------------------------------
// Builtins
// -----------------------------------------------------------------------------

/// A compiler builtin the table engine may use.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Builtin {
  /// Branch-probability hints (`__builtin_expect`).
  Expect,
  /// Memory prefetch (`__builtin_prefetch`).
  Prefetch,
}

impl Builtin {
  /// Every known builtin.
  pub const ALL: [Self; 2] = [Self::Expect, Self::Prefetch];

  /// Returns the GCC-style name of the builtin.
  #[inline]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Expect => "__builtin_expect",
      Self::Prefetch => "__builtin_prefetch",
    }
  }

  /// Looks up a builtin by name, with or without the `__builtin_` prefix.
  pub fn from_name(name: &str) -> Option<Self> {
    match name.strip_prefix("__builtin_").unwrap_or(name) {
      "expect" => Some(Self::Expect),
      "prefetch" => Some(Self::Prefetch),
      _ => None,
    }
  }
}

impl Display for Builtin {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.write_str(self.name())
  }
}

/// Returns `true` if `builtin` is available to this build.
///
/// # Examples
///
/// ```
/// use swiss_base::config::Builtin;
/// use swiss_base::config::HAVE_PREFETCH;
/// use swiss_base::config::has_builtin;
///
/// assert_eq!(has_builtin(Builtin::Prefetch), HAVE_PREFETCH);
/// ```
#[inline]
pub const fn has_builtin(builtin: Builtin) -> bool {
  match builtin {
    Builtin::Expect => cfg!(swiss_builtin_expect),
    Builtin::Prefetch => cfg!(swiss_builtin_prefetch),
  }
}

/// Probes a builtin by name.
///
/// Unknown names are never available.
pub fn probe_builtin(name: &str) -> bool {
  Builtin::from_name(name).is_some_and(has_builtin)
}

// -----------------------------------------------------------------------------
// Attributes
// -----------------------------------------------------------------------------

/// A function attribute the table engine may use.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Attribute {
  /// `#[inline(always)]`.
  AlwaysInline,
  /// `#[inline(never)]`.
  NoInline,
  /// `#[cold]`.
  Cold,
}

impl Attribute {
  /// Every known attribute.
  pub const ALL: [Self; 3] = [Self::AlwaysInline, Self::NoInline, Self::Cold];

  /// Returns the GCC-style name of the attribute.
  #[inline]
  pub const fn name(self) -> &'static str {
    match self {
      Self::AlwaysInline => "always_inline",
      Self::NoInline => "noinline",
      Self::Cold => "cold",
    }
  }

  /// Looks up an attribute by name. Accepts `__name__` spellings.
  pub fn from_name(name: &str) -> Option<Self> {
    let name: &str = name
      .strip_prefix("__")
      .and_then(|name| name.strip_suffix("__"))
      .unwrap_or(name);

    match name {
      "always_inline" => Some(Self::AlwaysInline),
      "noinline" => Some(Self::NoInline),
      "cold" => Some(Self::Cold),
      _ => None,
    }
  }
}

impl Display for Attribute {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.write_str(self.name())
  }
}

/// Returns `true` if `attribute` is honored by this build.
#[inline]
pub const fn has_attribute(attribute: Attribute) -> bool {
  match attribute {
    Attribute::AlwaysInline => cfg!(swiss_attr_always_inline),
    Attribute::NoInline => cfg!(swiss_attr_noinline),
    Attribute::Cold => cfg!(swiss_attr_cold),
  }
}

/// Probes an attribute by name.
///
/// Unknown names are never available.
pub fn probe_attribute(name: &str) -> bool {
  Attribute::from_name(name).is_some_and(has_attribute)
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
