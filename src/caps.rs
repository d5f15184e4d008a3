//! Aggregated capability report.

use core::fmt::Debug;
use core::fmt::Formatter;
use core::fmt::Result;
use std::sync::OnceLock;

use crate::compiler::Compiler;
use crate::compiler::Dialect;
use crate::isa::SimdTier;
use crate::isa::runtime_tier;
use crate::prefetch::HAVE_PREFETCH;
use crate::probe::Attribute;
use crate::probe::Builtin;
use crate::probe::has_attribute;
use crate::probe::has_builtin;

/// Every capability resolved for this build, as one immutable value.
///
/// The table engine should resolve this once and pass it around, rather than
/// testing individual flags throughout its logic.
///
/// # Examples
///
/// ```
/// use swiss_base::config::Capabilities;
///
/// let caps: &Capabilities = Capabilities::detect();
///
/// assert_eq!(caps.simd(), Capabilities::BUILD.simd());
/// assert!(caps.host().is_some());
///
/// println!("{caps:#?}");
/// ```
#[derive(Clone, Copy, Hash, PartialEq, Eq)]
pub struct Capabilities {
  compiler: Compiler,
  dialect: Dialect,
  simd: SimdTier,
  host: Option<SimdTier>,
}

impl Capabilities {
  /// Capabilities known at build time. The host CPU is not inspected.
  pub const BUILD: Self = Self {
    compiler: Compiler::CURRENT,
    dialect: Dialect::CURRENT,
    simd: SimdTier::CURRENT,
    host: None,
  };

  /// Resolves the capabilities of this process.
  ///
  /// The first call inspects the host CPU, logs the resolved configuration
  /// at `debug` level, and aborts the process if the build selected a SIMD
  /// tier the host cannot execute. Later calls return the cached value.
  pub fn detect() -> &'static Self {
    static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

    CAPABILITIES.get_or_init(|| {
      let host: SimdTier = runtime_tier();

      tracing::debug!(
        compiler = %Self::BUILD.compiler,
        dialect = %Self::BUILD.dialect,
        simd = %Self::BUILD.simd,
        host = %host,
        prefetch = HAVE_PREFETCH,
        "resolved platform capabilities"
      );

      crate::check!(
        host.supports(Self::BUILD.simd),
        "build selected SIMD tier `{}` but the host only supports `{}`",
        Self::BUILD.simd,
        host,
      );

      Self {
        host: Some(host),
        ..Self::BUILD
      }
    })
  }

  /// Returns the toolchain identity.
  #[inline]
  pub const fn compiler(self) -> Compiler {
    self.compiler
  }

  /// Returns the atomic dialect.
  #[inline]
  pub const fn dialect(self) -> Dialect {
    self.dialect
  }

  /// Returns the SIMD tier selected at build time.
  #[inline]
  pub const fn simd(self) -> SimdTier {
    self.simd
  }

  /// Returns the SIMD tier of the host CPU, if it was inspected.
  #[inline]
  pub const fn host(self) -> Option<SimdTier> {
    self.host
  }

  /// Returns `true` if `builtin` is available.
  #[inline]
  pub const fn has_builtin(self, builtin: Builtin) -> bool {
    has_builtin(builtin)
  }

  /// Returns `true` if `attribute` is honored.
  #[inline]
  pub const fn has_attribute(self, attribute: Attribute) -> bool {
    has_attribute(attribute)
  }

  /// Returns `true` if prefetch hints emit an instruction.
  #[inline]
  pub const fn has_prefetch(self) -> bool {
    HAVE_PREFETCH
  }
}

impl Debug for Capabilities {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.debug_struct("Capabilities")
      .field("compiler", &self.compiler)
      .field("dialect", &self.dialect)
      .field("simd", &self.simd)
      .field("host", &self.host)
      .field("builtin_expect", &self.has_builtin(Builtin::Expect))
      .field("builtin_prefetch", &self.has_builtin(Builtin::Prefetch))
      .field("attr_always_inline", &self.has_attribute(Attribute::AlwaysInline))
      .field("attr_noinline", &self.has_attribute(Attribute::NoInline))
      .field("attr_cold", &self.has_attribute(Attribute::Cold))
      .finish()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use std::ptr;

  use crate::caps::Capabilities;
  use crate::isa::BASE_SIMD;
  use crate::isa::EXTENDED_SIMD;
  use crate::prefetch::HAVE_PREFETCH;
  use crate::probe::Builtin;

  #[test]
  fn build_matches_constants() {
    let caps: Capabilities = Capabilities::BUILD;

    assert_eq!(caps.simd().base(), BASE_SIMD);
    assert_eq!(caps.simd().extended(), EXTENDED_SIMD);
    assert_eq!(caps.has_prefetch(), HAVE_PREFETCH);
    assert_eq!(caps.has_builtin(Builtin::Prefetch), HAVE_PREFETCH);
    assert_eq!(caps.host(), None);
  }

  #[test]
  fn detect_is_cached() {
    let a: &Capabilities = Capabilities::detect();
    let b: &Capabilities = Capabilities::detect();

    assert!(ptr::eq(a, b));
    assert_eq!(a.compiler(), Capabilities::BUILD.compiler());
    assert_eq!(a.dialect(), Capabilities::BUILD.dialect());
    assert!(a.host().is_some_and(|host| host.supports(a.simd())));
  }

  #[test]
  fn debug_lists_every_field() {
    let debug: String = format!("{:?}", Capabilities::BUILD);

    for field in [
      "compiler",
      "dialect",
      "simd",
      "host",
      "builtin_expect",
      "builtin_prefetch",
      "attr_always_inline",
      "attr_noinline",
      "attr_cold",
    ] {
      assert!(debug.contains(field), "missing `{field}` in {debug}");
    }
  }
}
