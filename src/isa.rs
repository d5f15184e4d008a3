//! Instruction-set capability detection.
//!
//! Two SIMD tiers are tracked: the base tier (SSE2) and the extended tier
//! (SSSE3). Both are resolved by the build script, either from the target's
//! enabled features or from the `SWISS_BASE_SIMD` / `SWISS_EXTENDED_SIMD`
//! environment overrides.

use core::fmt::Display;
use core::fmt::Formatter;
use core::fmt::Result;

include!("isa/guards.rs");

/// `true` if the base SIMD tier (SSE2) is enabled.
pub const BASE_SIMD: bool = cfg!(swiss_simd_base);

/// `true` if the extended SIMD tier (SSSE3) is enabled.
///
/// Always implies [`BASE_SIMD`].
pub const EXTENDED_SIMD: bool = cfg!(swiss_simd_extended);

const _: () = assert!(
  !EXTENDED_SIMD || BASE_SIMD,
  "invalid config: `EXTENDED_SIMD` requires `BASE_SIMD`",
);

// -----------------------------------------------------------------------------
// SIMD Tier
// -----------------------------------------------------------------------------

/// An ordered SIMD capability level.
///
/// # Examples
///
/// ```
/// use swiss_base::simd::SimdTier;
///
/// assert!(SimdTier::Extended.supports(SimdTier::Base));
/// assert!(!SimdTier::None.supports(SimdTier::Base));
///
/// // The extended tier can never be selected on its own.
/// assert_eq!(SimdTier::from_flags(false, true), None);
/// ```
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum SimdTier {
  /// Scalar fallback.
  None,
  /// SSE2.
  Base,
  /// SSSE3 (and SSE2).
  Extended,
}

impl SimdTier {
  /// The tier this crate was built for.
  pub const CURRENT: Self = match Self::from_flags(BASE_SIMD, EXTENDED_SIMD) {
    Some(tier) => tier,
    None => panic!("invalid config: `EXTENDED_SIMD` requires `BASE_SIMD`"),
  };

  /// Builds a tier from the two capability flags.
  ///
  /// Returns [`None`] for the invalid combination "extended without base".
  #[inline]
  pub const fn from_flags(base: bool, extended: bool) -> Option<Self> {
    match (base, extended) {
      (true, true) => Some(Self::Extended),
      (true, false) => Some(Self::Base),
      (false, false) => Some(Self::None),
      (false, true) => None,
    }
  }

  /// Returns `true` if the base tier is available.
  #[inline]
  pub const fn base(self) -> bool {
    matches!(self, Self::Base | Self::Extended)
  }

  /// Returns `true` if the extended tier is available.
  #[inline]
  pub const fn extended(self) -> bool {
    matches!(self, Self::Extended)
  }

  /// Returns `true` if `self` includes every capability of `other`.
  #[inline]
  pub const fn supports(self, other: Self) -> bool {
    self as u8 >= other as u8
  }
}

impl Display for SimdTier {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      Self::None => f.write_str("none"),
      Self::Base => f.write_str("sse2"),
      Self::Extended => f.write_str("ssse3"),
    }
  }
}

/// Detects the tier supported by the CPU this process is running on.
///
/// Unlike [`SimdTier::CURRENT`] this ignores the build configuration, and is
/// used to catch builds forced above what the host can execute.
pub fn runtime_tier() -> SimdTier {
  #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
  {
    let base: bool = std::arch::is_x86_feature_detected!("sse2");
    let extended: bool = base && std::arch::is_x86_feature_detected!("ssse3");

    match SimdTier::from_flags(base, extended) {
      Some(tier) => tier,
      None => SimdTier::None,
    }
  }

  #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
  {
    SimdTier::None
  }
}

// -----------------------------------------------------------------------------
// Intrinsic Surface
// -----------------------------------------------------------------------------

/// SSE2 intrinsics used for group probing.
#[cfg(swiss_simd_base)]
pub mod base {
  #[cfg(target_arch = "x86")]
  use core::arch::x86 as arch;
  #[cfg(target_arch = "x86_64")]
  use core::arch::x86_64 as arch;

  pub use self::arch::__m128i;
  pub use self::arch::_mm_and_si128;
  pub use self::arch::_mm_andnot_si128;
  pub use self::arch::_mm_cmpeq_epi8;
  pub use self::arch::_mm_cmpgt_epi8;
  pub use self::arch::_mm_loadu_si128;
  pub use self::arch::_mm_movemask_epi8;
  pub use self::arch::_mm_or_si128;
  pub use self::arch::_mm_set1_epi8;
  pub use self::arch::_mm_setzero_si128;
  pub use self::arch::_mm_storeu_si128;
  pub use self::arch::_mm_subs_epi8;
}

/// SSSE3 intrinsics used for control-byte conversion.
#[cfg(swiss_simd_extended)]
pub mod extended {
  #[cfg(target_arch = "x86")]
  use core::arch::x86 as arch;
  #[cfg(target_arch = "x86_64")]
  use core::arch::x86_64 as arch;

  pub use self::arch::_mm_shuffle_epi8;
  pub use self::arch::_mm_sign_epi8;
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
