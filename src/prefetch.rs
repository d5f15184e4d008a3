//! Memory prefetch hints.

use core::fmt::Display;
use core::fmt::Formatter;
use core::fmt::Result;

/// `true` if [`prefetch`] issues a real instruction on this build.
pub const HAVE_PREFETCH: bool = cfg!(swiss_builtin_prefetch);

/// Temporal locality of a prefetched address.
///
/// Numbered like the third argument of GCC's `__builtin_prefetch`: `0` means
/// the data will not be reused, `3` means it should stay in every cache level.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i32)]
pub enum Locality {
  /// No temporal locality (non-temporal / streaming).
  None = 0,
  /// Low temporal locality (keep in the last-level cache).
  Low = 1,
  /// Moderate temporal locality (keep in L2).
  Moderate = 2,
  /// High temporal locality (keep in L1).
  #[default]
  High = 3,
}

impl Locality {
  /// Converts a `__builtin_prefetch` locality value.
  ///
  /// Returns [`None`] outside of `0..=3`.
  ///
  /// [`None`]: Option::None
  #[inline]
  pub const fn from_i32(value: i32) -> Option<Self> {
    match value {
      0 => Some(Self::None),
      1 => Some(Self::Low),
      2 => Some(Self::Moderate),
      3 => Some(Self::High),
      _ => None,
    }
  }

  /// Returns the `__builtin_prefetch` locality value.
  #[inline]
  pub const fn as_i32(self) -> i32 {
    self as i32
  }
}

impl Display for Locality {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    Display::fmt(&self.as_i32(), f)
  }
}

/// Hints that the memory at `ptr` will be read soon.
///
/// This is a best-effort, non-blocking hint. It never faults and never changes
/// observable program state, whatever `ptr` points to: null, dangling and
/// one-past-the-end pointers are all fine. Targets without a supported prefetch
/// instruction compile it to nothing; see [`HAVE_PREFETCH`].
///
/// # Examples
///
/// ```
/// use swiss_base::hint::Locality;
/// use swiss_base::hint::prefetch;
///
/// let ctrl: [u8; 16] = [0x80; 16];
///
/// prefetch(ctrl.as_ptr(), Locality::High);
/// prefetch(ctrl.as_ptr().wrapping_add(16), Locality::None);
/// ```
#[inline(always)]
pub fn prefetch<T>(ptr: *const T, locality: Locality) {
  imp::prefetch(ptr.cast::<u8>(), locality);
}

/// Prefetches an address, defaulting to [`Locality::High`].
///
/// [`Locality::High`]: crate::hint::Locality::High
#[macro_export]
macro_rules! prefetch {
  ($ptr:expr $(,)?) => {
    $crate::hint::prefetch($ptr, $crate::hint::Locality::High)
  };
  ($ptr:expr, $locality:expr $(,)?) => {
    $crate::hint::prefetch($ptr, $locality)
  };
}

// -----------------------------------------------------------------------------
// Implementations
// -----------------------------------------------------------------------------

#[cfg(all(swiss_builtin_prefetch, any(target_arch = "x86", target_arch = "x86_64")))]
mod imp {
  #[cfg(target_arch = "x86")]
  use core::arch::x86 as arch;
  #[cfg(target_arch = "x86_64")]
  use core::arch::x86_64 as arch;

  use self::arch::_MM_HINT_NTA;
  use self::arch::_MM_HINT_T0;
  use self::arch::_MM_HINT_T1;
  use self::arch::_MM_HINT_T2;
  use self::arch::_mm_prefetch;
  use super::Locality;

  #[inline(always)]
  pub(super) fn prefetch(ptr: *const u8, locality: Locality) {
    let ptr: *const i8 = ptr.cast::<i8>();

    // SAFETY: `prefetch` instructions never fault, whatever the address. The
    // build script only enables this path when SSE is available.
    unsafe {
      match locality {
        Locality::None => _mm_prefetch::<_MM_HINT_NTA>(ptr),
        Locality::Low => _mm_prefetch::<_MM_HINT_T2>(ptr),
        Locality::Moderate => _mm_prefetch::<_MM_HINT_T1>(ptr),
        Locality::High => _mm_prefetch::<_MM_HINT_T0>(ptr),
      }
    }
  }
}

#[cfg(all(swiss_builtin_prefetch, target_arch = "aarch64"))]
mod imp {
  use core::arch::asm;

  use super::Locality;

  #[inline(always)]
  pub(super) fn prefetch(ptr: *const u8, locality: Locality) {
    // SAFETY: `prfm` is a hint; it never faults and never writes memory.
    unsafe {
      match locality {
        Locality::None => {
          asm!("prfm pldl1strm, [{ptr}]", ptr = in(reg) ptr, options(nostack, preserves_flags, readonly));
        }
        Locality::Low => {
          asm!("prfm pldl3keep, [{ptr}]", ptr = in(reg) ptr, options(nostack, preserves_flags, readonly));
        }
        Locality::Moderate => {
          asm!("prfm pldl2keep, [{ptr}]", ptr = in(reg) ptr, options(nostack, preserves_flags, readonly));
        }
        Locality::High => {
          asm!("prfm pldl1keep, [{ptr}]", ptr = in(reg) ptr, options(nostack, preserves_flags, readonly));
        }
      }
    }
  }
}

#[cfg(not(all(
  swiss_builtin_prefetch,
  any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"),
)))]
mod imp {
  use super::Locality;

  #[inline(always)]
  pub(super) fn prefetch(_ptr: *const u8, _locality: Locality) {}
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
