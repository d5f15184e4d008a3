//! Platform and capability layer for open-addressing Swiss tables.
//!
//! `swiss-base` gives a Swiss-table engine one portable surface over
//! toolchain and hardware differences. It does not store, hash or probe
//! anything itself; it answers the questions the engine needs answered before
//! choosing a code path, and provides the handful of primitives every such
//! engine leans on.
//!
//! # Overview
//!
//! | Facility | Where |
//! |---|---|
//! | Toolchain and dialect identification | [`Compiler`], [`Dialect`] |
//! | SIMD tiers (SSE2 / SSSE3) | [`simd`] |
//! | Builtin and attribute probes | [`has_builtin`], [`has_attribute`] |
//! | Relaxed atomic counter | [`Counter`], [`atomic`], [`atomic_inc!`] |
//! | Fatal checks | [`check!`], [`debug_check!`] |
//! | Branch and inlining hints | [`hint`], [`likely!`], [`always_inline!`] |
//! | Prefetch | [`hint::prefetch`], [`prefetch!`] |
//!
//! Everything except the counter and the checks is resolved at build time.
//! [`Capabilities`] gathers the resolved values into a single immutable value
//! the engine can carry around instead of testing flags everywhere.
//!
//! # Usage
//!
//! ```
//! use swiss_base::check;
//! use swiss_base::config::Capabilities;
//! use swiss_base::hint::Locality;
//! use swiss_base::hint::likely;
//! use swiss_base::hint::prefetch;
//!
//! let caps: &Capabilities = Capabilities::detect();
//! let ctrl: [u8; 16] = [0x80; 16];
//!
//! prefetch(ctrl.as_ptr(), Locality::High);
//!
//! if likely(caps.simd().base()) {
//!   // group probing with `swiss_base::simd::base`
//! }
//!
//! check!(ctrl.len().is_power_of_two(), "bad group width: {}", ctrl.len());
//! ```
//!
//! # Configuration
//!
//! SIMD tiers are detected from the target's enabled features. Both can be
//! forced at build time:
//!
//! ```text
//! SWISS_BASE_SIMD=0 SWISS_EXTENDED_SIMD=0 cargo build
//! ```
//!
//! Accepted values are `0/1`, `true/false`, `on/off` and `yes/no`. Forcing the
//! extended tier on while the base tier is off is rejected, and so is forcing
//! a tier on for a non-x86 target; the build fails rather than silently
//! downgrading.
//!
//! [`debug_check!`] is compiled out when `debug_assertions` are disabled.
//!
//! # Concurrency
//!
//! [`Counter`] increments are lock-free and never lost, but use relaxed
//! ordering. Reading a counter never tells you anything about other memory.
//!
//! [`Capabilities`]: crate::config::Capabilities
//! [`Compiler`]: crate::config::Compiler
//! [`Dialect`]: crate::config::Dialect
//! [`has_attribute`]: crate::config::has_attribute
//! [`has_builtin`]: crate::config::has_builtin
//!

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod branch;
mod caps;
mod check;
mod compiler;
mod counter;
mod isa;
mod prefetch;
mod probe;
mod utils;

pub(crate) use crate::utils::sync;

#[cfg(test)]
#[path = "../build/resolve.rs"]
#[allow(dead_code, reason = "shared with the build script")]
mod resolve;

pub mod config {
  //! Build-time configuration resolved for this crate.

  pub use crate::caps::Capabilities;
  pub use crate::compiler::Compiler;
  pub use crate::compiler::Dialect;
  pub use crate::isa::BASE_SIMD;
  pub use crate::isa::EXTENDED_SIMD;
  pub use crate::isa::SimdTier;
  pub use crate::prefetch::HAVE_PREFETCH;
  pub use crate::probe::Attribute;
  pub use crate::probe::Builtin;
  pub use crate::probe::has_attribute;
  pub use crate::probe::has_builtin;
  pub use crate::probe::probe_attribute;
  pub use crate::probe::probe_builtin;
}

pub mod simd {
  //! SIMD capability tiers and the intrinsics they unlock.
  //!
  //! [`base`] exists only when [`BASE_SIMD`] is set, and [`extended`] only
  //! when [`EXTENDED_SIMD`] is set.

  pub use crate::isa::BASE_SIMD;
  pub use crate::isa::EXTENDED_SIMD;
  pub use crate::isa::SimdTier;
  pub use crate::isa::runtime_tier;

  #[cfg(swiss_simd_base)]
  pub use crate::isa::base;

  #[cfg(swiss_simd_extended)]
  pub use crate::isa::extended;
}

pub mod atomic {
  //! Relaxed atomic integers.

  pub use crate::counter::Atomic;
  pub use crate::counter::Counter;
  pub use crate::counter::Integer;
  pub use crate::counter::RelaxedAtomic;
  pub use crate::counter::increment;

  /// Atomically increments an atomic integer by one with relaxed ordering.
  ///
  /// # Examples
  ///
  /// ```
  /// use swiss_base::atomic::Atomic;
  /// use swiss_base::atomic::RelaxedAtomic;
  /// use swiss_base::atomic_inc;
  ///
  /// let seed: Atomic<usize> = <Atomic<usize> as RelaxedAtomic>::new_relaxed(0);
  ///
  /// atomic_inc!(seed);
  ///
  /// assert_eq!(seed.load_relaxed(), 1);
  /// ```
  #[macro_export]
  macro_rules! atomic_inc {
    ($atomic:expr $(,)?) => {
      $crate::atomic::increment(&$atomic)
    };
  }
}

pub mod hint {
  //! Optimizer hints. None of them change program behavior.

  pub use crate::branch::cold_path;
  pub use crate::branch::likely;
  pub use crate::branch::unlikely;
  pub use crate::prefetch::Locality;
  pub use crate::prefetch::prefetch;
}

#[doc(hidden)]
pub mod __private {
  pub use crate::check::check_failed;
}

#[doc(inline)]
pub use self::atomic::Counter;
