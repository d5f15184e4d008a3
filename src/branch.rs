//! Branch-prediction and inlining hints.
//!
//! Every hint here is semantically an identity. When the toolchain does not
//! support the underlying builtin or attribute, the hint is exactly the
//! unmodified expression or item.

// -----------------------------------------------------------------------------
// Branch Prediction
// -----------------------------------------------------------------------------

/// Marks the current code path as unlikely to be taken.
#[cfg(swiss_builtin_expect)]
#[cold]
#[inline]
pub fn cold_path() {}

/// Marks the current code path as unlikely to be taken.
#[cfg(not(swiss_builtin_expect))]
#[inline(always)]
pub fn cold_path() {}

/// Hints that `b` is usually `true`. Returns `b` unchanged.
///
/// # Examples
///
/// ```
/// use swiss_base::hint::likely;
///
/// assert!(likely(true));
/// assert!(!likely(false));
/// ```
#[cfg(swiss_builtin_expect)]
#[inline(always)]
pub fn likely(b: bool) -> bool {
  if !b {
    cold_path();
  }

  b
}

/// Hints that `b` is usually `false`. Returns `b` unchanged.
///
/// # Examples
///
/// ```
/// use swiss_base::hint::unlikely;
///
/// assert!(unlikely(true));
/// assert!(!unlikely(false));
/// ```
#[cfg(swiss_builtin_expect)]
#[inline(always)]
pub fn unlikely(b: bool) -> bool {
  if b {
    cold_path();
  }

  b
}

/// Hints that `b` is usually `true`. Returns `b` unchanged.
#[cfg(not(swiss_builtin_expect))]
#[inline(always)]
pub fn likely(b: bool) -> bool {
  b
}

/// Hints that `b` is usually `false`. Returns `b` unchanged.
#[cfg(not(swiss_builtin_expect))]
#[inline(always)]
pub fn unlikely(b: bool) -> bool {
  b
}

/// Expression form of [`likely`].
///
/// [`likely`]: crate::hint::likely
#[macro_export]
macro_rules! likely {
  ($cond:expr $(,)?) => {
    $crate::hint::likely($cond)
  };
}

/// Expression form of [`unlikely`].
///
/// [`unlikely`]: crate::hint::unlikely
#[macro_export]
macro_rules! unlikely {
  ($cond:expr $(,)?) => {
    $crate::hint::unlikely($cond)
  };
}

// -----------------------------------------------------------------------------
// Inlining
// -----------------------------------------------------------------------------

/// Marks each function as `#[inline(always)]`.
///
/// Only functions are accepted; any other item is rejected when the macro is
/// expanded. Expands to the functions unchanged if the attribute is
/// unavailable.
///
/// # Examples
///
/// ```
/// swiss_base::always_inline! {
///   fn h2(hash: u64) -> u8 {
///     (hash & 0x7F) as u8
///   }
/// }
///
/// assert_eq!(h2(0xFF), 0x7F);
/// ```
///
/// Anything but a function fails to match:
///
/// ```compile_fail
/// swiss_base::always_inline! {
///   struct Group([u8; 16]);
/// }
/// ```
#[cfg(swiss_attr_always_inline)]
#[macro_export]
macro_rules! always_inline {
  ($($tokens:tt)*) => {
    $crate::__inline_fns! { [#[inline(always)]] $($tokens)* }
  };
}

/// Marks each function as `#[inline(always)]`.
///
/// Only functions are accepted; any other item is rejected when the macro is
/// expanded. Expands to the functions unchanged if the attribute is
/// unavailable.
///
/// ```compile_fail
/// swiss_base::always_inline! {
///   struct Group([u8; 16]);
/// }
/// ```
#[cfg(not(swiss_attr_always_inline))]
#[macro_export]
macro_rules! always_inline {
  ($($tokens:tt)*) => {
    $crate::__inline_fns! { [] $($tokens)* }
  };
}

/// Marks each function as `#[inline(never)]`.
///
/// Only functions are accepted; any other item is rejected when the macro is
/// expanded. Expands to the functions unchanged if the attribute is
/// unavailable.
///
/// # Examples
///
/// ```
/// swiss_base::never_inline! {
///   fn should_insert_backwards(hash: usize, seed: usize) -> bool {
///     (hash ^ seed) % 13 > 6
///   }
/// }
///
/// assert!(!should_insert_backwards(0, 0));
/// ```
#[cfg(swiss_attr_noinline)]
#[macro_export]
macro_rules! never_inline {
  ($($tokens:tt)*) => {
    $crate::__inline_fns! { [#[inline(never)]] $($tokens)* }
  };
}

/// Marks each function as `#[inline(never)]`.
///
/// Only functions are accepted; any other item is rejected when the macro is
/// expanded. Expands to the functions unchanged if the attribute is
/// unavailable.
#[cfg(not(swiss_attr_noinline))]
#[macro_export]
macro_rules! never_inline {
  ($($tokens:tt)*) => {
    $crate::__inline_fns! { [] $($tokens)* }
  };
}

// Splits a list of functions and applies the bracketed attributes to each.
#[doc(hidden)]
#[macro_export]
macro_rules! __inline_fns {
  ([$(#[$hint:meta])*]) => {};
  ([$(#[$hint:meta])*] $(#[$meta:meta])* $vis:vis fn $name:ident $($rest:tt)*) => {
    $crate::__inline_fn! { [$(#[$hint])*] [$(#[$meta])* $vis fn $name] $($rest)* }
  };
  ([$(#[$hint:meta])*] $(#[$meta:meta])* $vis:vis const fn $name:ident $($rest:tt)*) => {
    $crate::__inline_fn! { [$(#[$hint])*] [$(#[$meta])* $vis const fn $name] $($rest)* }
  };
  ([$(#[$hint:meta])*] $(#[$meta:meta])* $vis:vis unsafe fn $name:ident $($rest:tt)*) => {
    $crate::__inline_fn! { [$(#[$hint])*] [$(#[$meta])* $vis unsafe fn $name] $($rest)* }
  };
}

// Collects a signature up to the function body.
#[doc(hidden)]
#[macro_export]
macro_rules! __inline_fn {
  ([$(#[$hint:meta])*] [$($sig:tt)*] { $($body:tt)* } $($rest:tt)*) => {
    $(#[$hint])*
    $($sig)* { $($body)* }

    $crate::__inline_fns! { [$(#[$hint])*] $($rest)* }
  };
  ([$(#[$hint:meta])*] [$($sig:tt)*] $next:tt $($rest:tt)*) => {
    $crate::__inline_fn! { [$(#[$hint])*] [$($sig)* $next] $($rest)* }
  };
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
