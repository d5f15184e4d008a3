//! Relaxed atomic counters.
//!
//! The table engine uses a shared counter as a weak entropy source (for
//! example, to perturb insertion order). Increments are atomic, so no update
//! is ever lost, but they use [`Relaxed`] ordering and must never be used to
//! publish other memory.
//!
//! [`Relaxed`]: core::sync::atomic::Ordering::Relaxed

use core::fmt::Debug;
use core::fmt::Formatter;
use core::fmt::Result;

#[cfg(target_has_atomic = "64")]
use crate::sync::atomic::AtomicU64;
use crate::sync::atomic::AtomicU32;
use crate::sync::atomic::AtomicUsize;
use crate::sync::atomic::Ordering::Relaxed;

mod private {
  pub trait Sealed {}
}

use private::Sealed;

// -----------------------------------------------------------------------------
// Integer <-> Atomic Mapping
// -----------------------------------------------------------------------------

/// An integer type with a matching atomic type.
///
/// Implemented for [`u32`], [`u64`] and [`usize`]. This trait is sealed.
pub trait Integer: Copy + Debug + Send + Sync + Sealed + 'static {
  /// The atomic version of `Self`.
  type Atomic: RelaxedAtomic<Value = Self>;
}

/// Names the atomic version of an integer type.
///
/// Under `cfg(loom)` or `cfg(shuttle)` this resolves to the model checker's
/// atomic type instead of [`core::sync::atomic`].
pub type Atomic<T> = <T as Integer>::Atomic;

/// Relaxed operations on an atomic integer.
///
/// This trait is sealed.
pub trait RelaxedAtomic: Send + Sync + Sealed {
  /// The integer type stored by the atomic.
  type Value: Copy;

  /// Creates a new atomic holding `value`.
  fn new_relaxed(value: Self::Value) -> Self;

  /// Atomically adds one, wrapping on overflow, and returns the previous value.
  fn fetch_increment(&self) -> Self::Value;

  /// Loads the current value with relaxed ordering.
  fn load_relaxed(&self) -> Self::Value;
}

macro_rules! relaxed_atomic {
  ($value:ty, $atomic:ty) => {
    impl Sealed for $value {}
    impl Sealed for $atomic {}

    impl Integer for $value {
      type Atomic = $atomic;
    }

    impl RelaxedAtomic for $atomic {
      type Value = $value;

      #[inline]
      fn new_relaxed(value: Self::Value) -> Self {
        <$atomic>::new(value)
      }

      #[inline]
      fn fetch_increment(&self) -> Self::Value {
        self.fetch_add(1, Relaxed)
      }

      #[inline]
      fn load_relaxed(&self) -> Self::Value {
        self.load(Relaxed)
      }
    }
  };
}

relaxed_atomic!(u32, AtomicU32);
#[cfg(target_has_atomic = "64")]
relaxed_atomic!(u64, AtomicU64);
relaxed_atomic!(usize, AtomicUsize);

/// Atomically increments `atomic` by one with relaxed ordering.
///
/// The result is discarded; see [`RelaxedAtomic::fetch_increment`] to observe
/// it. Also available as [`atomic_inc!`].
///
/// [`atomic_inc!`]: crate::atomic_inc
#[inline]
pub fn increment<A>(atomic: &A)
where
  A: RelaxedAtomic,
{
  _ = atomic.fetch_increment();
}

// -----------------------------------------------------------------------------
// Counter
// -----------------------------------------------------------------------------

/// A caller-owned, relaxed atomic counter.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use swiss_base::Counter;
///
/// let counter: Arc<Counter> = Arc::new(Counter::new(0));
///
/// let handles: Vec<_> = (0..4)
///   .map(|_| {
///     let counter = Arc::clone(&counter);
///     thread::spawn(move || counter.increment())
///   })
///   .collect();
///
/// for handle in handles {
///   handle.join().unwrap();
/// }
///
/// assert_eq!(counter.load(), 4);
/// ```
#[repr(transparent)]
pub struct Counter<T = usize>
where
  T: Integer,
{
  inner: Atomic<T>,
}

impl<T> Counter<T>
where
  T: Integer,
{
  /// Creates a new counter starting at `value`.
  #[inline]
  pub fn new(value: T) -> Self {
    Self {
      inner: <Atomic<T> as RelaxedAtomic>::new_relaxed(value),
    }
  }

  /// Increments the counter and discards the result.
  #[inline]
  pub fn increment(&self) {
    increment(&self.inner);
  }

  /// Increments the counter and returns the previous value.
  ///
  /// Concurrent callers always observe distinct values until the counter
  /// wraps, which makes this usable as a cheap per-call seed.
  #[inline]
  pub fn fetch_increment(&self) -> T {
    self.inner.fetch_increment()
  }

  /// Returns the current value.
  ///
  /// The load is relaxed: it says nothing about any other memory.
  #[inline]
  pub fn load(&self) -> T {
    self.inner.load_relaxed()
  }

  /// Returns a reference to the underlying atomic.
  #[inline]
  pub fn as_atomic(&self) -> &Atomic<T> {
    &self.inner
  }

  /// Consumes the counter, returning its value.
  #[inline]
  pub fn into_inner(self) -> T {
    self.load()
  }
}

impl<T> Debug for Counter<T>
where
  T: Integer,
{
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.debug_tuple("Counter").field(&self.load()).finish()
  }
}

impl<T> Default for Counter<T>
where
  T: Integer + Default,
{
  #[inline]
  fn default() -> Self {
    Self::new(T::default())
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
