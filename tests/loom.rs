#![cfg(loom)]

use loom::sync::Arc;
use loom::thread;
use loom::thread::JoinHandle;
use std::ops::Deref;

use swiss_base::Counter;
use swiss_base::atomic::Atomic;
use swiss_base::atomic::RelaxedAtomic;
use swiss_base::atomic_inc;

type Increment = JoinHandle<()>;
type Fetch = JoinHandle<usize>;

struct LoomCounter {
  inner: Arc<Counter>,
}

impl LoomCounter {
  fn new(value: usize) -> Self {
    Self {
      inner: Arc::new(Counter::new(value)),
    }
  }

  fn spawn_increment(&self) -> Increment {
    let counter: Arc<Counter> = Arc::clone(&self.inner);
    thread::spawn(move || counter.increment())
  }

  fn spawn_fetch(&self) -> Fetch {
    let counter: Arc<Counter> = Arc::clone(&self.inner);
    thread::spawn(move || counter.fetch_increment())
  }
}

impl Deref for LoomCounter {
  type Target = Counter;

  #[inline]
  fn deref(&self) -> &Self::Target {
    &self.inner
  }
}

#[test]
fn test_increment() {
  loom::model(|| {
    let counter: LoomCounter = LoomCounter::new(0);

    let thread_a: Increment = counter.spawn_increment();
    let thread_b: Increment = counter.spawn_increment();

    thread_a.join().unwrap();
    thread_b.join().unwrap();

    assert_eq!(counter.load(), 2);
  });
}

#[test]
fn test_increment_local() {
  loom::model(|| {
    let counter: LoomCounter = LoomCounter::new(10);

    let thread_a: Increment = counter.spawn_increment();
    counter.increment();

    thread_a.join().unwrap();

    assert_eq!(counter.load(), 12);
  });
}

#[test]
fn test_fetch_unique() {
  loom::model(|| {
    let counter: LoomCounter = LoomCounter::new(0);

    let thread_a: Fetch = counter.spawn_fetch();
    let thread_b: Fetch = counter.spawn_fetch();

    let seen_a: usize = thread_a.join().unwrap();
    let seen_b: usize = thread_b.join().unwrap();

    assert_ne!(seen_a, seen_b, "each increment observes a distinct value");
    assert_eq!(seen_a + seen_b, 1);
    assert_eq!(counter.load(), 2);
  });
}

#[test]
fn test_fetch_mixed() {
  loom::model(|| {
    let counter: LoomCounter = LoomCounter::new(0);

    let fetch: Fetch = counter.spawn_fetch();
    let increment: Increment = counter.spawn_increment();

    let seen: usize = fetch.join().unwrap();
    increment.join().unwrap();

    assert!(seen <= 1);
    assert_eq!(counter.load(), 2);
  });
}

#[test]
fn test_macro() {
  loom::model(|| {
    let seed: Arc<Atomic<u32>> = Arc::new(<Atomic<u32> as RelaxedAtomic>::new_relaxed(0));
    let other: Arc<Atomic<u32>> = Arc::clone(&seed);

    let thread_a: Increment = thread::spawn(move || atomic_inc!(*other));
    atomic_inc!(*seed);

    thread_a.join().unwrap();

    assert_eq!(seed.load_relaxed(), 2);
  });
}
