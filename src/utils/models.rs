#[cfg(all(loom, shuttle))]
compile_error!("cannot use loom and shuttle at once");

#[cfg(not(any(loom, shuttle)))]
pub(crate) mod sync {
  pub(crate) mod atomic {
    pub(crate) use ::core::sync::atomic::AtomicU32;
    #[cfg(target_has_atomic = "64")]
    pub(crate) use ::core::sync::atomic::AtomicU64;
    pub(crate) use ::core::sync::atomic::AtomicUsize;
    pub(crate) use ::core::sync::atomic::Ordering;
  }
}

#[cfg(loom)]
pub(crate) mod sync {
  pub(crate) mod atomic {
    pub(crate) use ::loom::sync::atomic::AtomicU32;
    #[cfg(target_has_atomic = "64")]
    pub(crate) use ::loom::sync::atomic::AtomicU64;
    pub(crate) use ::loom::sync::atomic::AtomicUsize;
    pub(crate) use ::loom::sync::atomic::Ordering;
  }
}

#[cfg(shuttle)]
pub(crate) mod sync {
  pub(crate) mod atomic {
    pub(crate) use ::shuttle::sync::atomic::AtomicU32;
    #[cfg(target_has_atomic = "64")]
    pub(crate) use ::shuttle::sync::atomic::AtomicU64;
    pub(crate) use ::shuttle::sync::atomic::AtomicUsize;
    pub(crate) use ::shuttle::sync::atomic::Ordering;
  }
}
