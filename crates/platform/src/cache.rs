//! One-time resolution cell for dispatch tables.
//!
//! Dispatch tables are resolved once per process (capability probe → kernel
//! selection) and read on every digest call. [`OnceCache`] provides that with
//! `std::sync::OnceLock` semantics while still working on `no_std` targets.
//!
//! # Caching Strategy
//!
//! - **std**: `OnceLock`
//! - **no_std with atomics**: atomic state machine over an `UnsafeCell`
//! - **no_std without atomics**: per-call computation (single-threaded targets)

#[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
use core::cell::UnsafeCell;
#[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
use core::mem::MaybeUninit;

/// A cache holding a resolved dispatch value.
///
/// - Zero-cost after first initialization
/// - Thread-safe on targets with atomics; the initializer runs at most once
/// - Falls back to per-call computation on targets without atomics
pub struct OnceCache<T: Copy> {
  #[cfg(feature = "std")]
  inner: std::sync::OnceLock<T>,

  #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
  state: core::sync::atomic::AtomicU8,
  #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
  value: UnsafeCell<MaybeUninit<T>>,

  #[cfg(all(not(feature = "std"), not(target_has_atomic = "ptr")))]
  _marker: core::marker::PhantomData<*const T>,
}

// SAFETY: On std the OnceLock handles synchronization; on no_std with atomics
// the state machine does; no-atomic targets are single-threaded.
#[allow(unsafe_code)]
#[cfg(any(feature = "std", target_has_atomic = "ptr"))]
unsafe impl<T: Copy + Send + Sync> Send for OnceCache<T> {}
#[allow(unsafe_code)]
#[cfg(any(feature = "std", target_has_atomic = "ptr"))]
unsafe impl<T: Copy + Send + Sync> Sync for OnceCache<T> {}

impl<T: Copy> OnceCache<T> {
  #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
  const UNINIT: u8 = 0;
  #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
  const INITING: u8 = 1;
  #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
  const READY: u8 = 2;

  /// Create a new empty cache.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      #[cfg(feature = "std")]
      inner: std::sync::OnceLock::new(),

      #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
      state: core::sync::atomic::AtomicU8::new(0),
      #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
      value: UnsafeCell::new(MaybeUninit::uninit()),

      #[cfg(all(not(feature = "std"), not(target_has_atomic = "ptr")))]
      _marker: core::marker::PhantomData,
    }
  }

  /// Get the cached value, initializing with `f` if not yet set.
  #[inline]
  pub fn get_or_init(&self, f: impl FnOnce() -> T) -> T {
    #[cfg(feature = "std")]
    {
      *self.inner.get_or_init(f)
    }

    #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
    {
      use core::sync::atomic::Ordering;

      let state = self.state.load(Ordering::Acquire);
      if state == Self::READY {
        // SAFETY: value is initialized when state is READY.
        #[allow(unsafe_code)]
        return unsafe { (*self.value.get()).assume_init() };
      }

      if state == Self::UNINIT
        && self
          .state
          .compare_exchange(Self::UNINIT, Self::INITING, Ordering::AcqRel, Ordering::Acquire)
          .is_ok()
      {
        let value = f();
        // SAFETY: we hold exclusive access during the INITING state.
        #[allow(unsafe_code)]
        unsafe {
          (*self.value.get()).write(value);
        }
        self.state.store(Self::READY, Ordering::Release);
        return value;
      }

      while self.state.load(Ordering::Acquire) != Self::READY {
        core::hint::spin_loop();
      }
      // SAFETY: value is initialized when state is READY.
      #[allow(unsafe_code)]
      unsafe {
        (*self.value.get()).assume_init()
      }
    }

    #[cfg(all(not(feature = "std"), not(target_has_atomic = "ptr")))]
    {
      f()
    }
  }
}

impl<T: Copy> Default for OnceCache<T> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn caches_first_value() {
    static CACHE: OnceCache<u64> = OnceCache::new();

    let first = CACHE.get_or_init(|| 42);
    assert_eq!(first, 42);

    let second = CACHE.get_or_init(|| 99);
    assert_eq!(second, 42);
  }

  #[test]
  fn works_with_fn_pointers() {
    fn double(x: u32) -> u32 {
      x * 2
    }

    static CACHE: OnceCache<fn(u32) -> u32> = OnceCache::new();
    let f = CACHE.get_or_init(|| double as fn(u32) -> u32);
    assert_eq!(f(21), 42);
  }
}
