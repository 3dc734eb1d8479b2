//! Runtime CPU detection.
//!
//! This module provides the cached [`caps()`] entry point. It handles:
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (via CPUID on x86, auxv on ARM) with `std`
//! - Caching (`OnceLock` with `std`, atomic state machine without)
//! - User-supplied overrides for tests and restricted environments
//! - Miri fallback (always reports no capabilities)
//!
//! The override takes precedence over detection and, unlike the detection
//! result, may be set and cleared repeatedly: the probe result is one-time
//! configuration, the override is the explicit configuration hook layered on
//! top of it.

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::caps::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Override Support
// ─────────────────────────────────────────────────────────────────────────────

static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
static OVERRIDE_BITS: AtomicU64 = AtomicU64::new(0);

/// Set or clear the capabilities override.
pub fn set_caps_override(value: Option<Caps>) {
  match value {
    Some(caps) => {
      OVERRIDE_BITS.store(caps.0, Ordering::Release);
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => {
      OVERRIDE_SET.store(false, Ordering::Release);
    }
  }
}

/// Check if an override is currently set.
#[inline]
pub fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

#[inline]
fn get_override() -> Option<Caps> {
  if OVERRIDE_SET.load(Ordering::Acquire) {
    Some(Caps(OVERRIDE_BITS.load(Ordering::Acquire)))
  } else {
    None
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cache
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(feature = "std"))]
mod cache {
  use core::sync::atomic::{AtomicU8, AtomicU64, Ordering};

  use super::Caps;

  /// 0 = uninitialized, 1 = initializing, 2 = initialized
  static STATE: AtomicU8 = AtomicU8::new(0);
  static CACHED_BITS: AtomicU64 = AtomicU64::new(0);

  #[inline]
  pub fn get_or_init(f: fn() -> Caps) -> Caps {
    if STATE.load(Ordering::Acquire) == 2 {
      return Caps(CACHED_BITS.load(Ordering::Acquire));
    }

    match STATE.compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire) {
      Ok(_) => {
        let caps = f();
        CACHED_BITS.store(caps.0, Ordering::Release);
        STATE.store(2, Ordering::Release);
        caps
      }
      Err(_) => {
        while STATE.load(Ordering::Acquire) != 2 {
          core::hint::spin_loop();
        }
        Caps(CACHED_BITS.load(Ordering::Acquire))
      }
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main API
// ─────────────────────────────────────────────────────────────────────────────

/// Get detected CPU capabilities, cached after the first call.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  // Miri cannot interpret SIMD intrinsics, so always report none.
  #[cfg(miri)]
  {
    Caps::NONE
  }

  #[cfg(not(miri))]
  {
    if let Some(caps) = get_override() {
      return caps;
    }

    #[cfg(feature = "std")]
    {
      static CACHED: std::sync::OnceLock<Caps> = std::sync::OnceLock::new();
      *CACHED.get_or_init(detect_uncached)
    }

    #[cfg(not(feature = "std"))]
    {
      cache::get_or_init(detect_uncached)
    }
  }
}

/// Detect capabilities without caching.
#[inline]
#[must_use]
pub fn detect_uncached() -> Caps {
  #[cfg(target_arch = "x86_64")]
  {
    detect_x86_64()
  }

  #[cfg(target_arch = "x86")]
  {
    detect_x86()
  }

  #[cfg(target_arch = "aarch64")]
  {
    detect_aarch64()
  }

  #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
  {
    Caps::NONE
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86_64 detection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "x86_64")]
fn detect_x86_64() -> Caps {
  use crate::caps::x86;

  // SSE2 is baseline on x86_64.
  #[allow(unused_mut)]
  let mut caps = x86::SSE2;

  #[cfg(target_feature = "sse4.1")]
  {
    caps |= x86::SSE41;
  }

  #[cfg(target_feature = "sse4.2")]
  {
    caps |= x86::SSE42;
  }

  #[cfg(feature = "std")]
  {
    if std::arch::is_x86_feature_detected!("sse4.1") {
      caps |= x86::SSE41;
    }
    if std::arch::is_x86_feature_detected!("sse4.2") {
      caps |= x86::SSE42;
    }
  }

  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// x86 (32-bit) detection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "x86")]
fn detect_x86() -> Caps {
  use crate::caps::x86;

  #[allow(unused_mut)]
  let mut caps = Caps::NONE;

  #[cfg(target_feature = "sse2")]
  {
    caps |= x86::SSE2;
  }

  #[cfg(target_feature = "sse4.2")]
  {
    caps |= x86::SSE42;
  }

  #[cfg(feature = "std")]
  {
    if std::arch::is_x86_feature_detected!("sse2") {
      caps |= x86::SSE2;
    }
    if std::arch::is_x86_feature_detected!("sse4.2") {
      caps |= x86::SSE42;
    }
  }

  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64 detection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "aarch64")]
fn detect_aarch64() -> Caps {
  use crate::caps::aarch64;

  // NEON is baseline on AArch64.
  #[allow(unused_mut)]
  let mut caps = aarch64::NEON;

  #[cfg(target_feature = "crc")]
  {
    caps |= aarch64::CRC;
  }

  #[cfg(feature = "std")]
  {
    if std::arch::is_aarch64_feature_detected!("crc") {
      caps |= aarch64::CRC;
    }
  }

  caps
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn caps_is_stable() {
    let a = caps();
    let b = caps();
    assert_eq!(a, b);
  }

  #[test]
  fn detect_uncached_is_deterministic() {
    assert_eq!(detect_uncached(), detect_uncached());
  }

  #[test]
  #[cfg(all(target_arch = "x86_64", not(miri)))]
  fn x86_64_baseline() {
    assert!(caps().has(crate::caps::x86::SSE2));
  }

  #[test]
  #[cfg(all(target_arch = "aarch64", not(miri)))]
  fn aarch64_baseline() {
    assert!(caps().has(crate::caps::aarch64::NEON));
  }

  #[test]
  #[cfg(miri)]
  fn miri_reports_none() {
    assert_eq!(caps(), Caps::NONE);
  }

  // Override set/clear is exercised in the hashes crate's capability-gating
  // integration test, which runs in its own process; twiddling the global
  // override here would race with the other tests in this binary.
  #[test]
  fn has_override_api() {
    let _ = has_override();
  }
}
