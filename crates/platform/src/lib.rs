//! CPU detection and capability configuration for rscity.
//!
//! This crate is the **single source of truth** for CPU feature detection
//! across the rscity workspace. Digest code never probes the CPU itself;
//! it asks this crate once and resolves its dispatch from the answer.
//!
//! # Core Types
//!
//! - [`Caps`]: What instructions can run on this machine
//! - [`OnceCache`]: One-time resolution cell for dispatch tables
//!
//! # Main Entry Point
//!
//! ```ignore
//! let caps = platform::caps();
//!
//! if caps.has(platform::caps::x86::CRC_READY) {
//!     // Use the crc32q word kernel
//! }
//! ```
//!
//! # Design
//!
//! 1. **One API**: Algorithms query [`caps()`] instead of doing ad-hoc detection.
//! 2. **Cached**: Runtime detection runs at most once (`OnceLock` with `std`,
//!    atomics without).
//! 3. **Overridable**: [`set_caps_override`] replaces detection for tests and
//!    for restricted or emulated execution contexts where probing is
//!    unreliable.
//! 4. **Miri-safe**: Under Miri, detection always reports no capabilities.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod cache;
pub mod caps;
mod detect;

pub use cache::OnceCache;
pub use caps::{Arch, Caps};

/// Get detected CPU capabilities.
///
/// This is the main entry point for capability-based dispatch. Detection runs
/// at most once per process; subsequent calls read the cached value. An
/// override set via [`set_caps_override`] takes precedence over detection.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::caps()
}

/// Set or clear the capabilities override.
///
/// When set, [`caps()`] returns the override value instead of detecting.
/// Pass `None` to clear the override and resume detection.
///
/// This is intended for tests and for environments where capability probing
/// is unreliable (restricted sandboxes, emulators, bare metal). Call it early,
/// before dispatch tables are resolved; already-resolved tables keep the
/// selection they were built with.
#[inline]
pub fn set_caps_override(value: Option<Caps>) {
  detect::set_caps_override(value);
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  detect::has_override()
}

/// Detect capabilities without caching.
///
/// Useful for diagnostics and for verifying the cached value in tests.
#[inline]
#[must_use]
pub fn detect_uncached() -> Caps {
  detect::detect_uncached()
}
