//! aarch64-accelerated CRC32-C (Castagnoli).
//!
//! Uses the ARMv8 CRC32 extension (`crc32c*` instructions).
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

#[cfg(any(target_feature = "crc", feature = "std"))]
use core::arch::aarch64::{__crc32cb, __crc32cd};

/// Compute CRC32-C over a byte slice using the ARMv8 CRC32 extension.
///
/// # Safety
/// Caller must ensure the CPU supports the `crc` target feature.
#[cfg(any(target_feature = "crc", feature = "std"))]
#[target_feature(enable = "crc")]
pub(crate) unsafe fn compute_crc_unchecked(crc: u32, data: &[u8]) -> u32 {
  let mut current = crc;

  let mut chunks = data.chunks_exact(8);
  for chunk in chunks.by_ref() {
    // SAFETY: `chunks_exact(8)` guarantees 8 readable bytes; `read_unaligned`
    // supports unaligned loads.
    let v = unsafe { core::ptr::read_unaligned(chunk.as_ptr() as *const u64) };
    current = __crc32cd(current, u64::from_le(v));
  }

  for &byte in chunks.remainder() {
    current = __crc32cb(current, byte);
  }

  current
}

/// Fold the eight little-endian bytes of `v` into `crc` with `crc32cd`.
///
/// # Safety
/// Caller must ensure the CPU supports the `crc` target feature.
#[cfg(any(target_feature = "crc", feature = "std"))]
#[target_feature(enable = "crc")]
pub(crate) unsafe fn word_crc_unchecked(crc: u64, v: u64) -> u64 {
  __crc32cd(crc as u32, v) as u64
}

/// Compute CRC32-C using the `crc` target feature when it is enabled at
/// compile time.
#[cfg(target_feature = "crc")]
#[inline]
pub(crate) fn compute_crc_enabled(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: this function is only compiled when `target_feature="crc"`.
  unsafe { compute_crc_unchecked(crc, data) }
}

/// Runtime-gated slice kernel, coercible to a plain function pointer.
#[cfg(any(target_feature = "crc", feature = "std"))]
#[inline]
#[allow(dead_code)] // Unused when the crc extension is enabled at compile time.
pub(crate) fn compute_crc(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: selected only when the capability probe reports the crc extension.
  unsafe { compute_crc_unchecked(crc, data) }
}

/// Runtime-gated word kernel, coercible to a plain function pointer.
#[cfg(any(target_feature = "crc", feature = "std"))]
#[inline]
pub(crate) fn word_crc(crc: u64, v: u64) -> u64 {
  // SAFETY: selected only when the capability probe reports the crc extension.
  unsafe { word_crc_unchecked(crc, v) }
}
