//! x86_64-accelerated CRC32-C (Castagnoli).
//!
//! Uses SSE4.2 `crc32` instructions (CRC32-C polynomial).
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

#[cfg(any(target_feature = "sse4.2", feature = "std"))]
use core::arch::x86_64::{_mm_crc32_u8, _mm_crc32_u64};

/// Compute CRC32-C over a byte slice using SSE4.2 `crc32` instructions.
///
/// # Safety
/// Caller must ensure the CPU supports the `sse4.2` target feature.
#[cfg(any(target_feature = "sse4.2", feature = "std"))]
#[target_feature(enable = "sse4.2")]
pub(crate) unsafe fn compute_sse42_unchecked(crc: u32, data: &[u8]) -> u32 {
  let mut current = crc as u64;

  let mut chunks = data.chunks_exact(8);
  for chunk in chunks.by_ref() {
    // SAFETY: `chunks_exact(8)` guarantees 8 readable bytes; `read_unaligned`
    // supports unaligned loads.
    let v = unsafe { core::ptr::read_unaligned(chunk.as_ptr() as *const u64) };
    current = _mm_crc32_u64(current, u64::from_le(v));
  }

  let mut current = current as u32;
  for &byte in chunks.remainder() {
    current = _mm_crc32_u8(current, byte);
  }

  current
}

/// Fold the eight little-endian bytes of `v` into `crc` with `crc32q`.
///
/// # Safety
/// Caller must ensure the CPU supports the `sse4.2` target feature.
#[cfg(any(target_feature = "sse4.2", feature = "std"))]
#[target_feature(enable = "sse4.2")]
pub(crate) unsafe fn word_sse42_unchecked(crc: u64, v: u64) -> u64 {
  _mm_crc32_u64(crc, v)
}

/// Compute CRC32-C using SSE4.2 when it is enabled at compile time.
#[cfg(target_feature = "sse4.2")]
#[inline]
pub(crate) fn compute_sse42_enabled(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: this function is only compiled when `target_feature="sse4.2"`.
  unsafe { compute_sse42_unchecked(crc, data) }
}

/// Runtime-gated slice kernel, coercible to a plain function pointer.
#[cfg(any(target_feature = "sse4.2", feature = "std"))]
#[inline]
#[allow(dead_code)] // Unused when sse4.2 is enabled at compile time.
pub(crate) fn compute_sse42(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: selected only when the capability probe reports sse4.2.
  unsafe { compute_sse42_unchecked(crc, data) }
}

/// Runtime-gated word kernel, coercible to a plain function pointer.
#[cfg(any(target_feature = "sse4.2", feature = "std"))]
#[inline]
pub(crate) fn word_sse42(crc: u64, v: u64) -> u64 {
  // SAFETY: selected only when the capability probe reports sse4.2.
  unsafe { word_sse42_unchecked(crc, v) }
}
