//! Fast non-cryptographic digests: CityHash and FarmHash (**NOT CRYPTO**).
//!
//! `rscity` computes fixed-width digests (32, 64, 128, and 256 bits) over
//! byte slices, for hash tables, sharding, deduplication, and
//! fingerprinting. Digests are pure functions of `(bytes, seed)`, identical
//! on every platform and under every internal kernel, with no security
//! guarantee against adversarial input.
//!
//! # Quick Start
//!
//! ```
//! // Family A (CityHash) under the flat functions:
//! let h64 = rscity::hash64(b"hello world");
//! assert_eq!(h64, rscity::hash64(b"hello world"));
//!
//! let (lo, hi) = rscity::hash128(b"hello world");
//! assert_ne!((lo, hi), (0, 0));
//!
//! // Family B (FarmHash), fingerprint-stable:
//! let f64 = rscity::farm::hash64(b"hello world");
//! let _ = (h64, f64);
//! ```
//!
//! # Checksum-accelerated digests
//!
//! [`hash256`] and [`hash128_crc`] mix with the CRC32-C word instruction.
//! `hash256` always completes (a portable table kernel stands in when the
//! instruction is absent, with identical output). `hash128_crc` is
//! capability-gated: long inputs fail with [`CapabilityError`] unless the
//! hardware is present or the caller explicitly requests the fallback via
//! [`hash128_crc_with_fallback`].
//!
//! ```
//! if rscity::supports_accelerated_checksum() {
//!   let digest = rscity::hash128_crc(b"...").unwrap();
//!   let _ = digest;
//! }
//! let total = rscity::hash128_crc_with_fallback(b"...");
//! let _ = total;
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | Runtime CPU detection for kernel dispatch |
//!
//! ## `no_std` Usage
//!
//! ```toml
//! [dependencies]
//! rscity = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std`, hardware kernels are selected only when the matching
//! target feature is enabled at compile time.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(feature = "std"), no_std)]

pub use checksum::{Crc32c, Crc32cKernel, WordCrc};
pub use hashes::{CapabilityError, City32, City64, City128, FastHash, Farm32, Farm64, Farm128, city};
pub use platform::{Caps, has_override, set_caps_override};

// =============================================================================
// Family A (CityHash): the flat digest surface
// =============================================================================

/// 32-bit digest of `buffer`.
#[inline]
#[must_use]
pub fn hash32(buffer: &[u8]) -> u32 {
  city::hash32(buffer)
}

/// 64-bit digest of `buffer`.
#[inline]
#[must_use]
pub fn hash64(buffer: &[u8]) -> u64 {
  city::hash64(buffer)
}

/// 64-bit digest of `buffer`, perturbed by one seed.
#[inline]
#[must_use]
pub fn hash64_seed(buffer: &[u8], seed: u64) -> u64 {
  city::hash64_with_seed(buffer, seed)
}

/// 64-bit digest of `buffer`, perturbed by two seeds.
#[inline]
#[must_use]
pub fn hash64_seeds(buffer: &[u8], seed0: u64, seed1: u64) -> u64 {
  city::hash64_with_seeds(buffer, seed0, seed1)
}

/// 128-bit digest of `buffer`, as `(low, high)` words.
#[inline]
#[must_use]
pub fn hash128(buffer: &[u8]) -> (u64, u64) {
  city::hash128(buffer)
}

/// 128-bit digest of `buffer`, perturbed by a seed pair.
#[inline]
#[must_use]
pub fn hash128_seed(buffer: &[u8], seed0: u64, seed1: u64) -> (u64, u64) {
  city::hash128_with_seed(buffer, (seed0, seed1))
}

/// 256-bit digest of `buffer`, as four 64-bit words.
///
/// Total on every platform: the CRC word kernel resolves to hardware when
/// available and to the portable table otherwise, with identical digests.
#[inline]
#[must_use]
pub fn hash256(buffer: &[u8]) -> (u64, u64, u64, u64) {
  city::crc::hash256(buffer)
}

/// Checksum-accelerated 128-bit digest of `buffer`.
///
/// A distinct function from [`hash128`], with its own output values.
///
/// # Errors
///
/// Returns [`CapabilityError`] when the input is long enough to need the
/// hardware CRC instruction, the instruction is absent, and no fallback was
/// requested. Callers that want portability use
/// [`hash128_crc_with_fallback`] instead of relying on implicit detection.
#[inline]
pub fn hash128_crc(buffer: &[u8]) -> Result<(u64, u64), CapabilityError> {
  city::crc::hash128_crc(buffer)
}

/// [`hash128_crc`] with the software fallback explicitly requested. Total.
#[inline]
#[must_use]
pub fn hash128_crc_with_fallback(buffer: &[u8]) -> (u64, u64) {
  city::crc::hash128_crc_with(&WordCrc::resolve(), buffer)
}

/// Whether the hardware CRC32-C word instruction is available.
///
/// For collaborators (e.g. a binding layer) that want to choose behavior
/// before calling [`hash128_crc`].
#[inline]
#[must_use]
pub fn supports_accelerated_checksum() -> bool {
  checksum::hardware_available()
}

// =============================================================================
// Family B (FarmHash)
// =============================================================================

/// FarmHash: one stable digest function per output width.
pub mod farm {
  pub use hashes::farm::{hash32, hash32_with_seed, hash64, hash64_with_seed, hash64_with_seeds, hash128,
    hash128_with_seed};

  /// 32-bit digest of `buffer`, perturbed by a seed.
  #[inline]
  #[must_use]
  pub fn hash32_seed(buffer: &[u8], seed: u32) -> u32 {
    hash32_with_seed(buffer, seed)
  }

  /// 64-bit digest of `buffer`, perturbed by one seed.
  #[inline]
  #[must_use]
  pub fn hash64_seed(buffer: &[u8], seed: u64) -> u64 {
    hash64_with_seed(buffer, seed)
  }

  /// 64-bit digest of `buffer`, perturbed by two seeds.
  #[inline]
  #[must_use]
  pub fn hash64_seeds(buffer: &[u8], seed0: u64, seed1: u64) -> u64 {
    hash64_with_seeds(buffer, seed0, seed1)
  }

  /// 128-bit digest of `buffer`, perturbed by a seed pair.
  #[inline]
  #[must_use]
  pub fn hash128_seed(buffer: &[u8], seed0: u64, seed1: u64) -> (u64, u64) {
    hash128_with_seed(buffer, (seed0, seed1))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flat_surface_delegates_to_city() {
    let data = b"the quick brown fox jumps over the lazy dog";
    assert_eq!(hash32(data), city::hash32(data));
    assert_eq!(hash64(data), city::hash64(data));
    assert_eq!(hash64_seed(data, 7), city::hash64_with_seed(data, 7));
    assert_eq!(hash64_seeds(data, 7, 8), city::hash64_with_seeds(data, 7, 8));
    assert_eq!(hash128(data), city::hash128(data));
    assert_eq!(hash128_seed(data, 7, 8), city::hash128_with_seed(data, (7, 8)));
    assert_eq!(hash256(data), city::crc::hash256(data));
  }

  #[test]
  fn empty_buffer_is_valid_input() {
    let _ = hash32(b"");
    let _ = hash64(b"");
    let _ = hash128(b"");
    let _ = hash256(b"");
    assert!(hash128_crc(b"").is_ok());
  }

  #[test]
  fn crc_gate_agrees_with_capability_query() {
    let data = vec![0x5Au8; 4096];
    match hash128_crc(&data) {
      Ok(digest) => {
        assert!(supports_accelerated_checksum());
        assert_eq!(digest, hash128_crc_with_fallback(&data));
      }
      Err(_) => assert!(!supports_accelerated_checksum()),
    }
  }

  #[test]
  fn families_are_distinct_at_64_bits() {
    let data = vec![0x33u8; 256];
    assert_ne!(hash64(&data), farm::hash64(&data));
  }
}
