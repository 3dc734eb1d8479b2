//! Fast non-cryptographic hash traits (**NOT CRYPTO**).

use core::fmt::Debug;

/// A fast non-cryptographic hash.
///
/// These hashes are suitable for hash tables, sharding, deduplication, and
/// fingerprinting in non-adversarial settings. They are **not** suitable for
/// signatures, MACs, password hashing, or untrusted inputs where collision
/// attacks matter.
///
/// This trait is intentionally one-shot: the City/Farm families are defined
/// over a fully materialized buffer, and their length-dispatched code paths
/// read both ends of the input up front. Streaming would change the digest.
pub trait FastHash {
  /// Output size in bytes.
  const OUTPUT_SIZE: usize;

  /// Hash output type.
  type Output: Copy + Eq + Debug + Default;

  /// Seed type (`u64`, `u32`, or a pair of `u64` for the 128-bit forms).
  type Seed: Copy + Debug + Default;

  /// Compute the hash of `data` using the algorithm's default seed.
  #[inline]
  #[must_use]
  fn hash(data: &[u8]) -> Self::Output {
    Self::hash_with_seed(Self::Seed::default(), data)
  }

  /// Compute the hash of `data` using `seed`.
  #[must_use]
  fn hash_with_seed(seed: Self::Seed, data: &[u8]) -> Self::Output;
}
