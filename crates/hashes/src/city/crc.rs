//! Checksum-accelerated CityHash variants (**NOT CRYPTO**).
//!
//! These digests mix with the CRC32-C word instruction through the
//! [`WordCrc`] capability interface. They are distinct functions with their
//! own output values, not accelerated renditions of the plain 128-bit
//! digest.
//!
//! Capability policy:
//!
//! - [`hash256`] always completes: it resolves the hardware kernel when the
//!   probe reports it and the portable table kernel otherwise. Both kernels
//!   compute CRC32-C exactly, so the digest is identical either way.
//! - [`hash128_crc`] requires the hardware kernel for long inputs and
//!   returns [`CapabilityError`] when it is absent. Callers that want
//!   portability pass an explicitly chosen kernel to [`hash128_crc_with`]
//!   instead of relying on implicit detection.

#![allow(clippy::indexing_slicing)] // Fixed 240-byte scratch and 40-byte chunk offsets.
#![allow(clippy::many_single_char_names)] // Register naming follows the published algorithm.

use checksum::WordCrc;
use traits::CapabilityError;

use crate::common::{K0, fetch64, hash_len_16, shift_mix};

/// Inputs at or below this length take the ordinary 128-bit combiner path.
const CRC128_SHORT_MAX: usize = 900;

/// The 256-bit path consumes the input in iterations of this many bytes,
/// six 40-byte chunks each.
const ITER_LEN: usize = 240;

macro_rules! permute3 {
  ($a:ident, $b:ident, $c:ident) => {{
    core::mem::swap(&mut $a, &mut $b);
    core::mem::swap(&mut $a, &mut $c);
  }};
}

/// 256-bit digest of `data`, resolving the best available CRC kernel.
#[inline]
#[must_use]
pub fn hash256(data: &[u8]) -> (u64, u64, u64, u64) {
  hash256_with(&WordCrc::resolve(), data)
}

/// 256-bit digest of `data` over an explicitly chosen CRC kernel.
///
/// Hardware and portable kernels yield identical digests.
#[must_use]
pub fn hash256_with(word: &WordCrc, data: &[u8]) -> (u64, u64, u64, u64) {
  if data.len() >= ITER_LEN {
    hash256_long(word, data, 0)
  } else {
    hash256_short(word, data)
  }
}

/// Inputs under one iteration are zero-padded to exactly one iteration and
/// hashed with a length-derived seed, so padded and unpadded inputs of the
/// same prefix do not collide.
fn hash256_short(word: &WordCrc, data: &[u8]) -> (u64, u64, u64, u64) {
  let mut buf = [0u8; ITER_LEN];
  buf[..data.len()].copy_from_slice(data);
  hash256_long(word, &buf, !(data.len() as u32))
}

fn hash256_long(word: &WordCrc, data: &[u8], seed: u32) -> (u64, u64, u64, u64) {
  let total = data.len();
  let mut result = [0u64; 4];

  let mut a = fetch64(data, 56).wrapping_add(K0);
  let mut b = fetch64(data, 96).wrapping_add(K0);
  let mut c = hash_len_16(b, total as u64);
  result[0] = c;
  let mut d = fetch64(data, 120).wrapping_mul(K0).wrapping_add(total as u64);
  result[1] = d;
  let mut e = fetch64(data, 184).wrapping_add(seed as u64);
  let mut f: u64 = 0;
  let mut g: u64 = 0;
  let mut h = c.wrapping_add(d);
  let mut x = seed as u64;
  let mut y: u64 = 0;
  let mut z: u64 = 0;

  let mut offset = 0;
  let mut iters = total / ITER_LEN;
  let mut len = total - iters * ITER_LEN;

  macro_rules! chunk {
    ($r:expr) => {{
      permute3!(x, z, y);
      b = b.wrapping_add(fetch64(data, offset));
      c = c.wrapping_add(fetch64(data, offset + 8));
      d = d.wrapping_add(fetch64(data, offset + 16));
      e = e.wrapping_add(fetch64(data, offset + 24));
      f = f.wrapping_add(fetch64(data, offset + 32));
      a = a.wrapping_add(b);
      h = h.wrapping_add(f);
      b = b.wrapping_add(c);
      f = f.wrapping_add(d);
      g = g.wrapping_add(e);
      e = e.wrapping_add(z);
      g = g.wrapping_add(x);
      z = word.update(z, b.wrapping_add(g));
      y = word.update(y, e.wrapping_add(h));
      x = word.update(x, f.wrapping_add(a));
      e = e.rotate_right($r);
      c = c.wrapping_add(e);
      offset += 40;
    }};
  }

  loop {
    chunk!(0);
    permute3!(a, h, c);
    chunk!(33);
    permute3!(a, h, f);
    chunk!(0);
    permute3!(b, h, f);
    chunk!(42);
    permute3!(b, h, d);
    chunk!(0);
    permute3!(b, h, e);
    chunk!(33);
    permute3!(a, h, e);
    iters -= 1;
    if iters == 0 {
      break;
    }
  }

  while len >= 40 {
    chunk!(29);
    e ^= a.rotate_right(20);
    h = h.wrapping_add(b.rotate_right(30));
    g ^= c.rotate_right(40);
    f = f.wrapping_add(d.rotate_right(34));
    permute3!(c, h, g);
    len -= 40;
  }
  if len > 0 {
    // Truncated final chunk: re-read the last full 40 bytes ending at the
    // buffer's end.
    offset = offset + len - 40;
    chunk!(33);
    e ^= a.rotate_right(43);
    h = h.wrapping_add(b.rotate_right(42));
    g ^= c.rotate_right(41);
    f = f.wrapping_add(d.rotate_right(40));
    let _ = offset;
  }

  result[0] ^= h;
  result[1] ^= g;
  g = g.wrapping_add(h);
  a = hash_len_16(a, g.wrapping_add(z));
  x = x.wrapping_add(y << 32);
  b = b.wrapping_add(x);
  c = hash_len_16(c, z).wrapping_add(h);
  d = hash_len_16(d, e.wrapping_add(result[0]));
  g = g.wrapping_add(e);
  h = h.wrapping_add(hash_len_16(x, f));
  e = hash_len_16(a, d).wrapping_add(g);
  z = hash_len_16(b, c).wrapping_add(a);
  y = hash_len_16(g, h).wrapping_add(c);
  result[0] = e.wrapping_add(z).wrapping_add(y).wrapping_add(x);
  a = shift_mix(a.wrapping_add(y).wrapping_mul(K0)).wrapping_mul(K0).wrapping_add(b);
  result[1] = result[1].wrapping_add(a.wrapping_add(result[0]));
  a = shift_mix(a.wrapping_mul(K0)).wrapping_mul(K0).wrapping_add(c);
  result[2] = a.wrapping_add(result[1]);
  a = shift_mix(a.wrapping_add(e).wrapping_mul(K0)).wrapping_mul(K0);
  result[3] = a.wrapping_add(result[2]);

  (result[0], result[1], result[2], result[3])
}

/// Checksum-accelerated 128-bit digest of `data`.
///
/// Inputs at or below 900 bytes take the ordinary 128-bit combiner. Longer
/// inputs require the hardware CRC kernel.
///
/// # Errors
///
/// Returns [`CapabilityError`] when the hardware kernel is needed but
/// unavailable and no fallback was requested. Use [`hash128_crc_with`] with
/// an explicitly chosen kernel for a total, portable computation.
#[inline]
pub fn hash128_crc(data: &[u8]) -> Result<(u64, u64), CapabilityError> {
  if data.len() <= CRC128_SHORT_MAX {
    return Ok(super::hash128(data));
  }
  let word = WordCrc::hardware()?;
  Ok(crc128_long(&word, data))
}

/// Checksum-accelerated, seeded 128-bit digest of `data`.
///
/// # Errors
///
/// Returns [`CapabilityError`] under the same conditions as [`hash128_crc`].
#[inline]
pub fn hash128_crc_seeded(data: &[u8], seed: (u64, u64)) -> Result<(u64, u64), CapabilityError> {
  if data.len() <= CRC128_SHORT_MAX {
    return Ok(super::hash128_with_seed(data, seed));
  }
  let word = WordCrc::hardware()?;
  Ok(crc128_seeded_long(&word, data, seed))
}

/// [`hash128_crc`] over an explicitly chosen CRC kernel. Total.
#[inline]
#[must_use]
pub fn hash128_crc_with(word: &WordCrc, data: &[u8]) -> (u64, u64) {
  if data.len() <= CRC128_SHORT_MAX {
    return super::hash128(data);
  }
  crc128_long(word, data)
}

/// [`hash128_crc_seeded`] over an explicitly chosen CRC kernel. Total.
#[inline]
#[must_use]
pub fn hash128_crc_seeded_with(word: &WordCrc, data: &[u8], seed: (u64, u64)) -> (u64, u64) {
  if data.len() <= CRC128_SHORT_MAX {
    return super::hash128_with_seed(data, seed);
  }
  crc128_seeded_long(word, data, seed)
}

fn crc128_long(word: &WordCrc, data: &[u8]) -> (u64, u64) {
  let (_, _, r2, r3) = hash256_with(word, data);
  (r2, r3)
}

fn crc128_seeded_long(word: &WordCrc, data: &[u8], seed: (u64, u64)) -> (u64, u64) {
  let (r0, r1, r2, r3) = hash256_with(word, data);
  let u = seed.1.wrapping_add(r0);
  let v = seed.0.wrapping_add(r1);
  (
    hash_len_16(u, v.wrapping_add(r2)),
    hash_len_16(v.rotate_right(32), u.wrapping_mul(K0).wrapping_add(r3)),
  )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use checksum::WordCrc;

  use super::*;

  fn deterministic_bytes(len: usize) -> Vec<u8> {
    let mut out = alloc::vec![0u8; len];
    let mut x = 0x243f_6a88_85a3_08d3u64;
    for b in &mut out {
      x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
      *b = (x >> 56) as u8;
    }
    out
  }

  const LENS: &[usize] = &[0, 1, 39, 40, 41, 79, 80, 239, 240, 241, 479, 480, 899, 900, 901, 1024, 4096];

  #[test]
  fn hash256_cross_kernel_equality() {
    // The central contract: the digest does not depend on which CRC kernel
    // executed.
    let portable = WordCrc::portable();
    let resolved = WordCrc::resolve();
    for &len in LENS {
      let data = deterministic_bytes(len);
      assert_eq!(
        hash256_with(&portable, &data),
        hash256_with(&resolved, &data),
        "kernel divergence at len={len}"
      );
    }
  }

  #[test]
  fn hash256_deterministic_and_length_sensitive() {
    let data = deterministic_bytes(4097);
    let mut seen = alloc::vec![];
    for &len in LENS {
      let d = &data[..len];
      assert_eq!(hash256(d), hash256(d));
      seen.push(hash256(d));
    }
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), LENS.len());
  }

  #[test]
  fn short_input_padding_is_seeded_by_length() {
    // A short input and its explicit zero-padding to 240 bytes go through
    // the same core but with different seeds, so they must not collide.
    let data = deterministic_bytes(100);
    let mut padded = data.clone();
    padded.resize(240, 0);
    assert_ne!(hash256(&data), hash256(&padded));
  }

  #[test]
  fn crc128_short_inputs_take_the_ordinary_combiner() {
    let word = WordCrc::portable();
    for &len in &[0usize, 16, 128, 900] {
      let data = deterministic_bytes(len);
      assert_eq!(hash128_crc_with(&word, &data), super::super::hash128(&data));
      assert_eq!(
        hash128_crc_seeded_with(&word, &data, (7, 11)),
        super::super::hash128_with_seed(&data, (7, 11))
      );
    }
  }

  #[test]
  fn crc128_long_inputs_differ_from_ordinary_combiner() {
    // Distinct function, distinct values.
    let word = WordCrc::portable();
    let data = deterministic_bytes(2048);
    assert_ne!(hash128_crc_with(&word, &data), super::super::hash128(&data));
  }

  #[test]
  fn crc128_matches_hash256_tail() {
    let word = WordCrc::portable();
    let data = deterministic_bytes(1500);
    let (_, _, r2, r3) = hash256_with(&word, &data);
    assert_eq!(hash128_crc_with(&word, &data), (r2, r3));
  }

  #[test]
  fn crc128_cross_kernel_equality() {
    let portable = WordCrc::portable();
    let resolved = WordCrc::resolve();
    let data = deterministic_bytes(3000);
    assert_eq!(hash128_crc_with(&portable, &data), hash128_crc_with(&resolved, &data));
    assert_eq!(
      hash128_crc_seeded_with(&portable, &data, (1, 2)),
      hash128_crc_seeded_with(&resolved, &data, (1, 2))
    );
  }

  #[test]
  fn crc128_result_agrees_with_explicit_kernel_when_capable() {
    let data = deterministic_bytes(2000);
    match hash128_crc(&data) {
      Ok(digest) => {
        assert!(checksum::hardware_available());
        assert_eq!(digest, hash128_crc_with(&WordCrc::portable(), &data));
      }
      Err(_) => assert!(!checksum::hardware_available()),
    }
  }
}
