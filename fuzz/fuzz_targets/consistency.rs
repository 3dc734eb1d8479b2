//! Self-consistency fuzzing for the digest engines.
//!
//! Checks the identities that must hold for every input: seeded forms
//! reduce to their definitions, the 128-bit CRC path agrees across kernels,
//! and repeated calls return identical digests.

#![no_main]

use checksum::WordCrc;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u64, u64, &[u8])| {
  let (seed0, seed1, data) = input;

  // Determinism.
  assert_eq!(hashes::city::hash64(data), hashes::city::hash64(data));
  assert_eq!(hashes::city::hash128(data), hashes::city::hash128(data));

  // Seeded forms reduce to their definitions.
  assert_eq!(
    hashes::city::hash64_with_seed(data, seed1),
    hashes::city::hash64_with_seeds(data, 0x9ae1_6a3b_2f90_404f, seed1),
  );

  // CRC digests are kernel-independent.
  let portable = WordCrc::portable();
  let resolved = WordCrc::resolve();
  assert_eq!(
    hashes::city::crc::hash256_with(&portable, data),
    hashes::city::crc::hash256_with(&resolved, data),
  );
  assert_eq!(
    hashes::city::crc::hash128_crc_seeded_with(&portable, data, (seed0, seed1)),
    hashes::city::crc::hash128_crc_seeded_with(&resolved, data, (seed0, seed1)),
  );

  // Family B 128-bit is the shared City combiner.
  assert_eq!(
    hashes::farm::hash128_with_seed(data, (seed0, seed1)),
    hashes::city::hash128_with_seed(data, (seed0, seed1)),
  );
});
