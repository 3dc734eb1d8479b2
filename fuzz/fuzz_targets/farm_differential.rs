//! Differential fuzzing against the `farmhash` crate.
//!
//! The family-B plain digests are pinned to the reference fingerprints;
//! any divergence from the independent port is a bug.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  let ours64 = hashes::farm::hash64(data);
  let reference64 = farmhash::fingerprint64(data);
  assert_eq!(
    ours64,
    reference64,
    "fingerprint64 mismatch: ours={:#018x}, reference={:#018x}, len={}",
    ours64,
    reference64,
    data.len()
  );

  let ours32 = hashes::farm::hash32(data);
  let reference32 = farmhash::fingerprint32(data);
  assert_eq!(
    ours32,
    reference32,
    "fingerprint32 mismatch: ours={:#010x}, reference={:#010x}, len={}",
    ours32,
    reference32,
    data.len()
  );
});
