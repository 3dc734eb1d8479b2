//! Capability gating of the checksum-accelerated 128-bit path.
//!
//! This file deliberately contains a single test: it twiddles the global
//! capability override, and integration tests get their own process, so
//! nothing else can observe the overridden probe.

use checksum::WordCrc;
use hashes::city::crc;

#[test]
fn forced_capability_absence_gates_hash128_crc() {
  let data: Vec<u8> = (0..2048u32).map(|i| (i.wrapping_mul(31) % 251) as u8).collect();

  // Behavior under real detection, recorded up front.
  let native = crc::hash128_crc(&data);
  let fallback = crc::hash128_crc_with(&WordCrc::portable(), &data);
  let h256 = crc::hash256(&data);

  // Force "no capabilities": the long path must refuse rather than silently
  // compute something else.
  platform::set_caps_override(Some(platform::Caps::NONE));

  assert!(!checksum::hardware_available());
  assert_eq!(crc::hash128_crc(&data), Err(hashes::CapabilityError::new()));
  assert_eq!(crc::hash128_crc_seeded(&data, (1, 2)), Err(hashes::CapabilityError::new()));

  // Short inputs never need the instruction.
  assert!(crc::hash128_crc(&data[..900]).is_ok());

  // The explicit-fallback form stays total and agrees with itself.
  assert_eq!(crc::hash128_crc_with(&WordCrc::portable(), &data), fallback);

  // hash256 is total under any probe result, and its value is probe-independent.
  assert_eq!(crc::hash256(&data), h256);

  platform::set_caps_override(None);
  assert!(!platform::has_override());

  // Cross-path equality: when the hardware kernel was available, its digest
  // equals the portable one.
  if let Ok(digest) = native {
    assert_eq!(digest, fallback);
  }
  assert_eq!(crc::hash256(&data), h256);
}
