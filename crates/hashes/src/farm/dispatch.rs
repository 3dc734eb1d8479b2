//! Once-resolved dispatch for the FarmHash family.
//!
//! The kernel table is resolved on first use from the cached capability
//! probe and then never changes: per call, selection is a single
//! pre-resolved function-pointer load. Overriding the probe (via
//! `platform::set_caps_override`) before first use steers the resolution;
//! after resolution the table is immutable configuration.

use platform::{Caps, OnceCache};

use super::kernels::{
  FarmKernelId, hash32_fn, hash32_seed_fn, hash64_fn, hash64_seeds_fn, hash128_fn, hash128_seed_fn, required_caps,
};

#[derive(Clone, Copy)]
struct ActiveDispatch {
  h32: fn(&[u8]) -> u32,
  h32_seed: fn(&[u8], u32) -> u32,
  h64: fn(&[u8]) -> u64,
  h64_seeds: fn(&[u8], u64, u64) -> u64,
  h128: fn(&[u8]) -> (u64, u64),
  h128_seed: fn(&[u8], (u64, u64)) -> (u64, u64),
  name: &'static str,
}

static ACTIVE: OnceCache<ActiveDispatch> = OnceCache::new();

/// The kernel this build would prefer, before capability checks.
const PREFERRED: FarmKernelId = FarmKernelId::Portable;

#[inline]
#[must_use]
fn resolve(id: FarmKernelId, caps: Caps) -> FarmKernelId {
  if caps.has(required_caps(id)) {
    id
  } else {
    FarmKernelId::Portable
  }
}

#[inline]
#[must_use]
fn active() -> ActiveDispatch {
  ACTIVE.get_or_init(|| {
    let caps = platform::caps();
    let id = resolve(PREFERRED, caps);

    ActiveDispatch {
      h32: hash32_fn(id),
      h32_seed: hash32_seed_fn(id),
      h64: hash64_fn(id),
      h64_seeds: hash64_seeds_fn(id),
      h128: hash128_fn(id),
      h128_seed: hash128_seed_fn(id),
      name: id.as_str(),
    }
  })
}

/// Name of the active kernel, for diagnostics.
#[inline]
#[must_use]
pub fn kernel_name() -> &'static str {
  active().name
}

#[inline]
#[must_use]
pub fn hash32(data: &[u8]) -> u32 {
  (active().h32)(data)
}

#[inline]
#[must_use]
pub fn hash32_with_seed(data: &[u8], seed: u32) -> u32 {
  (active().h32_seed)(data, seed)
}

#[inline]
#[must_use]
pub fn hash64(data: &[u8]) -> u64 {
  (active().h64)(data)
}

#[inline]
#[must_use]
pub fn hash64_with_seeds(data: &[u8], seed0: u64, seed1: u64) -> u64 {
  (active().h64_seeds)(data, seed0, seed1)
}

#[inline]
#[must_use]
pub fn hash128(data: &[u8]) -> (u64, u64) {
  (active().h128)(data)
}

#[inline]
#[must_use]
pub fn hash128_with_seed(data: &[u8], seed: (u64, u64)) -> (u64, u64) {
  (active().h128_seed)(data, seed)
}
