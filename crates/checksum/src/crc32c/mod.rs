//! CRC32-C (Castagnoli) checksum and the word-checksum capability interface.
//!
//! CRC32-C uses polynomial 0x1EDC6F41, carried by hardware on most modern
//! CPUs (SSE4.2 `crc32` on x86_64, the CRC32 extension on ARMv8). The digest
//! engine uses the 64-bit word form of this instruction as a fast mixer; the
//! [`WordCrc`] type is the capability boundary around it.
//!
//! # Kernel selection
//!
//! - **x86_64**: SSE4.2 `crc32q` → portable slicing-by-8
//! - **aarch64**: `crc32cd` → portable slicing-by-8
//!
//! Compile-time target features short-circuit the selection; otherwise the
//! capability probe runs once and the chosen kernel is cached as a function
//! pointer. Hardware and portable kernels return bit-identical results.
//!
//! # Usage
//!
//! ```
//! use checksum::Crc32c;
//!
//! // One-shot computation
//! let crc = Crc32c::checksum(b"hello world");
//!
//! // Incremental computation
//! let mut hasher = Crc32c::new();
//! hasher.update(b"hello ");
//! hasher.update(b"world");
//! assert_eq!(hasher.finalize(), crc);
//! ```

pub(crate) mod portable;

#[cfg(target_arch = "aarch64")]
pub(crate) mod aarch64;

#[cfg(target_arch = "x86_64")]
pub(crate) mod x86_64;

use traits::{CapabilityError, Checksum};

// ─────────────────────────────────────────────────────────────────────────────
// Byte-slice checksum
// ─────────────────────────────────────────────────────────────────────────────

/// CRC32-C (Castagnoli) checksum.
///
/// Streaming CRC32-C computation with automatic hardware acceleration when
/// available.
///
/// # Thread Safety
///
/// `Crc32c` is `Send` and `Sync`. Multiple hashers can operate in parallel on
/// different data.
#[derive(Clone, Debug)]
pub struct Crc32c {
  /// Current CRC state (inverted - XOR applied on finalize)
  state: u32,
  /// Initial value for reset
  initial: u32,
}

impl Crc32c {
  /// Initial value for CRC32-C (all ones).
  const INIT: u32 = 0xFFFF_FFFF;

  /// Create a new hasher with the default initial value.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self {
      state: Self::INIT,
      initial: Self::INIT,
    }
  }

  /// Compute CRC32-C of data in one shot.
  ///
  /// # Example
  ///
  /// ```
  /// use checksum::Crc32c;
  ///
  /// assert_eq!(Crc32c::checksum(b"123456789"), 0xE3069283);
  /// ```
  #[inline]
  #[must_use]
  pub fn checksum(data: &[u8]) -> u32 {
    dispatch(Self::INIT, data) ^ Self::INIT
  }

  /// Update the hasher with additional data.
  #[inline]
  pub fn update(&mut self, data: &[u8]) {
    self.state = dispatch(self.state, data);
  }

  /// Finalize and return the checksum.
  ///
  /// This does not consume the hasher, allowing further updates.
  #[inline]
  #[must_use]
  pub const fn finalize(&self) -> u32 {
    self.state ^ Self::INIT
  }

  /// Reset the hasher to its initial state.
  #[inline]
  pub fn reset(&mut self) {
    self.state = self.initial;
  }
}

impl Default for Crc32c {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl Checksum for Crc32c {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;

  #[inline]
  fn new() -> Self {
    Crc32c::new()
  }

  #[inline]
  fn with_initial(initial: Self::Output) -> Self {
    Self {
      state: initial ^ Self::INIT,
      initial: initial ^ Self::INIT,
    }
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    Crc32c::update(self, data);
  }

  #[inline]
  fn finalize(&self) -> Self::Output {
    Crc32c::finalize(self)
  }

  #[inline]
  fn reset(&mut self) {
    Crc32c::reset(self);
  }

  #[inline]
  fn checksum(data: &[u8]) -> Self::Output {
    Crc32c::checksum(data)
  }
}

/// Dispatch a slice update to the fastest available implementation.
#[inline]
fn dispatch(crc: u32, data: &[u8]) -> u32 {
  // Tier 1: compile-time target features.
  #[cfg(all(target_arch = "x86_64", target_feature = "sse4.2"))]
  {
    x86_64::compute_sse42_enabled(crc, data)
  }

  #[cfg(all(target_arch = "aarch64", target_feature = "crc"))]
  {
    aarch64::compute_crc_enabled(crc, data)
  }

  // Tier 2: capability probe, resolved once and cached.
  #[cfg(not(any(
    all(target_arch = "x86_64", target_feature = "sse4.2"),
    all(target_arch = "aarch64", target_feature = "crc"),
  )))]
  {
    static ACTIVE: platform::OnceCache<fn(u32, &[u8]) -> u32> = platform::OnceCache::new();
    let f = ACTIVE.get_or_init(resolve_slice_kernel);
    f(crc, data)
  }
}

#[cfg(not(any(
  all(target_arch = "x86_64", target_feature = "sse4.2"),
  all(target_arch = "aarch64", target_feature = "crc"),
)))]
fn resolve_slice_kernel() -> fn(u32, &[u8]) -> u32 {
  #[cfg(all(target_arch = "x86_64", feature = "std"))]
  {
    if platform::caps().has(platform::caps::x86::CRC_READY) {
      return x86_64::compute_sse42;
    }
  }

  #[cfg(all(target_arch = "aarch64", feature = "std"))]
  {
    if platform::caps().has(platform::caps::aarch64::CRC_READY) {
      return aarch64::compute_crc;
    }
  }

  portable::compute
}

// ─────────────────────────────────────────────────────────────────────────────
// Word-checksum capability interface
// ─────────────────────────────────────────────────────────────────────────────

/// Identifies which CRC32-C word kernel a [`WordCrc`] resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Crc32cKernel {
  /// Hardware instruction (SSE4.2 `crc32q` / ARMv8 `crc32cd`).
  Hardware,
  /// Portable slicing-by-8 table kernel.
  Portable,
}

impl Crc32cKernel {
  /// Human-readable kernel name, for diagnostics.
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Hardware => "hardware",
      Self::Portable => "portable",
    }
  }
}

/// The narrow capability interface over the CRC32-C word instruction.
///
/// Exactly two implementations exist: the hardware instruction and the
/// portable table kernel. Both fold the eight little-endian bytes of a
/// 64-bit word into a 32-bit CRC state (zero-extended to `u64`), and they
/// return bit-identical results. Selection happens when the value is
/// constructed; each update is a single pre-resolved function-pointer call.
#[derive(Clone, Copy)]
pub struct WordCrc {
  f: fn(u64, u64) -> u64,
  kernel: Crc32cKernel,
}

impl WordCrc {
  /// Resolve the best available kernel: hardware when the capability probe
  /// reports the instruction, portable otherwise.
  #[inline]
  #[must_use]
  pub fn resolve() -> Self {
    if hardware_available() {
      Self::hardware_unchecked()
    } else {
      Self::portable()
    }
  }

  /// The hardware kernel.
  ///
  /// # Errors
  ///
  /// Returns [`CapabilityError`] when the instruction is unavailable on this
  /// machine (or the capability probe has been overridden to report so).
  #[inline]
  pub fn hardware() -> Result<Self, CapabilityError> {
    if hardware_available() {
      Ok(Self::hardware_unchecked())
    } else {
      Err(CapabilityError::new())
    }
  }

  /// The portable table kernel, available on every target.
  #[inline]
  #[must_use]
  pub const fn portable() -> Self {
    Self {
      f: portable_word,
      kernel: Crc32cKernel::Portable,
    }
  }

  #[allow(unreachable_code)]
  fn hardware_unchecked() -> Self {
    #[cfg(all(target_arch = "x86_64", any(target_feature = "sse4.2", feature = "std")))]
    {
      return Self {
        f: x86_64::word_sse42,
        kernel: Crc32cKernel::Hardware,
      };
    }

    #[cfg(all(target_arch = "aarch64", any(target_feature = "crc", feature = "std")))]
    {
      return Self {
        f: aarch64::word_crc,
        kernel: Crc32cKernel::Hardware,
      };
    }

    Self::portable()
  }

  /// Which kernel this value resolved to.
  #[inline]
  #[must_use]
  pub const fn kernel(&self) -> Crc32cKernel {
    self.kernel
  }

  /// Fold the eight little-endian bytes of `v` into `crc`.
  ///
  /// Only the low 32 bits of `crc` participate; the result is zero-extended,
  /// matching the hardware instruction.
  #[inline(always)]
  #[must_use]
  pub fn update(&self, crc: u64, v: u64) -> u64 {
    (self.f)(crc, v)
  }
}

impl core::fmt::Debug for WordCrc {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("WordCrc").field("kernel", &self.kernel).finish()
  }
}

fn portable_word(crc: u64, v: u64) -> u64 {
  portable::compute_u64(crc as u32, v) as u64
}

/// Whether the hardware CRC32-C word instruction is available.
///
/// Answers from the cached capability probe, honoring any override set via
/// [`platform::set_caps_override`].
#[allow(unreachable_code)]
#[inline]
#[must_use]
pub fn hardware_available() -> bool {
  #[cfg(target_arch = "x86_64")]
  {
    return platform::caps().has(platform::caps::x86::CRC_READY);
  }

  #[cfg(target_arch = "aarch64")]
  {
    return platform::caps().has(platform::caps::aarch64::CRC_READY);
  }

  false
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  extern crate std;

  use super::*;

  #[test]
  fn test_checksum() {
    assert_eq!(Crc32c::checksum(b"123456789"), 0xE306_9283);
  }

  #[test]
  fn test_empty() {
    assert_eq!(Crc32c::checksum(b""), 0x0000_0000);
  }

  #[test]
  fn test_zeros() {
    assert_eq!(Crc32c::checksum(&[0u8; 32]), 0x8A91_36AA);
  }

  #[test]
  fn test_ones() {
    assert_eq!(Crc32c::checksum(&[0xFFu8; 32]), 0x62A8_AB43);
  }

  #[test]
  fn test_incremental() {
    let mut hasher = Crc32c::new();
    hasher.update(b"1234");
    hasher.update(b"56789");
    assert_eq!(hasher.finalize(), 0xE306_9283);
  }

  #[test]
  fn test_reset() {
    let mut hasher = Crc32c::new();
    hasher.update(b"garbage");
    hasher.reset();
    hasher.update(b"123456789");
    assert_eq!(hasher.finalize(), 0xE306_9283);
  }

  #[test]
  fn test_trait_impl() {
    fn check_trait<T: Checksum>() {}
    check_trait::<Crc32c>();

    let mut h = <Crc32c as Checksum>::with_initial(0);
    h.update(b"123456789");
    assert_eq!(<Crc32c as Checksum>::finalize(&h), 0xE306_9283);
  }

  #[test]
  fn word_portable_matches_slice() {
    let word = WordCrc::portable();
    let v = u64::from_le_bytes(*b"12345678");

    let via_word = word.update(0xFFFF_FFFF, v) as u32;
    let via_slice = portable::compute(0xFFFF_FFFF, b"12345678");
    assert_eq!(via_word, via_slice);
  }

  #[test]
  fn word_resolve_matches_portable() {
    // Cross-path equality: whatever kernel resolves, the word update must
    // agree with the portable table kernel.
    let resolved = WordCrc::resolve();
    let portable = WordCrc::portable();

    let mut state = 0u64;
    let mut expected = 0u64;
    for i in 0..1000u64 {
      let v = i.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ (i << 17);
      state = resolved.update(state, v);
      expected = portable.update(expected, v);
      assert_eq!(state, expected, "kernel divergence at step {i}");
    }
  }

  #[test]
  fn hardware_result_is_consistent_with_probe() {
    match WordCrc::hardware() {
      Ok(word) => {
        assert!(hardware_available());
        assert_eq!(word.kernel(), Crc32cKernel::Hardware);
      }
      Err(_) => assert!(!hardware_available()),
    }
  }
}

#[cfg(all(test, not(miri)))]
mod proptests {
  use proptest::prelude::*;

  use super::*;

  proptest! {
    /// The slice kernel equals the portable reference on every input.
    #[test]
    fn dispatch_matches_portable(data in proptest::collection::vec(any::<u8>(), 0..512), init in any::<u32>()) {
      prop_assert_eq!(dispatch(init, &data), portable::compute(init, &data));
    }

    /// Word updates equal eight byte updates.
    #[test]
    fn word_equals_bytes(v in any::<u64>(), init in any::<u32>()) {
      let word = WordCrc::portable();
      let mut crc = init;
      for b in v.to_le_bytes() {
        crc = portable::compute_byte(crc, b);
      }
      prop_assert_eq!(word.update(init as u64, v), crc as u64);
    }
  }
}
