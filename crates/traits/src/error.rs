//! Error types for capability-gated operations.
//!
//! Minimal error types for a pure computational core. Digest functions here
//! either complete or fail immediately; there is no partial result, retry,
//! or internal logging.

use core::fmt;

/// A required hardware capability is unavailable.
///
/// Returned by the checksum-accelerated digest paths when the hardware CRC
/// instruction is absent and the caller did not explicitly request the
/// software fallback. No other function in the workspace returns an error:
/// every input length has a defined digest.
///
/// # Examples
///
/// ```
/// use traits::CapabilityError;
///
/// fn hardware_only(capable: bool) -> Result<(), CapabilityError> {
///   if capable { Ok(()) } else { Err(CapabilityError::new()) }
/// }
///
/// assert!(hardware_only(false).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct CapabilityError;

impl CapabilityError {
  /// Create a new capability error.
  ///
  /// This is the only way to construct this error from outside the crate,
  /// ensuring forward compatibility if fields are added in the future.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for CapabilityError {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for CapabilityError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("required hardware capability unavailable")
  }
}

impl core::error::Error for CapabilityError {}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, string::ToString};

  use super::*;

  #[test]
  fn display_message() {
    assert_eq!(
      CapabilityError::new().to_string(),
      "required hardware capability unavailable"
    );
  }

  #[test]
  fn debug_impl() {
    let dbg = format!("{:?}", CapabilityError::new());
    assert_eq!(dbg, "CapabilityError");
  }

  #[test]
  fn is_copy_and_eq() {
    let e = CapabilityError::new();
    let e2 = e; // Copy
    let e3 = e; // Still valid
    assert_eq!(e2, e3);
  }

  #[test]
  fn result_err_path() {
    fn unavailable() -> Result<(), CapabilityError> {
      Err(CapabilityError::new())
    }
    let err = unavailable().unwrap_err();
    assert_eq!(err, CapabilityError::new());
  }

  #[test]
  fn trait_bounds() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    assert_send::<CapabilityError>();
    assert_sync::<CapabilityError>();
  }

  #[test]
  fn error_trait_impl() {
    use core::error::Error;

    let err = CapabilityError::new();
    assert!(err.source().is_none());
  }

  #[test]
  fn default_impl() {
    let err: CapabilityError = Default::default();
    assert_eq!(err, CapabilityError::new());
  }

  #[test]
  fn size_is_zero() {
    assert_eq!(core::mem::size_of::<CapabilityError>(), 0);
  }
}
