//! CRC32-C (Castagnoli) for the rscity workspace.
//!
//! This crate exists for one purpose: the checksum-accelerated digest paths
//! mix with the CRC32-C word instruction, and that instruction needs a
//! capability boundary. [`WordCrc`] is that boundary: exactly two
//! implementations (hardware instruction, portable table kernel), selected
//! once, with identical outputs.
//!
//! [`Crc32c`] is the ordinary byte-slice checksum over the same kernels; its
//! standard test vectors are what pin the word kernels to real CRC32-C.
//!
//! This crate is `no_std` compatible. Without `std`, hardware kernels are
//! only selected when the corresponding target feature is enabled at compile
//! time.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod crc32c;

pub use crc32c::{Crc32c, Crc32cKernel, WordCrc, hardware_available};
pub use traits::Checksum;
