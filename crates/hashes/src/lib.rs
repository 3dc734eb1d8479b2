//! Fast non-cryptographic digest engines (**NOT CRYPTO**).
//!
//! Two related hash families over byte slices:
//!
//! - [`city`] - CityHash: 32/64/128-bit digests, seeded forms, and the
//!   checksum-accelerated 128/256-bit paths ([`city::crc`]).
//! - [`farm`] - FarmHash: the stable portable-reference digests
//!   (fingerprint-grade), dispatched through a once-resolved kernel table.
//!
//! These hashes are built for hash tables, sharding, deduplication, and
//! fingerprinting. They offer no security against adversarial inputs; do not
//! use them for signatures, MACs, or anything requiring cryptographic
//! strength.
//!
//! Every digest is a pure function of `(input bytes, seed)`: identical on
//! every platform and under every internal kernel, with buffer bytes always
//! interpreted little-endian.
//!
//! This crate is `no_std` compatible and has zero library dependencies
//! outside the rscity workspace. Dev-only dependencies are used for oracle
//! testing and benchmarking.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod city;
mod common;
pub mod farm;

pub use city::{City32, City64, City128};
pub use farm::{Farm32, Farm64, Farm128};
pub use traits::{CapabilityError, FastHash};
