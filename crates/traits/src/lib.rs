//! Core traits for the rscity workspace.
//!
//! This crate provides the foundational traits that all rscity implementations
//! conform to. It is `no_std` compatible and has zero dependencies.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose | Examples |
//! |-------|---------|----------|
//! | [`FastHash`] | One-shot non-cryptographic hashes | CityHash, FarmHash |
//! | [`Checksum`] | Streaming non-cryptographic checksums | CRC32-C |
//!
//! # Error Types
//!
//! - [`CapabilityError`] - A required hardware capability is unavailable
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod checksum;
pub mod error;
mod fast_hash;

pub use checksum::Checksum;
pub use error::CapabilityError;
pub use fast_hash::FastHash;
