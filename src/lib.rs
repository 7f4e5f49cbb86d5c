//! Vector and fixed array containers with strong exception safety
//!
//! [`Vec`] owns a raw region obtained from an injectable allocator
//! ([`storage::RawAlloc`]). Bulk mutations construct their new values
//! before disturbing any existing ones, so a panicking constructor leaves
//! the vector exactly as it was. [`Array`] is the fixed-size, inline
//! sibling. With the `std` feature, [`task`] runs container workloads on
//! a worker thread and reports their outcome exactly once.
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod array;

pub mod capacity;

pub mod cursor;

pub(crate) mod error;

pub mod storage;

#[cfg(feature = "std")]
pub mod task;

pub mod uninit;

pub mod vec;

pub use {
    self::array::Array,
    self::error::{StorageError, UpdateError},
    self::storage::{Global, RawAlloc},
    self::vec::Vec,
};
