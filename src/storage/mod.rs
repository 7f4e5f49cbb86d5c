//! Support for memory allocation.
//!
//! The containers in this crate obtain their storage from an instance of
//! [`RawAlloc`], which acts as an injectable strategy: replacing it changes
//! where memory comes from, never how the containers behave.

pub(crate) mod alloc;

pub(crate) mod utils;

pub use self::alloc::{handle_alloc_error, Global, RawAlloc};

#[cfg(feature = "zeroize")]
pub use self::alloc::ZeroizingAlloc;

#[cfg(feature = "allocator-api2")]
pub use self::alloc::ApiAlloc;
