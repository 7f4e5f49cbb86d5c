//! Size limits and growth behavior for collections.

use core::fmt::Debug;
use core::mem::size_of;

use crate::error::StorageError;

/// The maximum number of elements of type `T` which may be held by a
/// single allocation.
///
/// Allocations are limited to `isize::MAX` bytes, so this is that limit
/// divided by the element size. Zero-sized types are limited only by the
/// range of `usize`.
#[inline]
pub const fn max_size<T>() -> usize {
    let t_size = size_of::<T>();
    if t_size == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / t_size
    }
}

/// Growth behavior for collections which have exceeded their available storage.
pub trait Grow: Debug {
    /// Calculate the capacity of the replacement region when `additional`
    /// elements must be added to a collection currently holding `length`.
    ///
    /// Fails with [`StorageError::LengthError`] when the addition cannot be
    /// represented within `max_size::<T>()`.
    fn next_capacity<T>(length: usize, additional: usize) -> Result<usize, StorageError>;
}

/// Growth behavior which requests exactly the required capacity.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GrowExact;

impl Grow for GrowExact {
    #[inline]
    fn next_capacity<T>(length: usize, additional: usize) -> Result<usize, StorageError> {
        if max_size::<T>() - length < additional {
            return Err(StorageError::LengthError);
        }
        Ok(length + additional)
    }
}

/// Growth behavior which at least doubles the current length.
///
/// The new capacity is `length + max(length, additional)`, clamped to
/// `max_size::<T>()`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GrowGeometric;

impl Grow for GrowGeometric {
    #[inline]
    fn next_capacity<T>(length: usize, additional: usize) -> Result<usize, StorageError> {
        let max = max_size::<T>();
        if max - length < additional {
            return Err(StorageError::LengthError);
        }
        match length.checked_add(length.max(additional)) {
            Some(cap) if cap <= max => Ok(cap),
            _ => Ok(max),
        }
    }
}
