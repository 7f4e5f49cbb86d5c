use core::alloc::Layout;
use core::fmt;
use core::mem::{align_of, size_of};
use core::ptr::{self, NonNull};

#[cfg(feature = "alloc")]
use alloc::alloc::{alloc as raw_alloc, dealloc as raw_dealloc};
#[cfg(feature = "alloc")]
use core::mem::transmute;

#[cfg(any(feature = "alloc", feature = "zeroize", feature = "allocator-api2"))]
use const_default::ConstDefault;

use crate::error::StorageError;

use super::utils::array_layout;

#[cfg(all(not(test), feature = "alloc"))]
pub use alloc::alloc::handle_alloc_error;

#[cfg(any(test, not(feature = "alloc")))]
/// Custom allocation error handler.
pub fn handle_alloc_error(layout: Layout) -> ! {
    panic!("memory allocation of {} bytes failed", layout.size());
}

/// The allocator capability consumed by the containers in this crate.
///
/// Implementors provide raw, untyped memory through `try_alloc` and `release`.
/// The typed helpers `allocate` and `deallocate` request blocks sized for a
/// number of elements, while `construct` and `destroy` manage the lifecycle
/// of a single element in place.
///
/// Containers route a value through `construct` when they build it in place
/// and through `destroy` or `destroy_slice` when they drop it in place.
/// Values handed back to the caller by `pop`, `remove`, `swap_remove` or an
/// owning iterator are moved out of their slot and never reach `destroy`.
pub trait RawAlloc: fmt::Debug {
    /// Try to allocate a block of memory fitting `layout`.
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError>;

    /// Release a block previously returned by `try_alloc`.
    ///
    /// # Safety
    /// `ptr` must have been produced by this allocator with the same `layout`,
    /// and must not have been released already.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);

    /// Allocate a raw block capable of holding `count` values of type `T`.
    ///
    /// The contents of the block are uninitialized.
    #[inline]
    fn allocate<T>(&self, count: usize) -> Result<NonNull<T>, StorageError> {
        let layout = array_layout::<T>(count)?;
        let ptr = self.try_alloc(layout)?;
        if ptr.len() < layout.size() {
            // SAFETY: the block was just produced by this allocator
            unsafe { self.release(ptr.cast(), layout) };
            return Err(StorageError::AllocError(layout));
        }
        Ok(ptr.cast())
    }

    /// Release a block produced by `allocate`.
    ///
    /// # Safety
    /// `ptr` must have been returned by `allocate::<T>(count)` on this
    /// allocator, and must not have been released already.
    #[inline]
    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, count: usize) {
        let layout = Layout::from_size_align_unchecked(size_of::<T>() * count, align_of::<T>());
        self.release(ptr.cast(), layout)
    }

    /// Construct one value in place at `slot`.
    ///
    /// # Safety
    /// `slot` must be valid for writes and must not hold a live value.
    #[inline]
    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        slot.as_ptr().write(value)
    }

    /// Destroy the live value at `slot`, leaving the memory uninitialized.
    ///
    /// # Safety
    /// `slot` must hold a live value which is not used afterward.
    #[inline]
    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        ptr::drop_in_place(slot.as_ptr())
    }

    /// Destroy `count` consecutive live values starting at `data`.
    ///
    /// # Safety
    /// Every slot in the range must hold a live value which is not used afterward.
    #[inline]
    unsafe fn destroy_slice<T>(&self, data: NonNull<T>, count: usize) {
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(data.as_ptr(), count))
    }
}

impl<A: RawAlloc> RawAlloc for &A {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        (**self).try_alloc(layout)
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).release(ptr, layout)
    }

    #[inline]
    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        (**self).construct(slot, value)
    }

    #[inline]
    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        (**self).destroy(slot)
    }

    #[inline]
    unsafe fn destroy_slice<T>(&self, data: NonNull<T>, count: usize) {
        (**self).destroy_slice(data, count)
    }
}

/// The global memory allocator.
///
/// When the `alloc` feature is enabled, this type forwards calls to the
/// allocator registered with the `#[global_allocator]` attribute if there
/// is one, or the `std` crate's default.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "alloc", derive(Default, Copy))]
pub struct Global;

#[cfg(feature = "alloc")]
impl RawAlloc for Global {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        let ptr = if layout.size() == 0 {
            // FIXME: use Layout::dangling when stabilized
            #[allow(clippy::useless_transmute)]
            unsafe {
                NonNull::new_unchecked(transmute(layout.align()))
            }
        } else {
            let Some(ptr) = NonNull::new(unsafe { raw_alloc(layout) }) else {
                return Err(StorageError::AllocError(layout));
            };
            ptr
        };
        Ok(NonNull::slice_from_raw_parts(ptr, layout.size()))
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() > 0 {
            raw_dealloc(ptr.as_ptr(), layout);
        }
    }
}

#[cfg(not(feature = "alloc"))]
// Stub implementation to allow Global as the default allocator type.
// Because the type can't be used, errors will still be detected at runtime.
impl RawAlloc for Global {
    fn try_alloc(&self, _layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        unimplemented!();
    }

    unsafe fn release(&self, _ptr: NonNull<u8>, _layout: Layout) {
        unimplemented!();
    }
}

#[cfg(feature = "alloc")]
impl ConstDefault for Global {
    const DEFAULT: Self = Global;
}

#[cfg(feature = "zeroize")]
/// An allocator which allocates via `A` and zeroizes all blocks when they are released.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZeroizingAlloc<A>(pub A);

#[cfg(feature = "zeroize")]
impl<A: RawAlloc> RawAlloc for ZeroizingAlloc<A> {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        self.0.try_alloc(layout)
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() > 0 {
            let mem = core::slice::from_raw_parts_mut(ptr.as_ptr(), layout.size());
            zeroize::Zeroize::zeroize(mem);
        }
        self.0.release(ptr, layout)
    }
}

#[cfg(feature = "zeroize")]
impl<A: ConstDefault> ConstDefault for ZeroizingAlloc<A> {
    const DEFAULT: Self = ZeroizingAlloc(A::DEFAULT);
}

#[cfg(feature = "allocator-api2")]
/// Use any `allocator_api2::alloc::Allocator` as the allocator capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApiAlloc<A>(pub A);

#[cfg(feature = "allocator-api2")]
impl<A> RawAlloc for ApiAlloc<A>
where
    A: allocator_api2::alloc::Allocator + fmt::Debug,
{
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        self.0
            .allocate(layout)
            .map_err(|_| StorageError::AllocError(layout))
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.0.deallocate(ptr, layout)
    }
}

#[cfg(feature = "allocator-api2")]
impl<A: ConstDefault> ConstDefault for ApiAlloc<A> {
    const DEFAULT: Self = ApiAlloc(A::DEFAULT);
}
