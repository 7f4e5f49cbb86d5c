use core::fmt;
use core::marker::PhantomData;
use core::mem::{self, size_of, MaybeUninit};
use core::ptr::NonNull;
use core::slice;

use crate::capacity::max_size;
use crate::error::StorageError;
use crate::storage::RawAlloc;
use crate::uninit::relocate;

/// The logical extent of a vector region.
///
/// Slots `0..length` hold live values and `length..capacity` are raw.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VecHeader {
    /// The number of addressable slots in the region
    pub capacity: usize,
    /// The number of live values at the start of the region
    pub length: usize,
}

/// Ownership of a raw vector region and the allocator which produced it.
///
/// The buffer allocates and releases memory but never constructs or
/// destroys values; its `length` is maintained by the owning container.
/// Dropping a buffer releases its region without dropping any values.
pub struct VecBuffer<T, A: RawAlloc> {
    data: NonNull<T>,
    header: VecHeader,
    alloc: A,
    _marker: PhantomData<T>,
}

impl<T, A: RawAlloc> VecBuffer<T, A> {
    /// Create an empty buffer without allocating.
    #[inline]
    pub const fn new_in(alloc: A) -> Self {
        Self {
            data: NonNull::dangling(),
            header: VecHeader {
                // zero-sized values never need storage
                capacity: if size_of::<T>() == 0 { max_size::<T>() } else { 0 },
                length: 0,
            },
            alloc,
            _marker: PhantomData,
        }
    }

    /// Create a buffer with room for exactly `capacity` values.
    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, StorageError> {
        let data = Self::allocate(&alloc, capacity)?;
        let mut buf = Self::new_in(alloc);
        if size_of::<T>() != 0 {
            buf.data = data;
            buf.header.capacity = capacity;
        }
        Ok(buf)
    }

    /// Request a raw region for `count` values from `alloc`.
    ///
    /// No allocator call is made when `count` is zero or `T` is zero-sized.
    #[inline]
    pub(crate) fn allocate(alloc: &A, count: usize) -> Result<NonNull<T>, StorageError> {
        if count == 0 || size_of::<T>() == 0 {
            Ok(NonNull::dangling())
        } else if count > max_size::<T>() {
            Err(StorageError::LengthError)
        } else {
            alloc.allocate::<T>(count)
        }
    }

    /// Release a region produced by `allocate`. A zero-sized region is ignored.
    ///
    /// # Safety
    /// `data` must have been returned by `allocate(alloc, count)`, and no live
    /// values may remain in it.
    #[inline]
    pub(crate) unsafe fn deallocate(alloc: &A, data: NonNull<T>, count: usize) {
        if count != 0 && size_of::<T>() != 0 {
            alloc.deallocate(data, count);
        }
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.header.capacity
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.header.length
    }

    #[inline]
    pub fn spare(&self) -> usize {
        self.header.capacity - self.header.length
    }

    /// # Safety
    /// `len` must not exceed the capacity, and slots `0..len` must hold
    /// live values.
    #[inline]
    pub unsafe fn set_length(&mut self, len: usize) {
        debug_assert!(len <= self.header.capacity);
        self.header.length = len;
    }

    #[inline]
    pub fn data(&self) -> NonNull<T> {
        self.data
    }

    #[inline]
    pub fn data_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn data_ptr_mut(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.header.length) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr(), self.header.length) }
    }

    /// Access the raw slots following the live values.
    #[inline]
    pub fn spare_uninit_slice(&mut self) -> &mut [MaybeUninit<T>] {
        unsafe {
            slice::from_raw_parts_mut(
                self.data.as_ptr().add(self.header.length).cast(),
                self.spare(),
            )
        }
    }

    /// Relocate the live values into a new region of `capacity` slots,
    /// releasing the current region.
    ///
    /// The current region is untouched if allocation fails.
    pub fn relocate_to(&mut self, capacity: usize) -> Result<(), StorageError> {
        debug_assert!(capacity >= self.header.length);
        if size_of::<T>() == 0 {
            return Ok(());
        }
        let data = Self::allocate(&self.alloc, capacity)?;
        unsafe {
            relocate(self.data.as_ptr(), data.as_ptr(), self.header.length);
            self.adopt(data, capacity);
        }
        Ok(())
    }

    /// Replace the region with `data`, releasing the current one. The
    /// length is retained.
    ///
    /// # Safety
    /// `data` must have been produced by `allocate(self.allocator(), capacity)`
    /// and must already hold the live values. The live values of the
    /// current region must have been relocated or destroyed.
    #[inline]
    pub(crate) unsafe fn adopt(&mut self, data: NonNull<T>, capacity: usize) {
        Self::deallocate(&self.alloc, self.data, self.header.capacity);
        self.data = data;
        self.header.capacity = capacity;
    }

    /// Transfer this region to a new buffer, leaving this one empty.
    #[inline]
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let empty = Self::new_in(self.alloc.clone());
        mem::replace(self, empty)
    }

    /// Exchange regions with `other`.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Release the region, leaving an empty buffer with the same allocator.
    ///
    /// # Safety
    /// No live values may remain in the region.
    #[cfg(any(test, feature = "zeroize"))]
    #[inline]
    pub(crate) unsafe fn release(&mut self) {
        Self::deallocate(&self.alloc, self.data, self.header.capacity);
        self.data = NonNull::dangling();
        self.header = VecHeader {
            capacity: if size_of::<T>() == 0 { max_size::<T>() } else { 0 },
            length: 0,
        };
    }

    /// Assemble a buffer from a region produced by `alloc` with an
    /// array layout for `capacity` values.
    ///
    /// # Safety
    /// The first `length` slots of `data` must hold live values, and the
    /// region must be releasable by `alloc` with `array_layout::<T>(capacity)`.
    #[cfg(any(feature = "alloc", feature = "allocator-api2"))]
    #[inline]
    pub(crate) unsafe fn from_parts(
        data: NonNull<T>,
        length: usize,
        capacity: usize,
        alloc: A,
    ) -> Self {
        let mut buf = Self::new_in(alloc);
        if size_of::<T>() != 0 {
            buf.data = data;
            buf.header.capacity = capacity;
        }
        buf.header.length = length;
        buf
    }

    /// Disassemble the buffer without releasing its region.
    #[cfg(any(feature = "alloc", feature = "allocator-api2"))]
    #[inline]
    pub(crate) fn into_parts(self) -> (NonNull<T>, usize, usize, A) {
        let me = mem::ManuallyDrop::new(self);
        let alloc = unsafe { core::ptr::read(&me.alloc) };
        (me.data, me.header.length, me.header.capacity, alloc)
    }
}

/// A freshly allocated replacement region which has not yet been adopted
/// by a buffer. The region is released if the guard is dropped.
pub(crate) struct Region<'a, T, A: RawAlloc> {
    alloc: &'a A,
    data: NonNull<T>,
    capacity: usize,
}

impl<'a, T, A: RawAlloc> Region<'a, T, A> {
    #[inline]
    pub fn allocate(alloc: &'a A, capacity: usize) -> Result<Self, StorageError> {
        let data = VecBuffer::<T, A>::allocate(alloc, capacity)?;
        Ok(Self {
            alloc,
            data,
            capacity,
        })
    }

    #[inline]
    pub fn data(&self) -> NonNull<T> {
        self.data
    }

    /// Give up ownership of the region, returning its address.
    #[inline]
    pub fn into_raw(self) -> NonNull<T> {
        let me = mem::ManuallyDrop::new(self);
        me.data
    }
}

impl<T, A: RawAlloc> Drop for Region<'_, T, A> {
    fn drop(&mut self) {
        unsafe { VecBuffer::<T, A>::deallocate(self.alloc, self.data, self.capacity) };
    }
}

impl<T, A: RawAlloc> fmt::Debug for VecBuffer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecBuffer")
            .field("data", &self.data)
            .field("header", &self.header)
            .field("alloc", &self.alloc)
            .finish()
    }
}

impl<T, A: RawAlloc> Drop for VecBuffer<T, A> {
    fn drop(&mut self) {
        unsafe { Self::deallocate(&self.alloc, self.data, self.header.capacity) };
    }
}

// The buffer uniquely owns its region, so it is as thread-safe as its parts.
unsafe impl<T: Send, A: RawAlloc + Send> Send for VecBuffer<T, A> {}

unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for VecBuffer<T, A> {}
