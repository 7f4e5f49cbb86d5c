//! A growable vector over an injectable allocator.
//!
//! Every mutating operation which constructs more than one value is
//! all-or-nothing: when a value's constructor (`Clone`, `Default`, or a
//! producer closure) panics, the values constructed so far are destroyed,
//! any replacement region is released, and the vector is left exactly as
//! it was before the call. This covers the sized constructors, `insert_*`,
//! `extend_from_slice`, `resize*`, `assign_*` when a replacement region is
//! needed, and `push_with`. Element-wise overwriting (`clone_from` and
//! in-place `assign_*`) offers only the basic guarantee: the vector stays
//! valid, but a prefix may already hold the new values.
//!
//! A panic raised while destroying values during such a rollback aborts
//! the process, as Rust does for any panic during unwinding.

use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::{ManuallyDrop, MaybeUninit};
use core::ops::{Bound, Deref, DerefMut, Range, RangeBounds};
use core::ptr::{self, NonNull};

use const_default::ConstDefault;

use crate::capacity::{max_size, Grow, GrowExact, GrowGeometric};
use crate::cursor::{Category, Cursor, RevCursor};
use crate::error::{StorageError, UpdateError};
use crate::storage::{Global, RawAlloc};
use crate::uninit::{relocate, Inserter};

use self::buffer::{Region, VecBuffer};

pub use self::into_iter::IntoIter;

pub mod buffer;

#[macro_use]
mod macros;

mod into_iter;

#[cfg(feature = "zeroize")]
/// A `Vec` which automatically zeroizes its buffer when released.
pub type ZeroizingVec<T> = Vec<T, crate::storage::ZeroizingAlloc<Global>>;

#[cold]
#[inline(never)]
pub(super) fn index_panic() -> ! {
    panic!("Invalid element index");
}

#[cold]
#[inline(never)]
fn length_panic() -> ! {
    panic!("Iterator reported an incorrect length");
}

#[inline]
fn bounds_to_range(range: impl RangeBounds<usize>, length: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(i) => *i,
        Bound::Excluded(i) => i.checked_add(1).unwrap_or_else(|| index_panic()),
    };
    let end = match range.end_bound() {
        Bound::Unbounded => length,
        Bound::Included(i) => i.checked_add(1).unwrap_or_else(|| index_panic()),
        Bound::Excluded(i) => *i,
    };
    Range { start, end }
}

/// Commit an inserter which must have filled its whole range.
#[inline]
fn complete_exact<T, A: RawAlloc>(ins: Inserter<'_, T, A>) {
    if !ins.is_full() {
        length_panic();
    }
    ins.complete();
}

#[cfg(feature = "alloc")]
#[inline]
/// Create a `Vec<T>` from an array `[T; N]`.
pub fn from_array<T, const N: usize>(data: [T; N]) -> Vec<T> {
    from_array_in(data, Global)
}

#[inline]
/// Create a `Vec<T, A>` from an array `[T; N]` and an allocator instance.
pub fn from_array_in<T, A: RawAlloc, const N: usize>(data: [T; N], alloc: A) -> Vec<T, A> {
    let mut vec = Vec::with_capacity_in(N, alloc);
    vec.extend(data);
    vec
}

#[cfg(feature = "alloc")]
#[inline]
/// Create a `Vec<T>` holding `count` clones of `elem`.
pub fn from_elem<T: Clone>(elem: T, count: usize) -> Vec<T> {
    Vec::from_elem_in(elem, count, Global)
}

#[inline]
/// Create a `Vec<T, A>` holding `count` clones of `elem`, allocated from `alloc`.
pub fn from_elem_in<T: Clone, A: RawAlloc>(elem: T, count: usize, alloc: A) -> Vec<T, A> {
    Vec::from_elem_in(elem, count, alloc)
}

/// A contiguous growable array.
///
/// Slots `0..len()` of the region hold live values and `len()..capacity()`
/// are raw. The region is obtained from the allocator `A` and is replaced,
/// never grown in place, when more room is needed.
#[repr(transparent)]
pub struct Vec<T, A: RawAlloc = Global> {
    buffer: VecBuffer<T, A>,
}

impl<T, A: RawAlloc + ConstDefault> Vec<T, A> {
    /// Constructs a new, empty `Vec<T, A>`.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// # #![allow(unused_mut)]
    /// # #[cfg(feature = "alloc")]
    /// let mut vec: guarded_vec::vec::Vec<i32> = guarded_vec::vec::Vec::new();
    /// ```
    pub const fn new() -> Self {
        Self::new_in(A::DEFAULT)
    }
}

impl<T, A: RawAlloc + Default> Vec<T, A> {
    pub fn try_with_capacity(capacity: usize) -> Result<Self, StorageError> {
        Self::try_with_capacity_in(capacity, A::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, A::default())
    }

    /// Create a vector holding `count` clones of `elem`.
    pub fn from_elem(elem: T, count: usize) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(elem, count, A::default())
    }

    pub fn try_from_elem(elem: T, count: usize) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        Self::try_from_elem_in(elem, count, A::default())
    }

    /// Create a vector holding `count` values, each produced by `T::default()`.
    pub fn from_default(count: usize) -> Self
    where
        T: Default,
    {
        Self::from_default_in(count, A::default())
    }

    pub fn try_from_default(count: usize) -> Result<Self, StorageError>
    where
        T: Default,
    {
        Self::try_from_default_in(count, A::default())
    }

    pub fn from_slice(data: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_slice_in(data, A::default())
    }

    pub fn try_from_slice(data: &[T]) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        Self::try_from_slice_in(data, A::default())
    }
}

impl<T, A: RawAlloc> Vec<T, A> {
    /// Constructs a new, empty `Vec<T, A>` using the provided allocator.
    #[inline]
    pub const fn new_in(alloc: A) -> Self {
        Self {
            buffer: VecBuffer::new_in(alloc),
        }
    }

    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        match Self::try_with_capacity_in(capacity, alloc) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    /// Create an empty vector with room for exactly `capacity` values.
    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, StorageError> {
        Ok(Self {
            buffer: VecBuffer::try_with_capacity_in(capacity, alloc)?,
        })
    }

    pub fn from_elem_in(elem: T, count: usize, alloc: A) -> Self
    where
        T: Clone,
    {
        match Self::try_from_elem_in(elem, count, alloc) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    /// Create a vector of exactly `count` capacity holding clones of `elem`.
    ///
    /// If a clone panics, the clones made so far are dropped and the region
    /// is released before the panic continues.
    pub fn try_from_elem_in(elem: T, count: usize, alloc: A) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        let mut vec = Self::try_with_capacity_in(count, alloc)?;
        vec.try_resize(count, elem)?;
        Ok(vec)
    }

    pub fn from_default_in(count: usize, alloc: A) -> Self
    where
        T: Default,
    {
        match Self::try_from_default_in(count, alloc) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_from_default_in(count: usize, alloc: A) -> Result<Self, StorageError>
    where
        T: Default,
    {
        let mut vec = Self::try_with_capacity_in(count, alloc)?;
        vec.try_resize_with(count, T::default)?;
        Ok(vec)
    }

    pub fn from_slice_in(data: &[T], alloc: A) -> Self
    where
        T: Clone,
    {
        match Self::try_from_slice_in(data, alloc) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_from_slice_in(data: &[T], alloc: A) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        let mut vec = Self::try_with_capacity_in(data.len(), alloc)?;
        vec.try_extend_from_slice(data)?;
        Ok(vec)
    }

    pub fn from_iter_in<I>(iter: I, alloc: A) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let (min_cap, _) = iter.size_hint();
        let mut vec = Self::with_capacity_in(min_cap, alloc);
        vec.extend(iter);
        vec
    }

    #[inline]
    fn into_inner(self) -> VecBuffer<T, A> {
        let me = ManuallyDrop::new(self);
        unsafe { ptr::read(&me.buffer) }
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        self.buffer.allocator()
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buffer.data_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.data_ptr_mut()
    }

    /// The address of the first slot of the region.
    #[inline]
    pub fn data(&self) -> *const T {
        self.buffer.data_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.buffer.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buffer.as_mut_slice()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.length()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.length() == 0
    }

    /// The largest number of values a vector of `T` may hold.
    #[inline]
    pub const fn max_size(&self) -> usize {
        max_size::<T>()
    }

    #[inline]
    pub unsafe fn set_len(&mut self, length: usize) {
        self.buffer.set_length(length)
    }

    #[inline]
    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] {
        self.buffer.spare_uninit_slice()
    }

    /// Checked access to the value at `index`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, StorageError> {
        let length = self.buffer.length();
        self.as_slice()
            .get(index)
            .ok_or(StorageError::OutOfRange { index, length })
    }

    /// Checked mutable access to the value at `index`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, StorageError> {
        let length = self.buffer.length();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(StorageError::OutOfRange { index, length })
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// A cursor at the first live value.
    #[inline]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.buffer.data())
    }

    /// A cursor one past the last live value.
    #[inline]
    pub fn end(&self) -> Cursor<'_, T> {
        self.begin() + self.buffer.length()
    }

    /// A reverse cursor at the last live value.
    #[inline]
    pub fn rbegin(&self) -> RevCursor<'_, T> {
        RevCursor::new(self.end())
    }

    /// A reverse cursor one before the first live value.
    #[inline]
    pub fn rend(&self) -> RevCursor<'_, T> {
        RevCursor::new(self.begin())
    }

    /// Convert a cursor obtained from this vector into an index.
    ///
    /// Panics if the cursor lies outside of `begin()..=end()`. Cursors over
    /// zero-sized values do not carry a position, and always convert to zero.
    pub fn index_of(&self, pos: Cursor<'_, T>) -> usize {
        let offset = pos - self.begin();
        if offset < 0 || offset as usize > self.buffer.length() {
            index_panic();
        }
        offset as usize
    }

    /// Ensure `capacity() >= len() + additional`. A request for a total
    /// capacity `n` is `reserve(n.saturating_sub(len()))`.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        match self.try_reserve(additional) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Ensure there is room for `additional` more values, growing the region
    /// geometrically if needed.
    #[inline]
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), StorageError> {
        self._try_reserve::<GrowGeometric>(additional)
    }

    #[inline]
    pub fn reserve_exact(&mut self, additional: usize) {
        match self.try_reserve_exact(additional) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    #[inline]
    pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), StorageError> {
        self._try_reserve::<GrowExact>(additional)
    }

    fn _try_reserve<G: Grow>(&mut self, additional: usize) -> Result<(), StorageError> {
        if self.buffer.spare() >= additional {
            return Ok(());
        }
        let capacity = G::next_capacity::<T>(self.buffer.length(), additional)?;
        self.buffer.relocate_to(capacity)
    }

    /// Open a gap of `count` slots at `index`, and have `fill` construct
    /// exactly `count` values into it.
    ///
    /// When the gap fits within the current region, the tail is shifted
    /// right and the values are constructed in place; a panic in `fill`
    /// shifts the tail back. Otherwise a replacement region is allocated,
    /// the new values are constructed at their final position within it,
    /// and only then are the existing values relocated around them. A panic
    /// in `fill` releases the replacement without touching the vector.
    fn try_insert_gap<F>(&mut self, index: usize, count: usize, fill: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Inserter<'_, T, A>),
    {
        let len = self.buffer.length();
        if index > len {
            index_panic();
        }
        if count == 0 {
            return Ok(());
        }
        if self.buffer.spare() >= count {
            let data = self.buffer.data();
            let mut ins =
                unsafe { Inserter::with_gap(self.buffer.allocator(), data, index, count, len - index) };
            fill(&mut ins);
            complete_exact(ins);
        } else {
            let capacity = GrowGeometric::next_capacity::<T>(len, count)?;
            let alloc = self.buffer.allocator();
            let region = Region::<T, A>::allocate(alloc, capacity)?;
            let data = region.data();
            let mut ins = unsafe { Inserter::new(alloc, data, index, index + count, 0) };
            fill(&mut ins);
            complete_exact(ins);
            let prev = self.buffer.data_ptr();
            unsafe {
                relocate(prev, data.as_ptr(), index);
                relocate(
                    prev.add(index),
                    data.as_ptr().add(index + count),
                    len - index,
                );
            }
            let data = region.into_raw();
            unsafe { self.buffer.adopt(data, capacity) };
        }
        // SAFETY: the live values now occupy 0..len + count
        unsafe { self.buffer.set_length(len + count) };
        Ok(())
    }

    pub fn push(&mut self, item: T) {
        match self._try_reserve::<GrowGeometric>(1) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
        unsafe {
            self.push_unchecked(item);
        }
    }

    pub fn try_push(&mut self, item: T) -> Result<(), UpdateError<T>> {
        if let Err(error) = self._try_reserve::<GrowGeometric>(1) {
            return Err(UpdateError::new(error, item));
        }
        unsafe {
            self.push_unchecked(item);
        }
        Ok(())
    }

    /// # Safety
    /// The vector must have at least one slot of spare capacity.
    #[inline]
    pub unsafe fn push_unchecked(&mut self, item: T) {
        let length = self.buffer.length();
        let slot = NonNull::new_unchecked(self.buffer.data_ptr_mut().add(length));
        self.buffer.allocator().construct(slot, item);
        self.buffer.set_length(length + 1);
    }

    /// Construct a value in place at the end of the vector.
    ///
    /// If `f` panics, the vector is unchanged, including its capacity.
    pub fn push_with<F>(&mut self, f: F)
    where
        F: FnOnce() -> T,
    {
        match self.try_push_with(f) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_push_with<F>(&mut self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce() -> T,
    {
        let len = self.buffer.length();
        self.try_insert_gap(len, 1, |ins| ins.push_with(f))
    }

    /// Remove and return the last value. The value is moved out, so the
    /// allocator's `destroy` is not called for it.
    pub fn pop(&mut self) -> Option<T> {
        let mut tail = self.buffer.length();
        if tail > 0 {
            tail -= 1;
            unsafe {
                self.buffer.set_length(tail);
                Some(ptr::read(self.buffer.data_ptr().add(tail)))
            }
        } else {
            None
        }
    }

    pub fn insert(&mut self, index: usize, value: T) {
        match self.try_insert(index, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Insert `value` at `index`, shifting the following values right.
    ///
    /// Panics if `index > len()`. If storage cannot be obtained, the value
    /// is handed back within the error.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), UpdateError<T>> {
        let len = self.buffer.length();
        if index > len {
            index_panic();
        }
        if let Err(error) = self._try_reserve::<GrowGeometric>(1) {
            return Err(UpdateError::new(error, value));
        }
        unsafe {
            let head = self.buffer.data_ptr_mut().add(index);
            if index < len {
                ptr::copy(head, head.add(1), len - index);
            }
            self.buffer
                .allocator()
                .construct(NonNull::new_unchecked(head), value);
            self.buffer.set_length(len + 1);
        }
        Ok(())
    }

    pub fn insert_n(&mut self, index: usize, count: usize, value: &T)
    where
        T: Clone,
    {
        match self.try_insert_n(index, count, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Insert `count` clones of `value` at `index`.
    pub fn try_insert_n(&mut self, index: usize, count: usize, value: &T) -> Result<(), StorageError>
    where
        T: Clone,
    {
        self.try_insert_gap(index, count, |ins| {
            while !ins.is_full() {
                ins.push_clone(value);
            }
        })
    }

    pub fn insert_slice(&mut self, index: usize, values: &[T])
    where
        T: Clone,
    {
        match self.try_insert_slice(index, values) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_insert_slice(&mut self, index: usize, values: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        self.try_insert_gap(index, values.len(), |ins| ins.extend_from_slice(values))
    }

    pub fn insert_iter<I>(&mut self, index: usize, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        match self.try_insert_iter(index, iter) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Insert the values produced by `iter` at `index`.
    ///
    /// An iterator reporting an exact length is inserted with at most one
    /// reallocation, and is all-or-nothing. Any other iterator is inserted
    /// one value at a time; if it panics, the values already inserted remain.
    pub fn try_insert_iter<I>(&mut self, index: usize, iter: I) -> Result<(), StorageError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        if Category::of(&iter).is_sized() {
            let count = iter.size_hint().0;
            self.try_insert_gap(index, count, |ins| {
                while !ins.is_full() {
                    let Some(item) = iter.next() else { break };
                    ins.push(item);
                }
            })
        } else {
            let mut index = index;
            for item in iter {
                self.try_insert(index, item)
                    .map_err(|err| err.error().clone())?;
                index += 1;
            }
            Ok(())
        }
    }

    /// Remove and return the value at `index`, shifting the following
    /// values left.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.buffer.length();
        if index >= len {
            index_panic();
        }
        unsafe {
            let head = self.buffer.data_ptr_mut().add(index);
            let result = ptr::read(head);
            ptr::copy(head.add(1), head, len - index - 1);
            self.buffer.set_length(len - 1);
            result
        }
    }

    /// Remove and return the value at `index`, replacing it with the last value.
    pub fn swap_remove(&mut self, index: usize) -> T {
        let length = self.buffer.length();
        if index >= length {
            index_panic();
        }
        let last = length - 1;
        unsafe {
            self.buffer.set_length(last);
            let data = self.buffer.data_ptr_mut();
            let result = ptr::read(data.add(index));
            if index != last {
                ptr::copy_nonoverlapping(data.add(last), data.add(index), 1);
            }
            result
        }
    }

    /// Destroy the values within `range`, shifting the following values left.
    ///
    /// Panics if the range is out of bounds.
    pub fn erase<R>(&mut self, range: R)
    where
        R: RangeBounds<usize>,
    {
        struct CloseGap<'b, T, A: RawAlloc> {
            buffer: &'b mut VecBuffer<T, A>,
            start: usize,
            end: usize,
            len: usize,
        }

        impl<T, A: RawAlloc> Drop for CloseGap<'_, T, A> {
            fn drop(&mut self) {
                unsafe {
                    let data = self.buffer.data_ptr_mut();
                    ptr::copy(
                        data.add(self.end),
                        data.add(self.start),
                        self.len - self.end,
                    );
                    self.buffer
                        .set_length(self.len - (self.end - self.start));
                }
            }
        }

        let len = self.buffer.length();
        let Range { start, end } = bounds_to_range(range, len);
        if start > end || end > len {
            index_panic();
        }
        if start == end {
            return;
        }
        let data = self.buffer.data();
        // hide the erased values and the tail until the gap is closed
        unsafe { self.buffer.set_length(start) };
        let gap = CloseGap {
            buffer: &mut self.buffer,
            start,
            end,
            len,
        };
        unsafe {
            gap.buffer
                .allocator()
                .destroy_slice(NonNull::new_unchecked(data.as_ptr().add(start)), end - start);
        }
        drop(gap);
    }

    /// Destroy the values from `length` onward. Has no effect if the vector
    /// is not longer than `length`.
    pub fn truncate(&mut self, length: usize) {
        let old_len = self.buffer.length();
        if length < old_len {
            unsafe {
                self.buffer.set_length(length);
                let tail = NonNull::new_unchecked(self.buffer.data_ptr_mut().add(length));
                self.buffer.allocator().destroy_slice(tail, old_len - length);
            }
        }
    }

    /// Destroy every value. The capacity is retained.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    #[inline]
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        match self.try_resize(new_len, value) {
            Ok(_) => (),
            Err(err) => err.panic(),
        }
    }

    /// Resize to `new_len`, filling new slots with clones of `value`.
    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), StorageError>
    where
        T: Clone,
    {
        let len = self.buffer.length();
        match new_len.cmp(&len) {
            Ordering::Greater => self.try_insert_gap(len, new_len - len, |ins| {
                while ins.remaining() > 1 {
                    ins.push_clone(&value);
                }
                ins.push(value);
            }),
            Ordering::Less => {
                self.truncate(new_len);
                Ok(())
            }
            Ordering::Equal => Ok(()),
        }
    }

    #[inline]
    pub fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        match self.try_resize_with(new_len, f) {
            Ok(_) => (),
            Err(err) => err.panic(),
        }
    }

    pub fn try_resize_with<F>(&mut self, new_len: usize, mut f: F) -> Result<(), StorageError>
    where
        F: FnMut() -> T,
    {
        let len = self.buffer.length();
        if new_len > len {
            self.try_insert_gap(len, new_len - len, |ins| {
                while !ins.is_full() {
                    ins.push_with(&mut f);
                }
            })
        } else {
            self.truncate(new_len);
            Ok(())
        }
    }

    /// Resize to `new_len`, filling new slots with `T::default()`.
    #[inline]
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    #[inline]
    pub fn try_resize_default(&mut self, new_len: usize) -> Result<(), StorageError>
    where
        T: Default,
    {
        self.try_resize_with(new_len, T::default)
    }

    pub fn extend_from_slice(&mut self, items: &[T])
    where
        T: Clone,
    {
        match self.try_extend_from_slice(items) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_extend_from_slice(&mut self, items: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        let len = self.buffer.length();
        self.try_insert_gap(len, items.len(), |ins| ins.extend_from_slice(items))
    }

    fn try_extend(&mut self, iter: &mut impl Iterator<Item = T>) -> Result<(), UpdateError<T>> {
        loop {
            let length = self.buffer.length();
            let capacity = self.buffer.capacity();
            let mut full;
            let added = {
                let mut insert = unsafe {
                    Inserter::new(
                        self.buffer.allocator(),
                        self.buffer.data(),
                        length,
                        capacity,
                        0,
                    )
                };
                loop {
                    full = insert.is_full();
                    if full {
                        break;
                    }
                    let Some(item) = iter.next() else { break };
                    insert.push(item);
                }
                insert.complete()
            };
            if added > 0 {
                unsafe { self.buffer.set_length(length + added) };
            }
            if !full {
                // ran out of items to insert
                break;
            }
            let Some(item) = iter.next() else { break };
            let min_reserve = iter.size_hint().0.saturating_add(1);
            match self._try_reserve::<GrowGeometric>(min_reserve) {
                Ok(_) => unsafe { self.push_unchecked(item) },
                Err(err) => return Err(UpdateError::new(err, item)),
            }
        }
        Ok(())
    }

    /// Exchange contents, including allocators, with `other`.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.buffer.swap(&mut other.buffer);
    }

    /// Take ownership of this vector's region, leaving it empty.
    #[inline]
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        Self {
            buffer: self.buffer.take(),
        }
    }

    /// Destroy this vector's values, then take over the region of `source`,
    /// which is left holding this vector's former (now empty) region.
    #[inline]
    pub fn move_from(&mut self, source: &mut Self) {
        self.clear();
        self.swap(source);
    }

    pub fn assign_fill(&mut self, count: usize, value: &T)
    where
        T: Clone,
        A: Clone,
    {
        match self.try_assign_fill(count, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Replace the contents with `count` clones of `value`.
    ///
    /// When `count` exceeds the capacity, a replacement vector is built and
    /// swapped in, so a failure leaves this vector untouched. Otherwise the
    /// existing values are overwritten in place.
    pub fn try_assign_fill(&mut self, count: usize, value: &T) -> Result<(), StorageError>
    where
        T: Clone,
        A: Clone,
    {
        if count > self.buffer.capacity() {
            let mut replace = Self::try_with_capacity_in(count, self.allocator().clone())?;
            replace.try_insert_n(0, count, value)?;
            self.swap(&mut replace);
            return Ok(());
        }
        let len = self.buffer.length();
        for slot in self.as_mut_slice().iter_mut().take(count) {
            slot.clone_from(value);
        }
        if count <= len {
            self.truncate(count);
            Ok(())
        } else {
            self.try_insert_n(len, count - len, value)
        }
    }

    pub fn assign_slice(&mut self, values: &[T])
    where
        T: Clone,
        A: Clone,
    {
        match self.try_assign_slice(values) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Replace the contents with clones of `values`.
    pub fn try_assign_slice(&mut self, values: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
        A: Clone,
    {
        if values.len() > self.buffer.capacity() {
            let mut replace = Self::try_from_slice_in(values, self.allocator().clone())?;
            self.swap(&mut replace);
            return Ok(());
        }
        let len = self.buffer.length();
        if values.len() <= len {
            self.truncate(values.len());
            self.as_mut_slice().clone_from_slice(values);
            Ok(())
        } else {
            let (head, tail) = values.split_at(len);
            self.as_mut_slice().clone_from_slice(head);
            self.try_extend_from_slice(tail)
        }
    }

    pub fn assign_iter<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
        A: Clone,
    {
        match self.try_assign_iter(iter) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Replace the contents with the values produced by `iter`.
    ///
    /// An iterator reporting an exact length which exceeds the capacity is
    /// collected into a replacement region first. Otherwise the existing
    /// values are overwritten as the iterator is consumed.
    pub fn try_assign_iter<I>(&mut self, iter: I) -> Result<(), StorageError>
    where
        I: IntoIterator<Item = T>,
        A: Clone,
    {
        let mut iter = iter.into_iter();
        if Category::of(&iter).is_sized() {
            let count = iter.size_hint().0;
            if count > self.buffer.capacity() {
                let mut replace = Self::try_with_capacity_in(count, self.allocator().clone())?;
                replace.try_insert_iter(0, iter)?;
                self.swap(&mut replace);
                return Ok(());
            }
        }
        let mut written = 0;
        for slot in self.as_mut_slice() {
            let Some(item) = iter.next() else { break };
            *slot = item;
            written += 1;
        }
        if written < self.buffer.length() {
            self.truncate(written);
            Ok(())
        } else {
            self.try_extend(&mut iter).map_err(|err| err.error().clone())
        }
    }
}

impl<T, A: RawAlloc> AsRef<[T]> for Vec<T, A> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> AsMut<[T]> for Vec<T, A> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: RawAlloc> Borrow<[T]> for Vec<T, A> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> BorrowMut<[T]> for Vec<T, A> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone, A: RawAlloc + Clone> Clone for Vec<T, A> {
    /// Copy construction: the clone has exactly `len()` capacity.
    fn clone(&self) -> Self {
        Self::from_slice_in(self, self.allocator().clone())
    }

    /// Copy assignment, reusing this vector's region when it is large enough.
    fn clone_from(&mut self, source: &Self) {
        let len = self.buffer.length();
        if source.len() > self.buffer.capacity() {
            let mut replace = Self::from_slice_in(source, self.allocator().clone());
            self.swap(&mut replace);
        } else if len >= source.len() {
            self.truncate(source.len());
            self.as_mut_slice().clone_from_slice(source);
        } else {
            let (head, tail) = source.split_at(len);
            self.as_mut_slice().clone_from_slice(head);
            self.extend_from_slice(tail);
        }
    }
}

impl<T: fmt::Debug, A: RawAlloc> fmt::Debug for Vec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}

impl<T, A: RawAlloc + Default> Default for Vec<T, A> {
    #[inline]
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: RawAlloc> Deref for Vec<T, A> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> DerefMut for Vec<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, A: RawAlloc> Drop for Vec<T, A> {
    fn drop(&mut self) {
        let length = self.buffer.length();
        if length > 0 {
            unsafe {
                self.buffer.set_length(0);
                self.buffer
                    .allocator()
                    .destroy_slice(self.buffer.data(), length);
            }
        }
    }
}

impl<T, A: RawAlloc> Extend<T> for Vec<T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        match self.try_extend(&mut iter.into_iter()) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }
}

impl<'a, T: Clone + 'a, A: RawAlloc> Extend<&'a T> for Vec<T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        match self.try_extend(&mut iter.into_iter().cloned()) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }
}

impl<T, A: RawAlloc + Default> FromIterator<T> for Vec<T, A> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_in(iter, A::default())
    }
}

impl<T: Clone, A: RawAlloc + Default> From<&[T]> for Vec<T, A> {
    #[inline]
    fn from(data: &[T]) -> Self {
        Self::from_slice(data)
    }
}

impl<T: Clone, A: RawAlloc + Default> From<&mut [T]> for Vec<T, A> {
    #[inline]
    fn from(data: &mut [T]) -> Self {
        Self::from_slice(data)
    }
}

impl<T: Clone, A: RawAlloc + Default, const N: usize> From<&[T; N]> for Vec<T, A> {
    #[inline]
    fn from(data: &[T; N]) -> Self {
        Self::from_slice(data)
    }
}

impl<T, A: RawAlloc + Default, const N: usize> From<[T; N]> for Vec<T, A> {
    #[inline]
    fn from(data: [T; N]) -> Self {
        from_array_in(data, A::default())
    }
}

impl<A: RawAlloc + Default> From<&str> for Vec<u8, A> {
    #[inline]
    fn from(data: &str) -> Self {
        Self::from_slice(data.as_bytes())
    }
}

#[cfg(feature = "alloc")]
impl<T> From<alloc::vec::Vec<T>> for Vec<T, Global> {
    fn from(vec: alloc::vec::Vec<T>) -> Self {
        let mut vec = ManuallyDrop::new(vec);
        let length = vec.len();
        let capacity = vec.capacity();
        let data = unsafe { NonNull::new_unchecked(vec.as_mut_ptr()) };
        Self {
            buffer: unsafe { VecBuffer::from_parts(data, length, capacity, Global) },
        }
    }
}

#[cfg(feature = "alloc")]
impl<T> From<Vec<T, Global>> for alloc::vec::Vec<T> {
    fn from(vec: Vec<T, Global>) -> Self {
        let (data, length, capacity, _alloc) = vec.into_inner().into_parts();
        unsafe { alloc::vec::Vec::from_raw_parts(data.as_ptr(), length, capacity) }
    }
}

#[cfg(feature = "allocator-api2")]
impl<T, A> From<allocator_api2::vec::Vec<T, A>> for Vec<T, crate::storage::ApiAlloc<A>>
where
    A: allocator_api2::alloc::Allocator + fmt::Debug,
{
    fn from(vec: allocator_api2::vec::Vec<T, A>) -> Self {
        let (data, length, capacity, alloc) = vec.into_raw_parts_with_alloc();
        Self {
            buffer: unsafe {
                VecBuffer::from_parts(
                    NonNull::new_unchecked(data),
                    length,
                    capacity,
                    crate::storage::ApiAlloc(alloc),
                )
            },
        }
    }
}

#[cfg(feature = "allocator-api2")]
impl<T, A> From<Vec<T, crate::storage::ApiAlloc<A>>> for allocator_api2::vec::Vec<T, A>
where
    A: allocator_api2::alloc::Allocator + fmt::Debug,
{
    fn from(vec: Vec<T, crate::storage::ApiAlloc<A>>) -> Self {
        let (data, length, capacity, alloc) = vec.into_inner().into_parts();
        unsafe { allocator_api2::vec::Vec::from_raw_parts_in(data.as_ptr(), length, capacity, alloc.0) }
    }
}

impl<T, A: RawAlloc> IntoIterator for Vec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.into_inner())
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a Vec<T, A> {
    type Item = &'a T;
    type IntoIter = <&'a [T] as IntoIterator>::IntoIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a mut Vec<T, A> {
    type Item = &'a mut T;
    type IntoIter = <&'a mut [T] as IntoIterator>::IntoIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T1, A1, T2, A2> PartialEq<Vec<T2, A2>> for Vec<T1, A1>
where
    A1: RawAlloc,
    A2: RawAlloc,
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &Vec<T2, A2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T: Eq, A: RawAlloc> Eq for Vec<T, A> {}

impl<T1, A1, T2> PartialEq<[T2]> for Vec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &[T2]) -> bool {
        self.as_slice().eq(other)
    }
}

impl<T1, A1, T2> PartialEq<&[T2]> for Vec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &&[T2]) -> bool {
        self.as_slice().eq(*other)
    }
}

impl<T1, A1, T2, const N: usize> PartialEq<[T2; N]> for Vec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, A1, T2, const N: usize> PartialEq<&[T2; N]> for Vec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &&[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, T2, A2> PartialEq<Vec<T2, A2>> for [T1]
where
    T2: PartialEq<T1>,
    A2: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &Vec<T2, A2>) -> bool {
        other.eq(self)
    }
}

impl<T1, T2, A2, const N: usize> PartialEq<Vec<T2, A2>> for [T1; N]
where
    T2: PartialEq<T1>,
    A2: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &Vec<T2, A2>) -> bool {
        other.eq(self)
    }
}

#[cfg(feature = "alloc")]
impl<T1, T2, A2> PartialEq<Vec<T2, A2>> for alloc::vec::Vec<T1>
where
    T2: PartialEq<T1>,
    A2: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &Vec<T2, A2>) -> bool {
        other.eq(self.as_slice())
    }
}

#[cfg(feature = "alloc")]
impl<T1, A1, T2> PartialEq<alloc::vec::Vec<T2>> for Vec<T1, A1>
where
    T1: PartialEq<T2>,
    A1: RawAlloc,
{
    #[inline]
    fn eq(&self, other: &alloc::vec::Vec<T2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T: PartialOrd, A: RawAlloc> PartialOrd for Vec<T, A> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, A: RawAlloc> Ord for Vec<T, A> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, A: RawAlloc> Hash for Vec<T, A> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

#[cfg(feature = "zeroize")]
impl<T, A: RawAlloc> zeroize::Zeroize for Vec<T, crate::storage::ZeroizingAlloc<A>> {
    /// Destroy every value and release the region, wiping it.
    #[inline]
    fn zeroize(&mut self) {
        self.clear();
        // SAFETY: no live values remain
        unsafe { self.buffer.release() };
    }
}

#[cfg(feature = "zeroize")]
impl<T, A: RawAlloc> zeroize::ZeroizeOnDrop for Vec<T, crate::storage::ZeroizingAlloc<A>> {}

#[cfg(test)]
mod tests {
    use super::bounds_to_range;

    #[test]
    fn range_bounds() {
        assert_eq!(bounds_to_range(.., 5), 0..5);
        assert_eq!(bounds_to_range(1..=2, 5), 1..3);
        assert_eq!(bounds_to_range(3.., 5), 3..5);
    }

    #[test]
    #[should_panic(expected = "Invalid element index")]
    fn range_bound_overflow() {
        bounds_to_range(..=usize::MAX, 5);
    }
}
