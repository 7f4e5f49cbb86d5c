//! Algorithms constructing values over uninitialized memory.
//!
//! Each operation writes values into raw slots one at a time through the
//! allocator capability. If producing a value panics partway through, every
//! value already constructed by that operation is destroyed again before the
//! panic continues, so the destination is left entirely uninitialized.

use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};
use core::slice;

use crate::storage::RawAlloc;

/// A guard which tracks values constructed into a range of raw slots.
///
/// Values are appended to the range with `push` and friends. Dropping the
/// inserter without calling `complete` destroys everything it constructed.
/// An inserter may also own a run of live values which were shifted out of
/// the way to open a gap; those are moved back on rollback.
pub struct Inserter<'a, T, A: RawAlloc> {
    alloc: &'a A,
    data: NonNull<T>,
    start: usize,
    end: usize,
    limit: usize,
    tail: usize,
    _marker: PhantomData<&'a mut [MaybeUninit<T>]>,
}

impl<'a, T, A: RawAlloc> Inserter<'a, T, A> {
    /// # Safety
    /// `data[start..limit]` must be valid, uninitialized slots for the
    /// lifetime of the inserter. When `tail` is non-zero, `data[limit..limit + tail]`
    /// must hold live values to be moved back to `data[start..]` on rollback.
    #[inline]
    pub(crate) unsafe fn new(
        alloc: &'a A,
        data: NonNull<T>,
        start: usize,
        limit: usize,
        tail: usize,
    ) -> Self {
        Self {
            alloc,
            data,
            start,
            end: start,
            limit,
            tail,
            _marker: PhantomData,
        }
    }

    /// Move the `tail` live values at `data[index..]` right by `count` slots,
    /// returning an inserter over the gap which was opened.
    ///
    /// # Safety
    /// `data[index..index + tail]` must hold live values and
    /// `data[..index + count + tail]` must lie within one allocation.
    #[inline]
    pub(crate) unsafe fn with_gap(
        alloc: &'a A,
        data: NonNull<T>,
        index: usize,
        count: usize,
        tail: usize,
    ) -> Self {
        if tail > 0 && count > 0 {
            let head = data.as_ptr().add(index);
            ptr::copy(head, head.add(count), tail);
        }
        Self::new(alloc, data, index, index + count, tail)
    }

    /// Create an inserter over a slice of uninitialized slots.
    #[inline]
    pub fn for_slice(alloc: &'a A, buf: &'a mut [MaybeUninit<T>]) -> Self {
        let limit = buf.len();
        let data = unsafe { NonNull::new_unchecked(buf.as_mut_ptr().cast::<T>()) };
        unsafe { Self::new(alloc, data, 0, limit, 0) }
    }

    /// Construct `val` in the next slot.
    ///
    /// Panics if the range is already full.
    #[inline]
    pub fn push(&mut self, val: T) {
        assert!(self.end < self.limit, "Inserter capacity exceeded");
        unsafe {
            self.alloc
                .construct(NonNull::new_unchecked(self.data.as_ptr().add(self.end)), val)
        };
        self.end += 1;
    }

    /// Construct a clone of `val` in the next slot.
    #[inline]
    pub fn push_clone(&mut self, val: &T)
    where
        T: Clone,
    {
        self.push(val.clone());
    }

    /// Construct the value produced by `f` in the next slot.
    #[inline]
    pub fn push_with<F>(&mut self, f: F)
    where
        F: FnOnce() -> T,
    {
        self.push(f());
    }

    /// Construct clones of each value in `data`.
    #[inline]
    pub fn extend_from_slice(&mut self, data: &[T])
    where
        T: Clone,
    {
        for item in data {
            self.push_clone(item);
        }
    }

    /// The number of values constructed so far.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check whether no values have been constructed.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Check whether every slot in the range has been constructed.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.end == self.limit
    }

    /// The number of slots remaining in the range.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.limit - self.end
    }

    /// Commit the constructed values, returning the number added.
    ///
    /// Any shifted tail values remain in their new position.
    #[inline]
    pub fn complete(mut self) -> usize {
        let count = self.end - self.start;
        self.start = self.end;
        self.tail = 0;
        count
    }
}

impl<T, A: RawAlloc> Drop for Inserter<'_, T, A> {
    fn drop(&mut self) {
        struct RestoreTail<T> {
            src: *const T,
            dst: *mut T,
            count: usize,
        }

        impl<T> Drop for RestoreTail<T> {
            fn drop(&mut self) {
                if self.count > 0 {
                    unsafe { ptr::copy(self.src, self.dst, self.count) };
                }
            }
        }

        // runs even if destroying a value below panics
        let _restore = RestoreTail {
            src: unsafe { self.data.as_ptr().add(self.limit) },
            dst: unsafe { self.data.as_ptr().add(self.start) },
            count: if self.start == self.limit { 0 } else { self.tail },
        };
        if self.start != self.end {
            unsafe {
                self.alloc.destroy_slice(
                    NonNull::new_unchecked(self.data.as_ptr().add(self.start)),
                    self.end - self.start,
                )
            };
        }
    }
}

#[inline]
unsafe fn assume_init_mut<T>(buf: &mut [MaybeUninit<T>], count: usize) -> &mut [T] {
    slice::from_raw_parts_mut(buf.as_mut_ptr().cast(), count)
}

/// Construct a clone of `value` in every slot of `dst`.
///
/// The returned values are owned by the caller, who becomes responsible for
/// destroying them.
pub fn fill<'d, T, A>(alloc: &A, dst: &'d mut [MaybeUninit<T>], value: &T) -> &'d mut [T]
where
    T: Clone,
    A: RawAlloc,
{
    fill_with(alloc, dst, || value.clone())
}

/// Construct a value produced by `f` in every slot of `dst`.
pub fn fill_with<'d, T, A, F>(alloc: &A, dst: &'d mut [MaybeUninit<T>], mut f: F) -> &'d mut [T]
where
    A: RawAlloc,
    F: FnMut() -> T,
{
    let count = {
        let mut ins = Inserter::for_slice(alloc, &mut *dst);
        while !ins.is_full() {
            ins.push(f());
        }
        ins.complete()
    };
    unsafe { assume_init_mut(dst, count) }
}

/// Construct clones of `src` in the leading slots of `dst`.
///
/// Panics if `dst` is shorter than `src`.
pub fn copy<'d, T, A>(alloc: &A, src: &[T], dst: &'d mut [MaybeUninit<T>]) -> &'d mut [T]
where
    T: Clone,
    A: RawAlloc,
{
    assert!(dst.len() >= src.len(), "Destination too small");
    let dst = &mut dst[..src.len()];
    let count = {
        let mut ins = Inserter::for_slice(alloc, &mut *dst);
        ins.extend_from_slice(src);
        ins.complete()
    };
    unsafe { assume_init_mut(dst, count) }
}

/// Construct values taken from `iter` in the leading slots of `dst`, stopping
/// when either is exhausted.
pub fn extend<'d, T, A, I>(alloc: &A, dst: &'d mut [MaybeUninit<T>], iter: I) -> &'d mut [T]
where
    A: RawAlloc,
    I: IntoIterator<Item = T>,
{
    let mut iter = iter.into_iter();
    let count = {
        let mut ins = Inserter::for_slice(alloc, &mut *dst);
        while !ins.is_full() {
            let Some(item) = iter.next() else { break };
            ins.push(item);
        }
        ins.complete()
    };
    unsafe { assume_init_mut(dst, count) }
}

/// Relocate `count` live values from `src` into the uninitialized slots at `dst`.
///
/// Relocation is a bitwise move and cannot fail. Afterward the source slots
/// are logically uninitialized.
///
/// # Safety
/// `src` must hold `count` live values, `dst` must be valid for `count`
/// writes, and the two ranges must not overlap.
#[inline]
pub unsafe fn relocate<T>(src: *const T, dst: *mut T, count: usize) {
    if count > 0 {
        ptr::copy_nonoverlapping(src, dst, count);
    }
}
