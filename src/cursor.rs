//! Random-access cursors over contiguous storage.
//!
//! A cursor is a bare position within a container's storage. It performs no
//! bounds checking: arithmetic and comparison are only meaningful between
//! cursors of the same container, and reading through a cursor outside of
//! the live range is undefined behavior. Prefer slice iterators for
//! traversal; cursors exist for position-oriented code such as converting
//! between addresses and indexes.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::ptr::{self, NonNull};

/// The traversal capability of an iterator or cursor.
///
/// Categories are ordered by strength: each category supports everything
/// the previous one does.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Single-pass traversal with no known length.
    Input,
    /// Multi-pass traversal with a known length.
    Forward,
    /// Traversal from either end with a known length.
    Bidirectional,
    /// Constant-time movement by any offset.
    RandomAccess,
}

impl Category {
    /// Classify an iterator by what it can report about itself.
    ///
    /// Only an iterator whose size hint is exact can have its distance
    /// computed up front; everything else must be consumed one element
    /// at a time.
    #[inline]
    pub fn of<I: Iterator + ?Sized>(iter: &I) -> Self {
        match iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Self::Forward,
            _ => Self::Input,
        }
    }

    /// Check whether the distance between two positions is known without
    /// traversal.
    #[inline]
    pub fn is_sized(self) -> bool {
        self >= Self::Forward
    }
}

/// A random-access cursor addressing one slot of a container.
pub struct Cursor<'a, T> {
    ptr: NonNull<T>,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Cursor<'a, T> {
    /// The traversal category of this cursor.
    pub const CATEGORY: Category = Category::RandomAccess;

    #[inline]
    pub(crate) const fn new(ptr: NonNull<T>) -> Self {
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    /// The raw address of this position.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Access the value at this position.
    ///
    /// # Safety
    /// The position must address a live value of the container.
    #[inline]
    pub unsafe fn get(&self) -> &'a T {
        &*self.ptr.as_ptr()
    }

    /// Access the value `offset` slots from this position.
    ///
    /// # Safety
    /// The target position must address a live value of the container.
    #[inline]
    pub unsafe fn get_at(&self, offset: isize) -> &'a T {
        &*self.ptr.as_ptr().offset(offset)
    }

    /// The signed number of slots from `origin` to this position.
    ///
    /// Zero-sized values all share one address, so their distance is zero.
    #[inline]
    pub fn distance_from(&self, origin: Cursor<'a, T>) -> isize {
        let size = core::mem::size_of::<T>();
        if size == 0 {
            0
        } else {
            (self.ptr.as_ptr() as isize).wrapping_sub(origin.ptr.as_ptr() as isize) / size as isize
        }
    }

    #[inline]
    fn offset(self, count: isize) -> Self {
        Self::new(unsafe { NonNull::new_unchecked(self.ptr.as_ptr().wrapping_offset(count)) })
    }

    /// Iterate the values from this position up to `end`.
    ///
    /// # Safety
    /// Both cursors must belong to the same container, `self <= end`, and
    /// every position in between must address a live value.
    #[inline]
    pub unsafe fn iter_to(self, end: Cursor<'a, T>) -> Iter<'a, T> {
        Iter {
            front: self,
            back: end,
            remain: end.distance_from(self).max(0) as usize,
        }
    }
}

impl<T> Clone for Cursor<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.ptr).finish()
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.ptr.as_ptr(), other.ptr.as_ptr())
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Cursor<'_, T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.ptr.as_ptr().cmp(&other.ptr.as_ptr())
    }
}

impl<T> Hash for Cursor<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ptr.hash(state)
    }
}

impl<T> Add<usize> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: usize) -> Self {
        self.offset(rhs as isize)
    }
}

impl<T> AddAssign<usize> for Cursor<'_, T> {
    #[inline]
    fn add_assign(&mut self, rhs: usize) {
        *self = *self + rhs;
    }
}

impl<T> Sub<usize> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: usize) -> Self {
        self.offset((rhs as isize).wrapping_neg())
    }
}

impl<T> SubAssign<usize> for Cursor<'_, T> {
    #[inline]
    fn sub_assign(&mut self, rhs: usize) {
        *self = *self - rhs;
    }
}

impl<'a, T> Sub for Cursor<'a, T> {
    type Output = isize;

    #[inline]
    fn sub(self, rhs: Self) -> isize {
        self.distance_from(rhs)
    }
}

/// A random-access cursor which traverses a container from back to front.
///
/// A reverse cursor addresses the slot immediately before its base position,
/// so the reverse cursor built from a container's `end` reads its last value.
pub struct RevCursor<'a, T> {
    base: Cursor<'a, T>,
}

impl<'a, T> RevCursor<'a, T> {
    /// The traversal category of this cursor.
    pub const CATEGORY: Category = Category::RandomAccess;

    /// Create a reverse cursor from a forward position.
    #[inline]
    pub const fn new(base: Cursor<'a, T>) -> Self {
        Self { base }
    }

    /// The forward position one past the addressed slot.
    #[inline]
    pub const fn base(&self) -> Cursor<'a, T> {
        self.base
    }

    /// Access the value at this position.
    ///
    /// # Safety
    /// The position must address a live value of the container.
    #[inline]
    pub unsafe fn get(&self) -> &'a T {
        self.base.get_at(-1)
    }
}

impl<T> Clone for RevCursor<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RevCursor<'_, T> {}

impl<T> fmt::Debug for RevCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RevCursor").field(&self.base.ptr).finish()
    }
}

impl<T> PartialEq for RevCursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl<T> Eq for RevCursor<'_, T> {}

impl<T> PartialOrd for RevCursor<'_, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for RevCursor<'_, T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other.base.cmp(&self.base)
    }
}

impl<T> Add<usize> for RevCursor<'_, T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: usize) -> Self {
        Self::new(self.base - rhs)
    }
}

impl<T> AddAssign<usize> for RevCursor<'_, T> {
    #[inline]
    fn add_assign(&mut self, rhs: usize) {
        self.base -= rhs;
    }
}

impl<T> Sub<usize> for RevCursor<'_, T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: usize) -> Self {
        Self::new(self.base + rhs)
    }
}

impl<T> SubAssign<usize> for RevCursor<'_, T> {
    #[inline]
    fn sub_assign(&mut self, rhs: usize) {
        self.base += rhs;
    }
}

impl<'a, T> Sub for RevCursor<'a, T> {
    type Output = isize;

    #[inline]
    fn sub(self, rhs: Self) -> isize {
        rhs.base.distance_from(self.base)
    }
}

/// An iterator over the values between two cursors.
pub struct Iter<'a, T> {
    front: Cursor<'a, T>,
    back: Cursor<'a, T>,
    remain: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.remain == 0 {
            return None;
        }
        self.remain -= 1;
        let item = unsafe { self.front.get() };
        self.front += 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remain, Some(self.remain))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remain == 0 {
            return None;
        }
        self.remain -= 1;
        self.back -= 1;
        Some(unsafe { self.back.get() })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
