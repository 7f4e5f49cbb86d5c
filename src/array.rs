//! A fixed-size array container.

use core::fmt;
use core::ops::{Deref, DerefMut};
use core::ptr::NonNull;

use const_default::ConstDefault;

use crate::cursor::{Cursor, RevCursor};
use crate::error::StorageError;

/// A fixed-size array of `N` values stored inline.
///
/// The array never allocates, grows or shrinks. Comparison is
/// lexicographic over the values. Indexing through `Deref` to `[T]`
/// is bounds-checked by the slice; `at` reports an out-of-range index
/// as an error, and `get_unchecked` performs no check at all.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Array<T, const N: usize> {
    data: [T; N],
}

impl<T: Default, const N: usize> Array<T, N> {
    /// Create an array of default values.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: core::array::from_fn(|_| T::default()),
        }
    }
}

impl<T, const N: usize> Array<T, N> {
    #[inline]
    pub const fn from_array(data: [T; N]) -> Self {
        Self { data }
    }

    #[inline]
    pub fn into_array(self) -> [T; N] {
        self.data
    }

    /// The number of values held.
    #[inline]
    pub const fn size(&self) -> usize {
        N
    }

    /// The largest number of values this array may hold, which is its size.
    #[inline]
    pub const fn max_size(&self) -> usize {
        N
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// The address of the first value.
    #[inline]
    pub const fn data(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Checked access to the value at `index`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, StorageError> {
        self.data
            .get(index)
            .ok_or(StorageError::OutOfRange { index, length: N })
    }

    /// Checked mutable access to the value at `index`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, StorageError> {
        self.data
            .get_mut(index)
            .ok_or(StorageError::OutOfRange { index, length: N })
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.data.first()
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.data.last()
    }

    /// Overwrite every value with a clone of `value`.
    pub fn fill(&mut self, value: &T)
    where
        T: Clone,
    {
        for slot in self.data.iter_mut() {
            slot.clone_from(value);
        }
    }

    /// Exchange every value with the value at the same position in `other`.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.data.swap_with_slice(&mut other.data);
    }

    #[inline]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(NonNull::from(&self.data).cast())
    }

    #[inline]
    pub fn end(&self) -> Cursor<'_, T> {
        self.begin() + N
    }

    #[inline]
    pub fn rbegin(&self) -> RevCursor<'_, T> {
        RevCursor::new(self.end())
    }

    #[inline]
    pub fn rend(&self) -> RevCursor<'_, T> {
        RevCursor::new(self.begin())
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Array<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.data.fmt(f)
    }
}

impl<T: Default, const N: usize> Default for Array<T, N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ConstDefault, const N: usize> ConstDefault for Array<T, N> {
    const DEFAULT: Self = Self {
        data: [const { T::DEFAULT }; N],
    };
}

impl<T, const N: usize> Deref for Array<T, N> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T, const N: usize> DerefMut for Array<T, N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T, const N: usize> AsRef<[T]> for Array<T, N> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<T, const N: usize> AsMut<[T]> for Array<T, N> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T, N> {
    #[inline]
    fn from(data: [T; N]) -> Self {
        Self { data }
    }
}

impl<T, const N: usize> From<Array<T, N>> for [T; N] {
    #[inline]
    fn from(array: Array<T, N>) -> Self {
        array.data
    }
}

impl<T, const N: usize> IntoIterator for Array<T, N> {
    type Item = T;
    type IntoIter = core::array::IntoIter<T, N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Array<T, N> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut Array<T, N> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

impl<T1, T2, const N: usize> PartialEq<[T2; N]> for Array<T1, N>
where
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &[T2; N]) -> bool {
        self.data[..].eq(&other[..])
    }
}

impl<T1, T2, const N: usize> PartialEq<[T2]> for Array<T1, N>
where
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &[T2]) -> bool {
        self.data[..].eq(other)
    }
}

#[cfg(feature = "zeroize")]
impl<T: zeroize::Zeroize, const N: usize> zeroize::Zeroize for Array<T, N> {
    #[inline]
    fn zeroize(&mut self) {
        self.data.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn const_default() {
        const ZEROS: Array<u8, 4> = Array::DEFAULT;
        assert_eq!(ZEROS, [0u8; 4]);
    }

    #[test]
    fn cursor_span() {
        let arr = Array::from([1, 2, 3]);
        assert_eq!(arr.end() - arr.begin(), 3);
        assert_eq!(unsafe { *arr.rbegin().get() }, 3);
    }
}
