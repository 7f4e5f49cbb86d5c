use core::fmt;
use core::iter::FusedIterator;
use core::ops::Range;
use core::ptr::{self, NonNull};
use core::slice;

use crate::storage::RawAlloc;

use super::buffer::VecBuffer;

/// An iterator which moves the values out of a `Vec`.
pub struct IntoIter<T, A: RawAlloc> {
    remain: Range<usize>,
    buf: VecBuffer<T, A>,
}

impl<T, A: RawAlloc> IntoIter<T, A> {
    pub(super) fn new(mut buf: VecBuffer<T, A>) -> Self {
        let end = buf.length();
        // the iterator now tracks which values are live
        unsafe { buf.set_length(0) };
        Self {
            remain: Range { start: 0, end },
            buf,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        unsafe {
            slice::from_raw_parts(
                self.buf.data_ptr().add(self.remain.start),
                self.remain.len(),
            )
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe {
            slice::from_raw_parts_mut(
                self.buf.data_ptr_mut().add(self.remain.start),
                self.remain.len(),
            )
        }
    }

    pub const fn len(&self) -> usize {
        self.remain.end - self.remain.start
    }

    pub const fn is_empty(&self) -> bool {
        self.remain.end == self.remain.start
    }

    fn clear(&mut self) {
        let remain_len = self.len();
        if remain_len > 0 {
            let start = self.remain.start;
            self.remain.start = self.remain.end;
            unsafe {
                let head = NonNull::new_unchecked(self.buf.data_ptr_mut().add(start));
                self.buf.allocator().destroy_slice(head, remain_len);
            }
        }
    }
}

impl<T: fmt::Debug, A: RawAlloc> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: RawAlloc> AsRef<[T]> for IntoIter<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> AsMut<[T]> for IntoIter<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: RawAlloc> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.remain.start;
        if index != self.remain.end {
            self.remain.start = index + 1;
            unsafe {
                let read = self.buf.data_ptr().add(index);
                Some(ptr::read(read))
            }
        } else {
            None
        }
    }

    #[inline]
    fn count(self) -> usize
    where
        Self: Sized,
    {
        self.len()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<T, A: RawAlloc> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let mut index = self.remain.end;
        if index != self.remain.start {
            index -= 1;
            self.remain.end = index;
            unsafe {
                let read = self.buf.data_ptr().add(index);
                Some(ptr::read(read))
            }
        } else {
            None
        }
    }
}

impl<T, A: RawAlloc> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: RawAlloc> FusedIterator for IntoIter<T, A> {}

impl<T, A: RawAlloc> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}
