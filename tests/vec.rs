#![cfg(feature = "alloc")]

use core::marker::PhantomData as Cfg;
use std::rc::Rc;

use rstest::rstest;

#[cfg(feature = "zeroize")]
use guarded_vec::storage::ZeroizingAlloc;
use guarded_vec::{storage::Global, RawAlloc, StorageError, Vec as GVec};

const SLICE: &[usize] = &[1, 2, 3, 4, 5];

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
struct Zst;

#[test]
fn vec_new_global() {
    let v = GVec::<usize>::new();
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), 0);
}

#[test]
fn vec_with_capacity_global() {
    let v = GVec::<usize>::with_capacity(10);
    assert_eq!(v.capacity(), 10);
    assert!(v.is_empty());
}

#[test]
fn vec_check_capacity_growth() {
    let mut res = [0usize; 10];
    let mut vec = GVec::<usize>::new();
    for cap in res.iter_mut() {
        vec.push(1);
        assert!(vec.len() <= vec.capacity());
        *cap = vec.capacity();
    }
    assert_eq!(res, [1, 2, 4, 4, 8, 8, 8, 8, 16, 16]);
}

#[test]
fn vec_growth_fits_large_insert() {
    let mut vec = GVec::<usize>::from([1, 2]);
    vec.insert_slice(1, &[0; 10]);
    // the addition exceeds the current length, so exactly enough is allocated
    assert_eq!(vec.capacity(), 12);
    assert_eq!(vec.len(), 12);
}

#[rstest]
#[case::global(Cfg::<Global>)]
#[cfg_attr(feature = "zeroize", case::zeroizing(Cfg::<ZeroizingAlloc<Global>>))]
fn vec_extend_new<A: RawAlloc + Default>(#[case] _config: Cfg<A>) {
    let mut v = GVec::<usize, A>::default();
    v.extend(SLICE.iter().cloned());
    assert!(v.capacity() >= SLICE.len());
    assert!(v.len() == SLICE.len());
    assert_eq!(v.as_slice(), SLICE);
}

#[rstest]
#[case::global(Global)]
#[cfg_attr(feature = "zeroize", case::zeroizing(ZeroizingAlloc(Global)))]
#[case::by_ref(&Global)]
fn vec_push_pop_in<A: RawAlloc>(#[case] alloc: A) {
    let mut b = GVec::new_in(alloc);
    b.push(32);
    assert_eq!(b.as_slice(), &[32]);
    assert_eq!(b.pop(), Some(32));
    assert_eq!(b.pop(), None);
    b.extend_from_slice(&[0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(b, &[0, 1, 2, 3, 4, 5, 6, 7][..]);
    assert_eq!(b.swap_remove(1), 1);
    assert_eq!(b, &[0, 7, 2, 3, 4, 5, 6][..]);
    assert_eq!(b.swap_remove(6), 6);
    assert_eq!(b, &[0, 7, 2, 3, 4, 5][..]);
}

#[rstest]
#[case::global(Global)]
#[cfg_attr(feature = "zeroize", case::zeroizing(ZeroizingAlloc(Global)))]
fn vec_from_elem_in<A: RawAlloc>(#[case] alloc: A) {
    let v = GVec::from_elem_in(7u16, 4, alloc);
    assert_eq!(v, [7, 7, 7, 7]);
    assert_eq!(v.capacity(), 4);
}

#[test]
fn vec_extend_new_global_medium() {
    let data: [usize; 100] = core::array::from_fn(|i| i);
    let mut v = GVec::<usize>::new();
    v.extend(data.iter().cloned());
    assert!(v.capacity() >= data.len());
    assert!(v.len() == data.len());
    assert_eq!(v.as_slice(), data);
}

#[test]
fn vec_extend_unsized_iter() {
    let mut v = GVec::<usize>::with_capacity(2);
    v.extend((0..20).filter(|i| i % 2 == 0));
    assert_eq!(v.len(), 10);
    assert_eq!(v[9], 18);
}

#[test]
fn vec_from_iter_new_global() {
    let v = GVec::<usize>::from_iter(SLICE.iter().cloned());
    assert!(v.capacity() >= SLICE.len());
    assert_eq!(v.as_slice(), SLICE);
}

#[test]
fn vec_from_slice_global() {
    let v = GVec::<usize>::from_slice(SLICE);
    assert_eq!(v.capacity(), SLICE.len());
    assert_eq!(v.as_slice(), SLICE);
}

#[test]
fn vec_from_default() {
    let v = GVec::<u32>::from_default(3);
    assert_eq!(v, [0, 0, 0]);
    assert_eq!(v.capacity(), 3);
}

#[test]
fn vec_extend_grow_global() {
    let mut v = GVec::<usize>::with_capacity(1);
    v.extend_from_slice(SLICE);
    assert!(v.capacity() >= SLICE.len());
    assert_eq!(v.as_slice(), SLICE);
}

#[test]
fn vec_erase_insert_reserve_resize() {
    let mut v = GVec::<i32>::from([1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(v.len(), 9);

    let pos = v.index_of(v.begin() + 3);
    v.erase(pos..=pos);
    assert_eq!(v, [1, 2, 3, 5, 6, 7, 8, 9]);

    let pos = v.index_of(v.begin() + 1);
    v.insert_slice(pos, &[55, 95, 123]);
    assert_eq!(v, [1, 55, 95, 123, 2, 3, 5, 6, 7, 8, 9]);

    v.reserve(20);
    assert!(v.capacity() >= 20);
    assert_eq!(v.len(), 11);

    let cap = v.capacity();
    v.resize(2, 0);
    assert_eq!(v, [1, 55]);
    assert_eq!(v.capacity(), cap);

    v.resize_default(14);
    assert_eq!(v.len(), 14);
    assert!(v.capacity() >= 14);
    assert!(v[2..].iter().all(|&x| x == 0));
}

#[test]
fn vec_insert_front_and_end() {
    let mut b = GVec::<u32>::new();
    b.insert(0, 2);
    b.insert(0, 1);
    b.insert(2, 3);
    assert_eq!(b, [1, 2, 3]);
    assert_eq!(b.remove(1), 2);
    assert_eq!(b, [1, 3]);
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn vec_insert_out_of_bounds() {
    let mut b = GVec::<u32>::from([1, 2]);
    b.insert(3, 0);
}

#[test]
fn vec_insert_n() {
    let mut b = GVec::<u32>::from([1, 5]);
    b.insert_n(1, 3, &9);
    assert_eq!(b, [1, 9, 9, 9, 5]);
    b.insert_n(5, 0, &0);
    assert_eq!(b.len(), 5);
}

#[test]
fn vec_insert_iter_sized() {
    let mut b = GVec::<u32>::with_capacity(10);
    b.extend_from_slice(&[1, 5]);
    b.insert_iter(1, 2..5);
    assert_eq!(b, [1, 2, 3, 4, 5]);
    assert_eq!(b.capacity(), 10);
}

#[test]
fn vec_insert_iter_unsized() {
    let mut b = GVec::<u32>::from([0, 100]);
    b.insert_iter(1, (1..10).filter(|i| i % 3 == 0));
    assert_eq!(b, [0, 3, 6, 9, 100]);
}

#[test]
fn vec_erase_range() {
    let mut b = GVec::<u32>::from_iter(0..10);
    b.erase(3..8);
    assert_eq!(&b[..], &[0, 1, 2, 8, 9]);
    b.erase(..);
    assert!(b.is_empty());
    assert_eq!(b.capacity(), 10);
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn vec_erase_out_of_bounds() {
    let mut b = GVec::<u32>::from_iter(0..3);
    b.erase(2..5);
}

#[test]
fn vec_erase_drops_values() {
    let item = Rc::new(());
    let mut b = GVec::<Rc<()>>::from_elem(item.clone(), 6);
    b.erase(1..4);
    assert_eq!(b.len(), 3);
    assert_eq!(Rc::strong_count(&item), 4);
}

#[test]
fn vec_truncate_and_clear() {
    let mut b = GVec::<u32>::from_iter(0..6);
    b.truncate(10);
    assert_eq!(b.len(), 6);
    b.truncate(2);
    assert_eq!(b, [0, 1]);
    b.clear();
    assert!(b.is_empty());
    assert_eq!(b.capacity(), 6);
}

#[test]
fn vec_at_checked() {
    let mut b = GVec::<u32>::from([4, 5, 6]);
    assert_eq!(b.at(1), Ok(&5));
    assert_eq!(
        b.at(3),
        Err(StorageError::OutOfRange {
            index: 3,
            length: 3
        })
    );
    *b.at_mut(0).unwrap() = 1;
    assert_eq!(b.front(), Some(&1));
    assert_eq!(b.back(), Some(&6));
    assert_eq!(unsafe { *b.data().add(2) }, 6);
}

#[test]
fn vec_clone_deep() {
    let v1 = GVec::<u32>::from([1, 2, 3]);
    let mut v2 = v1.clone();
    assert_eq!(v1, v2);
    v2[0] = 10;
    v2.push(4);
    assert_eq!(v1, [1, 2, 3]);
    assert_eq!(v2, [10, 2, 3, 4]);
}

#[test]
fn vec_clone_from_larger_source() {
    let mut dst = GVec::<u32>::from([1]);
    let src = GVec::<u32>::from([5, 6, 7, 8]);
    dst.clone_from(&src);
    assert_eq!(dst, src);
    assert!(dst.capacity() >= 4);
}

#[test]
fn vec_clone_from_shorter_source() {
    let mut dst = GVec::<u32>::from([1, 2, 3, 4, 5]);
    let src = GVec::<u32>::from([9, 9]);
    dst.clone_from(&src);
    assert_eq!(dst, [9, 9]);
    assert_eq!(dst.capacity(), 5);
}

#[test]
fn vec_clone_from_within_capacity() {
    let mut dst = GVec::<u32>::with_capacity(10);
    dst.push(1);
    let src = GVec::<u32>::from([7, 8, 9]);
    dst.clone_from(&src);
    assert_eq!(dst, [7, 8, 9]);
    assert_eq!(dst.capacity(), 10);
}

#[test]
fn vec_assign_fill() {
    let mut v = GVec::<u32>::from([1, 2, 3]);
    v.assign_fill(2, &7);
    assert_eq!(v, [7, 7]);
    assert_eq!(v.capacity(), 3);
    v.assign_fill(3, &8);
    assert_eq!(v, [8, 8, 8]);
    v.assign_fill(5, &9);
    assert_eq!(v, [9, 9, 9, 9, 9]);
    assert_eq!(v.capacity(), 5);
}

#[test]
fn vec_assign_slice() {
    let mut v = GVec::<u32>::with_capacity(4);
    v.assign_slice(&[1, 2]);
    assert_eq!(v, [1, 2]);
    v.assign_slice(&[3, 4, 5]);
    assert_eq!(v, [3, 4, 5]);
    v.assign_slice(&[6]);
    assert_eq!(v, [6]);
    v.assign_slice(&[0; 8]);
    assert_eq!(v.len(), 8);
}

#[test]
fn vec_assign_iter() {
    let mut v = GVec::<u32>::from([1, 2, 3]);
    v.assign_iter(10..12);
    assert_eq!(v, [10, 11]);
    v.assign_iter((0..10).filter(|i| i % 2 == 1));
    assert_eq!(v, [1, 3, 5, 7, 9]);
    v.assign_iter(0..20);
    assert_eq!(v.len(), 20);
    assert_eq!(v.capacity(), 20);
}

#[test]
fn vec_take_and_move_from() {
    let mut v1 = GVec::<u32>::from([1, 2, 3]);
    let v2 = v1.take();
    assert!(v1.is_empty());
    assert_eq!(v1.capacity(), 0);
    assert_eq!(v2, [1, 2, 3]);

    let mut v3 = GVec::<u32>::from([9]);
    let mut v4 = v2;
    v3.move_from(&mut v4);
    assert_eq!(v3, [1, 2, 3]);
    assert!(v4.is_empty());
}

#[test]
fn vec_swap() {
    let mut v1 = GVec::<u32>::from([1, 2, 3]);
    let mut v2 = GVec::<u32>::with_capacity(10);
    v1.swap(&mut v2);
    assert!(v1.is_empty());
    assert_eq!(v1.capacity(), 10);
    assert_eq!(v2, [1, 2, 3]);
}

#[test]
fn vec_push_with() {
    let mut v = GVec::<String>::new();
    v.push_with(|| "a".to_string());
    v.push_with(String::new);
    assert_eq!(v, ["a".to_string(), String::new()]);
}

#[test]
fn vec_try_push_returns_value() {
    let mut v = GVec::<u32>::new();
    assert!(v.try_push(1).is_ok());
    assert_eq!(v, [1]);
}

#[test]
#[should_panic(expected = "Exceeded maximum container size")]
fn vec_reserve_over_max() {
    let mut v = GVec::<u64>::from([1]);
    v.reserve(usize::MAX);
}

#[test]
fn vec_try_reserve_over_max() {
    let mut v = GVec::<u64>::from([1]);
    assert_eq!(v.try_reserve(v.max_size()), Err(StorageError::LengthError));
    assert_eq!(v.capacity(), 1);
    assert_eq!(
        GVec::<u64>::try_with_capacity(usize::MAX).unwrap_err(),
        StorageError::LengthError
    );
}

#[test]
fn vec_reserve_exact() {
    let mut v = GVec::<u32>::from([1, 2, 3]);
    v.reserve_exact(1);
    assert_eq!(v.capacity(), 4);
    v.reserve_exact(1);
    assert_eq!(v.capacity(), 4);
}

#[test]
fn vec_reserve_additional() {
    let mut v = GVec::<u32>::from([1, 2, 3]);
    v.reserve(5);
    assert!(v.capacity() >= 8);
    let cap = v.capacity();
    // a total capacity request below the current capacity is a no-op
    v.reserve(6usize.saturating_sub(v.len()));
    assert_eq!(v.capacity(), cap);
    v.reserve(cap - v.len());
    assert_eq!(v.capacity(), cap);
}

#[test]
#[cfg_attr(miri, ignore)]
fn vec_insert_large() {
    let mut b = GVec::<u32>::new();
    let count = 1000000;
    b.extend(0..count);
    for i in 0..count {
        assert_eq!(b[i as usize], i);
    }
}

#[test]
fn vec_into_iter() {
    let b = GVec::<u32>::from_iter(0..3);
    let mut iter = b.into_iter();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(2));
    assert_eq!(iter.as_slice(), &[1]);
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next(), None);
}

#[test]
fn vec_into_iter_drops_remainder() {
    let item = Rc::new(());
    let b = GVec::<Rc<()>>::from_elem(item.clone(), 4);
    let mut iter = b.into_iter();
    drop(iter.next());
    assert_eq!(Rc::strong_count(&item), 4);
    drop(iter);
    assert_eq!(Rc::strong_count(&item), 1);
}

#[test]
fn vec_into_iter_skip() {
    let mut iter = GVec::<u32>::from_iter(0..3).into_iter().skip(1);
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.next(), None);
}

#[test]
fn vec_cursors() {
    let v = GVec::<u32>::from([1, 2, 3, 4]);
    assert_eq!(v.end() - v.begin(), 4);
    assert_eq!(v.rend() - v.rbegin(), 4);
    let mut rev = std::vec::Vec::new();
    let mut pos = v.rbegin();
    while pos != v.rend() {
        rev.push(unsafe { *pos.get() });
        pos += 1;
    }
    assert_eq!(rev, [4, 3, 2, 1]);
    let fwd: std::vec::Vec<u32> = unsafe { v.begin().iter_to(v.end()) }.copied().collect();
    assert_eq!(fwd, [1, 2, 3, 4]);
    assert_eq!(v.index_of(v.end()), 4);
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn vec_index_of_past_end() {
    let v = GVec::<u32>::from([1, 2]);
    let _ = v.index_of(v.end() + 1);
}

#[test]
fn vec_zst() {
    let mut b = GVec::<Zst>::new();
    assert_eq!(b.capacity(), usize::MAX);
    b.push(Zst);
    assert_eq!(b.len(), 1);
    assert_eq!(b[0], Zst);
    assert_eq!(b.pop(), Some(Zst));
    assert_eq!(b.pop(), None);

    let mut b = GVec::<Zst>::new();
    b.extend([Zst, Zst, Zst]);
    b.insert_n(1, 2, &Zst);
    assert_eq!(b.len(), 5);
    b.erase(0..2);
    assert_eq!(b.len(), 3);
    let mut iter = b.into_iter();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next(), Some(Zst));
    assert_eq!(iter.next_back(), Some(Zst));
    assert_eq!(iter.next(), Some(Zst));
    assert_eq!(iter.next(), None);
}

#[test]
fn vec_collect() {
    let v: GVec<_> = (0..5).collect();
    assert_eq!(v, &[0, 1, 2, 3, 4]);
}

#[test]
fn vec_compare() {
    let a = GVec::<u32>::from([1, 2, 3]);
    let b = GVec::<u32>::from([1, 3]);
    assert!(a < b);
    assert!(b > a);
    assert_ne!(a, b);
    assert_eq!(a.cmp(&a.clone()), core::cmp::Ordering::Equal);
}

#[test]
fn vec_std_conversion() {
    let v = GVec::<u32>::from([1, 2, 3]);
    let std_vec: std::vec::Vec<u32> = v.into();
    assert_eq!(std_vec, [1, 2, 3]);
    let back = GVec::from(std_vec);
    assert_eq!(back, [1, 2, 3]);
    assert_eq!(std::vec![1, 2, 3], back);
}

#[test]
fn vec_macro() {
    let v = guarded_vec::vec![1, 2, 3];
    assert_eq!(v, [1, 2, 3]);
    let v = guarded_vec::vec![5u8; 3];
    assert_eq!(v, [5, 5, 5]);
    let v: GVec<u8> = guarded_vec::vec![];
    assert!(v.is_empty());
    let v = guarded_vec::vec![in Global; 1, 2];
    assert_eq!(v, [1, 2]);
    let v = guarded_vec::vec![in &Global; 'a'; 2];
    assert_eq!(v, ['a', 'a']);
}

#[test]
fn vec_from_str() {
    let v = GVec::<u8>::from("abc");
    assert_eq!(v, b"abc");
}

#[test]
fn vec_debug() {
    let v = GVec::<u32>::from([1, 2]);
    assert_eq!(format!("{:?}", v), "[1, 2]");
}
