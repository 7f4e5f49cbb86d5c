#![cfg(feature = "alloc")]

use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};

use guarded_vec::Vec as GVec;

thread_local! {
    static CLONES_LEFT: Cell<usize> = const { Cell::new(usize::MAX) };
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

/// A value which tracks the number of live instances and panics when the
/// clone budget runs out.
#[derive(Debug, PartialEq)]
struct Tracked(u32);

impl Tracked {
    fn new(val: u32) -> Self {
        LIVE.with(|live| live.set(live.get() + 1));
        Self(val)
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        CLONES_LEFT.with(|left| {
            let remain = left.get();
            if remain == 0 {
                panic!("clone failed");
            }
            left.set(remain - 1);
        });
        Self::new(self.0)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        LIVE.with(|live| live.set(live.get() - 1));
    }
}

fn live() -> isize {
    LIVE.with(|live| live.get())
}

fn fail_after(clones: usize) {
    CLONES_LEFT.with(|left| left.set(clones));
}

fn reset() {
    CLONES_LEFT.with(|left| left.set(usize::MAX));
}

fn tracked(vals: &[u32]) -> GVec<Tracked> {
    let mut v = GVec::with_capacity(vals.len());
    for val in vals {
        v.push(Tracked::new(*val));
    }
    v
}

fn values(v: &GVec<Tracked>) -> Vec<u32> {
    v.iter().map(|t| t.0).collect()
}

#[test]
fn from_elem_failure_releases_clones() {
    let base = live();
    let item = Tracked::new(1);
    fail_after(3);
    let res = catch_unwind(AssertUnwindSafe(|| GVec::<Tracked>::from_elem(item, 5)));
    reset();
    assert!(res.is_err());
    // the element itself was consumed by the failed construction
    assert_eq!(live(), base);
}

#[test]
fn insert_slice_growth_failure_unchanged() {
    let mut v = tracked(&[1, 2, 3]);
    let src = tracked(&[7, 8, 9, 10]);
    let base = live();
    let cap = v.capacity();
    let ptr = v.as_ptr();
    fail_after(2);
    let res = catch_unwind(AssertUnwindSafe(|| v.insert_slice(1, &src)));
    reset();
    assert!(res.is_err());
    assert_eq!(values(&v), [1, 2, 3]);
    assert_eq!(v.capacity(), cap);
    assert_eq!(v.as_ptr(), ptr);
    assert_eq!(live(), base);
}

#[test]
fn insert_n_in_place_failure_restores_tail() {
    let mut v = GVec::with_capacity(10);
    for val in [1, 2, 3, 4] {
        v.push(Tracked::new(val));
    }
    let item = Tracked::new(0);
    let base = live();
    fail_after(2);
    let res = catch_unwind(AssertUnwindSafe(|| v.insert_n(1, 4, &item)));
    reset();
    assert!(res.is_err());
    assert_eq!(values(&v), [1, 2, 3, 4]);
    assert_eq!(v.capacity(), 10);
    assert_eq!(live(), base);
}

#[test]
fn push_with_failure_unchanged() {
    let mut v = tracked(&[1, 2]);
    let cap = v.capacity();
    let base = live();
    let res = catch_unwind(AssertUnwindSafe(|| {
        v.push_with(|| panic!("construction failed"));
    }));
    assert!(res.is_err());
    assert_eq!(values(&v), [1, 2]);
    assert_eq!(v.capacity(), cap);
    assert_eq!(live(), base);
}

#[test]
fn resize_with_over_capacity_failure_unchanged() {
    let mut v = tracked(&[1, 2]);
    let cap = v.capacity();
    let base = live();
    let mut count = 0;
    let res = catch_unwind(AssertUnwindSafe(|| {
        v.resize_with(8, || {
            count += 1;
            if count == 4 {
                panic!("construction failed");
            }
            Tracked::new(count)
        })
    }));
    assert!(res.is_err());
    assert_eq!(values(&v), [1, 2]);
    assert_eq!(v.capacity(), cap);
    assert_eq!(live(), base);
}

#[test]
fn assign_fill_over_capacity_failure_unchanged() {
    let mut v = tracked(&[1, 2]);
    let item = Tracked::new(5);
    let base = live();
    fail_after(3);
    let res = catch_unwind(AssertUnwindSafe(|| v.assign_fill(6, &item)));
    reset();
    assert!(res.is_err());
    assert_eq!(values(&v), [1, 2]);
    assert_eq!(v.capacity(), 2);
    assert_eq!(live(), base);
}

#[test]
fn clone_failure_leaks_nothing() {
    let v = tracked(&[1, 2, 3, 4, 5]);
    let base = live();
    fail_after(2);
    let res = catch_unwind(AssertUnwindSafe(|| v.clone()));
    reset();
    assert!(res.is_err());
    assert_eq!(live(), base);
    assert_eq!(values(&v), [1, 2, 3, 4, 5]);
}

#[test]
fn clone_from_growth_failure_unchanged() {
    let mut dst = tracked(&[1]);
    let src = tracked(&[4, 5, 6, 7]);
    let base = live();
    fail_after(2);
    let res = catch_unwind(AssertUnwindSafe(|| dst.clone_from(&src)));
    reset();
    assert!(res.is_err());
    assert_eq!(values(&dst), [1]);
    assert_eq!(live(), base);
}

#[test]
fn clear_twice() {
    let base = live();
    let mut v = tracked(&[1, 2, 3]);
    assert_eq!(live(), base + 3);
    v.clear();
    assert_eq!(live(), base);
    v.clear();
    assert_eq!(live(), base);
    drop(v);
    assert_eq!(live(), base);
}

#[test]
fn erase_and_drop_balanced() {
    let base = live();
    {
        let mut v = tracked(&[1, 2, 3, 4, 5, 6]);
        v.erase(1..3);
        assert_eq!(values(&v), [1, 4, 5, 6]);
        assert_eq!(live(), base + 4);
        let _ = v.remove(0);
        let mut iter = v.into_iter();
        let _ = iter.next();
        assert_eq!(live(), base + 2);
    }
    assert_eq!(live(), base);
}

#[test]
fn insert_iter_sized_failure_unchanged() {
    let mut v = tracked(&[1, 2, 3]);
    let base = live();
    let res = catch_unwind(AssertUnwindSafe(|| {
        v.insert_iter(
            1,
            (0..5).map(|i| {
                if i == 3 {
                    panic!("construction failed");
                }
                Tracked::new(i)
            }),
        )
    }));
    assert!(res.is_err());
    assert_eq!(values(&v), [1, 2, 3]);
    assert_eq!(v.capacity(), 3);
    assert_eq!(live(), base);
}
