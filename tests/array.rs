use const_default::ConstDefault;

use guarded_vec::{Array, StorageError};

#[test]
fn array_default_zeroed() {
    let arr = Array::<i32, 5>::new();
    assert_eq!(arr, [0; 5]);
    assert_eq!(Array::<i32, 5>::default(), arr);
    const ARR: Array<i32, 5> = Array::DEFAULT;
    assert_eq!(ARR, arr);
}

#[test]
fn array_size() {
    let arr = Array::from([1u8, 2, 3]);
    assert_eq!(arr.size(), 3);
    assert_eq!(arr.max_size(), 3);
    assert!(!arr.is_empty());

    let empty = Array::<u8, 0>::new();
    assert_eq!(empty.size(), 0);
    assert!(empty.is_empty());
    assert_eq!(empty.front(), None);
    assert_eq!(empty.back(), None);
    assert_eq!(empty.begin(), empty.end());
}

#[test]
fn array_access() {
    let mut arr = Array::from([2, 3, 5, 7, 9]);
    assert_eq!(arr[0], 2);
    assert_eq!(arr.at(4), Ok(&9));
    assert_eq!(
        arr.at(5),
        Err(StorageError::OutOfRange {
            index: 5,
            length: 5
        })
    );
    *arr.at_mut(1).unwrap() = 4;
    assert_eq!(arr.front(), Some(&2));
    assert_eq!(arr.back(), Some(&9));
    assert_eq!(unsafe { *arr.data().add(1) }, 4);
    assert_eq!(unsafe { *arr.get_unchecked(2) }, 5);
}

#[test]
fn array_fill_swap() {
    let mut a = Array::<u32, 4>::new();
    a.fill(&7);
    assert_eq!(a, [7; 4]);

    let mut b = Array::from([1, 2, 3, 4]);
    a.swap(&mut b);
    assert_eq!(a, [1, 2, 3, 4]);
    assert_eq!(b, [7; 4]);
}

#[test]
fn array_compare() {
    let a = Array::from([2, 3, 5, 7, 9]);
    let b = Array::from([1, 3, 5, 10, 15]);
    assert!(!(a < b));
    assert!(a > b);
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
    assert!(Array::from([1, 2]) < Array::from([1, 3]));
}

#[test]
fn array_iterate() {
    let mut arr = Array::from([1, 2, 3]);
    for val in &mut arr {
        *val *= 10;
    }
    let sum: i32 = arr.iter().sum();
    assert_eq!(sum, 60);
    let rev: Vec<i32> = arr.iter().rev().copied().collect();
    assert_eq!(rev, [30, 20, 10]);
    let owned: Vec<i32> = arr.into_iter().collect();
    assert_eq!(owned, [10, 20, 30]);
}

#[test]
fn array_cursors() {
    let arr = Array::from(['a', 'b', 'c']);
    let mut pos = arr.rbegin();
    let mut seen = Vec::new();
    while pos != arr.rend() {
        seen.push(unsafe { *pos.get() });
        pos += 1;
    }
    assert_eq!(seen, ['c', 'b', 'a']);
    assert_eq!(unsafe { *(arr.begin() + 1).get() }, 'b');
}

#[test]
fn array_conversion() {
    let arr = Array::from_array([1, 2]);
    let raw: [i32; 2] = arr.into();
    assert_eq!(raw, [1, 2]);
    assert_eq!(Array::from(raw).into_array(), [1, 2]);
    assert_eq!(format!("{:?}", arr), "[1, 2]");
}
