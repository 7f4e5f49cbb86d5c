/// Create a [`Vec`](crate::vec::Vec) containing the arguments.
///
/// The `in alloc;` prefix selects an allocator instance; without it the
/// vector is allocated from [`Global`](crate::storage::Global).
///
/// ```
/// # #[cfg(feature = "alloc")] {
/// use guarded_vec::{storage::Global, vec};
///
/// let v = vec![1, 2, 3];
/// assert_eq!(v, [1, 2, 3]);
/// let w = vec![in Global; 0u8; 4];
/// assert_eq!(w.len(), 4);
/// # }
/// ```
#[macro_export]
macro_rules! vec {
    (in $alloc:expr $(;)?) => (
        $crate::vec::Vec::new_in($alloc)
    );
    (in $alloc:expr; $elem:expr; $n:expr) => (
        $crate::vec::from_elem_in($elem, $n, $alloc)
    );
    (in $alloc:expr; $($x:expr),+ $(,)?) => (
        $crate::vec::from_array_in([$($x),+], $alloc)
    );
    () => (
        $crate::vec::Vec::<_, $crate::storage::Global>::new()
    );
    ($elem:expr; $n:expr) => (
        $crate::vec::from_elem($elem, $n)
    );
    ($($x:expr),+ $(,)?) => (
        $crate::vec::from_array([$($x),+])
    );
}
