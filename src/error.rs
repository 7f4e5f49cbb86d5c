//! Error handling.

use core::alloc::{Layout, LayoutError};
use core::fmt;

/// An enumeration of error types raised by container operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// A memory allocation failed.
    AllocError(Layout),
    /// The requested length would exceed the maximum size of the container.
    LengthError,
    /// The provided layout was not allocatable.
    LayoutError(LayoutError),
    /// A checked access was made with an index not less than the length.
    OutOfRange {
        /// The requested index
        index: usize,
        /// The length of the container at the time of access
        length: usize,
    },
}

impl StorageError {
    /// Generic description of this error.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllocError(_) => "Allocation error",
            Self::LengthError => "Exceeded maximum container size",
            Self::LayoutError(_) => "Layout error",
            Self::OutOfRange { .. } => "Index out of range",
        }
    }

    /// Generate a panic with this error as the reason.
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        match self {
            Self::AllocError(layout) => crate::storage::handle_alloc_error(layout),
            Self::OutOfRange { index, length } => {
                panic!("{}: index {} >= length {}", self.as_str(), index, length)
            }
            _ => panic!("{}", self.as_str()),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, length } => {
                write!(f, "{}: index {} >= length {}", self.as_str(), index, length)
            }
            _ => f.write_str(self.as_str()),
        }
    }
}

impl From<LayoutError> for StorageError {
    fn from(err: LayoutError) -> Self {
        Self::LayoutError(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StorageError {}

/// An error raised by collection update operations when appropriate
/// storage was not available. Includes the value that could not be stored.
#[derive(Clone)]
pub struct UpdateError<T> {
    pub(crate) error: StorageError,
    pub(crate) value: T,
}

impl<T> UpdateError<T> {
    pub(crate) fn new(error: StorageError, value: T) -> Self {
        Self { error, value }
    }

    /// Generic description of this error
    pub fn as_str(&self) -> &'static str {
        "Update error"
    }

    /// Get a reference to the contained `StorageError`
    pub fn error(&self) -> &StorageError {
        &self.error
    }

    /// Unwrap the inner value of this error
    pub fn into_value(self) -> T {
        self.value
    }

    /// Generate a panic with this error as the reason
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        panic!("{}: {}", self.as_str(), self.error.as_str());
    }
}

impl<T> fmt::Debug for UpdateError<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for UpdateError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}: {}", self.as_str(), self.error))
    }
}

#[cfg(feature = "std")]
impl<T> std::error::Error for UpdateError<T> {}

#[cfg(test)]
mod tests {
    use super::StorageError;
    use core::alloc::Layout;
    use std::string::ToString;

    #[test]
    #[should_panic(expected = "memory allocation of 8 bytes failed")]
    fn alloc_error_panic() {
        // When testing, handle_alloc_error is replaced with an explicit panic,
        // as #[should_panic] does not capture the standard out-of-memory handler.
        let a = StorageError::AllocError(Layout::new::<usize>());
        a.panic();
    }

    #[test]
    #[should_panic(expected = "Exceeded maximum container size")]
    fn length_error_panic() {
        StorageError::LengthError.panic();
    }

    #[test]
    #[should_panic(expected = "Index out of range: index 5 >= length 3")]
    fn out_of_range_panic() {
        StorageError::OutOfRange {
            index: 5,
            length: 3,
        }
        .panic();
    }

    #[test]
    fn out_of_range_display() {
        let err = StorageError::OutOfRange {
            index: 1,
            length: 0,
        };
        assert_eq!(err.to_string(), "Index out of range: index 1 >= length 0");
    }
}
