//! Fixed-size, zero-initialized, shareable byte storage.
//!
//! A [`crate::ByteBuffer`] is the only allocator of raw storage in the crate. Views never copy
//! bytes; they hold a clone of the buffer handle and address a window inside it.
//!
//! # Ownership
//!
//! The bytes live behind a reference-counted handle. Cloning a [`crate::ByteBuffer`] is cheap and
//! produces another handle to the *same* bytes, which is how views keep their buffer alive: as
//! long as any view exists, its storage cannot be reclaimed. The storage is released when the
//! last handle is dropped.
//!
//! The handle is `!Send` and `!Sync`. All operations are synchronous and there is no
//! cross-thread sharing contract; a host that wants one has to provide its own synchronization.
//!
//! # Examples
//!
//! ```rust
//! use bytescope::ByteBuffer;
//!
//! let buffer = ByteBuffer::new(8);
//! assert_eq!(buffer.byte_length(), 8);
//! assert_eq!(buffer.to_vec(), vec![0; 8]);
//!
//! // Slices are independent copies
//! let head = buffer.slice(0, Some(4));
//! assert_eq!(head.byte_length(), 4);
//! assert!(!head.same_buffer(&buffer));
//! ```

mod limits;

pub use limits::Limits;

use std::{cell::RefCell, fmt, ops::Range, rc::Rc};

use log::{debug, trace};

use crate::{error::range_error, Result};

/// Owned, fixed-length byte storage shared between views.
///
/// See the [module documentation](crate::buffer) for the ownership model.
#[derive(Clone)]
pub struct ByteBuffer {
    bytes: Rc<RefCell<Box<[u8]>>>,
    byte_length: usize,
}

impl ByteBuffer {
    /// Allocates `byte_length` zero bytes.
    ///
    /// This never fails with a recoverable error. If the allocator cannot satisfy the request the
    /// process aborts, as it does for any other Rust allocation.
    ///
    /// # Arguments
    /// * `byte_length` - Size of the buffer in bytes
    #[must_use]
    pub fn new(byte_length: usize) -> ByteBuffer {
        trace!("allocating byte buffer of {byte_length} bytes");
        ByteBuffer {
            bytes: Rc::new(RefCell::new(vec![0_u8; byte_length].into_boxed_slice())),
            byte_length,
        }
    }

    /// Allocates `byte_length` zero bytes if the request is within `limits`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] if `byte_length` exceeds [`Limits::max_byte_length`].
    pub fn with_limits(byte_length: usize, limits: &Limits) -> Result<ByteBuffer> {
        if !limits.permits(byte_length) {
            debug!(
                "rejecting byte buffer of {byte_length} bytes, limit is {}",
                limits.max_byte_length
            );
            return Err(range_error!(
                "buffer length {} exceeds the limit of {} bytes",
                byte_length,
                limits.max_byte_length
            ));
        }

        Ok(ByteBuffer::new(byte_length))
    }

    /// Returns the length of the buffer in bytes.
    #[must_use]
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    /// Returns `true` if the buffer holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.byte_length == 0
    }

    /// Returns `true` if `self` and `other` are handles to the same storage.
    #[must_use]
    pub fn same_buffer(&self, other: &ByteBuffer) -> bool {
        Rc::ptr_eq(&self.bytes, &other.bytes)
    }

    /// Copies the current contents into a new `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.borrow().to_vec()
    }

    /// Copies a sub-range of the buffer into a new, independently owned buffer.
    ///
    /// `begin` and `end` are normalized, never rejected:
    ///
    /// 1. `end` defaults to [`ByteBuffer::byte_length`] when `None`.
    /// 2. A negative index `i` becomes `byte_length - i`. This moves it *past* the end rather than
    ///    counting back from it, so a negative index always ends up at `byte_length` after step 3.
    /// 3. Both indices are clamped into `[0, byte_length]`.
    /// 4. If `end < begin`, `end` is set to `begin`, producing an empty buffer.
    ///
    /// # Arguments
    /// * `begin` - First byte to copy
    /// * `end` - One past the last byte to copy, or `None` for the end of the buffer
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bytescope::ByteBuffer;
    ///
    /// let buffer = ByteBuffer::new(10);
    /// assert_eq!(buffer.slice(2, Some(6)).byte_length(), 4);
    /// assert_eq!(buffer.slice(4, None).byte_length(), 6);
    /// assert_eq!(buffer.slice(8, Some(2)).byte_length(), 0);
    ///
    /// // -3 normalizes to 10 - (-3) = 13, which clamps to 10
    /// assert_eq!(buffer.slice(-3, Some(10)).byte_length(), 0);
    /// ```
    #[must_use]
    pub fn slice(&self, begin: i64, end: Option<i64>) -> ByteBuffer {
        let range = self.slice_range(begin, end);
        trace!(
            "slicing [{}, {}) out of {} bytes",
            range.start,
            range.end,
            self.byte_length
        );

        let copy = self
            .bytes
            .borrow()
            .get(range)
            .map(<[u8]>::to_vec)
            .unwrap_or_default();

        ByteBuffer {
            byte_length: copy.len(),
            bytes: Rc::new(RefCell::new(copy.into_boxed_slice())),
        }
    }

    /// Resolves the `slice` arguments into a byte range within this buffer.
    fn slice_range(&self, begin: i64, end: Option<i64>) -> Range<usize> {
        let length = i64::try_from(self.byte_length).unwrap_or(i64::MAX);
        let normalize = |index: i64| -> usize {
            let index = if index < 0 {
                length.saturating_sub(index)
            } else {
                index
            };
            // Clamped into [0, length], so the conversion cannot fail
            usize::try_from(index.clamp(0, length)).unwrap_or(self.byte_length)
        };

        let begin = normalize(begin);
        let end = normalize(end.unwrap_or(length)).max(begin);
        begin..end
    }

    /// Runs `f` over the bytes in `range`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] if `range` is not within the buffer.
    pub(crate) fn with_bytes<R>(
        &self,
        range: Range<usize>,
        f: impl FnOnce(&[u8]) -> R,
    ) -> Result<R> {
        let bytes = self.bytes.borrow();
        match bytes.get(range.clone()) {
            Some(window) => Ok(f(window)),
            None => Err(range_error!(
                "window {}..{} out of bounds for buffer of {} bytes",
                range.start,
                range.end,
                self.byte_length
            )),
        }
    }

    /// Runs `f` over the bytes in `range`, allowing mutation.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] if `range` is not within the buffer.
    pub(crate) fn with_bytes_mut<R>(
        &self,
        range: Range<usize>,
        f: impl FnOnce(&mut [u8]) -> R,
    ) -> Result<R> {
        let mut bytes = self.bytes.borrow_mut();
        match bytes.get_mut(range.clone()) {
            Some(window) => Ok(f(window)),
            None => Err(range_error!(
                "window {}..{} out of bounds for buffer of {} bytes",
                range.start,
                range.end,
                self.byte_length
            )),
        }
    }

    /// Validates that `[byte_offset, byte_offset + byte_length)` lies within the buffer and
    /// returns it as a range.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] carrying `what` if the window overflows or exceeds the
    /// buffer.
    pub(crate) fn window(
        &self,
        byte_offset: usize,
        byte_length: usize,
        what: &str,
    ) -> Result<Range<usize>> {
        match byte_offset.checked_add(byte_length) {
            Some(end) if end <= self.byte_length => Ok(byte_offset..end),
            _ => {
                debug!(
                    "rejecting {what} window {byte_offset}+{byte_length} over {} bytes",
                    self.byte_length
                );
                Err(range_error!("{} range out of bounds", what))
            }
        }
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("byte_length", &self.byte_length)
            .field("handles", &Rc::strong_count(&self.bytes))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(len: usize) -> ByteBuffer {
        let buffer = ByteBuffer::new(len);
        buffer
            .with_bytes_mut(0..len, |bytes| {
                for (i, b) in bytes.iter_mut().enumerate() {
                    *b = i as u8;
                }
            })
            .unwrap();
        buffer
    }

    #[test]
    fn zero_initialized() {
        let buffer = ByteBuffer::new(1048);
        assert_eq!(buffer.byte_length(), 1048);
        assert!(!buffer.is_empty());
        assert!(buffer.to_vec().iter().all(|b| *b == 0));
    }

    #[test]
    fn empty_buffer() {
        let buffer = ByteBuffer::new(0);
        assert!(buffer.is_empty());
        assert!(buffer.to_vec().is_empty());
        assert!(buffer.slice(0, None).is_empty());
        assert!(buffer.slice(-1, Some(-1)).is_empty());
    }

    #[test]
    fn clones_share_storage() {
        let buffer = ByteBuffer::new(4);
        let other = buffer.clone();
        assert!(buffer.same_buffer(&other));
        assert!(!buffer.same_buffer(&ByteBuffer::new(4)));

        other.with_bytes_mut(1..2, |bytes| bytes[0] = 0xAB).unwrap();
        assert_eq!(buffer.to_vec(), vec![0, 0xAB, 0, 0]);
    }

    #[test]
    fn slice_copies_requested_range() {
        let buffer = filled(10);

        let slice = buffer.slice(2, Some(6));
        assert_eq!(slice.to_vec(), vec![2, 3, 4, 5]);

        let tail = buffer.slice(7, None);
        assert_eq!(tail.to_vec(), vec![7, 8, 9]);

        let whole = buffer.slice(0, None);
        assert_eq!(whole.to_vec(), buffer.to_vec());
        assert!(!whole.same_buffer(&buffer));
    }

    #[test]
    fn slice_is_independent() {
        let buffer = filled(4);
        let slice = buffer.slice(0, None);
        slice.with_bytes_mut(0..1, |bytes| bytes[0] = 0xFF).unwrap();

        assert_eq!(buffer.to_vec(), vec![0, 1, 2, 3]);
        assert_eq!(slice.to_vec(), vec![0xFF, 1, 2, 3]);
    }

    #[test]
    fn slice_clamps() {
        let buffer = filled(10);

        assert_eq!(buffer.slice(0, Some(100)).byte_length(), 10);
        assert_eq!(buffer.slice(100, Some(200)).byte_length(), 0);
        assert_eq!(buffer.slice(6, Some(3)).byte_length(), 0);
        assert_eq!(buffer.slice(i64::MAX, Some(i64::MAX)).byte_length(), 0);
    }

    #[test]
    fn slice_negative_indices_move_past_the_end() {
        let buffer = filled(10);

        // begin: 10 - (-3) = 13 -> 10
        assert_eq!(buffer.slice_range(-3, Some(10)), 10..10);
        assert_eq!(buffer.slice(-3, Some(10)).byte_length(), 0);

        // end: 10 - (-2) = 12 -> 10
        assert_eq!(buffer.slice_range(4, Some(-2)), 4..10);
        assert_eq!(buffer.slice(4, Some(-2)).to_vec(), vec![4, 5, 6, 7, 8, 9]);

        assert_eq!(buffer.slice_range(i64::MIN, Some(i64::MIN)), 10..10);
    }

    #[test]
    fn limits_are_enforced() {
        let limits = Limits::new().with_max_byte_length(8);
        assert_eq!(ByteBuffer::with_limits(8, &limits).unwrap().byte_length(), 8);

        let err = ByteBuffer::with_limits(9, &limits).unwrap_err();
        assert!(err.message().contains("exceeds the limit"));
    }

    #[test]
    fn window_checks() {
        let buffer = ByteBuffer::new(8);
        assert_eq!(buffer.window(0, 8, "test").unwrap(), 0..8);
        assert_eq!(buffer.window(8, 0, "test").unwrap(), 8..8);
        assert!(buffer.window(4, 5, "test").is_err());
        assert!(buffer.window(9, 0, "test").is_err());
        assert!(buffer.window(usize::MAX, 2, "test").is_err());
        assert_eq!(
            buffer.window(1, 8, "data view").unwrap_err().message(),
            "data view range out of bounds"
        );
    }

    #[test]
    fn accessors_reject_foreign_ranges() {
        let buffer = ByteBuffer::new(4);
        assert!(buffer.with_bytes(2..5, |_| ()).is_err());
        assert!(buffer.with_bytes_mut(5..6, |_| ()).is_err());
        assert_eq!(buffer.with_bytes(1..3, <[u8]>::len).unwrap(), 2);
    }

    #[test]
    fn debug_output() {
        let buffer = ByteBuffer::new(3);
        let _other = buffer.clone();
        assert_eq!(
            format!("{buffer:?}"),
            "ByteBuffer { byte_length: 3, handles: 2 }"
        );
    }
}
