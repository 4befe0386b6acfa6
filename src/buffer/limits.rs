//! Allocation limits for buffers created on behalf of a caller.

/// Upper bounds applied to buffer allocations.
///
/// Explicit [`crate::ByteBuffer::new`] calls are not limited; the limits apply to
/// [`crate::ByteBuffer::with_limits`] and to the buffers a [`crate::TypedArrayView`] allocates
/// implicitly, where the byte length is derived from a caller supplied element count.
///
/// # Default Configuration
///
/// The default caps a single buffer at `u32::MAX` bytes, the largest length a 32-bit host
/// length field can describe.
///
/// # Example
///
/// ```rust
/// use bytescope::{ElementKind, Limits, TypedArrayView};
///
/// let limits = Limits::new().with_max_byte_length(1024);
/// assert!(TypedArrayView::with_length_in(ElementKind::Float64, 128, &limits).is_ok());
/// assert!(TypedArrayView::with_length_in(ElementKind::Float64, 129, &limits).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Largest byte length a single allocation may request.
    pub max_byte_length: usize,
}

impl Limits {
    /// Default cap on the byte length of one buffer
    pub const DEFAULT_MAX_BYTE_LENGTH: usize = u32::MAX as usize;

    /// Creates limits with default values.
    #[must_use]
    pub const fn new() -> Self {
        Limits {
            max_byte_length: Self::DEFAULT_MAX_BYTE_LENGTH,
        }
    }

    /// Sets the maximum byte length of a single buffer.
    #[must_use]
    pub const fn with_max_byte_length(mut self, max_byte_length: usize) -> Self {
        self.max_byte_length = max_byte_length;
        self
    }

    /// Returns `true` if a buffer of `byte_length` bytes may be allocated.
    #[must_use]
    pub const fn permits(&self, byte_length: usize) -> bool {
        byte_length <= self.max_byte_length
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new()
    }
}
