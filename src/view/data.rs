//! Byte-addressed window with per-call byte order.

use log::trace;

use crate::{
    buffer::ByteBuffer,
    codec::{self, Element, ElementKind, Scalar},
    host::Coerce,
    Result,
};

/// A bounds-checked byte window into a [`ByteBuffer`] with typed accessors.
///
/// Every accessor takes a byte offset relative to the start of the view and a `little_endian`
/// flag. Hosts that allow the flag to be omitted should pass `false`, i.e. big-endian, which is
/// what an absent flag converts to.
///
/// Writes go straight to the shared storage of the buffer and are visible through every other
/// view that overlaps the written bytes.
///
/// # Examples
///
/// ```rust
/// use bytescope::{BufferView, ByteBuffer};
///
/// let buffer = ByteBuffer::new(4);
/// let view = BufferView::new(&buffer, 0, None)?;
///
/// view.set_uint32(0, 0x0102_0304, false)?;
/// assert_eq!(view.get_uint8(0, false)?, 0x01);
/// assert_eq!(view.get_uint16(2, true)?, 0x0403);
///
/// // Out of bounds accesses are rejected
/// assert!(view.get_uint32(1, false).is_err());
/// # Ok::<(), bytescope::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct BufferView {
    buffer: ByteBuffer,
    byte_offset: usize,
    byte_length: usize,
}

impl BufferView {
    /// Creates a view over `buffer` starting at `byte_offset`.
    ///
    /// # Arguments
    /// * `buffer` - The buffer to alias; the view keeps it alive
    /// * `byte_offset` - Start of the window within `buffer`
    /// * `byte_length` - Size of the window, or `None` for the rest of the buffer
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] if the window does not fit within `buffer`.
    pub fn new(
        buffer: &ByteBuffer,
        byte_offset: usize,
        byte_length: Option<usize>,
    ) -> Result<BufferView> {
        let byte_length = match byte_length {
            Some(byte_length) => byte_length,
            None => buffer.byte_length().saturating_sub(byte_offset),
        };
        buffer.window(byte_offset, byte_length, "data view")?;

        trace!("data view at offset {byte_offset} with {byte_length} bytes");
        Ok(BufferView {
            buffer: buffer.clone(),
            byte_offset,
            byte_length,
        })
    }

    /// The buffer this view aliases.
    #[must_use]
    pub fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    /// Offset of the view within its buffer, in bytes.
    #[must_use]
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Length of the view in bytes.
    #[must_use]
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    /// Reads a `T` at `byte_offset` within the view.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] if `byte_offset + size_of::<T>()` exceeds the view.
    pub fn get<T: Element>(&self, byte_offset: usize, little_endian: bool) -> Result<T> {
        self.buffer.with_bytes(self.window(), |bytes| {
            codec::read_at::<T>(bytes, byte_offset, little_endian)
        })?
    }

    /// Coerces `value` to `T` and writes it at `byte_offset` within the view.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] if `byte_offset + size_of::<T>()` exceeds the view.
    pub fn set<T: Element>(
        &self,
        byte_offset: usize,
        value: impl Coerce,
        little_endian: bool,
    ) -> Result<()> {
        let value: T = value.coerce();
        self.buffer.with_bytes_mut(self.window(), |bytes| {
            codec::write_at(bytes, byte_offset, value, little_endian)
        })?
    }

    /// Reads an element of `kind` at `byte_offset` and widens it to a host number.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] if the element does not fit within the view.
    pub fn get_kind(
        &self,
        kind: ElementKind,
        byte_offset: usize,
        little_endian: bool,
    ) -> Result<f64> {
        self.buffer.with_bytes(self.window(), |bytes| {
            codec::read_number(kind, bytes, byte_offset, little_endian)
        })?
    }

    /// Coerces `value` to `kind` and writes it at `byte_offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] if the element does not fit within the view.
    pub fn set_kind(
        &self,
        kind: ElementKind,
        byte_offset: usize,
        value: impl Coerce,
        little_endian: bool,
    ) -> Result<()> {
        let scalar = Scalar::coerce(kind, &value);
        self.buffer.with_bytes_mut(self.window(), |bytes| {
            codec::write_scalar(bytes, byte_offset, scalar, little_endian)
        })?
    }

    fn window(&self) -> std::ops::Range<usize> {
        self.byte_offset..self.byte_offset + self.byte_length
    }
}

macro_rules! typed_accessors {
    ($($get:ident, $set:ident => $ty:ty;)*) => {
        impl BufferView {
            $(
                #[doc = concat!("Reads an `", stringify!($ty), "` at `byte_offset`.")]
                ///
                /// # Errors
                /// Returns [`crate::Error::Range`] if the value does not fit within the view.
                pub fn $get(&self, byte_offset: usize, little_endian: bool) -> Result<$ty> {
                    self.get::<$ty>(byte_offset, little_endian)
                }

                #[doc = concat!("Coerces `value` to `", stringify!($ty), "` and writes it.")]
                ///
                /// # Errors
                /// Returns [`crate::Error::Range`] if the value does not fit within the view.
                pub fn $set(
                    &self,
                    byte_offset: usize,
                    value: impl Coerce,
                    little_endian: bool,
                ) -> Result<()> {
                    self.set::<$ty>(byte_offset, value, little_endian)
                }
            )*
        }
    };
}

typed_accessors! {
    get_int8, set_int8 => i8;
    get_uint8, set_uint8 => u8;
    get_int16, set_int16 => i16;
    get_uint16, set_uint16 => u16;
    get_int32, set_int32 => i32;
    get_uint32, set_uint32 => u32;
    get_float32, set_float32 => f32;
    get_float64, set_float64 => f64;
}
