//! Element-typed, index-addressed window.

use std::ops::Range;

use log::trace;

use crate::{
    buffer::{ByteBuffer, Limits},
    codec::{self, ElementKind, Scalar},
    error::range_error,
    host::{ArrayLike, Coerce},
    Result,
};

/// A fixed-length array of numeric elements backed by a [`ByteBuffer`].
///
/// One type serves all eight element kinds; the kind is a runtime tag and every access goes
/// through the same bounds-checked path. Elements are stored in host byte order.
///
/// # Construction
///
/// - [`TypedArrayView::from_buffer`] - alias an existing buffer
/// - [`TypedArrayView::with_length`] - allocate a zero-filled buffer for `length` elements
/// - [`TypedArrayView::from_array_like`] - allocate and copy elements from a source sequence
///
/// # Examples
///
/// ```rust
/// use bytescope::{ByteBuffer, ElementKind, TypedArrayView};
///
/// let buffer = ByteBuffer::new(8);
/// let view = TypedArrayView::from_buffer(ElementKind::Int32, &buffer, 0, None)?;
/// assert_eq!(view.length(), 2);
///
/// view.set(0, 1)?;
/// view.set(1, -1)?;
/// assert_eq!(view.get(0)?, 1.0);
/// assert_eq!(view.get(1)?, -1.0);
/// assert!(view.get(2).is_err());
/// # Ok::<(), bytescope::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct TypedArrayView {
    kind: ElementKind,
    buffer: ByteBuffer,
    byte_offset: usize,
    length: usize,
}

impl TypedArrayView {
    /// Creates a view over an existing buffer.
    ///
    /// # Arguments
    /// * `kind` - Element kind of the view
    /// * `buffer` - The buffer to alias; the view keeps it alive
    /// * `byte_offset` - Start of the first element within `buffer`
    /// * `length` - Number of elements, or `None` for `buffer.byte_length() / kind.size()`
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] if `byte_offset + length * kind.size()` exceeds the buffer.
    pub fn from_buffer(
        kind: ElementKind,
        buffer: &ByteBuffer,
        byte_offset: usize,
        length: Option<usize>,
    ) -> Result<TypedArrayView> {
        let length = length.unwrap_or(buffer.byte_length() / kind.size());
        let Some(byte_length) = length.checked_mul(kind.size()) else {
            return Err(range_error!("typed array range out of bounds"));
        };
        buffer.window(byte_offset, byte_length, "typed array")?;

        trace!("{} view at offset {byte_offset} with {length} elements", kind.array_name());
        Ok(TypedArrayView {
            kind,
            buffer: buffer.clone(),
            byte_offset,
            length,
        })
    }

    /// Creates a view over a new zero-filled buffer holding `length` elements.
    ///
    /// The buffer is bounded by [`Limits::default`], which caps it at `u32::MAX` bytes. A length
    /// whose byte size is above that cap is rejected even when the allocator could satisfy it,
    /// e.g. `with_length(ElementKind::Float64, 1 << 30)`. Use [`TypedArrayView::with_length_in`]
    /// to apply other limits.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] if `length * kind.size()` overflows or exceeds
    /// [`Limits::DEFAULT_MAX_BYTE_LENGTH`].
    pub fn with_length(kind: ElementKind, length: usize) -> Result<TypedArrayView> {
        Self::with_length_in(kind, length, &Limits::default())
    }

    /// Creates a view over a new zero-filled buffer holding `length` elements, within `limits`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] if the byte length overflows or exceeds `limits`.
    pub fn with_length_in(
        kind: ElementKind,
        length: usize,
        limits: &Limits,
    ) -> Result<TypedArrayView> {
        let Some(byte_length) = length.checked_mul(kind.size()) else {
            return Err(range_error!("{} length {} is too large", kind.array_name(), length));
        };
        let buffer = ByteBuffer::with_limits(byte_length, limits)?;

        trace!("{} with {length} elements", kind.array_name());
        Ok(TypedArrayView {
            kind,
            buffer,
            byte_offset: 0,
            length,
        })
    }

    /// Creates a view over a new buffer and copies every element of `source` into it.
    ///
    /// Each source element is coerced exactly as [`TypedArrayView::set`] would. The new buffer is
    /// allocated as by [`TypedArrayView::with_length`] and is subject to the same default limits.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] if `source.length() * kind.size()` overflows or exceeds
    /// [`Limits::DEFAULT_MAX_BYTE_LENGTH`], and propagates any error raised while reading
    /// `source`.
    pub fn from_array_like<S: ArrayLike + ?Sized>(
        kind: ElementKind,
        source: &S,
    ) -> Result<TypedArrayView> {
        let view = Self::with_length(kind, source.length())?;
        for index in 0..view.length {
            view.set(index, source.element(index)?)?;
        }
        Ok(view)
    }

    /// Reads the element at `index`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] if `index >= self.length()`.
    pub fn get(&self, index: usize) -> Result<f64> {
        self.get_scalar(index).map(Scalar::to_f64)
    }

    /// Reads the element at `index` without widening it.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] if `index >= self.length()`.
    pub fn get_scalar(&self, index: usize) -> Result<Scalar> {
        let offset = self.element_offset(index)?;
        self.buffer.with_bytes(self.window(), |bytes| {
            codec::read_scalar(self.kind, bytes, offset, native())
        })?
    }

    /// Coerces `value` to the element kind and stores it at `index`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] if `index >= self.length()`.
    pub fn set(&self, index: usize, value: impl Coerce) -> Result<()> {
        let offset = self.element_offset(index)?;
        let scalar = Scalar::coerce(self.kind, &value);
        self.buffer.with_bytes_mut(self.window(), |bytes| {
            codec::write_scalar(bytes, offset, scalar, native())
        })?
    }

    /// Reads every element into a `Vec`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] only if the view no longer fits its buffer, which the
    /// construction checks rule out.
    pub fn to_vec(&self) -> Result<Vec<f64>> {
        let size = self.kind.size();
        self.buffer.with_bytes(self.window(), |bytes| {
            (0..self.length)
                .map(|index| codec::read_number(self.kind, bytes, index * size, native()))
                .collect()
        })?
    }

    /// The element kind of this view.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Size of one element in bytes.
    #[must_use]
    pub fn bytes_per_element(&self) -> usize {
        self.kind.size()
    }

    /// Number of elements in the view.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns `true` if the view has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Offset of the first element within the buffer, in bytes.
    #[must_use]
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Length of the view in bytes.
    #[must_use]
    pub fn byte_length(&self) -> usize {
        self.length * self.kind.size()
    }

    /// The buffer this view aliases.
    #[must_use]
    pub fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    fn element_offset(&self, index: usize) -> Result<usize> {
        if index >= self.length {
            return Err(range_error!(
                "index {} out of bounds for {} of length {}",
                index,
                self.kind.array_name(),
                self.length
            ));
        }
        Ok(index * self.kind.size())
    }

    fn window(&self) -> Range<usize> {
        self.byte_offset..self.byte_offset + self.byte_length()
    }
}

impl ArrayLike for TypedArrayView {
    type Item = f64;

    fn length(&self) -> usize {
        self.length
    }

    fn element(&self, index: usize) -> Result<f64> {
        self.get(index)
    }
}

/// Element storage uses the host's own byte order.
fn native() -> bool {
    !codec::host_is_big_endian()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn from_buffer_default_length() {
        let buffer = ByteBuffer::new(10);

        let view = TypedArrayView::from_buffer(ElementKind::Uint8, &buffer, 0, None).unwrap();
        assert_eq!(view.length(), 10);

        let view = TypedArrayView::from_buffer(ElementKind::Int32, &buffer, 0, None).unwrap();
        assert_eq!(view.length(), 2);
        assert_eq!(view.byte_length(), 8);

        let view = TypedArrayView::from_buffer(ElementKind::Float64, &buffer, 2, None).unwrap();
        assert_eq!(view.length(), 1);
        assert_eq!(view.byte_offset(), 2);
        assert_eq!(view.bytes_per_element(), 8);
        assert!(view.buffer().same_buffer(&buffer));
    }

    #[test]
    fn from_buffer_default_length_ignores_offset() {
        // The default length counts from the start of the buffer, so a non-zero offset can
        // push the window past the end.
        let buffer = ByteBuffer::new(8);
        assert!(TypedArrayView::from_buffer(ElementKind::Int32, &buffer, 4, None).is_err());
        assert!(TypedArrayView::from_buffer(ElementKind::Int32, &buffer, 4, Some(1)).is_ok());
    }

    #[test]
    fn from_buffer_out_of_bounds() {
        let buffer = ByteBuffer::new(8);

        assert!(TypedArrayView::from_buffer(ElementKind::Int16, &buffer, 0, Some(4)).is_ok());
        assert!(TypedArrayView::from_buffer(ElementKind::Int16, &buffer, 0, Some(5)).is_err());
        assert!(TypedArrayView::from_buffer(ElementKind::Int16, &buffer, 1, Some(4)).is_err());
        assert!(TypedArrayView::from_buffer(ElementKind::Uint8, &buffer, 9, Some(0)).is_err());
        assert!(
            TypedArrayView::from_buffer(ElementKind::Float64, &buffer, 0, Some(usize::MAX)).is_err()
        );

        let err =
            TypedArrayView::from_buffer(ElementKind::Uint32, &buffer, 0, Some(3)).unwrap_err();
        assert_eq!(err.message(), "typed array range out of bounds");
    }

    #[test]
    fn with_length_allocates_zeroed_buffer() {
        for kind in ElementKind::iter() {
            let view = TypedArrayView::with_length(kind, 3).unwrap();
            assert_eq!(view.kind(), kind);
            assert_eq!(view.length(), 3);
            assert_eq!(view.byte_offset(), 0);
            assert_eq!(view.byte_length(), 3 * kind.size());
            assert_eq!(view.buffer().byte_length(), 3 * kind.size());
            assert_eq!(view.to_vec().unwrap(), vec![0.0; 3]);
        }

        let empty = TypedArrayView::with_length(ElementKind::Float32, 0).unwrap();
        assert!(empty.is_empty());
        assert!(empty.get(0).is_err());
    }

    struct HugeSource;

    impl ArrayLike for HugeSource {
        type Item = f64;

        fn length(&self) -> usize {
            1 << 30
        }

        fn element(&self, _index: usize) -> Result<f64> {
            Ok(0.0)
        }
    }

    #[test]
    fn with_length_rejects_oversized_requests() {
        assert!(TypedArrayView::with_length(ElementKind::Float64, usize::MAX).is_err());

        // Above the default cap of u32::MAX bytes, rejected before anything is allocated
        assert!(TypedArrayView::with_length(ElementKind::Float64, 1 << 30).is_err());
        assert!(TypedArrayView::from_array_like(ElementKind::Float64, &HugeSource).is_err());

        let limits = Limits::new().with_max_byte_length(16);
        assert!(TypedArrayView::with_length_in(ElementKind::Uint16, 8, &limits).is_ok());
        let err = TypedArrayView::with_length_in(ElementKind::Uint16, 9, &limits).unwrap_err();
        assert!(err.message().contains("exceeds the limit"));
    }

    #[test]
    fn indexed_access() {
        let view = TypedArrayView::with_length(ElementKind::Int16, 4).unwrap();

        view.set(0, -5).unwrap();
        view.set(3, 1234.9).unwrap();
        assert_eq!(view.get(0).unwrap(), -5.0);
        assert_eq!(view.get(3).unwrap(), 1234.0);
        assert_eq!(view.get_scalar(0).unwrap(), Scalar::Int16(-5));

        assert!(view.get(4).is_err());
        assert!(view.set(4, 1).is_err());
        assert!(view.get(usize::MAX).is_err());

        let err = view.get(7).unwrap_err();
        assert_eq!(err.message(), "index 7 out of bounds for Int16Array of length 4");
    }

    #[test]
    fn elements_are_stored_in_host_order() {
        let view = TypedArrayView::with_length(ElementKind::Uint32, 1).unwrap();
        view.set(0, 0x0102_0304_u32).unwrap();
        assert_eq!(view.buffer().to_vec(), 0x0102_0304_u32.to_ne_bytes().to_vec());
    }

    #[test]
    fn coercion_per_kind() {
        let bytes = TypedArrayView::with_length(ElementKind::Uint8, 1).unwrap();
        bytes.set(0, -1).unwrap();
        assert_eq!(bytes.get(0).unwrap(), 255.0);
        bytes.set(0, 1e9 + 7.0).unwrap();
        assert_eq!(bytes.get(0).unwrap(), 7.0);

        let ints = TypedArrayView::with_length(ElementKind::Int32, 1).unwrap();
        ints.set(0, 0xFFFF_FFFF_u32).unwrap();
        assert_eq!(ints.get(0).unwrap(), -1.0);
        ints.set(0, f64::INFINITY).unwrap();
        assert_eq!(ints.get(0).unwrap(), 0.0);

        let floats = TypedArrayView::with_length(ElementKind::Float32, 1).unwrap();
        floats.set(0, 0.1).unwrap();
        assert_eq!(floats.get(0).unwrap(), f64::from(0.1_f32));

        let doubles = TypedArrayView::with_length(ElementKind::Float64, 1).unwrap();
        doubles.set(0, f64::NAN).unwrap();
        assert!(doubles.get(0).unwrap().is_nan());
    }

    #[test]
    fn from_array_like_copies_and_coerces() {
        let view = TypedArrayView::from_array_like(ElementKind::Int8, &[1.5, -2.5, 300.0]).unwrap();
        assert_eq!(view.length(), 3);
        assert_eq!(view.to_vec().unwrap(), vec![1.0, -2.0, 44.0]);

        let view = TypedArrayView::from_array_like(ElementKind::Uint16, &vec![7_u8, 8, 9]).unwrap();
        assert_eq!(view.to_vec().unwrap(), vec![7.0, 8.0, 9.0]);

        let empty: &[f64] = &[];
        let view = TypedArrayView::from_array_like(ElementKind::Float64, empty).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn from_array_like_owns_a_fresh_buffer() {
        let source = TypedArrayView::with_length(ElementKind::Int32, 2).unwrap();
        source.set(0, -7).unwrap();
        source.set(1, 70_000).unwrap();

        let copy = TypedArrayView::from_array_like(ElementKind::Int16, &source).unwrap();
        assert!(!copy.buffer().same_buffer(source.buffer()));
        assert_eq!(copy.to_vec().unwrap(), vec![-7.0, 4464.0]);

        copy.set(0, 1).unwrap();
        assert_eq!(source.get(0).unwrap(), -7.0);
    }

    #[test]
    fn to_vec_respects_offset() {
        let buffer = ByteBuffer::new(6);
        let bytes = TypedArrayView::from_buffer(ElementKind::Uint8, &buffer, 0, None).unwrap();
        for i in 0..6 {
            bytes.set(i, i * 10).unwrap();
        }

        let tail = TypedArrayView::from_buffer(ElementKind::Uint8, &buffer, 4, Some(2)).unwrap();
        assert_eq!(tail.to_vec().unwrap(), vec![40.0, 50.0]);
    }
}
