//! Endian-aware reading and writing of fixed-width values at arbitrary byte offsets.
//!
//! This module is the single place where bytes become numbers and numbers become bytes. Both
//! [`crate::BufferView`] and [`crate::TypedArrayView`] route every access through it.
//!
//! # Architecture
//!
//! Values are always moved through their *native* byte representation (see
//! [`crate::codec::Element`]). When the caller asks for a byte order that differs from the host's,
//! the representation is reversed with [`crate::codec::swap`] on its way in or out. The decision is
//! made by [`crate::codec::needs_swap`], which compares the requested order against the result of
//! [`crate::codec::host_is_big_endian`].
//!
//! # Key Components
//!
//! - [`crate::codec::read_at`] / [`crate::codec::write_at`] - Bounds-checked access with an
//!   explicit byte order
//! - [`crate::codec::read_native`] / [`crate::codec::write_native`] - Host-order access, used for
//!   typed array element storage
//! - [`crate::codec::read_scalar`] / [`crate::codec::write_scalar`] - Dynamic access selected by an
//!   [`crate::codec::ElementKind`] tag, carrying values as [`crate::codec::Scalar`]
//! - [`crate::codec::read_number`] / [`crate::codec::write_number`] - The same, widened to host
//!   numbers
//!
//! # Usage Examples
//!
//! ```rust
//! use bytescope::codec::{read_at, write_at};
//!
//! let mut data = [0u8; 4];
//! write_at(&mut data, 0, 0x0102_0304_u32, false)?; // big-endian
//! assert_eq!(data, [0x01, 0x02, 0x03, 0x04]);
//!
//! let value: u32 = read_at(&data, 0, true)?; // little-endian
//! assert_eq!(value, 0x0403_0201);
//! # Ok::<(), bytescope::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All reading and writing functions return [`crate::Result<T>`] and will return
//! [`crate::Error::Range`] if `offset + size_of::<T>()` exceeds the slice. Offsets close to
//! `usize::MAX` are handled with checked arithmetic.

mod element;

pub use element::{Element, ElementKind};

use crate::{error::range_error, host::Coerce, Result};

/// Detects the byte order of the host at runtime.
///
/// Returns `true` on big-endian targets.
#[must_use]
pub fn host_is_big_endian() -> bool {
    1_u16.to_ne_bytes()[0] == 0
}

/// Returns `true` when a value must be byte-swapped to honour the requested order.
///
/// A swap is needed exactly when the requested order differs from the host order: requesting
/// little-endian on a big-endian host, or big-endian on a little-endian host.
#[must_use]
pub fn needs_swap(little_endian: bool) -> bool {
    little_endian == host_is_big_endian()
}

/// Reverses a 1, 2, 4 or 8 byte representation in place.
///
/// Total over every supported width; for a single byte this is the identity.
pub fn swap(bytes: &mut [u8]) {
    bytes.reverse();
}

/// Reads a value of type `T` at `offset` using the requested byte order.
///
/// # Arguments
///
/// * `data` - The bytes to read from
/// * `offset` - Byte offset of the first byte of the value
/// * `little_endian` - `true` for little-endian, `false` for big-endian
///
/// # Errors
///
/// Returns [`crate::Error::Range`] if `offset + size_of::<T>()` exceeds `data.len()`.
pub fn read_at<T: Element>(data: &[u8], offset: usize, little_endian: bool) -> Result<T> {
    let mut bytes = T::Bytes::default();
    let width = bytes.as_ref().len();

    let Some(src) = offset.checked_add(width).and_then(|end| data.get(offset..end)) else {
        return Err(range_error!(
            "offset {} out of bounds for {} of {} bytes",
            offset,
            T::KIND,
            data.len()
        ));
    };

    bytes.as_mut().copy_from_slice(src);
    if needs_swap(little_endian) {
        swap(bytes.as_mut());
    }

    Ok(T::from_ne_bytes(bytes))
}

/// Writes `value` at `offset` using the requested byte order.
///
/// # Arguments
///
/// * `data` - The bytes to write into
/// * `offset` - Byte offset of the first byte of the value
/// * `value` - The value to encode
/// * `little_endian` - `true` for little-endian, `false` for big-endian
///
/// # Errors
///
/// Returns [`crate::Error::Range`] if `offset + size_of::<T>()` exceeds `data.len()`. Nothing is
/// written in that case.
pub fn write_at<T: Element>(
    data: &mut [u8],
    offset: usize,
    value: T,
    little_endian: bool,
) -> Result<()> {
    let mut bytes = value.to_ne_bytes();
    let width = bytes.as_ref().len();
    let len = data.len();

    let Some(dst) = offset
        .checked_add(width)
        .and_then(|end| data.get_mut(offset..end))
    else {
        return Err(range_error!(
            "offset {} out of bounds for {} of {} bytes",
            offset,
            T::KIND,
            len
        ));
    };

    if needs_swap(little_endian) {
        swap(bytes.as_mut());
    }
    dst.copy_from_slice(bytes.as_ref());

    Ok(())
}

/// Reads a value of type `T` at `offset` in host byte order.
///
/// # Errors
///
/// Returns [`crate::Error::Range`] if the value does not fit within `data`.
pub fn read_native<T: Element>(data: &[u8], offset: usize) -> Result<T> {
    read_at(data, offset, !host_is_big_endian())
}

/// Writes `value` at `offset` in host byte order.
///
/// # Errors
///
/// Returns [`crate::Error::Range`] if the value does not fit within `data`.
pub fn write_native<T: Element>(data: &mut [u8], offset: usize, value: T) -> Result<()> {
    write_at(data, offset, value, !host_is_big_endian())
}

/// A single element value tagged with its kind.
///
/// Produced by coercing a host value once, before any buffer storage is touched, so that host
/// coercion code never runs while a buffer is being written.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar {
    /// Signed 8-bit integer
    Int8(i8),
    /// Unsigned 8-bit integer
    Uint8(u8),
    /// Signed 16-bit integer
    Int16(i16),
    /// Unsigned 16-bit integer
    Uint16(u16),
    /// Signed 32-bit integer
    Int32(i32),
    /// Unsigned 32-bit integer
    Uint32(u32),
    /// Single precision float
    Float32(f32),
    /// Double precision float
    Float64(f64),
}

impl Scalar {
    /// Coerces `value` into an element of the given `kind`.
    pub fn coerce<V: Coerce + ?Sized>(kind: ElementKind, value: &V) -> Scalar {
        match kind {
            ElementKind::Int8 => Scalar::Int8(value.coerce()),
            ElementKind::Uint8 => Scalar::Uint8(value.coerce()),
            ElementKind::Int16 => Scalar::Int16(value.coerce()),
            ElementKind::Uint16 => Scalar::Uint16(value.coerce()),
            ElementKind::Int32 => Scalar::Int32(value.coerce()),
            ElementKind::Uint32 => Scalar::Uint32(value.coerce()),
            ElementKind::Float32 => Scalar::Float32(value.coerce()),
            ElementKind::Float64 => Scalar::Float64(value.coerce()),
        }
    }

    /// The kind tag of this value
    #[must_use]
    pub fn kind(self) -> ElementKind {
        match self {
            Scalar::Int8(_) => ElementKind::Int8,
            Scalar::Uint8(_) => ElementKind::Uint8,
            Scalar::Int16(_) => ElementKind::Int16,
            Scalar::Uint16(_) => ElementKind::Uint16,
            Scalar::Int32(_) => ElementKind::Int32,
            Scalar::Uint32(_) => ElementKind::Uint32,
            Scalar::Float32(_) => ElementKind::Float32,
            Scalar::Float64(_) => ElementKind::Float64,
        }
    }

    /// Widens the value to a host number.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        match self {
            Scalar::Int8(v) => v.to_f64(),
            Scalar::Uint8(v) => v.to_f64(),
            Scalar::Int16(v) => v.to_f64(),
            Scalar::Uint16(v) => v.to_f64(),
            Scalar::Int32(v) => v.to_f64(),
            Scalar::Uint32(v) => v.to_f64(),
            Scalar::Float32(v) => v.to_f64(),
            Scalar::Float64(v) => v.to_f64(),
        }
    }
}

/// Reads an element of the given `kind` at `offset`.
///
/// # Errors
///
/// Returns [`crate::Error::Range`] if the element does not fit within `data`.
pub fn read_scalar(
    kind: ElementKind,
    data: &[u8],
    offset: usize,
    little_endian: bool,
) -> Result<Scalar> {
    Ok(match kind {
        ElementKind::Int8 => Scalar::Int8(read_at(data, offset, little_endian)?),
        ElementKind::Uint8 => Scalar::Uint8(read_at(data, offset, little_endian)?),
        ElementKind::Int16 => Scalar::Int16(read_at(data, offset, little_endian)?),
        ElementKind::Uint16 => Scalar::Uint16(read_at(data, offset, little_endian)?),
        ElementKind::Int32 => Scalar::Int32(read_at(data, offset, little_endian)?),
        ElementKind::Uint32 => Scalar::Uint32(read_at(data, offset, little_endian)?),
        ElementKind::Float32 => Scalar::Float32(read_at(data, offset, little_endian)?),
        ElementKind::Float64 => Scalar::Float64(read_at(data, offset, little_endian)?),
    })
}

/// Writes `scalar` at `offset`.
///
/// # Errors
///
/// Returns [`crate::Error::Range`] if the element does not fit within `data`.
pub fn write_scalar(
    data: &mut [u8],
    offset: usize,
    scalar: Scalar,
    little_endian: bool,
) -> Result<()> {
    match scalar {
        Scalar::Int8(v) => write_at(data, offset, v, little_endian),
        Scalar::Uint8(v) => write_at(data, offset, v, little_endian),
        Scalar::Int16(v) => write_at(data, offset, v, little_endian),
        Scalar::Uint16(v) => write_at(data, offset, v, little_endian),
        Scalar::Int32(v) => write_at(data, offset, v, little_endian),
        Scalar::Uint32(v) => write_at(data, offset, v, little_endian),
        Scalar::Float32(v) => write_at(data, offset, v, little_endian),
        Scalar::Float64(v) => write_at(data, offset, v, little_endian),
    }
}

/// Reads an element of the given `kind` at `offset` and widens it to a host number.
///
/// # Errors
///
/// Returns [`crate::Error::Range`] if the element does not fit within `data`.
pub fn read_number(
    kind: ElementKind,
    data: &[u8],
    offset: usize,
    little_endian: bool,
) -> Result<f64> {
    read_scalar(kind, data, offset, little_endian).map(Scalar::to_f64)
}

/// Coerces `value` to the given `kind` and writes it at `offset`.
///
/// # Errors
///
/// Returns [`crate::Error::Range`] if the element does not fit within `data`.
pub fn write_number<V: Coerce + ?Sized>(
    kind: ElementKind,
    data: &mut [u8],
    offset: usize,
    value: &V,
    little_endian: bool,
) -> Result<()> {
    write_scalar(data, offset, Scalar::coerce(kind, value), little_endian)
}
