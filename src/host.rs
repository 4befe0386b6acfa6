//! Capabilities supplied by the embedding host.
//!
//! The core never inspects host values directly. Whatever value system sits on top of it only has
//! to provide two things:
//!
//! - [`Coerce`] - turning an arbitrary value into a number of a given element kind
//! - [`ArrayLike`] - reporting a length and reading a value at an index, used when a typed array is
//!   copy-constructed from a source sequence
//!
//! Implementations for the Rust primitives, slices, arrays and `Vec` are provided, as well as
//! for [`crate::TypedArrayView`] itself.

use crate::{codec::Element, error::range_error, Result};

/// Numeric coercion from a host value to a fixed-width element.
///
/// Only [`Coerce::to_number`] is required. The default [`Coerce::coerce`] routes through it and
/// then through [`Element::from_f64`], which truncates toward zero and wraps modulo `2^bits` for
/// the integer kinds (`-1` stored as `Uint8` reads back as `255`) and maps `NaN` and the
/// infinities to `0`. Hosts with other conversion rules, such as clamping, override `coerce`.
pub trait Coerce {
    /// Convert the value into a host number.
    fn to_number(&self) -> f64;

    /// Convert the value into the representation of `T`.
    fn coerce<T: Element>(&self) -> T {
        T::from_f64(self.to_number())
    }
}

impl<C: Coerce + ?Sized> Coerce for &C {
    fn to_number(&self) -> f64 {
        (**self).to_number()
    }

    fn coerce<T: Element>(&self) -> T {
        (**self).coerce()
    }
}

macro_rules! impl_coerce_lossless {
    ($($ty:ty),*) => {
        $(
            impl Coerce for $ty {
                fn to_number(&self) -> f64 {
                    f64::from(*self)
                }
            }
        )*
    };
}

impl_coerce_lossless!(i8, u8, i16, u16, i32, u32, f32, f64);

macro_rules! impl_coerce_wide {
    ($($ty:ty),*) => {
        $(
            impl Coerce for $ty {
                #[allow(clippy::cast_precision_loss)]
                fn to_number(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_coerce_wide!(i64, u64, isize, usize);

impl Coerce for bool {
    fn to_number(&self) -> f64 {
        if *self {
            1.0
        } else {
            0.0
        }
    }
}

/// A source sequence with a length and indexed element reads.
pub trait ArrayLike {
    /// The value type produced for each element.
    type Item: Coerce;

    /// Number of elements in the sequence
    fn length(&self) -> usize;

    /// Read the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Range`] if `index` is not below [`ArrayLike::length`].
    fn element(&self, index: usize) -> Result<Self::Item>;
}

impl<T: Coerce + Copy> ArrayLike for [T] {
    type Item = T;

    fn length(&self) -> usize {
        self.len()
    }

    fn element(&self, index: usize) -> Result<T> {
        self.get(index)
            .copied()
            .ok_or_else(|| range_error!("index {} out of bounds for length {}", index, self.len()))
    }
}

impl<T: Coerce + Copy, const N: usize> ArrayLike for [T; N] {
    type Item = T;

    fn length(&self) -> usize {
        N
    }

    fn element(&self, index: usize) -> Result<T> {
        self.as_slice().element(index)
    }
}

impl<T: Coerce + Copy> ArrayLike for Vec<T> {
    type Item = T;

    fn length(&self) -> usize {
        self.len()
    }

    fn element(&self, index: usize) -> Result<T> {
        self.as_slice().element(index)
    }
}
