//! Fixed-width numeric element kinds.
//!
//! [`ElementKind`] is the runtime tag carried by typed array views and accepted by the dynamic
//! accessors of [`crate::BufferView`]. [`Element`] is the compile-time counterpart implemented for
//! the eight Rust primitives that back those kinds.
//!
//! | Kind      | Rust type | Size |
//! |-----------|-----------|------|
//! | `Int8`    | `i8`      | 1    |
//! | `Uint8`   | `u8`      | 1    |
//! | `Int16`   | `i16`     | 2    |
//! | `Uint16`  | `u16`     | 2    |
//! | `Int32`   | `i32`     | 4    |
//! | `Uint32`  | `u32`     | 4    |
//! | `Float32` | `f32`     | 4    |
//! | `Float64` | `f64`     | 8    |

use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

/// Identifiers for the eight fixed-width numeric interpretations of a byte region.
///
/// Signed integers are two's-complement, floats are IEEE-754. The `Display` output is the bare
/// kind name (`"Int32"`), while [`ElementKind::array_name`] yields the host constructor name
/// (`"Int32Array"`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumIter, EnumCount, IntoStaticStr)]
pub enum ElementKind {
    /// Signed 8-bit integer
    Int8,
    /// Unsigned 8-bit integer
    Uint8,
    /// Signed 16-bit integer
    Int16,
    /// Unsigned 16-bit integer
    Uint16,
    /// Signed 32-bit integer
    Int32,
    /// Unsigned 32-bit integer
    Uint32,
    /// IEEE-754 single precision float
    Float32,
    /// IEEE-754 double precision float
    Float64,
}

impl ElementKind {
    /// Size of one element in bytes (`BYTES_PER_ELEMENT`).
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            ElementKind::Int8 | ElementKind::Uint8 => 1,
            ElementKind::Int16 | ElementKind::Uint16 => 2,
            ElementKind::Int32 | ElementKind::Uint32 | ElementKind::Float32 => 4,
            ElementKind::Float64 => 8,
        }
    }

    /// Name of the typed array constructor exposing this kind, e.g. `"Float64Array"`.
    #[must_use]
    pub const fn array_name(self) -> &'static str {
        match self {
            ElementKind::Int8 => "Int8Array",
            ElementKind::Uint8 => "Uint8Array",
            ElementKind::Int16 => "Int16Array",
            ElementKind::Uint16 => "Uint16Array",
            ElementKind::Int32 => "Int32Array",
            ElementKind::Uint32 => "Uint32Array",
            ElementKind::Float32 => "Float32Array",
            ElementKind::Float64 => "Float64Array",
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Trait for the primitive types that can be stored in a buffer.
///
/// Implementations convert between the value and its native-order byte representation, and
/// between the value and a host number (`f64`). The byte conversions are exact. Converting a
/// number into an integer kind truncates toward zero and wraps modulo `2^bits`, so `-1.0`
/// becomes `255_u8` and `4294967295.0` becomes `-1_i32`; `NaN` and the infinities become `0`.
/// The float kinds round to the nearest representable value.
///
/// The trait is sealed: only `i8`, `u8`, `i16`, `u16`, `i32`, `u32`, `f32` and `f64` implement it.
pub trait Element: Copy + sealed::Sealed {
    /// The runtime tag corresponding to this type.
    const KIND: ElementKind;

    /// Fixed-size byte array holding one encoded value.
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default + Copy;

    /// Reinterpret native-order bytes as a value
    fn from_ne_bytes(bytes: Self::Bytes) -> Self;

    /// Native-order byte representation of the value
    fn to_ne_bytes(self) -> Self::Bytes;

    /// Convert a host number into this type's representation.
    fn from_f64(value: f64) -> Self;

    /// Widen the value to a host number. Lossless for every kind.
    fn to_f64(self) -> f64;
}

macro_rules! impl_element {
    (@number $ty:ty, int, $bits:expr) => {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        fn from_f64(value: f64) -> Self {
            if !value.is_finite() {
                return 0;
            }
            // Exact for every modulus up to 2^32
            let modulus = f64::from(1_u32 << ($bits - 1)) * 2.0;
            value.trunc().rem_euclid(modulus) as u64 as $ty
        }
    };

    (@number $ty:ty, float, $bits:expr) => {
        #[allow(clippy::cast_possible_truncation)]
        fn from_f64(value: f64) -> Self {
            value as $ty
        }
    };

    ($($ty:ty => $kind:ident, $size:literal, $class:ident;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const KIND: ElementKind = ElementKind::$kind;
                type Bytes = [u8; $size];

                fn from_ne_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_ne_bytes(bytes)
                }

                fn to_ne_bytes(self) -> Self::Bytes {
                    <$ty>::to_ne_bytes(self)
                }

                impl_element!(@number $ty, $class, $size * 8);

                fn to_f64(self) -> f64 {
                    f64::from(self)
                }
            }
        )*
    };
}

impl_element! {
    i8 => Int8, 1, int;
    u8 => Uint8, 1, int;
    i16 => Int16, 2, int;
    u16 => Uint16, 2, int;
    i32 => Int32, 4, int;
    u32 => Uint32, 4, int;
    f32 => Float32, 4, float;
    f64 => Float64, 8, float;
}
