//! Routing of integer-keyed property access to typed array elements.
//!
//! A dynamically typed host looks properties up by string key. Keys that spell an array index
//! must reach the elements of a [`crate::TypedArrayView`]; every other key belongs to the host's
//! ordinary property machinery. [`array_index`] makes that distinction and [`IndexedProperty`]
//! performs the routed access.
//!
//! # Examples
//!
//! ```rust
//! use bytescope::{ElementKind, IndexedProperty, TypedArrayView};
//!
//! let view = TypedArrayView::with_length(ElementKind::Uint8, 4)?;
//!
//! assert!(view.put_property("2", 200)?);
//! assert_eq!(view.get_property("2")?, Some(200.0));
//!
//! // Not an index: left to the host
//! assert_eq!(view.get_property("length")?, None);
//! assert!(!view.put_property("02", 1)?);
//!
//! // An index, but out of bounds
//! assert!(view.get_property("4").is_err());
//! # Ok::<(), bytescope::Error>(())
//! ```

use crate::{host::Coerce, view::TypedArrayView, Result};

/// Largest valid array index, `2^32 - 2`.
pub const MAX_ARRAY_INDEX: u64 = u32::MAX as u64 - 1;

/// Parses `key` as an array index.
///
/// Accepts the canonical decimal spelling of an integer in `0..=MAX_ARRAY_INDEX`: ASCII digits
/// only, no sign, no whitespace, and no leading zeros except for `"0"` itself.
#[must_use]
pub fn array_index(key: &str) -> Option<usize> {
    let bytes = key.as_bytes();
    match bytes {
        [] => return None,
        [b'0', _, ..] => return None,
        _ => {}
    }
    if !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let index = key
        .parse::<u64>()
        .ok()
        .filter(|index| *index <= MAX_ARRAY_INDEX)?;
    usize::try_from(index).ok()
}

/// Integer-keyed property hook for views addressable by element index.
pub trait IndexedProperty {
    /// Looks up `key`.
    ///
    /// Returns `Ok(Some(value))` when `key` is an array index within bounds and `Ok(None)` when
    /// `key` is not an array index at all.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] when `key` is an array index but out of bounds.
    fn get_property(&self, key: &str) -> Result<Option<f64>>;

    /// Stores `value` under `key`.
    ///
    /// Returns `Ok(true)` when the value was stored and `Ok(false)` when `key` is not an array
    /// index, leaving the host to handle it.
    ///
    /// # Errors
    /// Returns [`crate::Error::Range`] when `key` is an array index but out of bounds.
    fn put_property(&self, key: &str, value: impl Coerce) -> Result<bool>;
}

impl IndexedProperty for TypedArrayView {
    fn get_property(&self, key: &str) -> Result<Option<f64>> {
        match array_index(key) {
            Some(index) => self.get(index).map(Some),
            None => Ok(None),
        }
    }

    fn put_property(&self, key: &str, value: impl Coerce) -> Result<bool> {
        match array_index(key) {
            Some(index) => self.set(index, value).map(|()| true),
            None => Ok(false),
        }
    }
}
