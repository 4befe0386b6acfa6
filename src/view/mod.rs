//! Bounds-checked views over a [`crate::ByteBuffer`].
//!
//! Two peer view types alias the bytes of a buffer without copying them:
//!
//! - [`crate::BufferView`] - byte-addressed, typed reads and writes at arbitrary offsets with the
//!   byte order chosen per call
//! - [`crate::TypedArrayView`] - element-addressed, one [`crate::ElementKind`] per view, host byte
//!   order
//!
//! Both are validated once when they are created: the window `[byte_offset, byte_offset +
//! byte_length)` must fit within the buffer. Because buffers never change size, the check holds
//! for the whole lifetime of the view and individual accesses only need to be checked against the
//! view itself.
//!
//! Any number of views may share one buffer, and their windows may overlap. A write through one
//! view is immediately visible through every other view covering the same bytes:
//!
//! ```rust
//! use bytescope::{BufferView, ByteBuffer, ElementKind, TypedArrayView};
//!
//! let buffer = ByteBuffer::new(4);
//! let words = TypedArrayView::from_buffer(ElementKind::Uint16, &buffer, 0, None)?;
//! let bytes = BufferView::new(&buffer, 1, Some(2))?;
//!
//! bytes.set_uint16(0, 0xAABB, false)?;
//! assert_eq!(buffer.to_vec(), vec![0x00, 0xAA, 0xBB, 0x00]);
//! assert_eq!(words.get(0)?, f64::from(u16::from_ne_bytes([0x00, 0xAA])));
//! # Ok::<(), bytescope::Error>(())
//! ```

mod data;
mod property;
mod typed;

pub use data::BufferView;
pub use property::{array_index, IndexedProperty, MAX_ARRAY_INDEX};
pub use typed::TypedArrayView;
