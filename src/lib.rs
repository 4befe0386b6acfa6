// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # bytescope
//!
//! Bounds-checked binary data: a fixed-size byte buffer, typed views over it, and an
//! endianness-aware codec for fixed-width numbers at arbitrary byte offsets.
//!
//! ## Features
//!
//! - **Zero-copy views** - Any number of views alias one buffer; writes are visible through all
//!   of them
//! - **Checked everywhere** - Views are validated when created and every access is validated
//!   against its view; violations are reported as [`Error::Range`], never as panics
//! - **Per-call byte order** - [`BufferView`] reads and writes little- or big-endian values
//!   independent of the host
//! - **One generic typed array** - [`TypedArrayView`] covers all eight element kinds with a
//!   runtime [`ElementKind`] tag
//! - **Host agnostic** - Numeric coercion and source sequences are supplied through the
//!   [`Coerce`] and [`ArrayLike`] traits
//!
//! ## Quick Start
//!
//! ```rust
//! use bytescope::prelude::*;
//!
//! let buffer = ByteBuffer::new(8);
//!
//! // Element access in host byte order
//! let ints = TypedArrayView::from_buffer(ElementKind::Int32, &buffer, 0, None)?;
//! ints.set(0, 1)?;
//! ints.set(1, -1)?;
//! assert_eq!(ints.get(1)?, -1.0);
//!
//! // Byte access with explicit byte order over the same bytes
//! let view = BufferView::new(&buffer, 0, None)?;
//! view.set_uint32(0, 0x0102_0304, false)?;
//! assert_eq!(view.get_uint8(0, false)?, 0x01);
//! assert_eq!(view.get_uint32(0, true)?, 0x0403_0201);
//! # Ok::<(), bytescope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`buffer`] - [`ByteBuffer`], the shared owner of raw storage, and allocation [`Limits`]
//! - [`codec`] - Byte order detection, swapping and typed reads/writes on byte slices
//! - [`view`] - [`BufferView`], [`TypedArrayView`] and the integer-keyed property hook
//! - [`host`] - Traits through which an embedding host supplies values
//! - [`prelude`] - Re-exports of the commonly used types
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: allocations, slices and view
//! construction at `trace` level, rejected construction requests at `debug` level. No logger is
//! installed by the library itself.
//!
//! ## Thread Safety
//!
//! Buffers and views are reference counted without atomics and are neither `Send` nor `Sync`.
//! All operations are synchronous. Hosts sharing them across threads must wrap them in their own
//! synchronization.

mod error;

pub mod buffer;
pub mod codec;
pub mod host;
pub mod prelude;
pub mod view;

/// `bytescope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `bytescope` Error type
///
/// The error type for all fallible operations in this crate. Every variant describes a bounds
/// violation.
///
/// # Examples
///
/// ```rust
/// use bytescope::{Error, ElementKind, TypedArrayView};
///
/// let view = TypedArrayView::with_length(ElementKind::Uint8, 2)?;
/// match view.get(2) {
///     Ok(value) => println!("value: {}", value),
///     Err(Error::Range { message, .. }) => println!("RangeError: {}", message),
/// }
/// # Ok::<(), bytescope::Error>(())
/// ```
pub use error::Error;

/// Shared byte storage and allocation limits.
pub use buffer::{ByteBuffer, Limits};

/// Element kinds and their Rust representations.
pub use codec::{Element, ElementKind, Scalar};

/// Capabilities the embedding host provides.
pub use host::{ArrayLike, Coerce};

/// Views over a buffer.
pub use view::{array_index, BufferView, IndexedProperty, TypedArrayView};
