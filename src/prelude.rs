//! # bytescope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the bytescope library. Import this module to get quick access to buffers, views and the
//! host-facing traits.
//!
//! ```rust
//! use bytescope::prelude::*;
//!
//! let floats = TypedArrayView::from_array_like(ElementKind::Float32, &[0.5, 1.5])?;
//! assert_eq!(floats.get_property("1")?, Some(1.5));
//! # Ok::<(), Error>(())
//! ```

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all bytescope operations
pub use crate::Error;

/// The result type used throughout bytescope
pub use crate::Result;

/// Allocation limits for implicitly created buffers
pub use crate::Limits;

// ================================================================================================
// Storage and Views
// ================================================================================================

/// Shared, fixed-size byte storage
pub use crate::ByteBuffer;

/// Byte-addressed view with per-call byte order
pub use crate::BufferView;

/// Element-addressed view of one element kind
pub use crate::TypedArrayView;

/// Integer-keyed property routing for typed array views
pub use crate::IndexedProperty;

// ================================================================================================
// Element Kinds and Host Interfaces
// ================================================================================================

/// Element kinds, their Rust representations and tagged values
pub use crate::{Element, ElementKind, Scalar};

/// Traits the embedding host implements for its values and sequences
pub use crate::{ArrayLike, Coerce};
