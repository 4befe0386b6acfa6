use thiserror::Error;

macro_rules! range_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Range {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Range {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

pub(crate) use range_error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every failure the library reports is a bounds violation. There is intentionally a single
/// variant: construction of a view whose window does not fit its buffer, element or byte access
/// outside a view, offset arithmetic that would overflow, and implicit allocations above the
/// configured [`crate::Limits`] all surface as [`Error::Range`].
///
/// Allocation failure itself is not represented here; like the rest of the standard library,
/// an allocator that cannot satisfy a request aborts the process.
///
/// # Examples
///
/// ```rust
/// use bytescope::{ByteBuffer, BufferView, Error};
///
/// let buffer = ByteBuffer::new(4);
/// match BufferView::new(&buffer, 2, Some(4)) {
///     Ok(_) => unreachable!(),
///     Err(Error::Range { message, file, line }) => {
///         eprintln!("RangeError: {} ({}:{})", message, file, line);
///     }
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An access or construction request fell outside the bounds of a buffer or view.
    ///
    /// The error includes the source location where the violation was detected for
    /// debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Description of the violated bound
    /// * `file` - Source file where the error was raised
    /// * `line` - Source line where the error was raised
    #[error("RangeError - {file}:{line}: {message}")]
    Range {
        /// The message to be printed for the RangeError
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },
}

impl Error {
    /// Returns the human readable part of the error, without source location.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Error::Range { message, .. } => message,
        }
    }
}
