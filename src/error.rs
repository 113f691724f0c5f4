use std::error::Error;
use std::fmt;

/// Errors raised while validating input, before any flood round runs.
///
/// The propagation kernel itself is total: once an [`crate::field::InputField`]
/// has been constructed, the pipeline cannot fail. A field with no seed cells
/// is not an error; those batch elements complete with the sentinel offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FloodError {
    /// The input's dimensions cannot be interpreted as `[H, W]` or `[B, H, W]`
    /// (zero-sized axes, extra non-singleton trailing dimensions, or a data
    /// length that disagrees with the declared shape).
    InvalidShape {
        /// Human-readable description of the shape problem.
        reason: String,
    },
}

impl fmt::Display for FloodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShape { reason } => write!(f, "invalid shape: {reason}"),
        }
    }
}

impl Error for FloodError {}
