use crate::shapes::Shape;

/// Represents a number of different errors that can occur from allocating
/// arrays or launching array operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Host is out of memory
    OutOfMemory,

    /// Not enough (or too many) elements were provided when creating or
    /// storing into an array.
    WrongNumElements { expected: usize, found: usize },

    /// No conversion is registered between the two element types.
    Cast {
        from: &'static str,
        to: &'static str,
    },

    /// The source shape cannot be broadcast to (or does not match) the
    /// destination shape.
    ShapeMismatch { expected: Shape, found: Shape },

    /// The axis argument was outside `-ndim..ndim`.
    AxisOutOfRange { axis: isize, ndim: usize },

    /// The axis does not divide evenly into the requested number of sections.
    UnevenSplit { size: usize, sections: usize },

    /// An operation over a list of arrays was given an empty list.
    EmptyInput,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfMemory => f.write_str("out of memory"),
            Self::WrongNumElements { expected, found } => {
                write!(f, "wrong number of elements: expected {expected}, found {found}")
            }
            Self::Cast { from, to } => write!(f, "unknown conversion from {from} to {to}"),
            Self::ShapeMismatch { expected, found } => {
                write!(f, "shape mismatch: expected {expected}, found {found}")
            }
            Self::AxisOutOfRange { axis, ndim } => {
                write!(f, "axis {axis} is out of range for {ndim} dimensions")
            }
            Self::UnevenSplit { size, sections } => {
                write!(f, "cannot equally divide axis of size {size} into {sections} sections")
            }
            Self::EmptyInput => f.write_str("no input arrays given"),
        }
    }
}

impl std::error::Error for Error {}
