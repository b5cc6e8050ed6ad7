//! Error types for lattice construction.

use std::error::Error;
use std::fmt;

/// Errors from [`Lattice`](crate::Lattice) construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Either dimension is zero.
    EmptyGrid,
    /// A dimension exceeds the `i32` coordinate range.
    DimensionTooLarge {
        /// Which axis ("width" or "height").
        name: &'static str,
        /// The offending value.
        value: u32,
        /// The maximum allowed.
        max: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "lattice must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} {value} exceeds maximum of {max}")
            }
        }
    }
}

impl Error for GridError {}
