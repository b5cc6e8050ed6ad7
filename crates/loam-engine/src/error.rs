//! Configuration and seeding error types.

use std::error::Error;
use std::fmt;

use loam_core::{AlphabetError, TraitError};
use loam_grid::GridError;
use loam_rule::RuleError;

/// Errors detected while building an [`Engine`](crate::Engine).
///
/// Everything here is fatal to construction: a misconfigured layer
/// never reaches its first tick.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// No layers were supplied.
    NoLayers,
    /// The grid dimensions are invalid.
    Grid(GridError),
    /// A layer's alphabet failed validation.
    Alphabet {
        /// Name of the offending layer.
        layer: String,
        /// The underlying error.
        source: AlphabetError,
    },
    /// A layer's trait table failed compilation.
    Trait {
        /// Name of the offending layer.
        layer: String,
        /// The underlying error.
        source: TraitError,
    },
    /// A layer's rule failed compilation.
    Rule {
        /// Name of the offending layer.
        layer: String,
        /// Position of the rule in the layer's rule list.
        index: usize,
        /// The underlying error.
        source: RuleError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLayers => write!(f, "no layers supplied"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Alphabet { layer, source } => {
                write!(f, "layer '{layer}': {source}")
            }
            Self::Trait { layer, source } => {
                write!(f, "layer '{layer}': {source}")
            }
            Self::Rule {
                layer,
                index,
                source,
            } => {
                write!(f, "layer '{layer}', rule {index}: {source}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoLayers => None,
            Self::Grid(e) => Some(e),
            Self::Alphabet { source, .. } => Some(source),
            Self::Trait { source, .. } => Some(source),
            Self::Rule { source, .. } => Some(source),
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Errors from host-side cell seeding on a built layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedError {
    /// The symbol is not in the layer's alphabet.
    UnknownSymbol {
        /// The offending symbol.
        symbol: char,
    },
    /// The coordinate is outside the lattice.
    OutOfBounds {
        /// X coordinate as given.
        x: i32,
        /// Y coordinate as given.
        y: i32,
    },
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSymbol { symbol } => {
                write!(f, "symbol '{symbol}' is not in the layer's alphabet")
            }
            Self::OutOfBounds { x, y } => write!(f, "({x}, {y}) is out of bounds"),
        }
    }
}

impl Error for SeedError {}
