//! Error types for core configuration data.
//!
//! All three enums describe *configuration* mistakes: they surface once,
//! while an engine is being built, and never during stepping.

use std::error::Error;
use std::fmt;

/// Errors from [`Alphabet`](crate::Alphabet) construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlphabetError {
    /// An alphabet must contain at least one symbol (the first doubles as
    /// the boundary and initial-fill symbol).
    Empty,
    /// A symbol appeared more than once in the ordered alphabet.
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: char,
    },
}

impl fmt::Display for AlphabetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "alphabet must contain at least one symbol"),
            Self::DuplicateSymbol { symbol } => {
                write!(f, "alphabet lists symbol '{symbol}' more than once")
            }
        }
    }
}

impl Error for AlphabetError {}

/// Errors from trait table compilation.
#[derive(Clone, Debug, PartialEq)]
pub enum TraitError {
    /// A trait override names a symbol that is not in the layer's alphabet.
    UnknownSymbol {
        /// Name of the trait table.
        trait_name: String,
        /// The symbol with no alphabet entry.
        symbol: char,
    },
    /// A trait value is NaN; comparisons against it would poison every
    /// condition that reads the table.
    NonFiniteValue {
        /// Name of the trait table.
        trait_name: String,
        /// The symbol carrying the NaN, or `None` for the default.
        symbol: Option<char>,
    },
}

impl fmt::Display for TraitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSymbol { trait_name, symbol } => {
                write!(
                    f,
                    "trait '{trait_name}' has an entry for '{symbol}', which is not in the alphabet"
                )
            }
            Self::NonFiniteValue { trait_name, symbol } => match symbol {
                Some(s) => write!(f, "trait '{trait_name}' value for '{s}' is NaN"),
                None => write!(f, "trait '{trait_name}' default is NaN"),
            },
        }
    }
}

impl Error for TraitError {}

/// Errors from matcher pattern compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern text is empty (or only a negation marker).
    Empty,
    /// The pattern names a symbol outside the layer's alphabet.
    UnknownSymbol {
        /// The pattern as written.
        pattern: String,
        /// The offending symbol.
        symbol: char,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "pattern matches no symbols"),
            Self::UnknownSymbol { pattern, symbol } => {
                write!(
                    f,
                    "pattern \"{pattern}\" names symbol '{symbol}', which is not in the alphabet"
                )
            }
        }
    }
}

impl Error for PatternError {}
