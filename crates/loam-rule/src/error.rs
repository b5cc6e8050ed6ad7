//! Error types for rule and condition compilation.

use std::error::Error;
use std::fmt;

use loam_core::PatternError;

use crate::template::Shape;

/// Errors from condition-expression compilation.
///
/// Parsing and binding both happen at rule compile time; a compiled
/// expression cannot fail at evaluation time.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprError {
    /// A character the lexer does not recognize.
    UnexpectedChar(char),
    /// The expression ended mid-construct.
    UnexpectedEnd,
    /// A token that cannot start or continue the current construct.
    UnexpectedToken(String),
    /// A numeric literal that does not parse.
    InvalidNumber(String),
    /// An identifier that is neither a neighbor accessor for this rule's
    /// shape nor a trait table.
    UnknownIdent(String),
    /// Indexing applied to something that is not a trait table.
    NotIndexable(String),
    /// A trait table referenced without `[..]` indexing.
    TraitNotIndexed(String),
    /// A function name other than the builtin `count`.
    UnknownFunction(String),
    /// `count` called with the wrong number of arguments.
    WrongArgCount {
        /// The function name.
        func: String,
        /// Arguments expected.
        expected: usize,
        /// Arguments supplied.
        got: usize,
    },
    /// A quoted literal used as a symbol but longer than one character.
    BadSymbolLiteral(String),
    /// A symbol literal outside the layer's alphabet.
    UnknownSymbol(char),
    /// A `count` pattern that failed matcher compilation.
    Pattern(PatternError),
    /// An operator applied to operands of the wrong types.
    TypeMismatch {
        /// What went wrong, e.g. "'<' needs numeric operands".
        reason: String,
    },
    /// The whole expression is neither a boolean gate nor a numeric
    /// probability.
    NotACondition,
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedChar(c) => write!(f, "unexpected character '{c}'"),
            Self::UnexpectedEnd => write!(f, "unexpected end of expression"),
            Self::UnexpectedToken(t) => write!(f, "unexpected token {t}"),
            Self::InvalidNumber(s) => write!(f, "invalid number '{s}'"),
            Self::UnknownIdent(name) => {
                write!(f, "'{name}' is not an accessor or trait for this rule shape")
            }
            Self::NotIndexable(name) => write!(f, "'{name}' cannot be indexed"),
            Self::TraitNotIndexed(name) => {
                write!(f, "trait '{name}' must be indexed by a symbol, e.g. {name}[c]")
            }
            Self::UnknownFunction(name) => write!(f, "unknown function '{name}'"),
            Self::WrongArgCount {
                func,
                expected,
                got,
            } => write!(f, "function '{func}' expects {expected} args, got {got}"),
            Self::BadSymbolLiteral(s) => {
                write!(f, "symbol literal '{s}' must be exactly one character")
            }
            Self::UnknownSymbol(s) => write!(f, "symbol '{s}' is not in the alphabet"),
            Self::Pattern(e) => write!(f, "count pattern: {e}"),
            Self::TypeMismatch { reason } => write!(f, "type mismatch: {reason}"),
            Self::NotACondition => {
                write!(f, "condition must evaluate to a boolean or a probability")
            }
        }
    }
}

impl Error for ExprError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PatternError> for ExprError {
    fn from(e: PatternError) -> Self {
        Self::Pattern(e)
    }
}

/// Errors from compiling one declarative rule.
#[derive(Clone, Debug, PartialEq)]
pub enum RuleError {
    /// Matcher and writer templates have different shapes.
    ShapeMismatch {
        /// The matcher template's shape.
        matcher: Shape,
        /// The writer template's shape.
        writer: Shape,
    },
    /// A matcher pattern failed to compile.
    Pattern(PatternError),
    /// A writer literal names a symbol outside the alphabet.
    UnknownWriteSymbol {
        /// The offending symbol.
        symbol: char,
    },
    /// A writer references an accessor the rule's shape does not expose.
    UnknownAccessor {
        /// The accessor name as written.
        name: String,
    },
    /// A constant probability outside `[0, 1]` (or non-finite).
    InvalidChance {
        /// The offending value.
        value: f64,
    },
    /// A condition expression failed to parse, bind, or type-check.
    Expr(ExprError),
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { matcher, writer } => {
                write!(
                    f,
                    "matcher template is {matcher} but writer template is {writer}"
                )
            }
            Self::Pattern(e) => write!(f, "pattern: {e}"),
            Self::UnknownWriteSymbol { symbol } => {
                write!(f, "writer symbol '{symbol}' is not in the alphabet")
            }
            Self::UnknownAccessor { name } => {
                write!(f, "writer accessor '{name}' does not exist for this rule shape")
            }
            Self::InvalidChance { value } => {
                write!(f, "probability must be within [0, 1], got {value}")
            }
            Self::Expr(e) => write!(f, "condition: {e}"),
        }
    }
}

impl Error for RuleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pattern(e) => Some(e),
            Self::Expr(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PatternError> for RuleError {
    fn from(e: PatternError) -> Self {
        Self::Pattern(e)
    }
}

impl From<ExprError> for RuleError {
    fn from(e: ExprError) -> Self {
        Self::Expr(e)
    }
}
