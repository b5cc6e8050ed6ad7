//! Compiled cell-value matchers.
//!
//! A matcher is the compiled form of a textual pattern: a set of
//! acceptable symbols, optionally complemented. Patterns are tiny and
//! repeat heavily across a rule table (`"~"`, `"^ "` and friends), so
//! compilation is memoized by pattern text through [`MatcherCache`].

use std::collections::HashMap;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::alphabet::{Alphabet, Symbol};
use crate::error::PatternError;

/// A compiled set-membership predicate over cell symbols.
///
/// `"ab"` matches symbols in `{a, b}`; a leading `^` complements the
/// set, so `"^ab"` matches any symbol *not* in `{a, b}`.
///
/// # Examples
///
/// ```
/// use loam_core::{Alphabet, Matcher};
///
/// let alphabet = Alphabet::new([' ', '~', '.', 'O']).unwrap();
/// let wet = Matcher::parse("~.", &alphabet).unwrap();
/// assert!(wet.matches('~'));
/// assert!(!wet.matches('O'));
///
/// let solid = Matcher::parse("^ ~.", &alphabet).unwrap();
/// assert!(solid.matches('O'));
/// assert!(!solid.matches(' '));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matcher {
    set: SmallVec<[Symbol; 8]>,
    negate: bool,
}

impl Matcher {
    /// Compile a pattern, validating every named symbol against `alphabet`.
    ///
    /// Returns `Err(PatternError::Empty)` if no symbols remain after
    /// stripping the negation marker, and `Err(PatternError::UnknownSymbol)`
    /// for symbols outside the alphabet. Malformed patterns are rejected
    /// here, at rule compile time — never mid-simulation.
    pub fn parse(pattern: &str, alphabet: &Alphabet) -> Result<Self, PatternError> {
        let (negate, body) = match pattern.strip_prefix('^') {
            Some(rest) => (true, rest),
            None => (false, pattern),
        };
        let set: SmallVec<[Symbol; 8]> = body.chars().collect();
        if set.is_empty() {
            return Err(PatternError::Empty);
        }
        for &symbol in &set {
            if !alphabet.contains(symbol) {
                return Err(PatternError::UnknownSymbol {
                    pattern: pattern.to_string(),
                    symbol,
                });
            }
        }
        Ok(Self { set, negate })
    }

    /// Test a cell value against the compiled set.
    pub fn matches(&self, cell: Symbol) -> bool {
        self.set.contains(&cell) != self.negate
    }
}

/// Memoizes compiled matchers by pattern text.
///
/// Shared across one layer's rule compilation so that every occurrence
/// of the same pattern resolves to one shared [`Matcher`].
#[derive(Debug, Default)]
pub struct MatcherCache {
    compiled: HashMap<String, Arc<Matcher>>,
}

impl MatcherCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `pattern` against `alphabet`, reusing an earlier
    /// compilation of the identical text when one exists.
    pub fn get(
        &mut self,
        pattern: &str,
        alphabet: &Alphabet,
    ) -> Result<Arc<Matcher>, PatternError> {
        if let Some(matcher) = self.compiled.get(pattern) {
            return Ok(Arc::clone(matcher));
        }
        let matcher = Arc::new(Matcher::parse(pattern, alphabet)?);
        self.compiled
            .insert(pattern.to_string(), Arc::clone(&matcher));
        Ok(matcher)
    }

    /// Number of distinct patterns compiled so far.
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Whether no pattern has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
