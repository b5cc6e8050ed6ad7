//! Core types for the Loam cellular rewrite engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: cell symbols and
//! alphabets, per-symbol trait tables, compiled cell matchers, and the
//! configuration error types for each.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod alphabet;
mod error;
mod matcher;
mod traits;

pub use alphabet::{Alphabet, Symbol};
pub use error::{AlphabetError, PatternError, TraitError};
pub use matcher::{Matcher, MatcherCache};
pub use traits::{TraitSet, TraitSpec, TraitTable};
