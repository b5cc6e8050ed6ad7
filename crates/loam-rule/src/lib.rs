//! Rule templates, condition expressions, and the rule compiler.
//!
//! A declarative [`Rule`] pairs a matcher template with a writer
//! template of the same spatial [`Shape`], plus optional [`Condition`]s.
//! [`RuleCompiler`] turns one rule into a [`CompiledRule`]: a
//! self-contained test-and-mutate operation the scheduler can attempt at
//! any coordinate. All configuration mistakes — mismatched shapes,
//! malformed patterns, unknown accessor or trait names, ill-typed
//! condition expressions — are rejected here, before the first tick.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod compile;
mod condition;
mod error;
mod expr;
mod neighborhood;
mod template;

pub use compile::{CompiledRule, RuleCompiler};
pub use error::{ExprError, RuleError};
pub use neighborhood::Orientation;
pub use template::{Condition, MatchCell, Rule, Shape, Template, WriteCell};
