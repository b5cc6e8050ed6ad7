//! Loam: a data-driven stochastic cellular rewrite engine.
//!
//! A grid of single-character cells evolves in discrete ticks by
//! matching small local templates against a declarative rule table and
//! probabilistically rewriting the matched cells. Falling sand, flowing
//! liquid, evaporation, and organic growth are all expressed as *data*
//! — rule templates, per-symbol trait tables, and symbolic conditions —
//! against one generic engine.
//!
//! This is the top-level facade crate re-exporting the public API from
//! the Loam sub-crates; adding `loam` as a single dependency is enough
//! for most hosts.
//!
//! # Quick start
//!
//! ```rust
//! use loam::prelude::*;
//!
//! // A one-layer world: sand ('#') falls through empty air (' ').
//! let sand = LayerSpec::new("sand", [' ', '#'])
//!     .with_trait("density", TraitSpec::new(0.01).set('#', 0.8))
//!     .with_rule(
//!         Rule::new(
//!             Template::Vertical([MatchCell::Any, MatchCell::is("#"), MatchCell::Any]),
//!             Template::Vertical([
//!                 WriteCell::Keep,
//!                 WriteCell::copy("s"),
//!                 WriteCell::copy("c"),
//!             ]),
//!         )
//!         .when("density[c] > density[s]"),
//!     );
//!
//! let mut engine = Engine::with_seed(vec![sand], 8, 8, 42).unwrap();
//! engine.layers_mut()[0].set(3, 0, '#').unwrap();
//!
//! // Sand reaches the floor after enough ticks.
//! for _ in 0..8 {
//!     engine.step();
//! }
//! assert_eq!(engine.layers()[0].get(3, 7), Some('#'));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `loam-core` | Symbols, alphabets, trait tables, matchers |
//! | [`grid`] | `loam-grid` | The cell lattice and written-state stamps |
//! | [`rule`] | `loam-rule` | Templates, conditions, the rule compiler |
//! | [`engine`] | `loam-engine` | Layer specs, engine construction, stepping |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Symbols, alphabets, trait tables, and matchers (`loam-core`).
pub use loam_core as types;

/// The cell lattice and written-state stamps (`loam-grid`).
pub use loam_grid as grid;

/// Rule templates, condition expressions, and the rule compiler
/// (`loam-rule`).
pub use loam_rule as rule;

/// Layer specs, engine construction, and the tick scheduler
/// (`loam-engine`).
pub use loam_engine as engine;

/// Common imports for typical Loam usage.
///
/// ```rust
/// use loam::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use loam_core::{Alphabet, Matcher, Symbol, TraitSet, TraitSpec};

    // Errors
    pub use loam_core::{AlphabetError, PatternError, TraitError};
    pub use loam_engine::{ConfigError, SeedError};
    pub use loam_grid::GridError;
    pub use loam_rule::{ExprError, RuleError};

    // Grid
    pub use loam_grid::Lattice;

    // Rules
    pub use loam_rule::{
        CompiledRule, Condition, MatchCell, Orientation, Rule, RuleCompiler, Shape, Template,
        WriteCell,
    };

    // Engine
    pub use loam_engine::{Engine, Layer, LayerSpec};
}
