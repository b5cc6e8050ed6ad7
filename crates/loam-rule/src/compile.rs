//! The rule compiler and compiled-rule attempt path.

use std::sync::Arc;

use rand::{Rng, RngExt};
use smallvec::SmallVec;

use loam_core::{Alphabet, Matcher, MatcherCache, Symbol, TraitSet};
use loam_grid::Lattice;

use crate::condition::CompiledConditions;
use crate::error::RuleError;
use crate::expr::{Bindings, EvalEnv};
use crate::neighborhood::{is_symmetric, layouts, Layout, Orientation};
use crate::template::{MatchCell, Rule, WriteCell};

/// Compiles a layer's declarative rules against its alphabet and traits.
///
/// Owns the layer's [`MatcherCache`], so identical patterns across the
/// whole rule table share one compiled matcher.
pub struct RuleCompiler<'a> {
    alphabet: &'a Alphabet,
    traits: &'a TraitSet,
    cache: MatcherCache,
}

impl<'a> RuleCompiler<'a> {
    /// Create a compiler for one layer.
    pub fn new(alphabet: &'a Alphabet, traits: &'a TraitSet) -> Self {
        Self {
            alphabet,
            traits,
            cache: MatcherCache::new(),
        }
    }

    /// Compile one rule.
    ///
    /// Every configuration error — shape disagreement, malformed
    /// patterns, unknown writer accessors or symbols, ill-typed
    /// conditions, out-of-range probabilities — surfaces here, never
    /// during stepping.
    pub fn compile(&mut self, rule: &Rule) -> Result<CompiledRule, RuleError> {
        let shape = rule.matcher.shape();
        if rule.writer.shape() != shape {
            return Err(RuleError::ShapeMismatch {
                matcher: shape,
                writer: rule.writer.shape(),
            });
        }
        let [primary, secondary] = layouts(shape);

        let matchers = rule.matcher.cells();
        let writers = rule.writer.cells();
        let mut ops: SmallVec<[CellOp; 9]> = SmallVec::new();
        for (slot, (matcher, writer)) in matchers.iter().zip(writers.iter()).enumerate() {
            let matcher = match matcher {
                MatchCell::Any => None,
                MatchCell::Is(pattern) => Some(self.cache.get(pattern, self.alphabet)?),
            };
            let writer = match writer {
                WriteCell::Keep => Writer::Keep,
                WriteCell::Put(symbol) => {
                    if !self.alphabet.contains(*symbol) {
                        return Err(RuleError::UnknownWriteSymbol { symbol: *symbol });
                    }
                    Writer::Put(*symbol)
                }
                WriteCell::Copy(name) => {
                    let source = primary.slot_of(name).ok_or_else(|| {
                        RuleError::UnknownAccessor { name: name.clone() }
                    })?;
                    Writer::Copy(source)
                }
            };
            // Cells trivial in both templates impose nothing: they are
            // exempt from the bounds/conflict gate, so a rule may sit at
            // a grid edge as long as every non-trivial cell fits.
            if matcher.is_none() && writer == Writer::Keep {
                continue;
            }
            ops.push(CellOp {
                slot,
                matcher,
                writer,
            });
        }

        let bindings = Bindings {
            layout: primary,
            traits: self.traits,
            alphabet: self.alphabet,
        };
        let conditions = CompiledConditions::compile(&rule.conditions, &bindings)?;

        Ok(CompiledRule {
            ops,
            layouts: [primary, secondary],
            symmetric: is_symmetric(shape),
            boundary: self.alphabet.boundary(),
            conditions,
        })
    }

    /// Distinct patterns compiled so far (shared across rules).
    pub fn pattern_count(&self) -> usize {
        self.cache.len()
    }
}

/// A compiled writer entry for one template cell.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Writer {
    Keep,
    Put(Symbol),
    Copy(usize),
}

/// One non-trivial template cell: its accessor slot plus the compiled
/// matcher and writer for it.
#[derive(Clone, Debug)]
struct CellOp {
    slot: usize,
    matcher: Option<Arc<Matcher>>,
    writer: Writer,
}

/// An executable rule: attempt it at any coordinate.
///
/// Holds no mutable state; all per-attempt inputs (grid, traits, RNG,
/// anchor) are passed in, so one compiled rule can be attempted at
/// every coordinate of every tick.
#[derive(Clone, Debug)]
pub struct CompiledRule {
    ops: SmallVec<[CellOp; 9]>,
    layouts: [&'static Layout; 2],
    symmetric: bool,
    boundary: Symbol,
    conditions: CompiledConditions,
}

impl CompiledRule {
    /// Attempt the rule with anchor `(x, y)`.
    ///
    /// Returns `true` and commits the writer template if every gate
    /// passes; otherwise returns `false` with no mutation at all. The
    /// gates, in order:
    ///
    /// 1. **Conflict**: every non-trivial cell must be in bounds and not
    ///    yet written this tick.
    /// 2. **Matcher**: every matcher-bearing cell must accept its
    ///    current grid value.
    /// 3. **Conditions**: evaluated left to right, probabilities
    ///    sampled independently.
    /// 4. **Commit**: all new values are resolved against the pre-commit
    ///    grid, then written and marked in one pass — cells can swap
    ///    through each other's accessors.
    ///
    /// Symmetric shapes re-pick their orientation by unbiased coin flip
    /// at the top of every attempt.
    pub fn attempt<R: Rng>(
        &self,
        lattice: &mut Lattice,
        traits: &TraitSet,
        rng: &mut R,
        x: i32,
        y: i32,
    ) -> bool {
        let orientation = if self.symmetric && rng.random_bool(0.5) {
            Orientation::Secondary
        } else {
            Orientation::Primary
        };
        let layout = match orientation {
            Orientation::Primary => self.layouts[0],
            Orientation::Secondary => self.layouts[1],
        };

        for op in &self.ops {
            let (dx, dy) = layout.offset(op.slot);
            let (ox, oy) = (x + dx, y + dy);
            if !lattice.in_bounds(ox, oy) || lattice.is_written(ox, oy) {
                return false;
            }
        }

        for op in &self.ops {
            if let Some(matcher) = &op.matcher {
                let (dx, dy) = layout.offset(op.slot);
                let cell = lattice.get_or(x + dx, y + dy, self.boundary);
                if !matcher.matches(cell) {
                    return false;
                }
            }
        }

        {
            let env = EvalEnv {
                lattice,
                traits,
                boundary: self.boundary,
                x,
                y,
                layout,
            };
            if !self.conditions.eval(&env, rng) {
                return false;
            }
        }

        // Resolve every new value before writing any of them, so Copy
        // writers all see the pre-commit grid.
        let mut staged: SmallVec<[(i32, i32, Symbol); 9]> = SmallVec::new();
        for op in &self.ops {
            let value = match op.writer {
                Writer::Keep => continue,
                Writer::Put(symbol) => symbol,
                Writer::Copy(source) => {
                    let (dx, dy) = layout.offset(source);
                    lattice.get_or(x + dx, y + dy, self.boundary)
                }
            };
            let (dx, dy) = layout.offset(op.slot);
            staged.push((x + dx, y + dy, value));
        }
        for &(ox, oy, symbol) in &staged {
            lattice.set(ox, oy, symbol);
            lattice.mark_written(ox, oy);
        }
        true
    }
}
