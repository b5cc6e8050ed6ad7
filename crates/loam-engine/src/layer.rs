//! Layer specification and compiled layer state.

use std::fmt;

use indexmap::IndexMap;
use log::debug;

use loam_core::{Alphabet, Symbol, TraitSet, TraitSpec};
use loam_grid::Lattice;
use loam_rule::{CompiledRule, Rule, RuleCompiler};

use crate::error::{ConfigError, SeedError};

/// Everything needed to build one layer: an ordered alphabet, sparse
/// trait tables, and an ordered rule list.
///
/// The first alphabet symbol is the layer's boundary symbol and its
/// initial fill. Traits and rules apply in declaration order.
///
/// # Examples
///
/// ```
/// use loam_core::TraitSpec;
/// use loam_engine::LayerSpec;
/// use loam_rule::{MatchCell, Rule, Template, WriteCell};
///
/// let spec = LayerSpec::new("water", [' ', '~'])
///     .with_trait("density", TraitSpec::new(0.01).set('~', 0.5))
///     .with_rule(Rule::new(
///         Template::Single(MatchCell::is("~")),
///         Template::Single(WriteCell::Put(' ')),
///     ));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LayerSpec {
    /// Layer name, used in error messages and diagnostics.
    pub name: String,
    /// Ordered alphabet; the first symbol is boundary and initial fill.
    pub alphabet: Vec<Symbol>,
    /// Sparse trait tables by name, in declaration order.
    pub traits: IndexMap<String, TraitSpec>,
    /// Rules in priority order: the first rule to succeed at a
    /// coordinate ends that coordinate's turn for the tick.
    pub rules: Vec<Rule>,
}

impl LayerSpec {
    /// Start a spec from a name and an ordered alphabet.
    pub fn new(name: impl Into<String>, alphabet: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            name: name.into(),
            alphabet: alphabet.into_iter().collect(),
            traits: IndexMap::new(),
            rules: Vec::new(),
        }
    }

    /// Add a named trait table.
    pub fn with_trait(mut self, name: impl Into<String>, spec: TraitSpec) -> Self {
        self.traits.insert(name.into(), spec);
        self
    }

    /// Append a rule. Rules try in the order added.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// One compiled, independently stepped layer.
#[derive(Debug)]
pub struct Layer {
    name: String,
    alphabet: Alphabet,
    pub(crate) traits: TraitSet,
    pub(crate) rules: Vec<CompiledRule>,
    pub(crate) lattice: Lattice,
}

impl Layer {
    /// Compile `spec` into a live layer with a `width * height` lattice
    /// filled with the boundary symbol.
    pub(crate) fn compile(spec: &LayerSpec, width: u32, height: u32) -> Result<Self, ConfigError> {
        let alphabet =
            Alphabet::new(spec.alphabet.iter().copied()).map_err(|source| {
                ConfigError::Alphabet {
                    layer: spec.name.clone(),
                    source,
                }
            })?;
        let traits = TraitSet::compile(&spec.traits, &alphabet).map_err(|source| {
            ConfigError::Trait {
                layer: spec.name.clone(),
                source,
            }
        })?;

        let mut compiler = RuleCompiler::new(&alphabet, &traits);
        let mut rules = Vec::with_capacity(spec.rules.len());
        for (index, rule) in spec.rules.iter().enumerate() {
            rules.push(compiler.compile(rule).map_err(|source| ConfigError::Rule {
                layer: spec.name.clone(),
                index,
                source,
            })?);
        }
        debug!(
            "layer '{}': {} symbols, {} traits, {} rules ({} distinct patterns)",
            spec.name,
            alphabet.len(),
            traits.len(),
            rules.len(),
            compiler.pattern_count(),
        );

        let lattice = Lattice::new(width, height, alphabet.boundary())?;
        Ok(Self {
            name: spec.name.clone(),
            alphabet,
            traits,
            rules,
            lattice,
        })
    }

    /// Layer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The compiled alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.lattice.width()
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.lattice.height()
    }

    /// Current cell contents, row-major. Read-only: mutation flows
    /// through rules, [`set`](Self::set), and [`fill`](Self::fill).
    pub fn cells(&self) -> &[Symbol] {
        self.lattice.cells()
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Symbol]> {
        self.lattice.rows()
    }

    /// Bounds-checked read of one cell.
    pub fn get(&self, x: i32, y: i32) -> Option<Symbol> {
        self.lattice.get(x, y)
    }

    /// Seed one cell, validating the symbol against the alphabet.
    ///
    /// Host-side setup between ticks; does not mark the cell written.
    pub fn set(&mut self, x: i32, y: i32, symbol: Symbol) -> Result<(), SeedError> {
        if !self.alphabet.contains(symbol) {
            return Err(SeedError::UnknownSymbol { symbol });
        }
        if !self.lattice.in_bounds(x, y) {
            return Err(SeedError::OutOfBounds { x, y });
        }
        self.lattice.set(x, y, symbol);
        Ok(())
    }

    /// Set every cell to `symbol`, validating it against the alphabet.
    pub fn fill(&mut self, symbol: Symbol) -> Result<(), SeedError> {
        if !self.alphabet.contains(symbol) {
            return Err(SeedError::UnknownSymbol { symbol });
        }
        self.lattice.fill(symbol);
        Ok(())
    }
}

impl fmt::Display for Layer {
    /// The lattice's text rendering: rows as lines of symbols.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.lattice, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_rule::{MatchCell, Template, WriteCell};

    fn spec() -> LayerSpec {
        LayerSpec::new("water", [' ', '~']).with_rule(Rule::new(
            Template::Single(MatchCell::is("~")),
            Template::Single(WriteCell::Put(' ')),
        ))
    }

    #[test]
    fn compiles_and_fills_with_boundary() {
        let layer = Layer::compile(&spec(), 4, 3).unwrap();
        assert_eq!(layer.name(), "water");
        assert_eq!(layer.width(), 4);
        assert_eq!(layer.height(), 3);
        assert!(layer.cells().iter().all(|&c| c == ' '));
    }

    #[test]
    fn seeding_validates_symbol_and_bounds() {
        let mut layer = Layer::compile(&spec(), 2, 2).unwrap();
        layer.set(1, 1, '~').unwrap();
        assert_eq!(layer.get(1, 1), Some('~'));
        assert_eq!(
            layer.set(0, 0, 'z'),
            Err(SeedError::UnknownSymbol { symbol: 'z' })
        );
        assert_eq!(
            layer.set(5, 0, '~'),
            Err(SeedError::OutOfBounds { x: 5, y: 0 })
        );
    }

    #[test]
    fn fill_validates_symbol() {
        let mut layer = Layer::compile(&spec(), 2, 2).unwrap();
        layer.fill('~').unwrap();
        assert!(layer.cells().iter().all(|&c| c == '~'));
        assert!(layer.fill('z').is_err());
    }

    #[test]
    fn bad_rule_reports_layer_and_index() {
        let spec = spec().with_rule(Rule::new(
            Template::Single(MatchCell::is("z")),
            Template::Single(WriteCell::Keep),
        ));
        match Layer::compile(&spec, 2, 2).unwrap_err() {
            ConfigError::Rule { layer, index, .. } => {
                assert_eq!(layer, "water");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
