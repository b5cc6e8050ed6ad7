//! The engine and its per-tick scheduler.

use log::debug;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::ConfigError;
use crate::layer::{Layer, LayerSpec};

/// A compiled world: one lattice per layer plus the tick scheduler.
///
/// Construction compiles every alphabet, trait table, and rule, and
/// rejects all configuration errors before the first tick. Stepping is
/// single-threaded and synchronous: one [`step`](Self::step) call
/// visits every coordinate of every layer exactly once and always
/// terminates.
///
/// The engine is intentionally randomized — visitation order,
/// per-condition probability rolls, and symmetric-template orientation
/// picks all draw from one internal RNG — and makes no determinism
/// promise across runs. For reproducible tests and demos, seed it
/// explicitly via [`with_seed`](Self::with_seed).
///
/// # Examples
///
/// ```
/// use loam_engine::{Engine, LayerSpec};
/// use loam_rule::{MatchCell, Rule, Template, WriteCell};
///
/// // One layer, one rule: water evaporates outright.
/// let spec = LayerSpec::new("water", [' ', '~']).with_rule(Rule::new(
///     Template::Single(MatchCell::is("~")),
///     Template::Single(WriteCell::Put(' ')),
/// ));
/// let mut engine = Engine::with_seed(vec![spec], 4, 4, 1).unwrap();
/// engine.layers_mut()[0].set(2, 2, '~').unwrap();
/// engine.step();
/// assert!(engine.layers()[0].cells().iter().all(|&c| c == ' '));
/// ```
#[derive(Debug)]
pub struct Engine {
    layers: Vec<Layer>,
    coords: Vec<(i32, i32)>,
    rng: ChaCha8Rng,
    tick: u64,
    width: u32,
    height: u32,
}

impl Engine {
    /// Build an engine with a seed drawn from the thread RNG.
    pub fn new(specs: Vec<LayerSpec>, width: u32, height: u32) -> Result<Self, ConfigError> {
        Self::with_seed(specs, width, height, rand::random())
    }

    /// Build an engine with an explicit RNG seed.
    ///
    /// Compiles every layer; any configuration error aborts construction
    /// with the offending layer (and rule position) named.
    pub fn with_seed(
        specs: Vec<LayerSpec>,
        width: u32,
        height: u32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        if specs.is_empty() {
            return Err(ConfigError::NoLayers);
        }
        let layers = specs
            .iter()
            .map(|spec| Layer::compile(spec, width, height))
            .collect::<Result<Vec<_>, _>>()?;

        let mut coords = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                coords.push((x, y));
            }
        }
        debug!(
            "engine ready: {} layers, {width}x{height} cells, seed {seed}",
            layers.len(),
        );
        Ok(Self {
            layers,
            coords,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick: 0,
            width,
            height,
        })
    }

    /// Advance the world one tick.
    ///
    /// One shuffled coordinate permutation is drawn and shared by every
    /// layer this tick. Layers step in declared order; at each
    /// coordinate the layer's rules try in declared order and the first
    /// success ends that coordinate's turn — no rule is retried at a
    /// coordinate within a tick. The written-state generation advances
    /// per layer, so each cell takes at most one commit per tick.
    pub fn step(&mut self) {
        self.tick += 1;
        self.coords.shuffle(&mut self.rng);
        for layer in &mut self.layers {
            layer.lattice.begin_tick();
            for &(x, y) in &self.coords {
                for rule in &layer.rules {
                    if rule.attempt(&mut layer.lattice, &layer.traits, &mut self.rng, x, y) {
                        break;
                    }
                }
            }
        }
    }

    /// Ticks executed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The layers, in declared (stepping) order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Mutable layer access, for host-side seeding between ticks.
    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }
}
