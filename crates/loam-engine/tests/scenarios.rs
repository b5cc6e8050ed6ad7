//! Integration tests: small seeded worlds with known single-tick and
//! multi-tick outcomes.

use loam_core::TraitSpec;
use loam_engine::{ConfigError, Engine, LayerSpec};
use loam_rule::{Condition, MatchCell, Rule, RuleError, Shape, Template, WriteCell};

fn render(engine: &Engine) -> String {
    engine.layers()[0].to_string()
}

// ── Single-cell rewrite ──────────────────────────────────────────

#[test]
fn single_cell_rule_rewrites_every_match_in_one_tick() {
    // 2x2 seeded with '~' on the diagonal; '~' -> '.' at probability 1.
    let spec = LayerSpec::new("water", ['.', '~']).with_rule(
        Rule::new(
            Template::Single(MatchCell::is("~")),
            Template::Single(WriteCell::Put('.')),
        )
        .when(Condition::Chance(1.0)),
    );
    let mut engine = Engine::with_seed(vec![spec], 2, 2, 11).unwrap();
    engine.layers_mut()[0].set(0, 0, '~').unwrap();
    engine.layers_mut()[0].set(1, 1, '~').unwrap();
    assert_eq!(render(&engine), "~.\n.~");

    engine.step();
    assert_eq!(render(&engine), "..\n..");

    // Nothing matches any more; further ticks are no-ops.
    engine.step();
    assert_eq!(render(&engine), "..\n..");
}

// ── Vertical fall ────────────────────────────────────────────────

fn fall_layer(alphabet: &[char], densities: &[(char, f64)]) -> LayerSpec {
    let mut density = TraitSpec::new(0.0);
    for &(symbol, value) in densities {
        density = density.set(symbol, value);
    }
    LayerSpec::new("fall", alphabet.iter().copied())
        .with_trait("density", density)
        .with_rule(
            Rule::new(
                Template::Vertical([MatchCell::Any, MatchCell::not(" "), MatchCell::Any]),
                Template::Vertical([
                    WriteCell::Keep,
                    WriteCell::copy("s"),
                    WriteCell::copy("c"),
                ]),
            )
            .when("density[c] > density[s]"),
        )
}

#[test]
fn denser_symbol_swaps_down_one_cell_per_tick() {
    // Column A/B/C with A denser than B, C densest: one tick swaps A
    // and B and leaves C untouched.
    let spec = fall_layer(
        &[' ', 'A', 'B', 'C'],
        &[('A', 0.8), ('B', 0.5), ('C', 2.0)],
    );
    let mut engine = Engine::with_seed(vec![spec], 1, 3, 5).unwrap();
    let layer = &mut engine.layers_mut()[0];
    layer.set(0, 0, 'A').unwrap();
    layer.set(0, 1, 'B').unwrap();
    layer.set(0, 2, 'C').unwrap();

    engine.step();
    assert_eq!(render(&engine), "B\nA\nC");
}

#[test]
fn fall_stops_on_denser_floor() {
    let spec = fall_layer(&[' ', 'A', 'C'], &[('A', 0.8), ('C', 2.0)]);
    let mut engine = Engine::with_seed(vec![spec], 1, 3, 3).unwrap();
    let layer = &mut engine.layers_mut()[0];
    layer.set(0, 0, 'A').unwrap();
    layer.set(0, 2, 'C').unwrap();

    // A falls onto the blank, then rests on C forever.
    engine.step();
    assert_eq!(render(&engine), " \nA\nC");
    for _ in 0..4 {
        engine.step();
    }
    assert_eq!(render(&engine), " \nA\nC");
}

// ── First match wins ─────────────────────────────────────────────

#[test]
fn first_matching_rule_shadows_later_ones() {
    let spec = LayerSpec::new("race", [' ', '~', 'a', 'b'])
        .with_rule(Rule::new(
            Template::Single(MatchCell::is("~")),
            Template::Single(WriteCell::Put('a')),
        ))
        .with_rule(Rule::new(
            Template::Single(MatchCell::is("~")),
            Template::Single(WriteCell::Put('b')),
        ));
    let mut engine = Engine::with_seed(vec![spec], 8, 8, 17).unwrap();
    engine.layers_mut()[0].fill('~').unwrap();

    engine.step();
    assert!(engine.layers()[0].cells().iter().all(|&c| c == 'a'));
}

#[test]
fn later_rule_applies_where_earlier_does_not_match() {
    let spec = LayerSpec::new("race", [' ', '~', '.', 'a'])
        .with_rule(Rule::new(
            Template::Single(MatchCell::is("~")),
            Template::Single(WriteCell::Put('a')),
        ))
        .with_rule(Rule::new(
            Template::Single(MatchCell::is(".")),
            Template::Single(WriteCell::Put('~')),
        ));
    let mut engine = Engine::with_seed(vec![spec], 2, 1, 23).unwrap();
    engine.layers_mut()[0].set(0, 0, '~').unwrap();
    engine.layers_mut()[0].set(1, 0, '.').unwrap();

    engine.step();
    assert_eq!(render(&engine), "a~");
}

// ── Boundary behavior ────────────────────────────────────────────

#[test]
fn out_of_bounds_accessors_read_the_boundary_symbol() {
    // 1x1 grid: every neighbor of the only cell is out of bounds. The
    // condition reads them all through the boundary symbol ' '.
    let spec = LayerSpec::new("edge", [' ', '~']).with_rule(
        Rule::new(
            Template::Single(MatchCell::is("~")),
            Template::Single(WriteCell::Put(' ')),
        )
        .when("count(' ') == 8"),
    );
    let mut engine = Engine::with_seed(vec![spec], 1, 1, 2).unwrap();
    engine.layers_mut()[0].set(0, 0, '~').unwrap();

    engine.step();
    assert_eq!(render(&engine), " ");
}

#[test]
fn template_cells_past_the_edge_abort_cleanly() {
    // A full 3x3 writer fits nowhere but the center of a 3x3 grid.
    let spec = LayerSpec::new("stamp", [' ', '~', 'x']).with_rule(Rule::new(
        Template::Full([
            [MatchCell::Any, MatchCell::Any, MatchCell::Any],
            [MatchCell::Any, MatchCell::is("~"), MatchCell::Any],
            [MatchCell::Any, MatchCell::Any, MatchCell::Any],
        ]),
        Template::Full([
            [WriteCell::Put('x'), WriteCell::Put('x'), WriteCell::Put('x')],
            [WriteCell::Put('x'), WriteCell::Put('x'), WriteCell::Put('x')],
            [WriteCell::Put('x'), WriteCell::Put('x'), WriteCell::Put('x')],
        ]),
    ));
    let mut engine = Engine::with_seed(vec![spec], 3, 3, 29).unwrap();
    engine.layers_mut()[0].fill('~').unwrap();

    // Only the center anchor is fully in bounds; it stamps all nine
    // cells, and every edge anchor aborts without touching anything.
    engine.step();
    assert_eq!(render(&engine), "xxx\nxxx\nxxx");
}

// ── Conservation / at-most-one-write ─────────────────────────────

fn sand_layer() -> LayerSpec {
    LayerSpec::new("sand", [' ', '#'])
        .with_trait("density", TraitSpec::new(0.01).set('#', 0.8))
        .with_rule(
            Rule::new(
                Template::Vertical([MatchCell::Any, MatchCell::is("#"), MatchCell::Any]),
                Template::Vertical([
                    WriteCell::Keep,
                    WriteCell::copy("s"),
                    WriteCell::copy("c"),
                ]),
            )
            .when("density[c] > density[s]"),
        )
        .with_rule(
            Rule::new(
                Template::SymmetricHorizontal([MatchCell::is(" "), MatchCell::is("#")]),
                Template::SymmetricHorizontal([WriteCell::copy("b"), WriteCell::copy("a")]),
            )
            .when(Condition::Chance(0.5)),
        )
}

#[test]
fn swap_rules_conserve_symbol_counts() {
    // Sand falls and flows sideways; both rules are pure swaps, so any
    // double-committed cell would change the symbol census.
    let mut engine = Engine::with_seed(vec![sand_layer()], 16, 16, 41).unwrap();
    let layer = &mut engine.layers_mut()[0];
    let mut seeded = 0usize;
    for y in 0..16 {
        for x in 0..16 {
            if (x * 7 + y * 13) % 3 == 0 {
                layer.set(x, y, '#').unwrap();
                seeded += 1;
            }
        }
    }

    for _ in 0..50 {
        engine.step();
        let grains = engine.layers()[0]
            .cells()
            .iter()
            .filter(|&&c| c == '#')
            .count();
        assert_eq!(grains, seeded, "grain count changed at tick {}", engine.tick());
    }
}

proptest::proptest! {
    #![proptest_config(proptest::prelude::ProptestConfig::with_cases(32))]

    // The census holds for any engine seed, not just a lucky one.
    #[test]
    fn conservation_holds_for_any_seed(seed in proptest::prelude::any::<u64>()) {
        let mut engine = Engine::with_seed(vec![sand_layer()], 12, 12, seed).unwrap();
        let layer = &mut engine.layers_mut()[0];
        let mut seeded = 0usize;
        for y in 0..12 {
            for x in 0..12 {
                if (x * 5 + y * 11) % 4 == 0 {
                    layer.set(x, y, '#').unwrap();
                    seeded += 1;
                }
            }
        }
        for _ in 0..10 {
            engine.step();
            let grains = engine.layers()[0]
                .cells()
                .iter()
                .filter(|&&c| c == '#')
                .count();
            proptest::prop_assert_eq!(grains, seeded);
        }
    }
}

// ── Multiple layers ──────────────────────────────────────────────

#[test]
fn layers_do_not_interact() {
    let water = LayerSpec::new("water", [' ', '~']).with_rule(
        Rule::new(
            Template::Single(MatchCell::is("~")),
            Template::Single(WriteCell::Put(' ')),
        ),
    );
    let moss = LayerSpec::new("moss", ['.', 'm']);
    let mut engine = Engine::with_seed(vec![water, moss], 4, 4, 13).unwrap();
    engine.layers_mut()[0].fill('~').unwrap();
    engine.layers_mut()[1].set(2, 2, 'm').unwrap();

    engine.step();
    assert!(engine.layers()[0].cells().iter().all(|&c| c == ' '));
    // The ruleless moss layer is untouched.
    assert_eq!(engine.layers()[1].get(2, 2), Some('m'));
}

// ── Configuration rejection ──────────────────────────────────────

#[test]
fn mismatched_template_shapes_fail_construction() {
    let spec = LayerSpec::new("bad", [' ', '~']).with_rule(Rule::new(
        Template::Single(MatchCell::is("~")),
        Template::Horizontal([WriteCell::Keep, WriteCell::Put(' '), WriteCell::Keep]),
    ));
    match Engine::with_seed(vec![spec], 4, 4, 0).unwrap_err() {
        ConfigError::Rule { layer, index, source } => {
            assert_eq!(layer, "bad");
            assert_eq!(index, 0);
            assert_eq!(
                source,
                RuleError::ShapeMismatch {
                    matcher: Shape::Single,
                    writer: Shape::Horizontal,
                }
            );
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn condition_referencing_unknown_trait_fails_construction() {
    let spec = LayerSpec::new("bad", [' ', '~']).with_rule(
        Rule::new(
            Template::Single(MatchCell::is("~")),
            Template::Single(WriteCell::Put(' ')),
        )
        .when("density[c] > 0.5"),
    );
    assert!(matches!(
        Engine::with_seed(vec![spec], 4, 4, 0).unwrap_err(),
        ConfigError::Rule {
            source: RuleError::Expr(_),
            ..
        }
    ));
}

#[test]
fn duplicate_alphabet_symbol_fails_construction() {
    let spec = LayerSpec::new("bad", [' ', '~', '~']);
    assert!(matches!(
        Engine::with_seed(vec![spec], 4, 4, 0).unwrap_err(),
        ConfigError::Alphabet { .. }
    ));
}
