//! A compact falling-sand world: water, earth, rock, and vapor on one
//! layer, driven entirely by data. Prints a frame every 25 ticks.
//!
//! Run with `cargo run --example falling_sand`.

use loam_core::TraitSpec;
use loam_engine::{ConfigError, Engine, LayerSpec};
use loam_rule::{MatchCell, Rule, Template, WriteCell};

const WIDTH: u32 = 40;
const HEIGHT: u32 = 20;

fn world() -> LayerSpec {
    LayerSpec::new("world", [' ', '.', '~', '@', 'O'])
        .with_trait(
            "density",
            TraitSpec::new(0.01)
                .set('.', 0.008)
                .set('~', 0.5)
                .set('@', 0.8)
                .set('O', f64::INFINITY),
        )
        .with_trait(
            "viscosity",
            TraitSpec::new(1.0).set('~', 0.1).set('@', 0.95).set('.', 0.3),
        )
        // Anything denser than the cell below it falls.
        .with_rule(
            Rule::new(
                Template::Vertical([MatchCell::Any, MatchCell::is("~@."), MatchCell::Any]),
                Template::Vertical([
                    WriteCell::Keep,
                    WriteCell::copy("s"),
                    WriteCell::copy("c"),
                ]),
            )
            .when("density[c] > density[s]"),
        )
        // Sideways flow, equally likely to either side, throttled by
        // the substance's viscosity.
        .with_rule(
            Rule::new(
                Template::SymmetricHorizontal([MatchCell::Any, MatchCell::is("~@.")]),
                Template::SymmetricHorizontal([WriteCell::copy("b"), WriteCell::copy("a")]),
            )
            .when("density[b] > density[a]")
            .when("1 - viscosity[b]"),
        )
        // Surface water evaporates faster the more open air surrounds it.
        .with_rule(
            Rule::new(
                Template::Single(MatchCell::is("~")),
                Template::Single(WriteCell::Put('.')),
            )
            .when("0.002 * count(' ')"),
        )
        // Vapor condenses where vapor crowds together.
        .with_rule(
            Rule::new(
                Template::Single(MatchCell::is(".")),
                Template::Single(WriteCell::Put('~')),
            )
            .when("0.005 * count('.')"),
        )
}

fn main() -> Result<(), ConfigError> {
    let mut engine = Engine::new(vec![world()], WIDTH, HEIGHT)?;

    // A rock basin holding a pool of water, earth piled on one rim.
    {
        let layer = &mut engine.layers_mut()[0];
        for x in 8..32 {
            layer.set(x, 17, 'O').unwrap();
        }
        for y in 12..17 {
            layer.set(8, y, 'O').unwrap();
            layer.set(31, y, 'O').unwrap();
        }
        for y in 8..12 {
            for x in 14..26 {
                layer.set(x, y, '~').unwrap();
            }
        }
        for x in 2..7 {
            layer.set(x, 4, '@').unwrap();
            layer.set(x, 5, '@').unwrap();
        }
    }

    println!("tick 0");
    println!("{}", engine.layers()[0]);
    for _ in 0..100 {
        engine.step();
        if engine.tick() % 25 == 0 {
            println!("\ntick {}", engine.tick());
            println!("{}", engine.layers()[0]);
        }
    }
    Ok(())
}
