//! Engine construction and the per-tick scheduler for Loam.
//!
//! [`Engine::new`] compiles a set of [`LayerSpec`]s — alphabets, trait
//! tables, and declarative rules — into per-layer lattices and compiled
//! rule lists, rejecting every configuration error up front.
//! [`Engine::step`] then advances the whole world one tick at a time:
//! a shuffled visit of every coordinate, first matching rule wins, at
//! most one write per cell per tick.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod layer;

pub use engine::Engine;
pub use error::{ConfigError, SeedError};
pub use layer::{Layer, LayerSpec};
