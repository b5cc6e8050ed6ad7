//! Cell lattice and written-state bookkeeping for Loam layers.
//!
//! One [`Lattice`] owns a layer's 2-D cell buffer plus the parallel
//! written-this-tick stamps that serialize conflicting rule effects
//! within a single synchronous tick.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod lattice;

pub use error::GridError;
pub use lattice::Lattice;
