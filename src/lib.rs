//! gather-reindex: reorganize seismic gathers between receiver and source layouts.
//!
//! A common receiver gather (COG) stores one `(depths, times)` matrix per
//! receiver; a common source gather (CSG) stores one `(receivers, times)`
//! matrix per source depth. Both describe the same cube, and converting
//! between them is a permutation of the outer list axis against the first
//! matrix axis:
//!
//! `cog[r][(s, t)] == csg[s][(r, t)]`
//!
//! The free functions in [`gather`] work on plain slices of [`math::Array2`];
//! the wrappers in [`layout`] carry validated dimensions so that conversions
//! on them cannot fail.
pub mod config;
pub mod error;
pub mod gather;
pub mod layout;
pub mod math;

pub use config::{ExecutionMode, ReindexConfig};
pub use error::GatherError;
pub use gather::{cog_to_csg, csg_to_cog};
pub use layout::{CogGather, CsgGather};
pub use math::Array2;
