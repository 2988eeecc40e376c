#![forbid(unsafe_code)]

//! Headless graph layouts and position normalisation for combograph.
//!
//! A layout is anything that turns a [`Graph`] into a [`PositionMap`]. The crate ships the two
//! force-directed defaults used by the charting pipeline plus a couple of adapters for wrapping
//! precomputed or unreliable layouts.

pub mod algo;
pub mod defaults;
pub mod error;
pub mod position;
mod rng;

pub use algo::{
    ForceAtlas2, FruchtermanReingold, Layout, Precomputed, WithFallback, has_non_finite,
};
pub use error::{Error, Result};
pub use position::{
    NormaliseOptions, Point, PositionMap, interp, normalise, positions_from_json,
};

pub use combograph_graphlib::Graph;
