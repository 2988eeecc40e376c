#![forbid(unsafe_code)]

//! `combograph` draws node-link charts, optionally grouping nodes into "combo" super-nodes whose
//! members are laid out inside them.
//!
//! The pipeline is: sanitize temporal attributes, lay out (the whole graph, or the inter-group
//! graph plus every group interior), map positions onto the canvas, then stack styled layers
//! into a [`Chart`] that serializes to JSON or SVG.
//!
//! # Features
//!
//! - `raster`: PNG output via pure-Rust SVG rasterization (`combograph::raster`)

pub mod options;
pub mod plot;

#[cfg(feature = "raster")]
pub mod raster;

pub use combograph_core as core;
pub use combograph_graphlib as graphlib;
pub use combograph_layout as layout;
pub use combograph_render as render;

pub use combograph_core::{
    AttrValue, Attrs, ComboOptions, EmptyAttrAction, GroupBy, Graph, Partition, attrs, partition,
};
pub use combograph_layout::{Layout, Point, PositionMap};
pub use options::PlotOptions;
pub use plot::{Chart, Plotter};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] combograph_core::Error),
    #[error(transparent)]
    Layout(#[from] combograph_layout::Error),
    #[error(transparent)]
    Render(#[from] combograph_render::Error),
    #[error("chart JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
