#![forbid(unsafe_code)]

//! Layered drawings for node-link charts.
//!
//! A [`Layer`] turns a graph plus positions into a [`Drawing`]: a named list of fully resolved
//! marks. Charts are stacks of drawings; [`combo::generate_combo_layers`] builds the stack for a
//! partitioned graph and [`svg::render_svg`] serializes any stack.

pub mod combo;
pub mod edges;
pub mod layer;
pub mod model;
pub mod nodes;
pub mod scale;
pub mod skins;
pub mod style;
pub mod svg;

pub use combo::{COMBO_SIZE_ATTR_NAME, ComboLayers, ComposeOptions, generate_combo_layers};
pub use edges::EdgesLayer;
pub use layer::{Layer, apply_layers};
pub use model::{Circle, Drawing, Label, Mark, Segment};
pub use nodes::NodesLayer;
pub use style::{Channel, EdgeStyle, NodeStyle, Paint, SizeEncoding};
pub use svg::{SvgRenderOptions, render_svg};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no position for node {node:?}")]
    MissingPosition { node: String },
    #[error("no position for combo group {group:?}")]
    MissingComboPosition { group: String },
    #[error(transparent)]
    Layout(#[from] combograph_layout::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
