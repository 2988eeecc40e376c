#![forbid(unsafe_code)]

//! Graph container APIs used by `combograph`.
//!
//! The container models undirected simple graphs whose nodes and edges carry free-form
//! attribute bags, which is the shape every stage of the combo pipeline (building, partitioning,
//! layout, drawing) exchanges.

pub mod alg;
mod attr;
mod graph;

pub use attr::{AttrValue, Attrs, attrs};
pub use graph::{EdgeKey, EdgeRef, Graph};
