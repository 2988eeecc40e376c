#![forbid(unsafe_code)]

//! Graph building and combo partitioning (headless).
//!
//! `combograph-core` turns edge tables into attributed graphs and splits graphs into a coarse
//! "inter-combo" graph over group values plus one induced "intra-combo" subgraph per group.
//! Layout and drawing live in `combograph-layout` and `combograph-render`.

pub mod builder;
pub mod combo;
pub mod error;
pub mod options;
pub mod sanitize;
pub mod table;

pub use builder::build_graph;
pub use combo::{
    COMBO_PROMOTED_NODE_ATTR, EMPTY_COMBO_VALUE_PLACEHOLDER, Partition, partition,
    promoted_group_value,
};
pub use error::{Error, Result};
pub use options::{
    BuildOptions, ComboOptions, EdgeAggregation, EdgeAttrSelection, EmptyAttrAction, GroupBy,
    Reduction,
};
pub use sanitize::{DEFAULT_DATETIME_FORMAT, sanitize_temporal, temporal_node_attrs};
pub use table::EdgeTable;

pub use combograph_graphlib::{AttrValue, Attrs, Graph, attrs};

#[cfg(test)]
mod tests;
