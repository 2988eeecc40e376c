//! Composition of a partitioned graph into one stack of drawings: the inter-group edges, then
//! for each group a super-node with its members laid out inside it.

use crate::layer::Layer;
use crate::model::Drawing;
use crate::scale::{linear, size_to_r};
use crate::skins::{
    default_combo_edges_layer, default_combo_member_nodes_layer, default_combo_nodes_layer,
    default_intra_combo_edges_layer,
};
use crate::{Error, Result};
use combograph_core::COMBO_PROMOTED_NODE_ATTR;
use combograph_graphlib::{AttrValue, Attrs, Graph};
use combograph_layout::{Layout, NormaliseOptions, Point, PositionMap, normalise};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Node attribute carrying a super-node's mark size on the one-node graph handed to the combo
/// node layer.
pub const COMBO_SIZE_ATTR_NAME: &str = "__combo_size";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeOptions {
    /// Member counts mapped onto `size_scale_range`; counts outside are clamped.
    pub size_scale_domain: (f64, f64),
    /// Super-node mark sizes (area-like).
    pub size_scale_range: (f64, f64),
    /// Fraction of the super-node radius the interior layout may occupy.
    pub inner_graph_scale_factor: f64,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            size_scale_domain: (0.0, 25.0),
            size_scale_range: (36.0, 32400.0),
            inner_graph_scale_factor: 0.6,
        }
    }
}

impl ComposeOptions {
    /// Mark size of a super-node with `members` nodes.
    pub fn combo_size(&self, members: usize) -> f64 {
        linear(
            members as f64,
            self.size_scale_domain,
            self.size_scale_range,
        )
    }
}

pub struct ComboLayers {
    pub combo_edges: Box<dyn Layer>,
    pub combo_nodes: Box<dyn Layer>,
    pub nodes: Box<dyn Layer>,
    pub edges: Box<dyn Layer>,
}

impl ComboLayers {
    /// Stock skins. `weight_attr` is the edge weight attribute of the source graph; the inter
    /// edges are read through the aggregated name (`weight` when unset).
    pub fn with_defaults(weight_attr: Option<&str>) -> Self {
        Self {
            combo_edges: Box::new(default_combo_edges_layer(weight_attr.unwrap_or("weight"))),
            combo_nodes: Box::new(default_combo_nodes_layer()),
            nodes: Box::new(default_combo_member_nodes_layer()),
            edges: Box::new(default_intra_combo_edges_layer(weight_attr)),
        }
    }
}

/// Draws the inter-group graph and every group's interior.
///
/// Output order: the `combo_edges` drawing, then per group (in `intra` order) either the group's
/// super-node followed by its interior edges and nodes, or, for a promoted singleton, the lone
/// node drawn as a plain node at the group position. Groups without nodes are skipped. Every
/// non-empty group needs a position in `inter_pos`.
pub fn generate_combo_layers(
    inter: &Graph,
    intra: &IndexMap<String, Graph>,
    inter_pos: &PositionMap,
    intra_layout: &dyn Layout,
    layers: &ComboLayers,
    opts: &ComposeOptions,
) -> Result<Vec<Drawing>> {
    // a missing group is reported before any edge lookup
    let unplaced = intra
        .iter()
        .find(|&(group, sub)| !sub.is_empty() && !inter_pos.contains_key(group));
    if let Some((group, _)) = unplaced {
        return Err(Error::MissingComboPosition {
            group: group.clone(),
        });
    }

    let mut out = Vec::new();
    if let Some(d) = layers.combo_edges.draw(inter, inter_pos)? {
        out.push(d);
    }

    for (group, sub) in intra {
        if sub.is_empty() {
            tracing::warn!(group = %group, "skipping combo group without nodes");
            continue;
        }
        let Some(&centre) = inter_pos.get(group) else {
            continue;
        };

        let promoted = inter
            .node_attr(group, COMBO_PROMOTED_NODE_ATTR)
            .and_then(AttrValue::as_bool)
            .unwrap_or(false);
        if promoted && sub.node_count() == 1 {
            let pos: PositionMap = sub.nodes().map(|id| (id.to_string(), centre)).collect();
            draw_interior(&mut out, layers, sub, &pos)?;
            continue;
        }

        let size = opts.combo_size(sub.node_count());
        let mut attrs: Attrs = inter.node(group).cloned().unwrap_or_default();
        attrs.insert(COMBO_SIZE_ATTR_NAME.to_string(), AttrValue::Float(size));
        let mut combo = Graph::new();
        combo.set_node(group.clone(), attrs);
        let combo_pos = PositionMap::from_iter([(group.clone(), centre)]);
        if let Some(d) = layers.combo_nodes.draw(&combo, &combo_pos)? {
            out.push(d);
        }

        let inner = normalise(&intra_layout.layout(sub), &NormaliseOptions::default())?;
        let reach = size_to_r(size) * opts.inner_graph_scale_factor;
        let pos: PositionMap = inner
            .into_iter()
            .map(|(id, p)| {
                let moved = Point::new(centre.x + p.x * reach, centre.y + p.y * reach);
                (id, moved)
            })
            .collect();
        draw_interior(&mut out, layers, sub, &pos)?;
    }

    tracing::debug!(
        groups = intra.len(),
        drawings = out.len(),
        "composed combo layers"
    );
    Ok(out)
}

fn draw_interior(
    out: &mut Vec<Drawing>,
    layers: &ComboLayers,
    sub: &Graph,
    pos: &PositionMap,
) -> Result<()> {
    for layer in [&layers.edges, &layers.nodes] {
        if let Some(d) = layer.draw(sub, pos)? {
            out.push(d);
        }
    }
    Ok(())
}
