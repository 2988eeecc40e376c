//! Combo partitioning: splits a graph into a coarse graph over group values ("inter") and one
//! induced subgraph per group ("intra").

use crate::error::Result;
use crate::options::{ComboOptions, EmptyAttrAction};
use combograph_graphlib::{AttrValue, Attrs, Graph};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Shared group value for nodes lacking the grouping attribute under [`EmptyAttrAction::Group`].
pub const EMPTY_COMBO_VALUE_PLACEHOLDER: &str = "__combo_empty";
/// Boolean attribute set on inter nodes that stand for a single promoted node.
pub const COMBO_PROMOTED_NODE_ATTR: &str = "__combo_promoted";

/// Group value given to a node without the grouping attribute under
/// [`EmptyAttrAction::Promote`].
pub fn promoted_group_value(node: &str) -> String {
    format!("{EMPTY_COMBO_VALUE_PLACEHOLDER}_{node}")
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Partition {
    /// One node per group value, edges aggregated from inter-group edges.
    pub inter: Graph,
    /// Induced subgraph per group value, in order of first appearance.
    pub intra: IndexMap<String, Graph>,
}

impl Partition {
    /// The group a node of the source graph ended up in.
    pub fn group_of(&self, node: &str) -> Option<&str> {
        self.intra
            .iter()
            .find(|(_, g)| g.has_node(node))
            .map(|(group, _)| group.as_str())
    }

    pub fn is_promoted(&self, group: &str) -> bool {
        self.inter
            .node_attr(group, COMBO_PROMOTED_NODE_ATTR)
            .and_then(AttrValue::as_bool)
            .unwrap_or(false)
    }
}

#[derive(Default)]
struct PairAccumulator {
    edges: usize,
    weights: Vec<f64>,
    extra: Vec<Vec<f64>>,
}

/// Partitions `g` by the single attribute named in `opts.group_by`.
///
/// Inter edges join distinct groups only. Their endpoints are stored in lexical order, and their
/// weight (named by [`ComboOptions::aggregate_weight_attr`]) is the sum of `weight_attr` over the
/// underlying edges, or the edge count when no weight attribute is configured. Intra graphs keep
/// node and edge attributes exactly as they are in `g`.
pub fn partition(g: &Graph, opts: &ComboOptions) -> Result<Partition> {
    let group_attr = opts.group_by.single()?;

    // node -> group value, in node order; dropped nodes are absent
    let mut group_of: IndexMap<&str, String> = IndexMap::with_capacity(g.node_count());
    let mut promoted: FxHashSet<String> = FxHashSet::default();
    for (id, attrs) in g.nodes_with_attrs() {
        let value = match attrs.get(group_attr).and_then(AttrValue::to_key) {
            Some(v) => v,
            None => match opts.empty_attr_action {
                EmptyAttrAction::Drop => continue,
                EmptyAttrAction::Group => EMPTY_COMBO_VALUE_PLACEHOLDER.to_string(),
                EmptyAttrAction::Promote => {
                    let v = promoted_group_value(id);
                    promoted.insert(v.clone());
                    v
                }
            },
        };
        group_of.insert(id, value);
    }

    let mut intra: IndexMap<String, Graph> = IndexMap::new();
    for (id, group) in &group_of {
        let attrs = g.node(id).cloned().unwrap_or_default();
        intra
            .entry(group.clone())
            .or_default()
            .set_node(id.to_string(), attrs);
    }

    let mut pairs: IndexMap<(&str, &str), PairAccumulator> = IndexMap::new();
    for e in g.edges() {
        let (Some(gv), Some(gw)) = (group_of.get(e.source), group_of.get(e.target)) else {
            continue;
        };
        if gv == gw {
            if let Some(sub) = intra.get_mut(gv) {
                sub.set_edge(e.source, e.target, e.attrs.clone());
            }
            continue;
        }

        let key = if gv <= gw {
            (gv.as_str(), gw.as_str())
        } else {
            (gw.as_str(), gv.as_str())
        };
        let acc = pairs.entry(key).or_insert_with(|| PairAccumulator {
            extra: vec![Vec::new(); opts.aggregations.len()],
            ..Default::default()
        });
        acc.edges += 1;
        if let Some(w) = opts
            .weight_attr
            .as_deref()
            .and_then(|attr| e.attr(attr))
            .and_then(AttrValue::as_f64)
        {
            acc.weights.push(w);
        }
        for (values, agg) in acc.extra.iter_mut().zip(&opts.aggregations) {
            if let Some(v) = e.attr(&agg.source_attr).and_then(AttrValue::as_f64) {
                values.push(v);
            }
        }
    }

    let mut inter = Graph::new();
    let connected: FxHashSet<&str> = pairs.keys().flat_map(|(a, b)| [*a, *b]).collect();
    for group in intra.keys() {
        if !opts.include_edgeless_groups && !connected.contains(group.as_str()) {
            continue;
        }
        let mut attrs = opts
            .node_additional_attrs
            .get(group)
            .cloned()
            .unwrap_or_default();
        if promoted.contains(group) {
            attrs.insert(COMBO_PROMOTED_NODE_ATTR.to_string(), AttrValue::Bool(true));
        }
        inter.set_node(group.clone(), attrs);
    }

    let weight_name = opts.aggregate_weight_attr();
    let mut below_threshold = 0usize;
    for ((a, b), acc) in &pairs {
        let weight: f64 = match opts.weight_attr {
            Some(_) => acc.weights.iter().sum(),
            None => acc.edges as f64,
        };
        if opts.weight_threshold.is_some_and(|t| weight < t) {
            below_threshold += 1;
            continue;
        }

        let mut attrs = Attrs::new();
        attrs.insert(weight_name.to_string(), AttrValue::Float(weight));
        for (values, agg) in acc.extra.iter().zip(&opts.aggregations) {
            let value = agg.reduction.apply(values, acc.edges);
            attrs.insert(agg.name.clone(), value.into());
        }
        inter.set_edge(*a, *b, attrs);
    }

    tracing::debug!(
        group_attr,
        action = %opts.empty_attr_action,
        groups = intra.len(),
        promoted = promoted.len(),
        inter_edges = inter.edge_count(),
        below_threshold,
        "partitioned graph into combos"
    );

    Ok(Partition { inter, intra })
}
