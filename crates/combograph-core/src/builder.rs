//! Builds a [`Graph`] from an edge table.

use crate::error::{Error, Result};
use crate::options::{BuildOptions, EdgeAttrSelection};
use crate::table::EdgeTable;
use combograph_graphlib::{Attrs, Graph, alg};

/// Builds an undirected graph from `table`.
///
/// Nodes come from the endpoint columns; `opts.node_attrs` are merged onto them afterwards.
/// Threshold pruning runs before isolated-node removal, so nodes stranded by the threshold are
/// dropped too when `drop_isolated` is set.
pub fn build_graph(table: &EdgeTable, opts: &BuildOptions) -> Result<Graph> {
    let source_idx = required_column(table, &opts.source)?;
    let target_idx = required_column(table, &opts.target)?;
    if opts.weight_threshold.is_some() && opts.weight_attr.is_none() {
        return Err(Error::ThresholdWithoutWeight);
    }

    let attr_columns: Vec<(usize, &str)> = match &opts.edge_attrs {
        EdgeAttrSelection::All => table
            .columns()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != source_idx && *i != target_idx)
            .map(|(i, c)| (i, c.as_str()))
            .collect(),
        EdgeAttrSelection::Columns(cols) => {
            let mut out = Vec::with_capacity(cols.len());
            for c in cols {
                out.push((required_column(table, c)?, c.as_str()));
            }
            out
        }
    };

    let mut g = Graph::new();
    let mut self_loops = 0usize;
    for (row_idx, row) in table.rows().enumerate() {
        let endpoint = |idx: usize, column: &str| {
            row[idx].to_key().ok_or_else(|| Error::InvalidEndpoint {
                row: row_idx,
                column: column.to_string(),
            })
        };
        let v = endpoint(source_idx, &opts.source)?;
        let w = endpoint(target_idx, &opts.target)?;

        if v == w {
            self_loops += 1;
            g.ensure_node(v);
            continue;
        }

        let attrs: Attrs = attr_columns
            .iter()
            .filter(|(i, _)| !row[*i].is_missing())
            .map(|(i, c)| (c.to_string(), row[*i].clone()))
            .collect();
        g.set_edge(v, w, attrs);
    }
    if self_loops > 0 {
        tracing::warn!(rows = self_loops, "skipped self-loop rows in edge table");
    }

    let mut dropped_attr_nodes = 0usize;
    for (id, attrs) in &opts.node_attrs {
        if g.has_node(id) || opts.include_missing_attr_nodes {
            g.set_node(id.clone(), attrs.clone());
        } else {
            dropped_attr_nodes += 1;
        }
    }
    if dropped_attr_nodes > 0 {
        tracing::debug!(
            nodes = dropped_attr_nodes,
            "ignored attributes for nodes absent from the edge table"
        );
    }

    if let (Some(weight_attr), Some(threshold)) = (&opts.weight_attr, opts.weight_threshold) {
        let before = g.edge_count();
        g.retain_edges(|e| match e.attr(weight_attr).and_then(|v| v.as_f64()) {
            Some(w) => w >= threshold,
            None => true,
        });
        tracing::debug!(
            removed = before - g.edge_count(),
            threshold,
            "pruned edges below weight threshold"
        );
    }

    if opts.drop_isolated {
        let isolated = alg::isolates(&g);
        g.remove_nodes(isolated.iter().map(String::as_str));
    }

    tracing::debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        "built graph from edge table"
    );
    Ok(g)
}

fn required_column(table: &EdgeTable, column: &str) -> Result<usize> {
    table
        .column_index(column)
        .ok_or_else(|| Error::MissingColumn {
            column: column.to_string(),
        })
}
