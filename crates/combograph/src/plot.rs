//! The charting pipeline.

use crate::Result;
use crate::options::{PlotOptions, StyleOverrides};
use combograph_core::{Graph, partition, sanitize_temporal};
use combograph_layout::{
    Layout, NormaliseOptions, PositionMap, WithFallback, defaults, normalise,
};
use combograph_render::skins::{
    default_combo_edges_layer, default_combo_member_nodes_layer, default_combo_nodes_layer,
    default_intra_combo_edges_layer, default_nodes_layer,
};
use combograph_render::{
    ComboLayers, Drawing, EdgeStyle, EdgesLayer, Layer, NodesLayer, SvgRenderOptions,
    apply_layers, generate_combo_layers, render_svg,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A finished chart: canvas size plus drawings, bottom to top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub drawings: Vec<Drawing>,
}

impl Chart {
    pub fn to_svg(&self) -> String {
        self.to_svg_with(&SvgRenderOptions::default())
    }

    pub fn to_svg_with(&self, options: &SvgRenderOptions) -> String {
        render_svg(
            &self.drawings,
            self.width,
            self.height,
            self.title.as_deref(),
            options,
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builds [`Chart`]s from graphs.
///
/// `with_layout` positions the whole graph in flat mode and each group's members in combo mode;
/// `with_combo_layout` positions the groups themselves. Unset layouts use
/// [`combograph_layout::defaults`] seeded with [`PlotOptions::layout_seed`].
pub struct Plotter {
    options: PlotOptions,
    layout: Option<Box<dyn Layout>>,
    combo_layout: Option<Box<dyn Layout>>,
}

impl Default for Plotter {
    fn default() -> Self {
        Self::new(PlotOptions::default())
    }
}

impl Plotter {
    pub fn new(options: PlotOptions) -> Self {
        Self {
            options,
            layout: None,
            combo_layout: None,
        }
    }

    /// Non-finite coordinates from `layout` are logged and kept; wrap it in
    /// [`WithFallback::new`] to replace them instead.
    pub fn with_layout(mut self, layout: impl Layout + 'static) -> Self {
        self.layout = Some(Box::new(WithFallback::without_fallback(layout)));
        self
    }

    /// Same contract as [`Plotter::with_layout`], for the group positions.
    pub fn with_combo_layout(mut self, layout: impl Layout + 'static) -> Self {
        self.combo_layout = Some(Box::new(WithFallback::without_fallback(layout)));
        self
    }

    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    /// Charts `graph`. The graph itself is left untouched.
    pub fn plot(&self, graph: &Graph) -> Result<Chart> {
        let opts = &self.options;
        let graph = sanitize_temporal(graph, opts.non_serializable_datetime_format.as_deref())?;

        let drawings = if opts.is_combo() {
            self.plot_combo(&graph)?
        } else {
            self.plot_flat(&graph)?
        };

        tracing::debug!(
            combo = opts.is_combo(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            drawings = drawings.len(),
            "plotted chart"
        );
        Ok(Chart {
            width: opts.width,
            height: opts.height,
            title: opts.title.clone(),
            drawings,
        })
    }

    fn plot_flat(&self, graph: &Graph) -> Result<Vec<Drawing>> {
        let opts = &self.options;
        let weight_attr = opts.weight_attr.as_deref();
        let pos = match &self.layout {
            Some(layout) => layout.layout(graph),
            None => defaults::network_layout(weight_attr, opts.layout_seed).layout(graph),
        };
        let pos = self.to_canvas(&pos)?;

        let edge_style = EdgeStyle::default().with_weight_attr(weight_attr);
        let edges = EdgesLayer::new(restyle(edge_style, &opts.edge_args)?);
        let mut nodes = default_nodes_layer();
        nodes.style = restyle(nodes.style, &opts.node_args)?;

        Ok(apply_layers(&[&edges as &dyn Layer, &nodes], graph, &pos)?)
    }

    fn plot_combo(&self, graph: &Graph) -> Result<Vec<Drawing>> {
        let opts = &self.options;
        let weight_attr = opts.weight_attr.as_deref();
        let Some(combo) = opts.combo_options() else {
            return self.plot_flat(graph);
        };
        let parts = partition(graph, &combo)?;

        let inter_pos = match &self.combo_layout {
            Some(layout) => layout.layout(&parts.inter),
            None => {
                defaults::inter_combo_layout(weight_attr, opts.layout_seed).layout(&parts.inter)
            }
        };
        let inter_pos = self.to_canvas(&inter_pos)?;

        let layers = ComboLayers {
            combo_edges: Box::new(restyled_edges(
                default_combo_edges_layer(combo.aggregate_weight_attr()),
                &opts.combo_edge_args,
            )?),
            combo_nodes: Box::new(restyled_nodes(
                default_combo_nodes_layer(),
                &opts.combo_node_args,
            )?),
            nodes: Box::new(restyled_nodes(
                default_combo_member_nodes_layer(),
                &opts.node_args,
            )?),
            edges: Box::new(restyled_edges(
                default_intra_combo_edges_layer(weight_attr),
                &opts.edge_args,
            )?),
        };

        let default_intra;
        let intra_layout: &dyn Layout = match &self.layout {
            Some(layout) => &**layout,
            None => {
                default_intra = defaults::intra_combo_layout(weight_attr, opts.layout_seed);
                &default_intra
            }
        };

        Ok(generate_combo_layers(
            &parts.inter,
            &parts.intra,
            &inter_pos,
            intra_layout,
            &layers,
            &opts.compose_options(),
        )?)
    }

    fn to_canvas(&self, pos: &PositionMap) -> Result<PositionMap> {
        let opts = &self.options;
        let mut canvas = NormaliseOptions::default()
            .with_range(0.0, opts.width.min(opts.height))
            .with_aspect_ratio(opts.width / opts.height);
        canvas.padding = opts.padding;
        Ok(normalise(pos, &canvas)?)
    }
}

fn restyled_nodes(mut layer: NodesLayer, overrides: &StyleOverrides) -> Result<NodesLayer> {
    layer.style = restyle(layer.style, overrides)?;
    Ok(layer)
}

fn restyled_edges(mut layer: EdgesLayer, overrides: &StyleOverrides) -> Result<EdgesLayer> {
    layer.style = restyle(layer.style, overrides)?;
    Ok(layer)
}

/// Lays `overrides` over the serialized `base` style, key by key.
fn restyle<T: Serialize + DeserializeOwned>(base: T, overrides: &StyleOverrides) -> Result<T> {
    if overrides.is_empty() {
        return Ok(base);
    }
    let mut value = serde_json::to_value(base)?;
    if let serde_json::Value::Object(map) = &mut value {
        for (k, v) in overrides {
            map.insert(k.clone(), v.clone());
        }
    }
    Ok(serde_json::from_value(value)?)
}
