use combograph_core::{
    Attrs, ComboOptions, DEFAULT_DATETIME_FORMAT, EdgeAggregation, EmptyAttrAction, GroupBy,
};
use combograph_render::ComposeOptions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Partial style given as JSON keys, laid over the stock style of a layer.
pub type StyleOverrides = serde_json::Map<String, serde_json::Value>;

pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;

/// Everything that shapes a chart apart from the graph and custom layouts.
///
/// Deserializes from a partial JSON object; missing keys take their defaults. Style overrides
/// are merged key by key over the stock skins of the chosen mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    pub width: f64,
    pub height: f64,
    /// Keeps node centres this far inside the canvas edges.
    pub padding: Option<f64>,
    pub title: Option<String>,
    /// Seed for the default layouts.
    pub layout_seed: u64,
    /// Edge weight attribute of the input graph.
    pub weight_attr: Option<String>,

    /// Enables combo mode.
    pub combo_group_by: Option<GroupBy>,
    pub combo_node_additional_attrs: IndexMap<String, Attrs>,
    pub empty_combo_attr_action: EmptyAttrAction,
    pub combo_edge_weight_threshold: Option<f64>,
    /// Extra attributes computed on inter-group edges.
    pub combo_edge_aggregations: Vec<EdgeAggregation>,
    pub include_edgeless_combo_nodes: bool,
    pub combo_size_scale_domain: (f64, f64),
    pub combo_size_scale_range: (f64, f64),
    pub combo_inner_graph_scale_factor: f64,

    /// strftime-style format for temporal node attributes. Unset makes them an error.
    pub non_serializable_datetime_format: Option<String>,

    /// Over the node layer ([`NodeStyle`](combograph_render::NodeStyle) keys), in both modes.
    pub node_args: StyleOverrides,
    /// Over the edge layer ([`EdgeStyle`](combograph_render::EdgeStyle) keys), in both modes.
    pub edge_args: StyleOverrides,
    pub combo_node_args: StyleOverrides,
    pub combo_edge_args: StyleOverrides,
}

impl Default for PlotOptions {
    fn default() -> Self {
        let compose = ComposeOptions::default();
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            padding: None,
            title: None,
            layout_seed: 0,
            weight_attr: None,
            combo_group_by: None,
            combo_node_additional_attrs: IndexMap::new(),
            empty_combo_attr_action: EmptyAttrAction::Drop,
            combo_edge_weight_threshold: None,
            combo_edge_aggregations: Vec::new(),
            include_edgeless_combo_nodes: true,
            combo_size_scale_domain: compose.size_scale_domain,
            combo_size_scale_range: compose.size_scale_range,
            combo_inner_graph_scale_factor: compose.inner_graph_scale_factor,
            non_serializable_datetime_format: Some(DEFAULT_DATETIME_FORMAT.to_string()),
            node_args: StyleOverrides::new(),
            edge_args: StyleOverrides::new(),
            combo_node_args: StyleOverrides::new(),
            combo_edge_args: StyleOverrides::new(),
        }
    }
}

impl PlotOptions {
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_weight_attr(mut self, weight_attr: impl Into<String>) -> Self {
        self.weight_attr = Some(weight_attr.into());
        self
    }

    pub fn with_combo_group_by(mut self, group_by: impl Into<GroupBy>) -> Self {
        self.combo_group_by = Some(group_by.into());
        self
    }

    pub fn with_empty_combo_attr_action(mut self, action: EmptyAttrAction) -> Self {
        self.empty_combo_attr_action = action;
        self
    }

    pub fn with_layout_seed(mut self, seed: u64) -> Self {
        self.layout_seed = seed;
        self
    }

    pub fn is_combo(&self) -> bool {
        self.combo_group_by
            .as_ref()
            .is_some_and(|g| !g.attrs().is_empty())
    }

    /// Partitioner settings for combo mode.
    pub fn combo_options(&self) -> Option<ComboOptions> {
        let group_by = self.combo_group_by.clone()?;
        Some(ComboOptions {
            group_by,
            weight_attr: self.weight_attr.clone(),
            weight_threshold: self.combo_edge_weight_threshold,
            aggregations: self.combo_edge_aggregations.clone(),
            empty_attr_action: self.empty_combo_attr_action,
            include_edgeless_groups: self.include_edgeless_combo_nodes,
            node_additional_attrs: self.combo_node_additional_attrs.clone(),
        })
    }

    pub fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            size_scale_domain: self.combo_size_scale_domain,
            size_scale_range: self.combo_size_scale_range,
            inner_graph_scale_factor: self.combo_inner_graph_scale_factor,
        }
    }
}
