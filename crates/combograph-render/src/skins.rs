//! Stock layer styles for flat and combo charts.

use crate::combo::COMBO_SIZE_ATTR_NAME;
use crate::edges::EdgesLayer;
use crate::nodes::NodesLayer;
use crate::style::{Channel, EdgeStyle, NodeStyle, Paint, SizeEncoding};

/// Nodes of a flat chart.
pub fn default_nodes_layer() -> NodesLayer {
    let mut style = NodeStyle::default().with_size(SizeEncoding::Value(100.0));
    style.label_offset = 12.0;
    NodesLayer::new(style)
}

/// Nodes drawn inside a super-node: small and black.
pub fn default_combo_member_nodes_layer() -> NodesLayer {
    let style = NodeStyle::default()
        .with_size(SizeEncoding::Value(50.0))
        .with_fill(Paint::Value("black".to_string()));
    NodesLayer::new(style)
}

pub fn default_intra_combo_edges_layer(weight_attr: Option<&str>) -> EdgesLayer {
    let mut style = EdgeStyle::default()
        .with_weight_attr(weight_attr)
        .with_color("black");
    match weight_attr {
        Some(field) => {
            style.stroke_width = Some(Channel::Scaled {
                field: field.to_string(),
                range: (0.3, 1.0),
            });
            style.opacity = Some(Channel::Scaled {
                field: field.to_string(),
                range: (0.5, 1.0),
            });
        }
        None => style.stroke_width = Some(Channel::Value(1.0)),
    }
    EdgesLayer::new(style)
}

pub fn default_combo_edges_layer(weight_attr: &str) -> EdgesLayer {
    let mut style = EdgeStyle::default()
        .with_weight_attr(Some(weight_attr))
        .with_color("#606060");
    style.stroke_width = Some(Channel::Scaled {
        field: weight_attr.to_string(),
        range: (0.1, 10.0),
    });
    EdgesLayer::new(style).with_name("combo_edges")
}

pub fn default_combo_nodes_layer() -> NodesLayer {
    let mut style = NodeStyle::default()
        .with_size(SizeEncoding::Field(COMBO_SIZE_ATTR_NAME.to_string()))
        .with_fill(Paint::Value("#d9d9d9".to_string()));
    style.stroke = "#565656".to_string();
    style.stroke_width = 3.0;
    style.label_offset = 12.0;
    NodesLayer::new(style).with_name("combo_nodes")
}
