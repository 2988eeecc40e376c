//! Node and edge styling. Every style deserializes from partial JSON with defaults filled in.

use crate::scale::DEFAULT_NODE_SIZE;
use serde::{Deserialize, Serialize};

/// Area-like mark size. Radii are derived as `sqrt(size) / 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeEncoding {
    Value(f64),
    /// Read the size straight from a numeric node attribute.
    Field(String),
    /// Linearly map a numeric node attribute from `domain` into `range`.
    Scaled {
        field: String,
        domain: (f64, f64),
        range: (f64, f64),
    },
}

impl Default for SizeEncoding {
    fn default() -> Self {
        Self::Value(DEFAULT_NODE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Paint {
    Value(String),
    /// Colour nodes by a categorical attribute through the category palette.
    Field(String),
}

impl Default for Paint {
    fn default() -> Self {
        Self::Value("#000".to_string())
    }
}

/// Numeric edge channel (opacity or stroke width).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Value(f64),
    /// Zero-anchored linear scale of an edge attribute into `range`.
    Scaled { field: String, range: (f64, f64) },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStyle {
    pub size: SizeEncoding,
    pub fill: Paint,
    pub opacity: f64,
    pub stroke: String,
    pub stroke_width: f64,
    /// Gap between the node and its halo ring. No halo when unset.
    pub halo_offset: Option<f64>,
    pub halo_opacity: f64,
    pub halo_stroke: String,
    pub halo_stroke_width: f64,
    /// Node attribute drawn as a label under the node.
    pub label_attr: Option<String>,
    pub label_offset: f64,
    pub label_size: f64,
    pub label_color: String,
    /// Node attributes listed in each circle's tooltip after the id.
    pub tooltip_attrs: Vec<String>,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            size: SizeEncoding::default(),
            fill: Paint::default(),
            opacity: 1.0,
            stroke: "#565656".to_string(),
            stroke_width: 0.0,
            halo_offset: None,
            halo_opacity: 1.0,
            halo_stroke: "#343434".to_string(),
            halo_stroke_width: 2.0,
            label_attr: None,
            label_offset: 6.0,
            label_size: 10.0,
            label_color: "black".to_string(),
            tooltip_attrs: Vec::new(),
        }
    }
}

impl NodeStyle {
    pub fn with_size(mut self, size: SizeEncoding) -> Self {
        self.size = size;
        self
    }

    pub fn with_fill(mut self, fill: Paint) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_halo(mut self, offset: f64) -> Self {
        self.halo_offset = Some(offset);
        self
    }

    pub fn with_label(mut self, attr: impl Into<String>) -> Self {
        self.label_attr = Some(attr.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeStyle {
    /// Attribute the default opacity and width scales read.
    pub weight_attr: Option<String>,
    pub color: String,
    pub opacity: Option<Channel>,
    pub stroke_width: Option<Channel>,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            weight_attr: Some("weight".to_string()),
            color: "#606060".to_string(),
            opacity: None,
            stroke_width: None,
        }
    }
}

impl EdgeStyle {
    pub fn with_weight_attr(mut self, attr: Option<&str>) -> Self {
        self.weight_attr = attr.map(str::to_string);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Opacity channel after defaults: weight-scaled into `[0.3, 1]`, or fully opaque.
    pub fn resolved_opacity(&self) -> Channel {
        self.opacity
            .clone()
            .unwrap_or_else(|| self.weight_channel((0.3, 1.0), 1.0))
    }

    /// Width channel after defaults: weight-scaled into `[0.1, 5]`, or `2`.
    pub fn resolved_stroke_width(&self) -> Channel {
        self.stroke_width
            .clone()
            .unwrap_or_else(|| self.weight_channel((0.1, 5.0), 2.0))
    }

    fn weight_channel(&self, range: (f64, f64), fallback: f64) -> Channel {
        match &self.weight_attr {
            Some(field) => Channel::Scaled {
                field: field.clone(),
                range,
            },
            None => Channel::Value(fallback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let style: NodeStyle = serde_json::from_value(serde_json::json!({
            "size": {"field": "score"},
            "fill": {"field": "team"},
            "halo_offset": 3,
        }))
        .unwrap();
        assert_eq!(style.size, SizeEncoding::Field("score".to_string()));
        assert_eq!(style.fill, Paint::Field("team".to_string()));
        assert_eq!(style.halo_offset, Some(3.0));
        assert_eq!(style.stroke, "#565656");
        assert_eq!(style.label_offset, 6.0);
    }

    #[test]
    fn edge_channels_default_to_weight_scales() {
        let style = EdgeStyle::default();
        assert_eq!(
            style.resolved_opacity(),
            Channel::Scaled {
                field: "weight".to_string(),
                range: (0.3, 1.0)
            }
        );
        let unweighted = EdgeStyle::default().with_weight_attr(None);
        assert_eq!(unweighted.resolved_opacity(), Channel::Value(1.0));
        assert_eq!(unweighted.resolved_stroke_width(), Channel::Value(2.0));
    }
}
