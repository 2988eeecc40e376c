//! Circle marks for nodes, with optional halo rings and labels.

use crate::layer::Layer;
use crate::model::{Circle, Drawing, Label, Mark};
use crate::scale::{
    CATEGORY_PALETTE, DEFAULT_NODE_SIZE, MISSING_CATEGORY_COLOR, linear, size_to_r,
};
use crate::style::{NodeStyle, Paint, SizeEncoding};
use crate::{Error, Result};
use combograph_graphlib::{AttrValue, Attrs, Graph};
use combograph_layout::PositionMap;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct NodesLayer {
    pub name: String,
    pub style: NodeStyle,
}

impl Default for NodesLayer {
    fn default() -> Self {
        Self::new(NodeStyle::default())
    }
}

impl NodesLayer {
    pub fn new(style: NodeStyle) -> Self {
        Self {
            name: "nodes".to_string(),
            style,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn size_of(&self, attrs: &Attrs) -> f64 {
        let numeric = |field: &str| attrs.get(field).and_then(AttrValue::as_f64);
        match &self.style.size {
            SizeEncoding::Value(v) => *v,
            SizeEncoding::Field(field) => numeric(field).unwrap_or(DEFAULT_NODE_SIZE),
            SizeEncoding::Scaled {
                field,
                domain,
                range,
            } => numeric(field)
                .map(|v| linear(v, *domain, *range))
                .unwrap_or(DEFAULT_NODE_SIZE),
        }
    }

    fn label_of(&self, id: &str, attrs: &Attrs) -> Option<String> {
        let attr = self.style.label_attr.as_deref()?;
        match attrs.get(attr).and_then(AttrValue::to_key) {
            Some(text) => Some(text),
            None if attr == "id" => Some(id.to_string()),
            None => None,
        }
    }

    fn tooltip_of(&self, id: &str, attrs: &Attrs) -> Vec<(String, String)> {
        let mut out = vec![("id".to_string(), id.to_string())];
        for name in &self.style.tooltip_attrs {
            if let Some(v) = attrs.get(name) {
                out.push((name.clone(), v.to_string()));
            }
        }
        out
    }
}

/// Field-driven fills: distinct values in sorted order, cycling through the palette.
struct Fills<'a> {
    field: Option<&'a str>,
    fixed: &'a str,
    domain: Vec<String>,
}

impl<'a> Fills<'a> {
    fn fit(paint: &'a Paint, g: &Graph) -> Self {
        match paint {
            Paint::Value(color) => Self {
                field: None,
                fixed: color,
                domain: Vec::new(),
            },
            Paint::Field(field) => {
                let domain: BTreeSet<String> = g
                    .nodes_with_attrs()
                    .filter_map(|(_, attrs)| attrs.get(field).and_then(AttrValue::to_key))
                    .collect();
                Self {
                    field: Some(field.as_str()),
                    fixed: MISSING_CATEGORY_COLOR,
                    domain: domain.into_iter().collect(),
                }
            }
        }
    }

    fn color(&self, attrs: &Attrs) -> String {
        let Some(field) = self.field else {
            return self.fixed.to_string();
        };
        attrs
            .get(field)
            .and_then(AttrValue::to_key)
            .and_then(|key| self.domain.binary_search(&key).ok())
            .map(|idx| CATEGORY_PALETTE[idx % CATEGORY_PALETTE.len()].to_string())
            .unwrap_or_else(|| self.fixed.to_string())
    }
}

impl Layer for NodesLayer {
    fn draw(&self, graph: &Graph, pos: &PositionMap) -> Result<Option<Drawing>> {
        if graph.is_empty() {
            return Ok(None);
        }
        let style = &self.style;
        let fills = Fills::fit(&style.fill, graph);

        let mut halos = Vec::new();
        let mut circles = Vec::with_capacity(graph.node_count());
        let mut labels = Vec::new();
        for (id, attrs) in graph.nodes_with_attrs() {
            let p = pos.get(id).ok_or_else(|| Error::MissingPosition {
                node: id.to_string(),
            })?;
            let r = size_to_r(self.size_of(attrs));

            if let Some(offset) = style.halo_offset {
                halos.push(Circle {
                    id: id.to_string(),
                    x: p.x,
                    y: p.y,
                    r: r + offset + (style.halo_stroke_width / 2.0).floor(),
                    fill: None,
                    opacity: style.halo_opacity,
                    stroke: style.halo_stroke.clone(),
                    stroke_width: style.halo_stroke_width,
                    tooltip: Vec::new(),
                });
            }

            circles.push(Circle {
                id: id.to_string(),
                x: p.x,
                y: p.y,
                r,
                fill: Some(fills.color(attrs)),
                opacity: style.opacity,
                stroke: style.stroke.clone(),
                stroke_width: style.stroke_width,
                tooltip: self.tooltip_of(id, attrs),
            });

            if let Some(text) = self.label_of(id, attrs) {
                labels.push(Label {
                    id: id.to_string(),
                    x: p.x,
                    y: p.y - r - style.label_offset - style.halo_offset.unwrap_or(0.0),
                    text,
                    size: style.label_size,
                    color: style.label_color.clone(),
                });
            }
        }

        Ok(Some(
            Drawing::new(self.name.clone())
                .with_mark(Mark::Circles(halos))
                .with_mark(Mark::Circles(circles))
                .with_mark(Mark::Labels(labels)),
        ))
    }
}
