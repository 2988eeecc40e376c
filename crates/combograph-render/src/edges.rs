//! Straight line marks for edges.

use crate::layer::Layer;
use crate::model::{Drawing, Mark, Segment};
use crate::scale::ZeroBased;
use crate::style::{Channel, EdgeStyle};
use crate::{Error, Result};
use combograph_graphlib::{AttrValue, Graph};
use combograph_layout::{Point, PositionMap};

#[derive(Debug, Clone, PartialEq)]
pub struct EdgesLayer {
    pub name: String,
    pub style: EdgeStyle,
}

impl Default for EdgesLayer {
    fn default() -> Self {
        Self::new(EdgeStyle::default())
    }
}

impl EdgesLayer {
    pub fn new(style: EdgeStyle) -> Self {
        Self {
            name: "edges".to_string(),
            style,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

enum Resolved<'a> {
    Fixed(f64),
    Scaled(&'a str, ZeroBased),
}

impl<'a> Resolved<'a> {
    fn fit(channel: &'a Channel, g: &Graph) -> Self {
        match channel {
            Channel::Value(v) => Self::Fixed(*v),
            Channel::Scaled { field, range } => {
                let values = g
                    .edges()
                    .filter_map(|e| e.attr(field).and_then(AttrValue::as_f64));
                Self::Scaled(field, ZeroBased::fit(values, *range))
            }
        }
    }

    fn value(&self, v: Option<&AttrValue>) -> f64 {
        match self {
            Self::Fixed(x) => *x,
            Self::Scaled(_, scale) => scale.apply(v.and_then(AttrValue::as_f64)),
        }
    }

    fn field(&self) -> Option<&'a str> {
        match self {
            Self::Fixed(_) => None,
            Self::Scaled(field, _) => Some(*field),
        }
    }
}

impl Layer for EdgesLayer {
    fn draw(&self, graph: &Graph, pos: &PositionMap) -> Result<Option<Drawing>> {
        if graph.edge_count() == 0 {
            return Ok(None);
        }
        let opacity_channel = self.style.resolved_opacity();
        let width_channel = self.style.resolved_stroke_width();
        let opacity = Resolved::fit(&opacity_channel, graph);
        let width = Resolved::fit(&width_channel, graph);

        let lookup = |id: &str| -> Result<Point> {
            pos.get(id).copied().ok_or_else(|| Error::MissingPosition {
                node: id.to_string(),
            })
        };

        let mut segments = Vec::with_capacity(graph.edge_count());
        for e in graph.edges() {
            let a = lookup(e.source)?;
            let b = lookup(e.target)?;
            segments.push(Segment {
                source: e.source.to_string(),
                target: e.target.to_string(),
                x1: a.x,
                y1: a.y,
                x2: b.x,
                y2: b.y,
                color: self.style.color.clone(),
                opacity: opacity.value(opacity.field().and_then(|f| e.attr(f))),
                stroke_width: width.value(width.field().and_then(|f| e.attr(f))),
            });
        }

        Ok(Some(
            Drawing::new(self.name.clone()).with_mark(Mark::Lines(segments)),
        ))
    }
}
