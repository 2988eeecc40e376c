//! Resolved drawing primitives. Coordinates are chart units with y pointing up.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawing {
    pub name: String,
    pub marks: Vec<Mark>,
}

impl Drawing {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            marks: Vec::new(),
        }
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        if !mark.is_empty() {
            self.marks.push(mark);
        }
        self
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.marks
            .iter()
            .filter_map(|m| match m {
                Mark::Circles(cs) => Some(cs),
                _ => None,
            })
            .flatten()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.marks
            .iter()
            .filter_map(|m| match m {
                Mark::Lines(ls) => Some(ls),
                _ => None,
            })
            .flatten()
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.marks
            .iter()
            .filter_map(|m| match m {
                Mark::Labels(ls) => Some(ls),
                _ => None,
            })
            .flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "items", rename_all = "snake_case")]
pub enum Mark {
    Circles(Vec<Circle>),
    Lines(Vec<Segment>),
    Labels(Vec<Label>),
}

impl Mark {
    pub fn is_empty(&self) -> bool {
        match self {
            Mark::Circles(v) => v.is_empty(),
            Mark::Lines(v) => v.is_empty(),
            Mark::Labels(v) => v.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    /// `None` draws an unfilled ring.
    pub fill: Option<String>,
    pub opacity: f64,
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tooltip: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub source: String,
    pub target: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: String,
    pub opacity: f64,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub size: f64,
    pub color: String,
}
