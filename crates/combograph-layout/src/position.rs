//! Positions and the position normaliser.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Node id to coordinate, in node order.
pub type PositionMap = IndexMap<String, Point>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormaliseOptions {
    /// Target interval for both axes, `(lo, hi)` with `lo <= hi`.
    pub range: (f64, f64),
    /// Multiplies every x after interpolation (usually canvas width / height).
    pub aspect_ratio: Option<f64>,
    /// Shrinks the range by this amount on both ends.
    pub padding: Option<f64>,
}

impl Default for NormaliseOptions {
    fn default() -> Self {
        Self {
            range: (-1.0, 1.0),
            aspect_ratio: None,
            padding: None,
        }
    }
}

impl NormaliseOptions {
    pub fn with_range(mut self, lo: f64, hi: f64) -> Self {
        self.range = (lo, hi);
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = Some(aspect_ratio);
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }
}

/// Maps every coordinate component into `opts.range`.
///
/// The source interval is `[-m, m]` when any component is negative and `[0, m]` otherwise, where
/// `m` is the largest absolute component. Both axes share it, so the layout keeps its proportions
/// and a non-negative layout stays anchored at the low end of the range. Values are clamped to
/// the range ends. When every component is zero each point lands on the range midpoint, so a
/// lone node sits in the middle of the range rather than on its upper end as `numpy.interp`
/// would place it.
pub fn normalise(pos: &PositionMap, opts: &NormaliseOptions) -> Result<PositionMap> {
    let (lo, hi) = opts.range;
    if !(lo <= hi) {
        return Err(Error::InvalidRange { lo, hi });
    }
    if pos.is_empty() {
        return Ok(PositionMap::new());
    }

    let (lo, hi) = match opts.padding {
        Some(p) if p != 0.0 => (lo + p, hi - p),
        _ => (lo, hi),
    };

    let components = || pos.values().flat_map(|p| [p.x, p.y]);
    let upper = components().map(f64::abs).fold(0.0_f64, f64::max);
    let lower = if components().any(|v| v < 0.0) {
        -upper
    } else {
        0.0
    };

    let map = |v: f64| interp(v, lower, upper, lo, hi);
    let aspect = opts.aspect_ratio.unwrap_or(1.0);

    Ok(pos
        .iter()
        .map(|(id, p)| (id.clone(), Point::new(map(p.x) * aspect, map(p.y))))
        .collect())
}

/// Clamped linear interpolation of `v` from `[x0, x1]` into `[y0, y1]`.
///
/// A degenerate source interval (`x1 <= x0`) maps everything to the midpoint of the target. This
/// is the one place it departs from `numpy.interp`, which answers `y1` there.
pub fn interp(v: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    if v.is_nan() {
        return v;
    }
    if x1 <= x0 {
        return (y0 + y1) / 2.0;
    }
    if v <= x0 {
        return y0;
    }
    if v >= x1 {
        return y1;
    }
    y0 + (v - x0) * (y1 - y0) / (x1 - x0)
}

/// Reads a position map from JSON: an object whose values are `[x, y]` arrays or `{x, y}`
/// objects.
pub fn positions_from_json(value: &serde_json::Value) -> Result<PositionMap> {
    let Some(obj) = value.as_object() else {
        return Err(Error::NotAMapping {
            found: json_kind(value).to_string(),
        });
    };

    let mut out = PositionMap::with_capacity(obj.len());
    for (id, v) in obj {
        let point = coordinate(v).ok_or_else(|| Error::InvalidCoordinate { id: id.clone() })?;
        out.insert(id.clone(), point);
    }
    Ok(out)
}

fn coordinate(v: &serde_json::Value) -> Option<Point> {
    match v {
        serde_json::Value::Array(xs) if xs.len() == 2 => {
            Some(Point::new(xs[0].as_f64()?, xs[1].as_f64()?))
        }
        serde_json::Value::Object(o) => {
            Some(Point::new(o.get("x")?.as_f64()?, o.get("y")?.as_f64()?))
        }
        _ => None,
    }
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
