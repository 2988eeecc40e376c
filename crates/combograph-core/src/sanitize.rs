//! Conversion of temporal node attributes into chart-safe strings.
//!
//! Chart specs are plain JSON, so dates, datetimes and durations have to become strings before a
//! graph is drawn.

use crate::error::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use combograph_graphlib::{AttrValue, Graph};
use std::fmt::Write as _;

/// Default strftime-style format for dates and datetimes.
pub const DEFAULT_DATETIME_FORMAT: &str = "%d %b %Y";

/// Names of node attributes holding at least one temporal value, in first-seen order.
pub fn temporal_node_attrs(g: &Graph) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for (_, attrs) in g.nodes_with_attrs() {
        for (name, value) in attrs {
            if value.is_temporal() && !out.contains(name) {
                out.push(name.clone());
            }
        }
    }
    out
}

/// Returns a copy of `g` whose temporal node attributes are formatted as strings.
///
/// Dates and datetimes use `format`; durations use their ISO 8601 rendering. Non-temporal values
/// (including nulls) are left alone. Without a format, any temporal value is an error naming the
/// offending attributes.
pub fn sanitize_temporal(g: &Graph, format: Option<&str>) -> Result<Graph> {
    let affected = temporal_node_attrs(g);
    if affected.is_empty() {
        return Ok(g.clone());
    }
    let Some(format) = format else {
        return Err(Error::NonSerializableTemporal { attrs: affected });
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|i| matches!(i, Item::Error)) {
        return Err(Error::InvalidDatetimeFormat {
            format: format.to_string(),
        });
    }

    let mut out = g.clone();
    for (_, attrs) in out.nodes_with_attrs_mut() {
        for name in &affected {
            let Some(value) = attrs.get_mut(name) else {
                continue;
            };
            let formatted = match value {
                AttrValue::Date(d) => render(d.format_with_items(items.iter())),
                AttrValue::DateTime(dt) => render(dt.format_with_items(items.iter())),
                AttrValue::Duration(td) => render(td),
                _ => continue,
            };
            let formatted = formatted.ok_or_else(|| Error::InvalidDatetimeFormat {
                format: format.to_string(),
            })?;
            *value = AttrValue::Str(formatted);
        }
    }
    tracing::debug!(attrs = ?affected, format, "formatted temporal node attributes");
    Ok(out)
}

// chrono reports specifiers the value cannot satisfy (e.g. `%H` on a date) as a fmt error.
fn render(v: impl std::fmt::Display) -> Option<String> {
    let mut s = String::new();
    write!(s, "{v}").ok()?;
    Some(s)
}
