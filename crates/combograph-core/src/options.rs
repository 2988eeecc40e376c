//! Option types for the graph builder and the combo partitioner.

use crate::error::{Error, Result};
use combograph_graphlib::Attrs;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which non-endpoint columns become edge attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeAttrSelection {
    #[default]
    All,
    Columns(Vec<String>),
}

impl EdgeAttrSelection {
    pub fn none() -> Self {
        Self::Columns(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub source: String,
    pub target: String,
    pub node_attrs: IndexMap<String, Attrs>,
    pub edge_attrs: EdgeAttrSelection,
    pub weight_attr: Option<String>,
    pub weight_threshold: Option<f64>,
    pub include_missing_attr_nodes: bool,
    pub drop_isolated: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            source: "source".to_string(),
            target: "target".to_string(),
            node_attrs: IndexMap::new(),
            edge_attrs: EdgeAttrSelection::All,
            weight_attr: None,
            weight_threshold: None,
            include_missing_attr_nodes: false,
            drop_isolated: false,
        }
    }
}

/// The node attribute(s) to group by. Only a single attribute is supported; the list form
/// exists so multi-level requests can be rejected with a clear error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GroupByRepr", into = "GroupByRepr")]
pub struct GroupBy(Vec<String>);

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum GroupByRepr {
    One(String),
    Many(Vec<String>),
}

impl From<GroupByRepr> for GroupBy {
    fn from(value: GroupByRepr) -> Self {
        match value {
            GroupByRepr::One(s) => GroupBy(vec![s]),
            GroupByRepr::Many(v) => GroupBy(v),
        }
    }
}

impl From<GroupBy> for GroupByRepr {
    fn from(value: GroupBy) -> Self {
        let mut attrs = value.0;
        if attrs.len() == 1 {
            GroupByRepr::One(attrs.remove(0))
        } else {
            GroupByRepr::Many(attrs)
        }
    }
}

impl GroupBy {
    pub fn attrs(&self) -> &[String] {
        &self.0
    }

    /// The single grouping attribute.
    pub fn single(&self) -> Result<&str> {
        match self.0.as_slice() {
            [] => Err(Error::EmptyGroupBy),
            [one] => Ok(one.as_str()),
            many => Err(Error::MultiAttributeGrouping {
                attrs: many.to_vec(),
            }),
        }
    }
}

impl From<&str> for GroupBy {
    fn from(value: &str) -> Self {
        GroupBy(vec![value.to_string()])
    }
}

impl From<String> for GroupBy {
    fn from(value: String) -> Self {
        GroupBy(vec![value])
    }
}

impl From<Vec<String>> for GroupBy {
    fn from(value: Vec<String>) -> Self {
        GroupBy(value)
    }
}

impl<const N: usize> From<[&str; N]> for GroupBy {
    fn from(value: [&str; N]) -> Self {
        GroupBy(value.iter().map(|s| s.to_string()).collect())
    }
}

/// What to do with nodes that lack the grouping attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyAttrAction {
    /// Remove the node and its edges.
    #[default]
    Drop,
    /// Collect all such nodes in one shared group.
    Group,
    /// Give each such node its own singleton group.
    Promote,
}

impl FromStr for EmptyAttrAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "drop" => Ok(Self::Drop),
            "group" => Ok(Self::Group),
            "promote" => Ok(Self::Promote),
            other => Err(Error::InvalidEmptyAttrAction {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for EmptyAttrAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Drop => "drop",
            Self::Group => "group",
            Self::Promote => "promote",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    Sum,
    Count,
    Mean,
    Min,
    Max,
}

impl FromStr for Reduction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sum" => Ok(Self::Sum),
            "count" => Ok(Self::Count),
            "mean" => Ok(Self::Mean),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            other => Err(Error::InvalidAggregation {
                name: other.to_string(),
            }),
        }
    }
}

impl Reduction {
    /// Reduces the numeric values of one inter-group pair. `edges` is the number of underlying
    /// edges, which is what `Count` reports regardless of the values.
    pub(crate) fn apply(self, values: &[f64], edges: usize) -> Option<f64> {
        match self {
            Reduction::Count => Some(edges as f64),
            Reduction::Sum => Some(values.iter().sum()),
            Reduction::Mean if values.is_empty() => None,
            Reduction::Mean => Some(values.iter().sum::<f64>() / values.len() as f64),
            Reduction::Min => values.iter().copied().reduce(f64::min),
            Reduction::Max => values.iter().copied().reduce(f64::max),
        }
    }
}

/// An extra attribute on inter-group edges: `reduction` over `source_attr` of the underlying
/// edges, stored as `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeAggregation {
    pub name: String,
    pub source_attr: String,
    pub reduction: Reduction,
}

impl EdgeAggregation {
    pub fn new(name: impl Into<String>, source_attr: impl Into<String>, reduction: Reduction) -> Self {
        Self {
            name: name.into(),
            source_attr: source_attr.into(),
            reduction,
        }
    }

    /// Parses `name=reduction(source_attr)`, e.g. `calls=count(id)`.
    pub fn parse(expr: &str) -> Result<Self> {
        let invalid = || Error::InvalidAggregation {
            name: expr.to_string(),
        };
        let (name, rest) = expr.split_once('=').ok_or_else(invalid)?;
        let (reduction, rest) = rest.split_once('(').ok_or_else(invalid)?;
        let source_attr = rest.strip_suffix(')').ok_or_else(invalid)?;
        let (name, source_attr) = (name.trim(), source_attr.trim());
        if name.is_empty() || source_attr.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(name, source_attr, reduction.trim().parse()?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboOptions {
    pub group_by: GroupBy,
    /// Edge attribute summed into inter-group weights. Unset means edges are counted.
    pub weight_attr: Option<String>,
    /// Inter-group edges whose aggregated weight is below this are dropped.
    pub weight_threshold: Option<f64>,
    pub aggregations: Vec<EdgeAggregation>,
    pub empty_attr_action: EmptyAttrAction,
    /// Keep groups with no inter-group edges as isolated inter nodes.
    pub include_edgeless_groups: bool,
    /// Extra attributes for inter nodes, keyed by group value.
    pub node_additional_attrs: IndexMap<String, Attrs>,
}

impl Default for ComboOptions {
    fn default() -> Self {
        Self {
            group_by: GroupBy(Vec::new()),
            weight_attr: None,
            weight_threshold: None,
            aggregations: Vec::new(),
            empty_attr_action: EmptyAttrAction::Drop,
            include_edgeless_groups: true,
            node_additional_attrs: IndexMap::new(),
        }
    }
}

impl ComboOptions {
    pub fn new(group_by: impl Into<GroupBy>) -> Self {
        Self {
            group_by: group_by.into(),
            ..Self::default()
        }
    }

    pub fn with_weight_attr(mut self, weight_attr: impl Into<String>) -> Self {
        self.weight_attr = Some(weight_attr.into());
        self
    }

    pub fn with_weight_threshold(mut self, threshold: f64) -> Self {
        self.weight_threshold = Some(threshold);
        self
    }

    pub fn with_empty_attr_action(mut self, action: EmptyAttrAction) -> Self {
        self.empty_attr_action = action;
        self
    }

    pub fn with_edgeless_groups(mut self, include: bool) -> Self {
        self.include_edgeless_groups = include;
        self
    }

    pub fn with_aggregation(mut self, aggregation: EdgeAggregation) -> Self {
        self.aggregations.push(aggregation);
        self
    }

    pub fn with_node_attrs(mut self, group: impl Into<String>, attrs: Attrs) -> Self {
        self.node_additional_attrs.insert(group.into(), attrs);
        self
    }

    /// Name of the aggregated weight attribute on inter-group edges.
    pub fn aggregate_weight_attr(&self) -> &str {
        self.weight_attr.as_deref().unwrap_or("weight")
    }
}
